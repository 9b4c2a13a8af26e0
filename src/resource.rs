//! The resource module wraps the simulated robot for use with Bevy.

use std::ops::{Deref, DerefMut};

use bevy::ecs::system::Resource;

use crate::facade::SimulatedRobot;

#[derive(Resource)]
pub struct RobotRes(SimulatedRobot);

impl Deref for RobotRes {
    type Target = SimulatedRobot;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RobotRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<SimulatedRobot> for RobotRes {
    fn from(value: SimulatedRobot) -> Self {
        Self(value)
    }
}
