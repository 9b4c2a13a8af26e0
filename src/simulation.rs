//! Step loop tying the world, the kinematics and the camera together.
//!
//! The simulation owns the robot pose and the active wheel command. Every call to
//! [`Simulation::step`] integrates the command over the given time span, frames are rendered on
//! demand by [`Simulation::capture`]. There is no hidden clock: the same world, commands and time
//! steps always produce the same poses and frames.

use bevy::log::{debug, info, warn};
use thiserror::Error;

use crate::domain::{
    Camera, Command, ConfigError, Frame, RobotConfig, RobotPose, UsageError, World,
};

#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Usage(#[from] UsageError),
}

/// Pose of the robot at a point in simulated time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseSample {
    pub pose: RobotPose,
    pub time: f64,
}

#[derive(Clone, Debug)]
pub struct Simulation {
    world: World,
    robot: RobotConfig,
    camera: Camera,
    pose: RobotPose,
    command: Command,
    time: f64,
    history: Vec<PoseSample>,
}

impl Simulation {
    /// Starts at the origin, facing along the positive x-axis, with the motors stopped.
    pub fn new(world: World) -> Self {
        Self {
            world,
            robot: RobotConfig::default(),
            camera: Camera::default(),
            pose: RobotPose::default(),
            command: Command::STOP,
            time: 0.0,
            history: vec![],
        }
    }

    pub fn from_scenario(name: &str) -> Result<Self, SimulationError> {
        Ok(Self::new(World::builder().scenario_name(name).build()?))
    }

    /// Seeded random world, reproducible from `seed`.
    pub fn from_seed(seed: u64) -> Result<Self, SimulationError> {
        Ok(Self::new(World::builder().seed(seed).build()?))
    }

    pub fn with_robot_config(self, robot: RobotConfig) -> Result<Self, SimulationError> {
        robot.validate()?;
        Ok(Self { robot, ..self })
    }

    pub fn with_camera(self, camera: Camera) -> Self {
        Self { camera, ..self }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn robot_config(&self) -> &RobotConfig {
        &self.robot
    }

    pub fn pose(&self) -> RobotPose {
        self.pose
    }

    pub fn get_pose(&self) -> (f64, f64, f64) {
        self.pose.into()
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// Simulated seconds since construction or the last reset.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Poses before each step, oldest first.
    pub fn history(&self) -> &[PoseSample] {
        &self.history
    }

    /// Sets the wheel percentages. A rejected command leaves the active one in place.
    pub fn set_command(&mut self, left_pct: f64, right_pct: f64) -> Result<(), UsageError> {
        match Command::new(left_pct, right_pct) {
            Ok(command) => {
                self.command = command;
                Ok(())
            }
            Err(e) => {
                warn!("rejected wheel command ({left_pct}, {right_pct}): {e}");
                Err(e)
            }
        }
    }

    /// Advances the simulation by `dt` seconds. The robot is kept inside the world bounds.
    pub fn step(&mut self, dt: f64) -> Result<RobotPose, UsageError> {
        let advanced = self.robot.advance(
            self.pose,
            self.command.left_pct(),
            self.command.right_pct(),
            dt,
        )?;
        let clamped = self.world.bounds().clamp(advanced.position());

        self.history.push(PoseSample {
            pose: self.pose,
            time: self.time,
        });
        self.pose = advanced.with_position(clamped);
        self.time += dt;
        debug!("t={:.3}s pose {}", self.time, self.pose);

        Ok(self.pose)
    }

    /// Renders the camera view from the current pose.
    pub fn capture(&self) -> Frame {
        self.camera.render(&self.world, self.pose)
    }

    /// Places the robot directly, stops the motors and clears time and history.
    pub fn reset(&mut self, x: f64, y: f64, theta: f64) -> Result<(), UsageError> {
        let pose = RobotPose::new(x, y, theta);
        if !pose.is_finite() {
            return Err(UsageError::NonFinite("reset pose"));
        }
        info!("resetting robot to {pose}");
        self.pose = pose;
        self.command = Command::STOP;
        self.time = 0.0;
        self.history.clear();
        Ok(())
    }

    /// Whether the robot body overlaps a pillar. Collisions do not stop the robot.
    pub fn is_colliding(&self) -> bool {
        self.world.has_collision(&self.pose.body(&self.robot))
    }
}
