//! Advancing the simulation in step with Bevy's clock.
//!
//! Every update integrates the active wheel command over the elapsed frame time. Driving into a
//! pillar is reported but does not stop the robot.

use bevy::prelude::*;

use crate::resource::RobotRes;

pub struct Simulator;

impl Plugin for Simulator {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, simulate);
    }
}

fn simulate(time: Res<Time>, mut robot: ResMut<RobotRes>, mut was_colliding: Local<bool>) {
    if let Err(e) = robot.step(time.delta_seconds_f64()) {
        warn!("simulation step failed: {e}");
        return;
    }

    let colliding = robot.is_colliding();
    if colliding && !*was_colliding {
        warn!("robot collides with a pillar at {}", robot.pose());
    }
    *was_colliding = colliding;
}
