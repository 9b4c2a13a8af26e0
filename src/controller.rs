//! Controller steering the robot through a gate of colored pillars.
//!
//! Each update the controller grabs a camera frame, locates the green (left) and orange (right)
//! pillars by their HSV ranges and steers towards the middle between them. Once the mission time
//! is up, the robot is stopped and the app exits.

use bevy::{app::AppExit, prelude::*};

use crate::{
    domain::{Color, Frame, FRAME_WIDTH},
    facade::Drive,
    resource::RobotRes,
};

/// Wheel percentage when heading straight at the target.
const BASE_PCT: f64 = 60.0;
/// Wheel percentage added and subtracted at full steering error.
const STEER_PCT: f64 = 40.0;
/// Assumed offset of the gate center from a single visible pillar, in pixels.
const PILLAR_OFFSET: f64 = FRAME_WIDTH as f64 / 4.0;

#[derive(Resource, Clone, Debug)]
pub struct Mission {
    /// Simulated seconds before the robot is stopped.
    pub time_limit: f64,
}

impl Default for Mission {
    fn default() -> Self {
        Self { time_limit: 10.0 }
    }
}

pub struct Controller;

impl Plugin for Controller {
    fn build(&self, app: &mut App) {
        app.init_resource::<Mission>().add_systems(Update, control);
    }
}

/// Wheel percentages steering towards the gate seen in `frame`. Without any pillar in sight the
/// robot drives straight.
pub fn gate_command(frame: &Frame) -> (f64, f64) {
    let left = frame.centroid_x(Color::Green.hsv_range());
    let right = frame.centroid_x(Color::Orange.hsv_range());
    let target = match (left, right) {
        (Some(l), Some(r)) => (l + r) / 2.0,
        (Some(l), None) => l + PILLAR_OFFSET,
        (None, Some(r)) => r - PILLAR_OFFSET,
        (None, None) => return (BASE_PCT, BASE_PCT),
    };

    let center = FRAME_WIDTH as f64 / 2.0;
    let error = ((target - center) / center).clamp(-1.0, 1.0);
    (BASE_PCT + STEER_PCT * error, BASE_PCT - STEER_PCT * error)
}

fn control(
    mission: Res<Mission>,
    mut robot: ResMut<RobotRes>,
    mut exit: EventWriter<AppExit>,
    mut logged_second: Local<u64>,
) {
    let time = robot.sim().time();

    if time >= mission.time_limit {
        if let Err(e) = robot.stop() {
            error!("failed to stop robot: {e}");
        }
        info!("mission over after {time:.2}s at {}", robot.pose());
        exit.send(AppExit);
        return;
    }

    if time as u64 >= *logged_second {
        info!("t={time:.2}s pose {}", robot.pose());
        *logged_second = time as u64 + 1;
    }

    let frame = robot.capture();
    let (left, right) = gate_command(&frame);
    if let Err(e) = robot.steer(left, right) {
        warn!("steering rejected: {e}");
    }
}
