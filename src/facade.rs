//! Robot-style driving API on top of the step loop.
//!
//! Control code written against [`Drive`] does not care whether it talks to real hardware or to
//! [`SimulatedRobot`]. Speeds are wheel speeds in degrees per second, steering percentages are
//! relative to the current speed.

use crate::domain::{Command, Frame, RobotPose, UsageError, Wheel, MAX_PERCENT};
use crate::simulation::Simulation;

/// Wheel speed used until [`Drive::set_speed`] is called, in degrees per second.
pub const DEFAULT_SPEED: f64 = 300.0;

pub trait Drive {
    fn set_speed(&mut self, dps: f64) -> Result<(), UsageError>;
    fn speed(&self) -> f64;

    /// Sets each wheel to a percentage of the current speed. Negative values drive backwards.
    fn steer(&mut self, left_pct: f64, right_pct: f64) -> Result<(), UsageError>;

    /// Sets a single wheel speed in degrees per second, leaving the other wheel as is.
    fn set_wheel_dps(&mut self, wheel: Wheel, dps: f64) -> Result<(), UsageError>;

    fn capture(&mut self) -> Frame;

    fn forward(&mut self) -> Result<(), UsageError> {
        self.steer(MAX_PERCENT, MAX_PERCENT)
    }

    fn backward(&mut self) -> Result<(), UsageError> {
        self.steer(-MAX_PERCENT, -MAX_PERCENT)
    }

    /// Turns counterclockwise in place.
    fn left(&mut self) -> Result<(), UsageError> {
        self.steer(-MAX_PERCENT, MAX_PERCENT)
    }

    /// Turns clockwise in place.
    fn right(&mut self) -> Result<(), UsageError> {
        self.steer(MAX_PERCENT, -MAX_PERCENT)
    }

    fn stop(&mut self) -> Result<(), UsageError> {
        self.steer(0.0, 0.0)
    }
}

#[derive(Clone, Debug)]
pub struct SimulatedRobot {
    sim: Simulation,
    speed: f64,
}

impl SimulatedRobot {
    pub fn new(sim: Simulation) -> Self {
        let speed = DEFAULT_SPEED.min(sim_max_dps(&sim));
        Self { sim, speed }
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn pose(&self) -> RobotPose {
        self.sim.pose()
    }

    pub fn step(&mut self, dt: f64) -> Result<RobotPose, UsageError> {
        self.sim.step(dt)
    }

    pub fn reset(&mut self, x: f64, y: f64, theta: f64) -> Result<(), UsageError> {
        self.sim.reset(x, y, theta)
    }

    pub fn is_colliding(&self) -> bool {
        self.sim.is_colliding()
    }

    fn dps_to_percent(&self, dps: f64) -> f64 {
        dps / sim_max_dps(&self.sim) * MAX_PERCENT
    }
}

fn sim_max_dps(sim: &Simulation) -> f64 {
    sim.robot_config().max_wheel_dps
}

impl Drive for SimulatedRobot {
    fn set_speed(&mut self, dps: f64) -> Result<(), UsageError> {
        if !dps.is_finite() {
            return Err(UsageError::NonFinite("speed"));
        }
        let max = sim_max_dps(&self.sim);
        if !(0.0..=max).contains(&dps) {
            return Err(UsageError::SpeedOutOfRange { speed: dps, max });
        }
        self.speed = dps;
        Ok(())
    }

    fn speed(&self) -> f64 {
        self.speed
    }

    fn steer(&mut self, left_pct: f64, right_pct: f64) -> Result<(), UsageError> {
        let command = Command::new(left_pct, right_pct)?;
        let scale = self.dps_to_percent(self.speed) / MAX_PERCENT;
        self.sim
            .set_command(command.left_pct() * scale, command.right_pct() * scale)
    }

    fn set_wheel_dps(&mut self, wheel: Wheel, dps: f64) -> Result<(), UsageError> {
        let percent = self.dps_to_percent(dps);
        let current = self.sim.command();
        match wheel {
            Wheel::Left => self.sim.set_command(percent, current.right_pct()),
            Wheel::Right => self.sim.set_command(current.left_pct(), percent),
        }
    }

    fn capture(&mut self) -> Frame {
        self.sim.capture()
    }
}
