//! Differential-drive robot kinematics.

use std::fmt;

use thiserror::Error;

use super::{Angle, ConfigError, HasCollision, Position, Shape};

/// Percentage limit of a wheel command, applies in both directions.
pub const MAX_PERCENT: f64 = 100.0;

/// Angular velocities below this magnitude (rad/s) are integrated as straight-line motion.
pub const STRAIGHT_LINE_OMEGA: f64 = 1e-12;

#[derive(Error, Debug, PartialEq)]
pub enum UsageError {
    #[error("time step must not be negative, got {0}")]
    NegativeTimeStep(f64),
    #[error("{wheel:?} wheel percentage {value} is outside [-100, 100]")]
    PercentOutOfRange { wheel: Wheel, value: f64 },
    #[error("speed {speed} deg/s is outside [0, {max}]")]
    SpeedOutOfRange { speed: f64, max: f64 },
    #[error("{0} is not finite")]
    NonFinite(&'static str),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Wheel {
    Left,
    Right,
}

/// Position and heading of the robot center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RobotPose {
    position: Position,
    heading: Angle,
}

impl RobotPose {
    /// The heading is wrapped into `[-PI, PI)`.
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            position: Position::new(x, y),
            heading: Angle::new(theta).wrapped(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Angle {
        self.heading
    }

    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> f64 {
        self.position.y()
    }

    pub fn theta(&self) -> f64 {
        self.heading.into()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.theta().is_finite()
    }

    pub fn with_position(&self, position: Position) -> Self {
        Self { position, ..*self }
    }

    /// Point on the robot's center line, `offset` ahead of the center.
    pub fn ahead(&self, offset: f64) -> Position {
        self.position + Position::new(offset, 0.0).rotate_vector(self.heading)
    }

    pub fn body(&self, config: &RobotConfig) -> RobotBody {
        RobotBody {
            position: self.position,
            radius: config.body_radius,
        }
    }
}

impl From<RobotPose> for (f64, f64, f64) {
    fn from(value: RobotPose) -> Self {
        (value.x(), value.y(), value.theta())
    }
}

impl fmt::Display for RobotPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x: {:.2}, y: {:.2}, θ: {:.3} rad)",
            self.x(),
            self.y(),
            self.theta()
        )
    }
}

/// Circular footprint of the robot body.
pub struct RobotBody {
    position: Position,
    radius: f64,
}

impl HasCollision for RobotBody {
    fn shape(&self) -> Shape {
        Shape::Circle {
            position: self.position,
            radius: self.radius,
        }
    }
}

/// Wheel speed percentages, each in `[-100, 100]`. Positive values drive the wheel forward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Command {
    left: f64,
    right: f64,
}

impl Command {
    pub const STOP: Command = Command {
        left: 0.0,
        right: 0.0,
    };

    pub fn new(left_pct: f64, right_pct: f64) -> Result<Self, UsageError> {
        Ok(Self {
            left: checked_percent(Wheel::Left, left_pct)?,
            right: checked_percent(Wheel::Right, right_pct)?,
        })
    }

    pub fn left_pct(&self) -> f64 {
        self.left
    }

    pub fn right_pct(&self) -> f64 {
        self.right
    }
}

fn checked_percent(wheel: Wheel, value: f64) -> Result<f64, UsageError> {
    if !value.is_finite() {
        return Err(UsageError::NonFinite(match wheel {
            Wheel::Left => "left wheel percentage",
            Wheel::Right => "right wheel percentage",
        }));
    }
    if value.abs() > MAX_PERCENT {
        return Err(UsageError::PercentOutOfRange { wheel, value });
    }
    Ok(value)
}

/// All lengths in centimeters.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotConfig {
    pub track_width: f64,
    pub wheel_radius: f64,
    /// Wheel speed at 100 %, in degrees per second.
    pub max_wheel_dps: f64,
    pub body_radius: f64,
}

impl RobotConfig {
    pub const GOPIGO3: RobotConfig = RobotConfig {
        track_width: 11.5,
        wheel_radius: 3.25,
        max_wheel_dps: 300.0,
        body_radius: 8.0,
    };

    /// Checks that all dimensions and the top speed are finite and positive. The body radius may
    /// be zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let problem = if !positive(self.track_width) {
            "track width must be finite and positive"
        } else if !positive(self.wheel_radius) {
            "wheel radius must be finite and positive"
        } else if !positive(self.max_wheel_dps) {
            "maximum wheel speed must be finite and positive"
        } else if !(self.body_radius.is_finite() && self.body_radius >= 0.0) {
            "body radius must be finite and not negative"
        } else {
            return Ok(());
        };
        Err(ConfigError::InvalidParameter(problem.to_owned()))
    }

    /// Linear wheel speed at 100 %, in cm/s.
    pub fn max_wheel_speed(&self) -> f64 {
        self.max_wheel_dps / 360.0 * std::f64::consts::TAU * self.wheel_radius
    }

    pub fn wheel_speed(&self, percent: f64) -> f64 {
        percent / MAX_PERCENT * self.max_wheel_speed()
    }

    /// Linear (cm/s) and angular (rad/s) velocity of the body.
    pub fn body_velocity(&self, command: Command) -> (f64, f64) {
        let v_left = self.wheel_speed(command.left);
        let v_right = self.wheel_speed(command.right);
        (
            (v_left + v_right) / 2.0,
            (v_right - v_left) / self.track_width,
        )
    }

    /// Integrates the pose over `dt` seconds with both wheels at constant speed.
    ///
    /// A zero `dt` or a stopped robot returns `pose` unchanged. Curved motion is integrated exactly along the arc
    /// around the instantaneous center of rotation.
    pub fn advance(
        &self,
        pose: RobotPose,
        left_pct: f64,
        right_pct: f64,
        dt: f64,
    ) -> Result<RobotPose, UsageError> {
        let command = Command::new(left_pct, right_pct)?;
        if !dt.is_finite() {
            return Err(UsageError::NonFinite("time step"));
        }
        if dt < 0.0 {
            return Err(UsageError::NegativeTimeStep(dt));
        }
        if dt == 0.0 || command == Command::STOP {
            return Ok(pose);
        }

        let (v, omega) = self.body_velocity(command);
        let theta = pose.theta();

        let advanced = if omega.abs() < STRAIGHT_LINE_OMEGA {
            RobotPose {
                position: Position::new(
                    pose.x() + v * dt * theta.cos(),
                    pose.y() + v * dt * theta.sin(),
                ),
                heading: pose.heading,
            }
        } else {
            // Chord of the arc of radius v / omega, pointing halfway between both headings.
            let half_turn = omega * dt / 2.0;
            let chord = 2.0 * v * half_turn.sin() / omega;
            let chord_heading = theta + half_turn;
            RobotPose {
                position: Position::new(
                    pose.x() + chord * chord_heading.cos(),
                    pose.y() + chord * chord_heading.sin(),
                ),
                heading: (pose.heading + Angle::new(omega * dt)).wrapped(),
            }
        };

        if advanced.is_finite() {
            Ok(advanced)
        } else {
            Err(UsageError::NonFinite("advanced pose"))
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self::GOPIGO3
    }
}
