//! The domain module encapsulates the simulation engine: the world of colored pillars, the
//! differential-drive kinematics and the synthetic camera.
//!
//! Everything in here is a pure function of explicit inputs. The stateful step loop and the Bevy
//! integration live outside of this module.

mod basis;
mod camera;
mod collision;
mod frame;
mod palette;
mod robot;
mod scenario;
mod world;

pub use basis::{Angle, Position};
pub use camera::{Camera, CameraConfig, Projection};
pub use collision::{HasCollision, Shape};
pub use frame::{Frame, PixelRect, FRAME_CHANNELS, FRAME_HEIGHT, FRAME_WIDTH};
pub use palette::{bgr_to_hsv, Bgr, Color, Hsv, HsvRange};
pub use robot::{
    Command, RobotBody, RobotConfig, RobotPose, UsageError, Wheel, MAX_PERCENT,
    STRAIGHT_LINE_OMEGA,
};
pub use scenario::{Scenario, SEED_JITTER};
pub use world::{
    Bounds, ConfigError, Obstacle, World, WorldBuilder, DEFAULT_PILLAR_HEIGHT,
    DEFAULT_PILLAR_RADIUS,
};
