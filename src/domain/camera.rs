//! Synthetic pinhole camera.
//!
//! The camera looks along the robot's heading from a point `mount_offset` ahead of the robot
//! center. Pillars are projected with a pinhole model whose focal length is derived from the
//! horizontal field of view and drawn as upright rectangles, farthest first, over a sky and
//! ground background.

use super::{
    Angle, Bgr, ConfigError, Frame, Obstacle, PixelRect, Position, RobotPose, World,
    FRAME_HEIGHT, FRAME_WIDTH,
};

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    /// Horizontal field of view.
    pub fov: Angle,
    /// Distance of the camera ahead of the robot center, in cm.
    pub mount_offset: f64,
    /// Height of the camera above the ground, in cm.
    pub mount_height: f64,
    /// Pillars at or closer than this forward distance are not drawn.
    pub near_clip: f64,
    /// Pillars beyond this forward distance are not drawn.
    pub far_clip: f64,
    /// Vertical position of the horizon as a fraction of the frame height, from the top.
    pub horizon: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub sky: Bgr,
    pub ground: Bgr,
    /// Forward distance at which the distance shading would reach black.
    pub shading_distance: f64,
    /// Lower bound of the shading factor. Keeps shaded palette colors inside their HSV range.
    pub min_shade: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: Angle::from_deg(60.0),
            mount_offset: 5.0,
            mount_height: 10.0,
            near_clip: 5.0,
            far_clip: 500.0,
            horizon: 0.45,
            min_width: 2.0,
            min_height: 4.0,
            sky: [200, 180, 160],
            ground: [60, 80, 60],
            shading_distance: 400.0,
            min_shade: 0.4,
        }
    }
}

impl CameraConfig {
    pub fn half_fov(&self) -> f64 {
        self.fov.radians() / 2.0
    }

    /// Focal length in pixels.
    pub fn focal_length(&self) -> f64 {
        (FRAME_WIDTH as f64 / 2.0) / self.half_fov().tan()
    }

    pub fn horizon_y(&self) -> f64 {
        FRAME_HEIGHT as f64 * self.horizon
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fov = self.fov.radians();
        let problem = if !(fov > 0.0 && fov < std::f64::consts::PI) {
            "field of view must lie in (0, 180) degrees"
        } else if !(self.near_clip.is_finite() && self.near_clip >= 0.0) {
            "near clip must not be negative"
        } else if !(self.far_clip.is_finite() && self.far_clip > self.near_clip) {
            "far clip must lie beyond the near clip"
        } else if !(0.0..=1.0).contains(&self.horizon) {
            "horizon must lie in [0, 1]"
        } else if !(self.mount_offset.is_finite() && self.mount_height.is_finite()) {
            "camera mount must be finite"
        } else if !(self.min_width >= 1.0 && self.min_height >= 1.0) {
            "minimum pillar size must be at least one pixel"
        } else if !(self.shading_distance > 0.0 && (0.0..=1.0).contains(&self.min_shade)) {
            "invalid distance shading"
        } else {
            return Ok(());
        };
        Err(ConfigError::InvalidParameter(problem.to_owned()))
    }
}

/// Pillar as seen by the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    /// Index of the pillar in the world's obstacle list.
    pub index: usize,
    /// Distance along the viewing direction, in cm.
    pub forward: f64,
    /// Offset to the left of the viewing direction, in cm.
    pub lateral: f64,
    /// Angle to the left of the viewing direction.
    pub bearing: f64,
    pub screen_x: f64,
    pub width: f64,
    pub top: f64,
    pub bottom: f64,
    /// Palette color after distance shading.
    pub color: Bgr,
}

impl Projection {
    pub fn rect(&self) -> Option<PixelRect> {
        PixelRect::clipped(
            self.screen_x - self.width / 2.0,
            self.top,
            self.screen_x + self.width / 2.0,
            self.bottom,
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Camera {
    config: CameraConfig,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Renders the view from `pose` into a new frame.
    pub fn render(&self, world: &World, pose: RobotPose) -> Frame {
        let mut frame = self.background();
        for projection in self.project(world, pose) {
            if let Some(rect) = projection.rect() {
                frame.fill_rect(rect, projection.color);
            }
        }
        frame
    }

    /// Visible pillars in painting order, i.e. sorted by forward distance, farthest first. Pillars
    /// at equal distance keep the world's order.
    pub fn project(&self, world: &World, pose: RobotPose) -> Vec<Projection> {
        let eye = pose.ahead(self.config.mount_offset);
        let mut projections = world
            .obstacles()
            .iter()
            .enumerate()
            .filter_map(|(index, obstacle)| self.project_obstacle(index, obstacle, eye, pose))
            .collect::<Vec<_>>();
        projections.sort_by(|a, b| b.forward.total_cmp(&a.forward));
        projections
    }

    fn project_obstacle(
        &self,
        index: usize,
        obstacle: &Obstacle,
        eye: Position,
        pose: RobotPose,
    ) -> Option<Projection> {
        let cfg = &self.config;
        let local = obstacle.position().relative_to(eye, pose.heading());
        let (forward, lateral) = (local.x(), local.y());

        if forward <= cfg.near_clip || forward > cfg.far_clip {
            return None;
        }
        // The edge of the field of view is still visible.
        let bearing = lateral.atan2(forward);
        if bearing.abs() > cfg.half_fov() {
            return None;
        }

        let f = cfg.focal_length();
        let width = (f * 2.0 * obstacle.radius() / forward).max(cfg.min_width);
        let height = (f * obstacle.height() / forward).max(cfg.min_height);
        let bottom = cfg.horizon_y() + f * cfg.mount_height / forward;

        Some(Projection {
            index,
            forward,
            lateral,
            bearing,
            screen_x: FRAME_WIDTH as f64 / 2.0 - f * lateral / forward,
            width,
            top: bottom - height,
            bottom,
            color: self.shade(obstacle.color().bgr(), forward),
        })
    }

    fn shade(&self, bgr: Bgr, forward: f64) -> Bgr {
        let shade = (1.0 - forward / self.config.shading_distance).max(self.config.min_shade);
        bgr.map(|c| (f64::from(c) * shade).round() as u8)
    }

    fn background(&self) -> Frame {
        let mut frame = Frame::filled(self.config.sky);
        let horizon = (self.config.horizon_y() as usize).min(FRAME_HEIGHT);
        let ground_rows = FRAME_HEIGHT - horizon;
        for i in 0..ground_rows {
            // Darker toward the horizon.
            let t = i as f64 / ground_rows as f64;
            let color = self.config.ground.map(|c| (f64::from(c) * (0.7 + 0.3 * t)) as u8);
            frame.fill_row(horizon + i, color);
        }
        frame
    }
}
