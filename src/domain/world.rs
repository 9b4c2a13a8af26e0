//! World with colored pillars.
//!
//! The ground plane uses centimeters. The positive x-axis points forward from the robot's default
//! starting pose, the positive y-axis points to its left. The default bounds span 300 cm forward
//! and 100 cm to either side of the origin.

use bevy::log::info;
use thiserror::Error;

use super::{Color, HasCollision, Position, Scenario, Shape};

pub const DEFAULT_PILLAR_RADIUS: f64 = 5.0;
pub const DEFAULT_PILLAR_HEIGHT: f64 = 30.0;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("unknown scenario '{name}', available: {available}")]
    UnknownScenario { name: String, available: String },
    #[error("unknown color '{0}'")]
    UnknownColor(String),
    #[error("a named scenario and an explicit obstacle list are mutually exclusive")]
    ConflictingConstruction,
    #[error("a seed has no effect on an explicit obstacle list")]
    SeedWithExplicitObstacles,
    #[error("scenario '{0}' requires a seed")]
    MissingSeed(String),
    #[error("obstacle {index} is invalid: {reason}")]
    InvalidObstacle { index: usize, reason: &'static str },
    #[error("invalid scenario parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct World {
    obstacles: Vec<Obstacle>,
    bounds: Bounds,
    scenario: Option<String>,
    seed: Option<u64>,
}

impl World {
    pub fn builder() -> WorldBuilder {
        WorldBuilder::default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Registry name of the scenario the world was generated from. `None` for explicit obstacle
    /// lists and custom [`Scenario`] values.
    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// First pillar whose center lies closer than `tolerance` to `position`.
    pub fn obstacle_near(&self, position: Position, tolerance: f64) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| o.position().distance(position) < tolerance)
    }

    pub fn has_collision(&self, object: &dyn HasCollision) -> bool {
        self.obstacles.iter().any(|o| o.has_collision(object))
    }
}

/// Axis-aligned region the robot is kept in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn contains(&self, position: Position) -> bool {
        (self.x_min..=self.x_max).contains(&position.x())
            && (self.y_min..=self.y_max).contains(&position.y())
    }

    pub fn clamp(&self, position: Position) -> Position {
        Position::new(
            position.x().clamp(self.x_min, self.x_max),
            position.y().clamp(self.y_min, self.y_max),
        )
    }

    fn is_valid(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && self.x_min < self.x_max
            && self.y_min < self.y_max
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 300.0,
            y_min: -100.0,
            y_max: 100.0,
        }
    }
}

/// Vertical cylindrical pillar standing on the ground plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    position: Position,
    radius: f64,
    height: f64,
    color: Color,
}

impl Obstacle {
    pub fn new(position: Position, color: Color) -> Self {
        Self {
            position,
            radius: DEFAULT_PILLAR_RADIUS,
            height: DEFAULT_PILLAR_HEIGHT,
            color,
        }
    }

    /// Creates a pillar from a palette color name.
    pub fn named(position: Position, color: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(position, color.parse()?))
    }

    pub fn with_radius(&self, radius: f64) -> Self {
        Self {
            radius,
            ..self.clone()
        }
    }

    pub fn with_height(&self, height: f64) -> Self {
        Self {
            height,
            ..self.clone()
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let reason = if !self.position.is_finite() {
            "position is not finite"
        } else if !(self.radius.is_finite() && self.radius > 0.0) {
            "radius must be positive"
        } else if !(self.height.is_finite() && self.height > 0.0) {
            "height must be positive"
        } else {
            return Ok(());
        };
        Err(ConfigError::InvalidObstacle { index, reason })
    }
}

impl HasCollision for Obstacle {
    fn shape(&self) -> Shape {
        Shape::Circle {
            position: self.position,
            radius: self.radius,
        }
    }
}

#[derive(Clone, Debug)]
enum ScenarioSource {
    Named(String),
    Custom(Scenario),
}

/// Collects the construction arguments of a [`World`].
///
/// A world comes either from a scenario (by name or as a [`Scenario`] value) or from an explicit
/// obstacle list, never from both. Without any arguments the `simple_gate` scenario is used, with
/// only a seed the seeded `scatter` scenario.
#[derive(Clone, Debug, Default)]
pub struct WorldBuilder {
    scenario: Option<ScenarioSource>,
    obstacles: Option<Vec<Obstacle>>,
    seed: Option<u64>,
    bounds: Option<Bounds>,
}

impl WorldBuilder {
    pub fn scenario_name(mut self, name: impl Into<String>) -> Self {
        self.scenario = Some(ScenarioSource::Named(name.into()));
        self
    }

    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(ScenarioSource::Custom(scenario));
        self
    }

    pub fn obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = Some(obstacles);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn build(self) -> Result<World, ConfigError> {
        let bounds = self.bounds.unwrap_or_default();
        if !bounds.is_valid() {
            return Err(ConfigError::InvalidParameter(format!(
                "bounds {bounds:?} are empty or not finite"
            )));
        }

        match (self.scenario, self.obstacles) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingConstruction),
            (None, Some(obstacles)) => {
                if self.seed.is_some() {
                    return Err(ConfigError::SeedWithExplicitObstacles);
                }
                for (index, obstacle) in obstacles.iter().enumerate() {
                    obstacle.validate(index)?;
                }
                info!("building world from {} explicit obstacles", obstacles.len());
                Ok(World {
                    obstacles,
                    bounds,
                    scenario: None,
                    seed: None,
                })
            }
            (source, None) => {
                let (name, scenario) = match source {
                    Some(ScenarioSource::Named(name)) => {
                        let scenario = Scenario::from_name(&name)?;
                        (Some(name), scenario)
                    }
                    Some(ScenarioSource::Custom(scenario)) => (None, scenario),
                    None if self.seed.is_some() => {
                        (Some("scatter".to_owned()), Scenario::from_name("scatter")?)
                    }
                    None => (
                        Some("simple_gate".to_owned()),
                        Scenario::from_name("simple_gate")?,
                    ),
                };
                let obstacles = scenario.layout(self.seed)?;
                info!(
                    "building world from {} scenario '{}' (seed {:?}) with {} obstacles",
                    scenario.kind(),
                    name.as_deref().unwrap_or("custom"),
                    self.seed,
                    obstacles.len()
                );
                Ok(World {
                    obstacles,
                    bounds,
                    scenario: name,
                    seed: self.seed,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_world_default_is_simple_gate() {
        let world = World::builder().build().unwrap();
        assert_eq!(world.scenario(), Some("simple_gate"));
        assert_eq!(world.seed(), None);
        assert_eq!(world.obstacles().len(), 2);
        assert_eq!(world.bounds(), Bounds::default());
    }

    #[test]
    fn test_world_seed_only_is_scatter() {
        let world = World::builder().seed(7).build().unwrap();
        assert_eq!(world.scenario(), Some("scatter"));
        assert_eq!(world.seed(), Some(7));
        assert_eq!(world.obstacles().len(), 4);
    }

    #[test]
    fn test_world_explicit_obstacles() {
        let obstacles = vec![
            Obstacle::new(Position::new(50.0, 0.0), Color::Red),
            Obstacle::named(Position::new(90.0, 10.0), "blue")
                .unwrap()
                .with_radius(8.0)
                .with_height(12.0),
        ];
        let world = World::builder().obstacles(obstacles.clone()).build().unwrap();
        assert_eq!(world.scenario(), None);
        assert_eq!(world.obstacles(), obstacles.as_slice());
        assert_eq!(world.obstacles()[1].radius(), 8.0);
        assert_eq!(world.obstacles()[1].height(), 12.0);
    }

    #[test]
    fn test_world_custom_scenario_has_no_name() {
        let world = World::builder()
            .scenario(Scenario::gate(60.0, 120.0))
            .build()
            .unwrap();
        assert_eq!(world.scenario(), None);
        assert_eq!(world.obstacles().len(), 2);
        assert_eq!(world.obstacles()[0].position(), Position::new(120.0, 30.0));
    }

    #[test]
    fn test_world_empty_explicit_obstacles() {
        let world = World::builder().obstacles(vec![]).build().unwrap();
        assert!(world.obstacles().is_empty());
    }

    #[test]
    fn test_world_unknown_scenario() {
        let result = World::builder().scenario_name("maze").build();
        assert!(matches!(
            result,
            Err(ConfigError::UnknownScenario { name, .. }) if name == "maze"
        ));
    }

    #[test]
    fn test_world_unknown_color() {
        assert_eq!(
            Obstacle::named(Position::new(0.0, 0.0), "purple"),
            Err(ConfigError::UnknownColor("purple".to_owned()))
        );
    }

    #[test]
    fn test_world_scenario_and_obstacles_conflict() {
        let result = World::builder()
            .scenario_name("simple_gate")
            .obstacles(vec![Obstacle::new(Position::new(1.0, 1.0), Color::Green)])
            .build();
        assert_eq!(result, Err(ConfigError::ConflictingConstruction));
    }

    #[test]
    fn test_world_unknown_scenario_and_obstacles_conflict() {
        let result = World::builder()
            .scenario_name("maze")
            .obstacles(vec![])
            .build();
        assert_eq!(result, Err(ConfigError::ConflictingConstruction));
    }

    #[test]
    fn test_world_seed_and_obstacles_conflict() {
        let result = World::builder().obstacles(vec![]).seed(1).build();
        assert_eq!(result, Err(ConfigError::SeedWithExplicitObstacles));
    }

    #[rstest]
    #[case::nan_position(Obstacle::new(Position::new(f64::NAN, 0.0), Color::Green))]
    #[case::zero_radius(Obstacle::new(Position::new(1.0, 0.0), Color::Green).with_radius(0.0))]
    #[case::negative_height(Obstacle::new(Position::new(1.0, 0.0), Color::Green).with_height(-1.0))]
    fn test_world_invalid_obstacle(#[case] obstacle: Obstacle) {
        let valid = Obstacle::new(Position::new(10.0, 0.0), Color::Orange);
        let result = World::builder().obstacles(vec![valid, obstacle]).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidObstacle { index: 1, .. })
        ));
    }

    #[test]
    fn test_world_invalid_bounds() {
        let bounds = Bounds {
            x_min: 10.0,
            x_max: 10.0,
            ..Bounds::default()
        };
        assert!(matches!(
            World::builder().bounds(bounds).build(),
            Err(ConfigError::InvalidParameter(_))
        ));
    }

    #[rstest]
    #[case(Position::new(0.0, 0.0), true)]
    #[case(Position::new(300.0, 100.0), true)]
    #[case(Position::new(-0.1, 0.0), false)]
    #[case(Position::new(150.0, -100.1), false)]
    fn test_bounds_contains(#[case] position: Position, #[case] expected: bool) {
        assert_eq!(Bounds::default().contains(position), expected);
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::default();
        assert_eq!(
            bounds.clamp(Position::new(-5.0, 250.0)),
            Position::new(0.0, 100.0)
        );
        assert_eq!(
            bounds.clamp(Position::new(120.0, -20.0)),
            Position::new(120.0, -20.0)
        );
    }

    #[test]
    fn test_world_obstacle_near() {
        let world = World::builder().scenario_name("simple_gate").build().unwrap();
        let near = world.obstacle_near(Position::new(82.0, 22.0), 10.0).unwrap();
        assert_eq!(near.color(), Color::Green);
        assert!(world.obstacle_near(Position::new(80.0, 0.0), 10.0).is_none());
    }
}
