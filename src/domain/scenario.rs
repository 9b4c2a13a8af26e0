//! Built-in obstacle layouts.
//!
//! Template scenarios place their pillars by a fixed rule. When a seed is supplied, every pillar of
//! a template is jittered by a small uniform offset drawn from a `ChaCha8Rng` seeded with it, so a
//! seed always reproduces the same layout on every platform. The `scatter` scenario draws its
//! whole layout from the seeded generator.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use rand::{
    distr::{Distribution, Uniform},
    SeedableRng,
};
use rand_chacha::ChaCha8Rng;

use super::{Color, ConfigError, Obstacle, Position};

/// Maximum offset in cm applied to each coordinate of a seeded template pillar.
pub const SEED_JITTER: f64 = 5.0;

const SCATTER_LATERAL: f64 = 80.0;
const SCATTER_FORWARD_MIN: f64 = 50.0;
const SCATTER_FORWARD_MAX: f64 = 250.0;
const SCATTER_COLORS: [Color; 2] = [Color::Green, Color::Orange];

const SLALOM_FIRST_GATE: f64 = 80.0;
const SLALOM_GATE_OFFSET: f64 = 30.0;
const SLALOM_HALF_GAP: f64 = 20.0;

static SCENARIOS: Lazy<BTreeMap<&'static str, Scenario>> = Lazy::new(|| {
    BTreeMap::from([
        ("simple_gate", Scenario::gate(50.0, 80.0)),
        ("narrow_gate", Scenario::gate(30.0, 80.0)),
        ("offset_gate", Scenario::gate(40.0, 100.0)),
        (
            "slalom",
            Scenario::Slalom {
                gates: 3,
                spacing: 80.0,
            },
        ),
        ("scatter", Scenario::Scatter { count: 4 }),
    ])
});

#[derive(Clone, Debug, PartialEq)]
pub enum Scenario {
    /// Two pillars `gap` apart (center to center), `distance` ahead of the origin.
    Gate {
        gap: f64,
        distance: f64,
        left: Color,
        right: Color,
    },
    /// Gates `spacing` apart, alternately shifted to the right and to the left.
    Slalom { gates: usize, spacing: f64 },
    /// `count` pillars at random positions. Requires a seed.
    Scatter { count: usize },
}

impl Scenario {
    /// Gate with a green left and an orange right pillar.
    pub fn gate(gap: f64, distance: f64) -> Self {
        Scenario::Gate {
            gap,
            distance,
            left: Color::Green,
            right: Color::Orange,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        SCENARIOS
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownScenario {
                name: name.to_owned(),
                available: Self::names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        SCENARIOS.keys().copied()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Scenario::Gate { .. } => "gate",
            Scenario::Slalom { .. } => "slalom",
            Scenario::Scatter { .. } => "scatter",
        }
    }

    pub fn layout(&self, seed: Option<u64>) -> Result<Vec<Obstacle>, ConfigError> {
        self.validate()?;
        match (self, seed) {
            (Scenario::Scatter { count }, Some(seed)) => scatter(*count, seed),
            (Scenario::Scatter { .. }, None) => {
                Err(ConfigError::MissingSeed(self.kind().to_owned()))
            }
            (_, None) => Ok(self.template()),
            (_, Some(seed)) => jitter(self.template(), seed),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidParameter(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        };
        match self {
            Scenario::Gate { gap, distance, .. } => {
                positive("gap", *gap)?;
                positive("distance", *distance)
            }
            Scenario::Slalom { gates, spacing } => {
                if *gates == 0 {
                    return Err(ConfigError::InvalidParameter(
                        "slalom needs at least one gate".to_owned(),
                    ));
                }
                positive("spacing", *spacing)
            }
            Scenario::Scatter { .. } => Ok(()),
        }
    }

    fn template(&self) -> Vec<Obstacle> {
        match self {
            Scenario::Gate {
                gap,
                distance,
                left,
                right,
            } => vec![
                Obstacle::new(Position::new(*distance, gap / 2.0), *left),
                Obstacle::new(Position::new(*distance, -gap / 2.0), *right),
            ],
            Scenario::Slalom { gates, spacing } => (0..*gates)
                .flat_map(|i| {
                    let x = SLALOM_FIRST_GATE + i as f64 * spacing;
                    let center = if i % 2 == 0 {
                        -SLALOM_GATE_OFFSET
                    } else {
                        SLALOM_GATE_OFFSET
                    };
                    [
                        Obstacle::new(Position::new(x, center + SLALOM_HALF_GAP), Color::Green),
                        Obstacle::new(Position::new(x, center - SLALOM_HALF_GAP), Color::Orange),
                    ]
                })
                .collect(),
            Scenario::Scatter { .. } => vec![],
        }
    }
}

fn uniform(low: f64, high: f64) -> Result<Uniform<f64>, ConfigError> {
    Uniform::try_from(low..=high).map_err(|e| ConfigError::InvalidParameter(e.to_string()))
}

fn jitter(obstacles: Vec<Obstacle>, seed: u64) -> Result<Vec<Obstacle>, ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let offset = uniform(-SEED_JITTER, SEED_JITTER)?;

    Ok(obstacles
        .into_iter()
        .map(|o| {
            let delta = Position::new(offset.sample(&mut rng), offset.sample(&mut rng));
            Obstacle::new(o.position() + delta, o.color())
                .with_radius(o.radius())
                .with_height(o.height())
        })
        .collect())
}

fn scatter(count: usize, seed: u64) -> Result<Vec<Obstacle>, ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let lateral = uniform(-SCATTER_LATERAL, SCATTER_LATERAL)?;
    let forward = uniform(SCATTER_FORWARD_MIN, SCATTER_FORWARD_MAX)?;
    let color = Uniform::try_from(0..SCATTER_COLORS.len())
        .map_err(|e| ConfigError::InvalidParameter(e.to_string()))?;

    Ok((0..count)
        .map(|_| {
            let y = lateral.sample(&mut rng);
            let x = forward.sample(&mut rng);
            Obstacle::new(Position::new(x, y), SCATTER_COLORS[color.sample(&mut rng)])
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn describe(obstacles: &[Obstacle]) -> String {
        obstacles
            .iter()
            .map(|o| {
                format!(
                    "{:<6} x={:>6.1} y={:>6.1} r={} h={}",
                    o.color(),
                    o.position().x(),
                    o.position().y(),
                    o.radius(),
                    o.height()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_scenario_names() {
        assert_eq!(
            Scenario::names().collect::<Vec<_>>(),
            vec!["narrow_gate", "offset_gate", "scatter", "simple_gate", "slalom"]
        );
    }

    #[test]
    fn test_scenario_unknown_name_lists_available() {
        let err = Scenario::from_name("maze").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown scenario 'maze', available: narrow_gate, offset_gate, scatter, simple_gate, slalom"
        );
    }

    #[rstest]
    #[case("simple_gate", 50.0, 80.0)]
    #[case("narrow_gate", 30.0, 80.0)]
    #[case("offset_gate", 40.0, 100.0)]
    fn test_gate_layout(#[case] name: &str, #[case] gap: f64, #[case] distance: f64) {
        let obstacles = Scenario::from_name(name).unwrap().layout(None).unwrap();
        assert_eq!(obstacles.len(), 2);
        let (left, right) = (&obstacles[0], &obstacles[1]);
        assert_eq!(left.color(), Color::Green);
        assert_eq!(right.color(), Color::Orange);
        assert_eq!(left.position(), Position::new(distance, gap / 2.0));
        assert_eq!(right.position(), Position::new(distance, -gap / 2.0));
    }

    #[test]
    fn test_slalom_layout() {
        let obstacles = Scenario::from_name("slalom").unwrap().layout(None).unwrap();
        insta::assert_snapshot!(describe(&obstacles), @r"
        green  x=  80.0 y= -10.0 r=5 h=30
        orange x=  80.0 y= -50.0 r=5 h=30
        green  x= 160.0 y=  50.0 r=5 h=30
        orange x= 160.0 y=  10.0 r=5 h=30
        green  x= 240.0 y= -10.0 r=5 h=30
        orange x= 240.0 y= -50.0 r=5 h=30
        ");
    }

    #[test]
    fn test_slalom_seed_is_reproducible() {
        let scenario = Scenario::from_name("slalom").unwrap();
        let first = scenario.layout(Some(42)).unwrap();
        let second = scenario.layout(Some(42)).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, scenario.layout(Some(43)).unwrap());
    }

    #[test]
    fn test_seed_jitter_stays_within_bounds() {
        let scenario = Scenario::from_name("slalom").unwrap();
        let template = scenario.layout(None).unwrap();
        for seed in 0..50 {
            let jittered = scenario.layout(Some(seed)).unwrap();
            assert_eq!(jittered.len(), template.len());
            for (j, t) in jittered.iter().zip(&template) {
                assert_eq!(j.color(), t.color());
                assert!((j.position().x() - t.position().x()).abs() <= SEED_JITTER);
                assert!((j.position().y() - t.position().y()).abs() <= SEED_JITTER);
            }
        }
    }

    #[test]
    fn test_scatter_layout() {
        let obstacles = Scenario::Scatter { count: 25 }.layout(Some(3)).unwrap();
        assert_eq!(obstacles.len(), 25);
        for o in &obstacles {
            assert!((SCATTER_FORWARD_MIN..=SCATTER_FORWARD_MAX).contains(&o.position().x()));
            assert!((-SCATTER_LATERAL..=SCATTER_LATERAL).contains(&o.position().y()));
            assert!(SCATTER_COLORS.contains(&o.color()));
        }
        assert_eq!(
            obstacles,
            Scenario::Scatter { count: 25 }.layout(Some(3)).unwrap()
        );
    }

    #[test]
    fn test_scatter_requires_seed() {
        assert_eq!(
            Scenario::Scatter { count: 4 }.layout(None),
            Err(ConfigError::MissingSeed("scatter".to_owned()))
        );
    }

    #[rstest]
    #[case::zero_gap(Scenario::gate(0.0, 80.0))]
    #[case::nan_distance(Scenario::gate(40.0, f64::NAN))]
    #[case::no_gates(Scenario::Slalom { gates: 0, spacing: 80.0 })]
    #[case::negative_spacing(Scenario::Slalom { gates: 2, spacing: -1.0 })]
    fn test_invalid_parameters(#[case] scenario: Scenario) {
        assert!(matches!(
            scenario.layout(None),
            Err(ConfigError::InvalidParameter(_))
        ));
    }
}
