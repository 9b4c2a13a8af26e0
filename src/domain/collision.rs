//! Collision detection based on ground-plane footprints.

use super::Position;

pub trait HasCollision {
    fn has_collision(&self, other: &dyn HasCollision) -> bool {
        self.shape().has_intersection(&other.shape())
    }

    fn shape(&self) -> Shape;
}

pub enum Shape {
    Circle { position: Position, radius: f64 },
    Point { position: Position },
}

impl Shape {
    fn center_and_radius(&self) -> (Position, f64) {
        match self {
            Shape::Circle { position, radius } => (*position, *radius),
            Shape::Point { position } => (*position, 0.0),
        }
    }

    fn has_intersection(&self, other: &Shape) -> bool {
        let (position, radius) = self.center_and_radius();
        let (other_position, other_radius) = other.center_and_radius();
        position.distance(other_position) < radius + other_radius
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    struct Footprint(Shape);

    impl HasCollision for Footprint {
        fn shape(&self) -> Shape {
            match &self.0 {
                Shape::Circle { position, radius } => Shape::Circle {
                    position: *position,
                    radius: *radius,
                },
                Shape::Point { position } => Shape::Point {
                    position: *position,
                },
            }
        }
    }

    fn circle(x: f64, y: f64, radius: f64) -> Footprint {
        Footprint(Shape::Circle {
            position: Position::new(x, y),
            radius,
        })
    }

    fn point(x: f64, y: f64) -> Footprint {
        Footprint(Shape::Point {
            position: Position::new(x, y),
        })
    }

    #[rstest]
    #[case::overlapping(circle(0.0, 0.0, 1.0), circle(1.5, 0.0, 1.0), true)]
    #[case::touching(circle(0.0, 0.0, 1.0), circle(2.0, 0.0, 1.0), false)]
    #[case::apart(circle(0.0, 0.0, 1.0), circle(0.0, 5.0, 1.0), false)]
    #[case::point_inside(circle(0.0, 0.0, 1.0), point(0.5, 0.5), true)]
    #[case::point_outside(circle(0.0, 0.0, 1.0), point(1.0, 1.0), false)]
    #[case::two_points(point(1.0, 1.0), point(1.0, 1.0), false)]
    fn test_has_collision(
        #[case] a: Footprint,
        #[case] b: Footprint,
        #[case] expected: bool,
    ) {
        assert_eq!(a.has_collision(&b), expected);
        assert_eq!(b.has_collision(&a), expected);
    }
}
