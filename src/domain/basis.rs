//! Basic building blocks.

use std::{
    f64::consts::{PI, TAU},
    ops::{Add, Neg, Sub},
};

use nalgebra::{Rotation2, Vector2};

/// Point or offset on the ground plane, in centimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, position: Self) -> f64 {
        ((self.x - position.x).powi(2) + (self.y - position.y).powi(2)).sqrt()
    }

    pub fn rotate_vector(&self, angle: Angle) -> Position {
        let rotated = Rotation2::new(angle.0) * Vector2::new(self.x, self.y);
        Position::new(rotated.x, rotated.y)
    }

    /// Offset of `self` as seen from a frame located at `origin` and rotated by `heading`.
    pub fn relative_to(&self, origin: Position, heading: Angle) -> Position {
        (*self - origin).rotate_vector(-heading)
    }
}

impl From<Position> for (f64, f64) {
    fn from(value: Position) -> Self {
        (value.x, value.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Position::new(x, y)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Angle in radians. Counterclockwise is positive, zero points along the positive x-axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub const fn new(radians: f64) -> Self {
        Self(radians)
    }

    pub fn from_deg(degree: f64) -> Self {
        Self(degree * PI / 180.0)
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    /// Wraps the angle into `[-PI, PI)`.
    ///
    /// Angles already inside the range are returned bit-for-bit unchanged, `PI` maps to `-PI`.
    pub fn wrapped(self) -> Self {
        if (-PI..PI).contains(&self.0) {
            return self;
        }
        let wrapped = (self.0 + PI).rem_euclid(TAU) - PI;
        // rem_euclid may round up to TAU for inputs just below a multiple of it
        if wrapped >= PI {
            Self(wrapped - TAU)
        } else {
            Self(wrapped)
        }
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Angle(-self.0)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl From<Angle> for f64 {
    fn from(value: Angle) -> Self {
        value.0
    }
}
