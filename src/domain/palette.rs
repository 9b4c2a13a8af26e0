//! Fixed color palette of the pillars.
//!
//! Downstream vision code finds pillars by thresholding frames in HSV space, so every palette
//! entry comes with the HSV range it is advertised under. The pixel values are chosen such that
//! the rendered color, including distance shading, stays inside that range.

use std::{fmt, str::FromStr};

use super::ConfigError;

/// Pixel value in BGR channel order.
pub type Bgr = [u8; 3];

/// Pixel value in 8-bit HSV as used by OpenCV: hue in `0..=180`, saturation and value in
/// `0..=255`.
pub type Hsv = [u8; 3];

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum Color {
    Green,
    Orange,
    Red,
    Blue,
}

impl Color {
    pub fn iter() -> impl Iterator<Item = Color> {
        [Color::Green, Color::Orange, Color::Red, Color::Blue].into_iter()
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Blue => "blue",
        }
    }

    pub fn bgr(self) -> Bgr {
        match self {
            Color::Green => [0, 255, 0],
            Color::Orange => [0, 165, 255],
            Color::Red => [0, 0, 255],
            Color::Blue => [255, 0, 0],
        }
    }

    pub fn hsv_range(self) -> HsvRange {
        match self {
            Color::Green => HsvRange::new([35, 100, 100], [85, 255, 255]),
            Color::Orange => HsvRange::new([10, 100, 100], [25, 255, 255]),
            Color::Red => HsvRange::new([0, 100, 100], [9, 255, 255]),
            Color::Blue => HsvRange::new([100, 100, 100], [130, 255, 255]),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ConfigError::UnknownColor(s.to_owned()))
    }
}

/// Inclusive per-channel HSV bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HsvRange {
    lower: Hsv,
    upper: Hsv,
}

impl HsvRange {
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    pub fn lower(&self) -> Hsv {
        self.lower
    }

    pub fn upper(&self) -> Hsv {
        self.upper
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }
}

/// Converts a BGR pixel to 8-bit HSV the way OpenCV's `COLOR_BGR2HSV` does.
pub fn bgr_to_hsv([b, g, r]: Bgr) -> Hsv {
    let (b, g, r) = (f64::from(b), f64::from(g), f64::from(r));
    let v = b.max(g).max(r);
    let min = b.min(g).min(r);
    let diff = v - min;

    let s = if v == 0.0 { 0.0 } else { 255.0 * diff / v };

    let h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    let h = if h < 0.0 { h + 360.0 } else { h };
    // 8-bit hue stops at 179, hues rounding up to 360 degrees wrap to 0
    let h = match (h / 2.0).round() as u8 {
        180 => 0,
        h => h,
    };

    [h, s.round() as u8, v as u8]
}
