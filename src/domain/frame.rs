//! Camera frame buffer.

use std::fmt;

use super::{bgr_to_hsv, Bgr, Hsv, HsvRange};

pub const FRAME_WIDTH: usize = 640;
pub const FRAME_HEIGHT: usize = 360;
pub const FRAME_CHANNELS: usize = 3;

/// Row-major 640x360 image with 8-bit BGR pixels, the layout OpenCV uses for color images.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
}

/// Half-open pixel rectangle, already clipped to the frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PixelRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelRect {
    /// Clips the rectangle spanning `[left, right) x [top, bottom)` to the frame. Returns `None`
    /// if nothing of it is left.
    pub fn clipped(left: f64, top: f64, right: f64, bottom: f64) -> Option<Self> {
        // `as` saturates, so far out-of-frame and infinite coordinates end up clamped
        let clip = |v: f64, max: usize| (v as i64).clamp(0, max as i64) as usize;
        let rect = Self {
            x0: clip(left.floor(), FRAME_WIDTH),
            y0: clip(top.floor(), FRAME_HEIGHT),
            x1: clip(right.ceil(), FRAME_WIDTH),
            y1: clip(bottom.ceil(), FRAME_HEIGHT),
        };
        (rect.x0 < rect.x1 && rect.y0 < rect.y1).then_some(rect)
    }
}

impl Frame {
    pub fn filled(bgr: Bgr) -> Self {
        Self {
            data: bgr.repeat(FRAME_WIDTH * FRAME_HEIGHT),
        }
    }

    pub const fn width(&self) -> usize {
        FRAME_WIDTH
    }

    pub const fn height(&self) -> usize {
        FRAME_HEIGHT
    }

    pub const fn channels(&self) -> usize {
        FRAME_CHANNELS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Bgr> {
        if x >= FRAME_WIDTH || y >= FRAME_HEIGHT {
            return None;
        }
        let i = offset(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub fn hsv_at(&self, x: usize, y: usize) -> Option<Hsv> {
        self.pixel(x, y).map(bgr_to_hsv)
    }

    /// Number of pixels whose HSV value lies inside `range`.
    pub fn count_in_range(&self, range: HsvRange) -> usize {
        self.data
            .chunks_exact(FRAME_CHANNELS)
            .filter(|p| range.contains(bgr_to_hsv([p[0], p[1], p[2]])))
            .count()
    }

    /// Mean column of the pixels inside `range`.
    pub fn centroid_x(&self, range: HsvRange) -> Option<f64> {
        let (sum, count) = self
            .data
            .chunks_exact(FRAME_CHANNELS)
            .enumerate()
            .filter(|(_, p)| range.contains(bgr_to_hsv([p[0], p[1], p[2]])))
            .fold((0usize, 0usize), |(sum, count), (i, _)| {
                (sum + i % FRAME_WIDTH, count + 1)
            });
        (count > 0).then(|| sum as f64 / count as f64)
    }

    pub fn fill_row(&mut self, y: usize, bgr: Bgr) {
        if y < FRAME_HEIGHT {
            let start = offset(0, y);
            self.fill_span(start, start + FRAME_WIDTH * FRAME_CHANNELS, bgr);
        }
    }

    pub fn fill_rect(&mut self, rect: PixelRect, bgr: Bgr) {
        let x1 = rect.x1.min(FRAME_WIDTH);
        let y1 = rect.y1.min(FRAME_HEIGHT);
        if rect.x0 >= x1 {
            return;
        }
        for y in rect.y0..y1 {
            self.fill_span(offset(rect.x0, y), offset(x1, y), bgr);
        }
    }

    fn fill_span(&mut self, start: usize, end: usize, bgr: Bgr) {
        for pixel in self.data[start..end].chunks_exact_mut(FRAME_CHANNELS) {
            pixel.copy_from_slice(&bgr);
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &FRAME_WIDTH)
            .field("height", &FRAME_HEIGHT)
            .field("channels", &FRAME_CHANNELS)
            .finish_non_exhaustive()
    }
}

fn offset(x: usize, y: usize) -> usize {
    (y * FRAME_WIDTH + x) * FRAME_CHANNELS
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::super::Color;
    use super::*;

    #[test]
    fn test_frame_filled() {
        let frame = Frame::filled([1, 2, 3]);
        assert_eq!(frame.as_bytes().len(), FRAME_WIDTH * FRAME_HEIGHT * FRAME_CHANNELS);
        assert_eq!(frame.pixel(0, 0), Some([1, 2, 3]));
        assert_eq!(frame.pixel(639, 359), Some([1, 2, 3]));
        assert_eq!(frame.pixel(640, 0), None);
        assert_eq!(frame.pixel(0, 360), None);
    }

    #[test]
    fn test_frame_fill_rect() {
        let mut frame = Frame::filled([0, 0, 0]);
        let rect = PixelRect::clipped(10.0, 20.0, 12.0, 23.0).unwrap();
        frame.fill_rect(rect, Color::Green.bgr());

        assert_eq!(frame.count_in_range(Color::Green.hsv_range()), 2 * 3);
        assert_eq!(frame.pixel(10, 20), Some([0, 255, 0]));
        assert_eq!(frame.pixel(11, 22), Some([0, 255, 0]));
        assert_eq!(frame.pixel(12, 22), Some([0, 0, 0]));
        assert_eq!(frame.pixel(11, 23), Some([0, 0, 0]));
        assert_eq!(frame.centroid_x(Color::Green.hsv_range()), Some(10.5));
        assert_eq!(frame.centroid_x(Color::Orange.hsv_range()), None);
    }

    #[test]
    fn test_frame_fill_row() {
        let mut frame = Frame::filled([0, 0, 0]);
        frame.fill_row(5, [9, 9, 9]);
        frame.fill_row(FRAME_HEIGHT, [9, 9, 9]);
        assert_eq!(frame.pixel(0, 5), Some([9, 9, 9]));
        assert_eq!(frame.pixel(639, 5), Some([9, 9, 9]));
        assert_eq!(frame.pixel(0, 6), Some([0, 0, 0]));
    }

    #[rstest]
    #[case::inside(1.5, 2.5, 3.5, 4.5, Some(PixelRect { x0: 1, y0: 2, x1: 4, y1: 5 }))]
    #[case::clipped(-100.0, -5.0, 10.0, 1e9, Some(PixelRect { x0: 0, y0: 0, x1: 10, y1: 360 }))]
    #[case::infinite(f64::NEG_INFINITY, 0.0, f64::INFINITY, 1.0, Some(PixelRect { x0: 0, y0: 0, x1: 640, y1: 1 }))]
    #[case::left_of_frame(-20.0, 0.0, -10.0, 10.0, None)]
    #[case::below_frame(0.0, 400.0, 10.0, 500.0, None)]
    #[case::empty(5.0, 5.0, 5.0, 10.0, None)]
    fn test_pixel_rect_clipped(
        #[case] left: f64,
        #[case] top: f64,
        #[case] right: f64,
        #[case] bottom: f64,
        #[case] expected: Option<PixelRect>,
    ) {
        assert_eq!(PixelRect::clipped(left, top, right, bottom), expected);
    }
}
