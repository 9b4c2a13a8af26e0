//! Test utils.

use crate::domain::{Color, Frame, FRAME_HEIGHT, FRAME_WIDTH};

const CELL: usize = 20;

/// Downsamples a frame to one character per 20x20 pixel cell, sampled at the cell center.
///
/// Pixels inside a palette color's HSV range are shown by the color's initial, everything else
/// as `.`.
pub fn plot_frame(frame: &Frame) -> String {
    (0..FRAME_HEIGHT / CELL)
        .map(|row| {
            (0..FRAME_WIDTH / CELL)
                .map(|col| {
                    let hsv = frame
                        .hsv_at(col * CELL + CELL / 2, row * CELL + CELL / 2)
                        .unwrap_or_default();
                    Color::iter()
                        .find(|c| c.hsv_range().contains(hsv))
                        .map_or('.', initial)
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn initial(color: Color) -> char {
    color
        .name()
        .chars()
        .next()
        .map_or('?', |c| c.to_ascii_uppercase())
}
