// ============================================================
// Layer 5 — Rasteriser
// ============================================================
// Draws the square into a 16×16 1-bit Frame.
//
// Physics space has y pointing UP; images have row 0 at the
// TOP. The conversion is
//
//     col = x
//     row = IMAGE_HEIGHT - y - SHAPE_SIDE_LENGTH
//
// Both are floored to whole pixels and clamped into the image,
// then a (SHAPE_SIDE_LENGTH + 1)² block of pixels is filled.

use crate::domain::frame::Frame;
use crate::domain::params::Point;
use crate::sim::world::SHAPE_SIDE_LENGTH;

pub const IMAGE_WIDTH: usize = 16;
pub const IMAGE_HEIGHT: usize = 16;

/// Render the square at a physics-space position.
pub fn draw_frame(position: Point) -> Frame {
    let mut frame = Frame::blank(IMAGE_WIDTH, IMAGE_HEIGHT);
    let (col, row) = to_pixel(position);
    let side = SHAPE_SIDE_LENGTH as usize + 1;

    for r in row..(row + side).min(IMAGE_HEIGHT) {
        for c in col..(col + side).min(IMAGE_WIDTH) {
            frame.set(c, r, true);
        }
    }
    frame
}

/// Top-left pixel (col, row) of the square for a physics position.
pub fn to_pixel(position: Point) -> (usize, usize) {
    let x = position[0];
    let y = IMAGE_HEIGHT as f64 - position[1] - SHAPE_SIDE_LENGTH;
    (snap(x, IMAGE_WIDTH), snap(y, IMAGE_HEIGHT))
}

fn snap(v: f64, extent: usize) -> usize {
    if !v.is_finite() {
        return 0;
    }
    v.floor().clamp(0.0, (extent - 1) as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel_square() {
        let f = draw_frame([3.2, 10.7]);
        assert_eq!(f.lit_pixels(), 1);
        // row = 16 - 10.7 = 5.3 → 5
        assert_eq!(f.first_lit(), Some((3, 5)));
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let low  = to_pixel([8.0, 2.0]);
        let high = to_pixel([8.0, 14.0]);
        assert!(low.1 > high.1, "higher y must land on a smaller row");
    }

    #[test]
    fn test_positions_outside_are_clamped() {
        assert_eq!(to_pixel([-4.0, 30.0]), (0, 0));
        assert_eq!(to_pixel([99.0, -3.0]), (15, 15));
        assert_eq!(to_pixel([f64::NAN, 8.0]).0, 0);
    }
}
