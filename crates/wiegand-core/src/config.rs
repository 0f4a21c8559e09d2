//! Display and layout configuration.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Device display width in pixels.
pub const DISPLAY_WIDTH_PX: u32 = 128;

/// Device display height in pixels.
pub const DISPLAY_HEIGHT_PX: u32 = 64;

/// Depth of the input event queue between the input callback and the loop.
pub const INPUT_QUEUE_DEPTH: usize = 8;

/// Geometry of the code editor screen.
///
/// Digit `i` is drawn with its baseline at `(origin_x + i * digit_pitch,
/// baseline_y)`. The cursor marker is a filled square offset from the cursor
/// digit's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub display_size: Size,
    pub origin_x: i32,
    pub digit_pitch: i32,
    pub baseline_y: i32,
    pub marker_size: u32,
    pub marker_offset: Point,
}

impl LayoutConfig {
    pub const fn new() -> Self {
        Self {
            display_size: Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
            origin_x: 10,
            digit_pitch: 10,
            baseline_y: 28,
            marker_size: 3,
            marker_offset: Point::new(1, 3),
        }
    }

    /// Full-screen bounding rectangle.
    pub fn screen_bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.display_size)
    }

    /// Baseline origin of the digit at `index`.
    pub fn digit_origin(&self, index: usize) -> Point {
        Point::new(
            self.origin_x + index as i32 * self.digit_pitch,
            self.baseline_y,
        )
    }

    /// Area of the cursor marker under the digit at `index`.
    pub fn marker_area(&self, index: usize) -> Rectangle {
        Rectangle::new(
            self.digit_origin(index) + self.marker_offset,
            Size::new(self.marker_size, self.marker_size),
        )
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}
