//! Output (display region) geometry

use crate::math::{Rect, Size, Vec2};

/// The single display region windows are laid out on
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Output {
    pub size: Size,
}

impl Default for Output {
    fn default() -> Self {
        Self::new(Size::new(1920.0, 1080.0))
    }
}

impl Output {
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    /// Whole output box at the origin
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(Vec2::ZERO, self.size)
    }

    /// Output minus `outer_gap` on every side
    pub fn usable_area(&self, outer_gap: f32) -> Rect {
        Rect::new(
            outer_gap,
            outer_gap,
            (self.size.width - 2.0 * outer_gap).max(0.0),
            (self.size.height - 2.0 * outer_gap).max(0.0),
        )
    }

    /// Box of `size` centred in the output
    pub fn centered(&self, size: Size) -> Rect {
        Rect::from_center_size(self.rect().center(), size)
    }
}
