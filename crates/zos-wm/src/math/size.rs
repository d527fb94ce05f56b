//! 2D size type for window and output dimensions

use serde::{Deserialize, Serialize};

/// Width and height in layout pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Smallest box a window is ever given (layout and resize grabs)
    pub const MIN_WINDOW: Size = Size {
        width: 100.0,
        height: 50.0,
    };

    /// Stand-in for content geometry the client has not reported yet
    pub const PLACEHOLDER: Size = Size {
        width: 100.0,
        height: 100.0,
    };

    /// Create a new size
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Scale both dimensions
    #[inline]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Floor each dimension at the matching dimension of `min`
    #[inline]
    pub fn at_least(self, min: Size) -> Self {
        Self::new(self.width.max(min.width), self.height.max(min.height))
    }

    /// Linear interpolation between two sizes
    #[inline]
    pub fn lerp(a: Size, b: Size, t: f32) -> Size {
        Size::new(super::lerp(a.width, b.width, t), super::lerp(a.height, b.height, t))
    }
}
