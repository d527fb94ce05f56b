//! Grab state for pointer drags

use crate::decoration::Edges;
use crate::math::{Rect, Vec2};
use crate::window::WindowId;

/// The single in-flight pointer grab
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GrabState {
    /// No grab; motion updates hover state
    #[default]
    Normal,
    /// Moving a window
    Move {
        window: WindowId,
        /// Pointer minus window position at grab time
        offset: Vec2,
    },
    /// Resizing a window
    Resize {
        window: WindowId,
        edges: Edges,
        /// Window position and content size at grab time
        grab_box: Rect,
        /// Pointer position at grab time
        grab_origin: Vec2,
    },
}

impl GrabState {
    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, GrabState::Normal)
    }

    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, GrabState::Move { .. })
    }

    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, GrabState::Resize { .. })
    }

    /// Window the grab references, if any
    pub fn window(&self) -> Option<WindowId> {
        match self {
            GrabState::Normal => None,
            GrabState::Move { window, .. } | GrabState::Resize { window, .. } => Some(*window),
        }
    }

    /// Check if the grab references `id`
    pub fn references(&self, id: WindowId) -> bool {
        self.window() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_state() {
        let state = GrabState::default();
        assert!(state.is_normal());
        assert!(state.window().is_none());
    }

    #[test]
    fn test_move_state() {
        let state = GrabState::Move {
            window: 42,
            offset: Vec2::new(40.0, 40.0),
        };
        assert!(state.is_move());
        assert!(!state.is_resize());
        assert_eq!(state.window(), Some(42));
        assert!(state.references(42));
        assert!(!state.references(7));
    }

    #[test]
    fn test_resize_state() {
        let state = GrabState::Resize {
            window: 9,
            edges: Edges::BOTTOM_RIGHT,
            grab_box: Rect::new(0.0, 0.0, 400.0, 300.0),
            grab_origin: Vec2::new(400.0, 324.0),
        };
        assert!(state.is_resize());
        assert_eq!(state.window(), Some(9));
    }
}
