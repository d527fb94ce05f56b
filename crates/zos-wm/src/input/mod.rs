//! Pointer input: grab state machine support
//!
//! The server drives the transitions; this module holds the grab value, the
//! resize math and the result type handed back to the host.

mod grab;
mod result;

pub use grab::GrabState;
pub use result::InputResult;

use serde::{Deserialize, Serialize};

use crate::decoration::Edges;
use crate::math::{Rect, Size, Vec2};

/// Pointer button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    /// Primary (usually left)
    Left,
    /// Secondary (usually right)
    Right,
    Middle,
}

/// Press or release
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Box after dragging the `edges` of `grab_box` by `delta`.
///
/// Size is floored at 100×50. Right/bottom edges follow the pointer; left/top
/// edges move the origin so the opposite edge stays where it was, also when
/// the floor kicks in.
pub fn calculate_resize(edges: Edges, grab_box: Rect, delta: Vec2) -> Rect {
    let min = Size::MIN_WINDOW;
    let mut rect = grab_box;

    if edges.contains(Edges::RIGHT) {
        rect.width = (grab_box.width + delta.x).max(min.width);
    } else if edges.contains(Edges::LEFT) {
        rect.width = (grab_box.width - delta.x).max(min.width);
        rect.x = grab_box.right() - rect.width;
    }

    if edges.contains(Edges::BOTTOM) {
        rect.height = (grab_box.height + delta.y).max(min.height);
    } else if edges.contains(Edges::TOP) {
        rect.height = (grab_box.height - delta.y).max(min.height);
        rect.y = grab_box.bottom() - rect.height;
    }

    rect
}
