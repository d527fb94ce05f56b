//! Navigation over the ordered sequence
//!
//! Both queries are pure: the caller supplies focusable windows in sequence
//! order and gets back the target, if any.

use crate::math::Vec2;
use crate::window::WindowId;

/// Cardinal direction for focus and move actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step as `(dx, dy)`
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Left and up reorder before the neighbour, right and down after it
    pub fn inserts_before(self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }
}

/// Closest window in direction `(dx, dy)` from `reference`.
///
/// A candidate must lie strictly on the requested side on every nonzero
/// axis. Distance is Manhattan between positions; the earliest candidate
/// wins ties.
pub fn find_in_direction<I>(reference: (WindowId, Vec2), dx: i8, dy: i8, candidates: I) -> Option<WindowId>
where
    I: IntoIterator<Item = (WindowId, Vec2)>,
{
    if dx == 0 && dy == 0 {
        return None;
    }
    let (ref_id, origin) = reference;

    let mut best: Option<(WindowId, f32)> = None;
    for (id, pos) in candidates {
        if id == ref_id {
            continue;
        }
        let passes_x = match dx.signum() {
            -1 => pos.x < origin.x,
            1 => pos.x > origin.x,
            _ => true,
        };
        let passes_y = match dy.signum() {
            -1 => pos.y < origin.y,
            1 => pos.y > origin.y,
            _ => true,
        };
        if !(passes_x && passes_y) {
            continue;
        }
        let distance = origin.manhattan(pos);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((id, distance));
        }
    }
    best.map(|(id, _)| id)
}

/// Next (or previous) window in `order`, wrapping around.
///
/// With no current window, or one not in `order`, forward picks the head
/// and backward the tail.
pub fn cycle(order: &[WindowId], current: Option<WindowId>, forward: bool) -> Option<WindowId> {
    if order.is_empty() {
        return None;
    }
    let len = order.len();
    let index = current.and_then(|id| order.iter().position(|&w| w == id));
    let target = match (index, forward) {
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
        (None, true) => 0,
        (None, false) => len - 1,
    };
    Some(order[target])
}
