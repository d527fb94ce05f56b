//! Decoration hit testing
//!
//! Pure classification of a point in decoration-local coordinates (origin at
//! the top-left of the titlebar). Priority, first match wins: corners, edges,
//! titlebar buttons, titlebar drag zone.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::config::{ButtonAlign, DecorationConfig};
use crate::math::{Rect, Vec2};

/// Side length of the square corner resize zones
pub const CORNER_SIZE: f32 = 8.0;

/// Edge mask for resize zones and resize grabs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Edges(u8);

impl Edges {
    pub const NONE: Edges = Edges(0);
    pub const TOP: Edges = Edges(1);
    pub const BOTTOM: Edges = Edges(1 << 1);
    pub const LEFT: Edges = Edges(1 << 2);
    pub const RIGHT: Edges = Edges(1 << 3);

    pub const TOP_LEFT: Edges = Edges(1 | 1 << 2);
    pub const TOP_RIGHT: Edges = Edges(1 | 1 << 3);
    pub const BOTTOM_LEFT: Edges = Edges(1 << 1 | 1 << 2);
    pub const BOTTOM_RIGHT: Edges = Edges(1 << 1 | 1 << 3);

    /// Check if every edge in `other` is set
    #[inline]
    pub fn contains(self, other: Edges) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Edges {
    type Output = Edges;

    fn bitor(self, rhs: Edges) -> Edges {
        Edges(self.0 | rhs.0)
    }
}

/// Titlebar button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonKind {
    Close,
    Maximize,
    Minimize,
}

/// Result of a decoration hit test
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorationHit {
    /// Titlebar drag zone
    TitleBar,
    /// A titlebar button
    Button(ButtonKind),
    /// Resize zone with its edge mask
    Resize(Edges),
}

impl DecorationHit {
    /// Check if this is a resize zone
    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, DecorationHit::Resize(_))
    }
}

/// Everything the hit test depends on
#[derive(Clone, Debug, PartialEq)]
pub struct DecorationGeometry {
    /// Full decorated width (equals content width)
    pub width: f32,
    pub titlebar_height: f32,
    pub border_width: f32,
    pub button_size: f32,
    pub button_spacing: f32,
    pub button_margin: f32,
    pub buttons: Vec<ButtonKind>,
    pub align: ButtonAlign,
    pub content_height: f32,
}

impl DecorationGeometry {
    /// Geometry for a decoration around content of the given size
    pub fn new(config: &DecorationConfig, width: f32, content_height: f32) -> Self {
        Self {
            width,
            titlebar_height: config.height,
            border_width: config.border_width,
            button_size: config.button_size,
            button_spacing: config.button_spacing,
            button_margin: config.button_margin,
            buttons: config.buttons.clone(),
            align: config.align,
            content_height,
        }
    }

    /// Titlebar plus content height
    #[inline]
    pub fn total_height(&self) -> f32 {
        self.titlebar_height + self.content_height
    }

    /// Local box of the `index`th button in placement order
    pub fn button_rect(&self, index: usize) -> Rect {
        let step = self.button_size + self.button_spacing;
        let x = match self.align {
            ButtonAlign::Left => self.button_margin + index as f32 * step,
            ButtonAlign::Right => {
                self.width - self.button_margin - self.button_size - index as f32 * step
            }
        };
        let y = (self.titlebar_height - self.button_size) / 2.0;
        Rect::new(x, y, self.button_size, self.button_size)
    }

    /// Buttons with their local boxes, in placement order
    pub fn button_rects(&self) -> impl Iterator<Item = (ButtonKind, Rect)> + '_ {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, &kind)| (kind, self.button_rect(i)))
    }

    /// Classify a decoration-local point
    pub fn hit_test(&self, local: Vec2) -> Option<DecorationHit> {
        let (x, y) = (local.x, local.y);
        let (w, h) = (self.width, self.total_height());
        if x < 0.0 || y < 0.0 || x >= w || y >= h {
            return None;
        }

        // Corners
        let near_left = x < CORNER_SIZE;
        let near_right = x >= w - CORNER_SIZE;
        let near_top = y < CORNER_SIZE;
        let near_bottom = y >= h - CORNER_SIZE;
        let corner = match (near_top, near_bottom, near_left, near_right) {
            (true, _, true, _) => Some(Edges::TOP_LEFT),
            (true, _, _, true) => Some(Edges::TOP_RIGHT),
            (_, true, true, _) => Some(Edges::BOTTOM_LEFT),
            (_, true, _, true) => Some(Edges::BOTTOM_RIGHT),
            _ => None,
        };
        if let Some(edges) = corner {
            return Some(DecorationHit::Resize(edges));
        }

        // Edges
        let bw = self.border_width;
        let mut edges = Edges::NONE;
        if y < bw {
            edges = edges | Edges::TOP;
        } else if y >= h - bw {
            edges = edges | Edges::BOTTOM;
        }
        if x < bw {
            edges = edges | Edges::LEFT;
        } else if x >= w - bw {
            edges = edges | Edges::RIGHT;
        }
        if !edges.is_empty() {
            return Some(DecorationHit::Resize(edges));
        }

        if y < self.titlebar_height {
            let button = self
                .button_rects()
                .find(|(_, rect)| rect.contains(local))
                .map(|(kind, _)| DecorationHit::Button(kind));
            return Some(button.unwrap_or(DecorationHit::TitleBar));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> DecorationGeometry {
        DecorationGeometry::new(&DecorationConfig::default(), 400.0, 300.0)
    }

    #[test]
    fn test_corners() {
        let g = geometry();
        assert_eq!(g.hit_test(Vec2::new(2.0, 2.0)), Some(DecorationHit::Resize(Edges::TOP_LEFT)));
        assert_eq!(g.hit_test(Vec2::new(397.0, 3.0)), Some(DecorationHit::Resize(Edges::TOP_RIGHT)));
        assert_eq!(g.hit_test(Vec2::new(5.0, 320.0)), Some(DecorationHit::Resize(Edges::BOTTOM_LEFT)));
        assert_eq!(g.hit_test(Vec2::new(399.0, 323.0)), Some(DecorationHit::Resize(Edges::BOTTOM_RIGHT)));
    }

    #[test]
    fn test_edges() {
        let g = geometry();
        assert_eq!(g.hit_test(Vec2::new(200.0, 1.0)), Some(DecorationHit::Resize(Edges::TOP)));
        assert_eq!(g.hit_test(Vec2::new(0.5, 150.0)), Some(DecorationHit::Resize(Edges::LEFT)));
        assert_eq!(g.hit_test(Vec2::new(398.5, 150.0)), Some(DecorationHit::Resize(Edges::RIGHT)));
        assert_eq!(g.hit_test(Vec2::new(200.0, 323.0)), Some(DecorationHit::Resize(Edges::BOTTOM)));
    }

    #[test]
    fn test_buttons_right_aligned() {
        let g = geometry();
        // Close is outermost: x in [376, 392), y in [4, 20)
        assert_eq!(g.button_rect(0), Rect::new(376.0, 4.0, 16.0, 16.0));
        assert_eq!(g.hit_test(Vec2::new(380.0, 10.0)), Some(DecorationHit::Button(ButtonKind::Close)));
        assert_eq!(g.hit_test(Vec2::new(360.0, 10.0)), Some(DecorationHit::Button(ButtonKind::Maximize)));
        assert_eq!(g.hit_test(Vec2::new(338.0, 10.0)), Some(DecorationHit::Button(ButtonKind::Minimize)));
        // Spacing between buttons is titlebar
        assert_eq!(g.hit_test(Vec2::new(373.0, 10.0)), Some(DecorationHit::TitleBar));
    }

    #[test]
    fn test_buttons_left_aligned() {
        let config = DecorationConfig {
            align: ButtonAlign::Left,
            ..Default::default()
        };
        let g = DecorationGeometry::new(&config, 400.0, 300.0);
        assert_eq!(g.button_rect(1), Rect::new(30.0, 4.0, 16.0, 16.0));
        assert_eq!(g.hit_test(Vec2::new(10.0, 10.0)), Some(DecorationHit::Button(ButtonKind::Close)));
    }

    #[test]
    fn test_titlebar_and_content() {
        let g = geometry();
        assert_eq!(g.hit_test(Vec2::new(100.0, 12.0)), Some(DecorationHit::TitleBar));
        assert_eq!(g.hit_test(Vec2::new(100.0, 100.0)), None);
        assert_eq!(g.hit_test(Vec2::new(-1.0, 12.0)), None);
        assert_eq!(g.hit_test(Vec2::new(100.0, 324.0)), None);
    }

    #[test]
    fn test_corner_wins_over_button() {
        let config = DecorationConfig {
            button_margin: 0.0,
            ..Default::default()
        };
        let g = DecorationGeometry::new(&config, 400.0, 300.0);
        // Close spans x in [384, 400); its top-right corner overlaps the corner zone
        let point = Vec2::new(396.0, 5.0);
        assert!(g.button_rect(0).contains(point));
        assert_eq!(g.hit_test(point), Some(DecorationHit::Resize(Edges::TOP_RIGHT)));
    }

    #[test]
    fn test_edges_combine() {
        assert!((Edges::BOTTOM | Edges::RIGHT).contains(Edges::RIGHT));
        assert_eq!(Edges::TOP | Edges::LEFT, Edges::TOP_LEFT);
        assert!(!Edges::BOTTOM_RIGHT.contains(Edges::TOP));
    }
}
