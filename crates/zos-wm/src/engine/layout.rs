//! Window geometry and tiling recompute

use tracing::trace;

use crate::backend::Backend;
use crate::layout::{arrange, content_size, LayoutMode, TilingParams};
use crate::math::{Rect, Size, Vec2};
use crate::transition::{Animation, Frame};
use crate::window::WindowId;
use super::Server;

impl<B: Backend> Server<B> {
    /// Content geometry as reported by the surface (100×100 when unknown)
    pub(crate) fn content_size_of(&self, id: WindowId) -> Size {
        self.windows
            .get(id)
            .and_then(|w| self.backend.surface_size(w.surface))
            .unwrap_or(Size::PLACEHOLDER)
    }

    /// Displayed box: root node position plus content size plus header
    pub fn window_box(&self, id: WindowId) -> Option<Rect> {
        let window = self.windows.get(id)?;
        let position = self
            .backend
            .node_position(window.root_node())
            .unwrap_or(Vec2::ZERO);
        let content = self.content_size_of(id);
        Some(Rect::new(
            position.x,
            position.y,
            content.width,
            content.height + window.header_height(),
        ))
    }

    /// Move a window's root node; legacy clients are told where their
    /// content now sits
    pub(crate) fn set_window_position(&mut self, id: WindowId, position: Vec2) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        self.backend.set_node_position(window.root_node(), position);
        if window.is_legacy() {
            let content_pos = position + Vec2::new(0.0, window.header_height());
            self.backend.configure_position(window.surface, content_pos);
        }
    }

    /// Ask for a new content size and keep the decoration in step
    pub(crate) fn set_content_size(&mut self, id: WindowId, size: Size) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        self.backend.configure_size(window.surface, size);
        if let Some(deco) = window.decoration.as_mut() {
            deco.resize(&mut self.backend, &self.config.decoration, size);
        }
    }

    /// Place a window at a decorated box immediately
    pub(crate) fn place_window(&mut self, id: WindowId, rect: Rect) {
        let Some(header) = self.windows.get(id).map(|w| w.header_height()) else {
            return;
        };
        self.set_window_position(id, rect.position());
        self.set_content_size(id, content_size(rect.size(), header));
    }

    /// Place a window, animating when layout transitions are enabled
    pub(crate) fn move_to_box(&mut self, id: WindowId, target: Rect) {
        // A running zoom or fade keeps its opacity and completion; only its box moves
        if let Some(running) = self
            .windows
            .get_mut(id)
            .and_then(|w| w.animation.as_mut())
            .filter(|anim| anim.drives_opacity())
        {
            running.retarget(target);
            self.place_window(id, target);
            return;
        }
        if !self.config.animation.animate_layout() {
            self.place_window(id, target);
            return;
        }
        let Some(current) = self.window_box(id) else {
            return;
        };
        if current == target {
            return;
        }
        let anim = Animation::between(
            current,
            target,
            self.backend.now_ms(),
            self.config.animation.duration_ms,
            self.config.animation.curve,
        );
        self.start_animation(id, anim);
    }

    /// Apply one sampled animation frame
    pub(crate) fn apply_frame(&mut self, id: WindowId, frame: &Frame) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        let (root, header, opacity) = (window.root_node(), window.header_height(), window.opacity);

        self.set_window_position(id, frame.position);
        if let Some(size) = frame.size {
            self.set_content_size(id, content_size(size, header));
        }
        if let Some(alpha) = frame.opacity {
            self.backend.set_node_opacity(root, alpha * opacity);
        }
    }

    /// Where a window is headed: its animation target, else its current box
    pub(crate) fn target_box(&self, id: WindowId) -> Option<Rect> {
        let window = self.windows.get(id)?;
        match &window.animation {
            Some(anim) => Some(Rect::from_pos_size(anim.to_position, anim.to_size)),
            None => self.window_box(id),
        }
    }

    /// Full master/stack recompute for the current workspace.
    ///
    /// Suppressed entirely in floating mode. Maximized windows hold a slot
    /// but keep their maximized box.
    pub fn recompute_layout(&mut self) {
        if self.mode == LayoutMode::Floating {
            return;
        }

        let eligible: Vec<WindowId> = self
            .windows
            .ordered()
            .filter(|w| w.is_tiled() && w.workspace == self.workspace)
            .map(|w| w.id)
            .collect();

        let params = TilingParams::from_config(&self.config);
        let arrangement = arrange(&eligible, &self.output, &params);
        trace!(
            windows = eligible.len(),
            master_width = arrangement.master_width,
            "layout recomputed"
        );

        for tile in arrangement.tiles {
            let maximized = self.windows.get(tile.window).map_or(true, |w| w.maximized);
            if maximized {
                continue;
            }
            self.move_to_box(tile.window, tile.rect);
        }
    }

    /// Resize the output and refit every window that depends on it
    pub fn set_output_size(&mut self, size: Size) {
        self.output.size = size;
        let full = self.output.rect();
        let usable = self.output.usable_area(self.config.outer_gap);

        for id in self.windows.order().to_vec() {
            let Some(window) = self.windows.get(id) else {
                continue;
            };
            if window.fullscreen {
                self.place_window(id, full);
            } else if window.maximized {
                self.place_window(id, usable);
            }
        }
        self.recompute_layout();
    }
}
