//! Keyboard focus and navigation

use tracing::trace;

use crate::backend::Backend;
use crate::focus::{cycle, find_in_direction, Direction};
use crate::math::Vec2;
use crate::window::WindowId;
use super::Server;

impl<B: Backend> Server<B> {
    /// Window whose surface holds keyboard focus
    pub fn focused(&self) -> Option<WindowId> {
        let surface = self.backend.focused_surface()?;
        self.windows
            .find_by_surface(surface)
            .filter(|&id| self.windows.get(id).map_or(false, |w| !w.closing))
    }

    /// Focusable windows on the current workspace, in sequence order
    pub(crate) fn focusable(&self) -> Vec<WindowId> {
        self.windows
            .ordered()
            .filter(|w| w.is_focusable_on(self.workspace))
            .map(|w| w.id)
            .collect()
    }

    /// Raise a window, restyle decorations, activate it and give it the
    /// keyboard
    pub fn focus_window(&mut self, id: WindowId) {
        let previous = self.focused();
        let Some(window) = self.windows.get(id) else {
            return;
        };
        let (root, surface) = (window.root_node(), window.surface);

        self.backend.raise_node(root);
        self.restyle_focus(Some(id));

        if let Some(prev) = previous.filter(|&p| p != id) {
            if let Some(prev_surface) = self.windows.get(prev).map(|w| w.surface) {
                self.backend.set_activated(prev_surface, false);
            }
        }
        self.backend.set_activated(surface, true);
        self.backend.set_keyboard_focus(surface);
        trace!(window = id, "focused");
    }

    /// Recompute titlebar focus styling for every decorated window
    pub(crate) fn restyle_focus(&mut self, focused: Option<WindowId>) {
        for id in self.windows.ids() {
            let Some(window) = self.windows.get_mut(id) else {
                continue;
            };
            if let Some(deco) = window.decoration.as_mut() {
                deco.set_focused(&mut self.backend, &self.config.decoration, focused == Some(id));
            }
        }
    }

    /// Focus the first focusable window on the current workspace, or clear
    /// keyboard focus when there is none
    pub(crate) fn focus_fallback(&mut self) {
        match self.focusable().first().copied() {
            Some(id) => self.focus_window(id),
            None => self.clear_focus(),
        }
    }

    pub(crate) fn clear_focus(&mut self) {
        if let Some(prev) = self.focused() {
            if let Some(surface) = self.windows.get(prev).map(|w| w.surface) {
                self.backend.set_activated(surface, false);
            }
        }
        self.restyle_focus(None);
        self.backend.clear_keyboard_focus();
    }

    /// Cycle focus through the focusable windows
    pub fn focus_next(&mut self) {
        self.focus_cycle(true);
    }

    pub fn focus_prev(&mut self) {
        self.focus_cycle(false);
    }

    fn focus_cycle(&mut self, forward: bool) {
        let order = self.focusable();
        if let Some(target) = cycle(&order, self.focused(), forward) {
            self.focus_window(target);
        }
    }

    /// Spatial neighbour of `reference` among focusable windows
    pub(crate) fn neighbour(&self, reference: WindowId, direction: Direction) -> Option<WindowId> {
        let origin = self.window_position(reference)?;
        let (dx, dy) = direction.delta();
        let candidates: Vec<(WindowId, Vec2)> = self
            .focusable()
            .into_iter()
            .filter_map(|id| self.window_position(id).map(|pos| (id, pos)))
            .collect();
        find_in_direction((reference, origin), dx, dy, candidates)
    }

    fn window_position(&self, id: WindowId) -> Option<Vec2> {
        self.target_box(id).map(|rect| rect.position())
    }

    /// Move focus to the spatial neighbour; no-op without one
    pub fn focus_direction(&mut self, direction: Direction) {
        let Some(current) = self.focused() else {
            return;
        };
        if let Some(target) = self.neighbour(current, direction) {
            self.focus_window(target);
        }
    }
}
