//! Pointer grabs and key dispatch

use tracing::trace;

use crate::backend::Backend;
use crate::config::Modifiers;
use crate::decoration::{ButtonKind, DecorationHit, Edges};
use crate::input::{calculate_resize, ButtonState, GrabState, InputResult, PointerButton};
use crate::layout::LayoutMode;
use crate::math::{Rect, Vec2};
use crate::window::WindowId;
use super::Server;

impl<B: Backend> Server<B> {
    /// Topmost live window under a layout-space point
    pub fn window_at(&self, pos: Vec2) -> Option<WindowId> {
        let node = self.backend.node_at(pos)?;
        self.windows
            .find_by_root(node)
            .filter(|&id| self.windows.get(id).map_or(false, |w| !w.closing))
    }

    fn root_position(&self, id: WindowId) -> Vec2 {
        self.windows
            .get(id)
            .and_then(|w| self.backend.node_position(w.root_node()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Titlebar and border drags need a floating window or floating mode
    fn can_drag(&self, id: WindowId) -> bool {
        self.mode == LayoutMode::Floating || self.windows.get(id).map_or(false, |w| w.floating)
    }

    /// Handle a pointer button event
    pub fn pointer_button(&mut self, pos: Vec2, button: PointerButton, state: ButtonState) -> InputResult {
        if state == ButtonState::Released {
            if self.grab.is_normal() {
                return self.forward(pos);
            }
            trace!(grab = ?self.grab, "grab released");
            self.release_grab();
            return InputResult::Handled;
        }

        if !self.grab.is_normal() {
            return InputResult::Handled;
        }
        let Some(id) = self.window_at(pos) else {
            return InputResult::Unhandled;
        };

        if self.backend.modifier_held() {
            match button {
                PointerButton::Left => {
                    self.begin_move(id, pos);
                    return InputResult::Handled;
                }
                PointerButton::Right => {
                    self.begin_resize(id, Edges::BOTTOM_RIGHT, pos);
                    return InputResult::Handled;
                }
                PointerButton::Middle => {}
            }
        }

        if button == PointerButton::Left {
            let local = pos - self.root_position(id);
            let hit = self
                .windows
                .get(id)
                .and_then(|w| w.decoration.as_ref())
                .and_then(|deco| deco.hit_test(local));

            match hit {
                Some(DecorationHit::TitleBar) => {
                    if self.can_drag(id) {
                        self.begin_move(id, pos);
                    } else {
                        self.focus_window(id);
                    }
                    return InputResult::Handled;
                }
                Some(DecorationHit::Resize(edges)) if self.can_drag(id) => {
                    self.begin_resize(id, edges, pos);
                    return InputResult::Handled;
                }
                Some(DecorationHit::Button(kind)) => {
                    self.press_button(id, kind);
                    return InputResult::Handled;
                }
                _ => {}
            }
        }

        self.focus_window(id);
        self.forward(pos)
    }

    fn press_button(&mut self, id: WindowId, kind: ButtonKind) {
        trace!(window = id, ?kind, "decoration button pressed");
        match kind {
            ButtonKind::Close => {
                if let Some(surface) = self.windows.get(id).map(|w| w.surface) {
                    self.backend.close(surface);
                }
            }
            ButtonKind::Maximize => self.toggle_maximized(id),
            ButtonKind::Minimize => self.set_minimized(id, true),
        }
    }

    fn begin_move(&mut self, id: WindowId, pos: Vec2) {
        let offset = pos - self.root_position(id);
        if let Some(window) = self.windows.get_mut(id) {
            window.animation = None;
        }
        self.focus_window(id);
        self.grab = GrabState::Move { window: id, offset };
        trace!(window = id, ?offset, "move grab started");
    }

    fn begin_resize(&mut self, id: WindowId, edges: Edges, pos: Vec2) {
        let grab_box = Rect::from_pos_size(self.root_position(id), self.content_size_of(id));
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        window.animation = None;
        let surface = window.surface;
        self.focus_window(id);
        self.backend.set_resizing(surface, true);
        self.grab = GrabState::Resize {
            window: id,
            edges,
            grab_box,
            grab_origin: pos,
        };
        trace!(window = id, ?edges, "resize grab started");
    }

    /// Handle pointer motion in layout coordinates
    pub fn pointer_motion(&mut self, pos: Vec2) -> InputResult {
        match self.grab.clone() {
            GrabState::Move { window, offset } => {
                self.set_window_position(window, pos - offset);
                InputResult::Handled
            }
            GrabState::Resize {
                window,
                edges,
                grab_box,
                grab_origin,
            } => {
                let rect = calculate_resize(edges, grab_box, pos - grab_origin);
                self.set_window_position(window, rect.position());
                self.set_content_size(window, rect.size());
                InputResult::Handled
            }
            GrabState::Normal => {
                self.update_hover(pos);
                self.forward(pos)
            }
        }
    }

    /// Refresh button hover on every decoration; only the window under the
    /// pointer can have a hovered button
    fn update_hover(&mut self, pos: Vec2) {
        let under = self.window_at(pos);
        for id in self.windows.ids() {
            let local = (under == Some(id)).then(|| pos - self.root_position(id));
            let Some(window) = self.windows.get_mut(id) else {
                continue;
            };
            if let Some(deco) = window.decoration.as_mut() {
                deco.update_hover(&mut self.backend, &self.config.decoration, local);
            }
        }
    }

    /// Forward to the client under the pointer in content-local coordinates
    fn forward(&self, pos: Vec2) -> InputResult {
        let Some(id) = self.window_at(pos) else {
            return InputResult::Unhandled;
        };
        let header = self.windows.get(id).map_or(0.0, |w| w.header_height());
        let local = pos - self.root_position(id) - Vec2::new(0.0, header);
        if local.y < 0.0 {
            return InputResult::Handled;
        }
        InputResult::Forward {
            window_id: id,
            local_x: local.x,
            local_y: local.y,
        }
    }

    /// Run the action bound to a key combo; false when nothing is bound
    pub fn handle_key(&mut self, modifiers: Modifiers, key: &str) -> bool {
        let Some(action) = self.config.action_for(modifiers, key) else {
            return false;
        };
        trace!(?modifiers, key, ?action, "key bound");
        self.dispatch(action);
        true
    }
}
