//! Floating, fullscreen, maximize and minimize toggles

use tracing::debug;

use crate::backend::Backend;
use crate::layout::LayoutMode;
use crate::transition::{Animation, Completion};
use crate::window::WindowId;
use super::Server;

impl<B: Backend> Server<B> {
    /// Switch the server between tiling and floating mode
    pub fn set_mode(&mut self, mode: LayoutMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        debug!(?mode, "layout mode changed");
        if mode == LayoutMode::Tiling {
            self.recompute_layout();
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    /// Floating windows keep their absolute box and leave the tiling math.
    ///
    /// The mode setters ignore closing windows: their close transition owns
    /// them until it finalizes.
    pub fn set_floating(&mut self, id: WindowId, floating: bool) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if window.closing || window.floating == floating {
            return;
        }
        window.floating = floating;
        debug!(window = id, floating, "floating toggled");
        self.recompute_layout();
    }

    pub fn toggle_floating(&mut self, id: WindowId) {
        if let Some(floating) = self.windows.get(id).map(|w| w.floating) {
            self.set_floating(id, !floating);
        }
    }

    /// Enter or leave fullscreen.
    ///
    /// Entering captures the displayed box into `saved`. Leaving re-tiles a
    /// plain tiled window and otherwise restores `saved`, which for a
    /// maximized window is its maximized box.
    pub fn set_fullscreen(&mut self, id: WindowId, fullscreen: bool) {
        let Some(current) = self.windows.get(id).filter(|w| !w.closing).map(|w| w.fullscreen) else {
            return;
        };
        if current == fullscreen {
            return;
        }
        if fullscreen {
            self.enter_fullscreen(id);
        } else {
            self.leave_fullscreen(id);
        }
        debug!(window = id, fullscreen, "fullscreen toggled");
        self.recompute_layout();
    }

    fn enter_fullscreen(&mut self, id: WindowId) {
        let saved = self.window_box(id);
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        window.saved = saved;
        window.animation = None;
        window.fullscreen = true;
        if let Some(deco) = window.decoration.as_mut() {
            deco.set_visible(&mut self.backend, window.content, false);
        }
        let (root, surface) = (window.root_node(), window.surface);

        self.place_window(id, self.output.rect());
        self.backend.raise_node(root);
        self.backend.set_fullscreen(surface, true);
    }

    fn leave_fullscreen(&mut self, id: WindowId) {
        let tiling = self.mode == LayoutMode::Tiling;
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        window.fullscreen = false;
        if let Some(deco) = window.decoration.as_mut() {
            deco.set_visible(&mut self.backend, window.content, true);
        }
        let saved = window.saved.take();
        let retile = tiling && !window.floating && !window.maximized;
        self.backend.set_fullscreen(window.surface, false);

        if !retile {
            if let Some(rect) = saved {
                self.place_window(id, rect);
            }
        }
    }

    pub fn toggle_fullscreen(&mut self, id: WindowId) {
        if let Some(fullscreen) = self.windows.get(id).map(|w| w.fullscreen) {
            self.set_fullscreen(id, !fullscreen);
        }
    }

    /// Maximize to the usable area, or restore the box held in `pre_max`.
    ///
    /// While fullscreen only the restore slots change: the maximized box
    /// becomes what leaving fullscreen returns to.
    pub fn set_maximized(&mut self, id: WindowId, maximized: bool) {
        let usable = self.output.usable_area(self.config.outer_gap);
        let displayed = self.window_box(id);
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if window.closing || window.maximized == maximized {
            return;
        }
        window.maximized = maximized;
        debug!(window = id, maximized, "maximize toggled");

        if window.fullscreen {
            if maximized {
                window.pre_max = window.saved.replace(usable);
            } else {
                window.saved = window.pre_max.take();
            }
            return;
        }

        if maximized {
            window.pre_max = displayed;
            window.animation = None;
            let root = window.root_node();
            self.place_window(id, usable);
            self.backend.raise_node(root);
        } else if let Some(rect) = window.pre_max.take() {
            self.place_window(id, rect);
        }
        self.recompute_layout();
    }

    pub fn toggle_maximized(&mut self, id: WindowId) {
        if let Some(maximized) = self.windows.get(id).map(|w| w.maximized) {
            self.set_maximized(id, !maximized);
        }
    }

    /// Hide or show a window's scene presence.
    ///
    /// A minimized window keeps its place in the sequence. Minimizing the
    /// focused window hands focus to the next focusable one.
    pub fn set_minimized(&mut self, id: WindowId, minimized: bool) {
        let had_focus = self.focused() == Some(id);
        let animate = self.config.animation.animate_minimize();
        let visible_here = match self.windows.get(id) {
            Some(window) if !window.closing && window.minimized != minimized => {
                window.workspace == self.workspace
            }
            _ => return,
        };
        let rect = self.window_box(id);

        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        window.minimized = minimized;
        window.animation = None;
        let (root, opacity) = (window.root_node(), window.opacity);
        debug!(window = id, minimized, "minimize toggled");

        let (now, duration, curve) = (
            self.backend.now_ms(),
            self.config.animation.duration_ms,
            self.config.animation.curve,
        );

        if minimized {
            match rect.filter(|_| animate && visible_here) {
                Some(rect) => {
                    let fade = Animation::fade(rect, 1.0, 0.0, now, duration, curve)
                        .with_completion(Completion::FinishMinimize);
                    self.start_animation(id, fade);
                }
                None => self.backend.set_node_enabled(root, false),
            }
            if had_focus {
                self.focus_fallback();
            }
            return;
        }

        self.backend.set_node_opacity(root, opacity);
        if !visible_here {
            return;
        }
        self.backend.set_node_enabled(root, true);
        if let Some(rect) = rect.filter(|_| animate) {
            self.backend.set_node_opacity(root, 0.0);
            self.start_animation(id, Animation::fade(rect, 0.0, 1.0, now, duration, curve));
        }
        self.focus_window(id);
    }

    pub fn toggle_minimized(&mut self, id: WindowId) {
        if let Some(minimized) = self.windows.get(id).map(|w| w.minimized) {
            self.set_minimized(id, !minimized);
        }
    }
}
