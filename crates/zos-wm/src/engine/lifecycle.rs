//! Window lifecycle: map, unmap, commit, destroy

use tracing::{debug, warn};

use crate::backend::Backend;
use crate::config::{OpenStyle, RuleOverrides};
use crate::decoration::Decoration;
use crate::input::GrabState;
use crate::math::{Rect, Size, Vec2};
use crate::transition::{Animation, Completion};
use crate::window::{MapRequest, WindowId};
use super::Server;

impl<B: Backend> Server<B> {
    /// Manage a newly mapped surface.
    ///
    /// The window lands on the current workspace at the head of the sequence
    /// unless a rule says otherwise, gets decorated when decorations are on,
    /// and takes focus when it is visible.
    pub fn map_window(&mut self, request: MapRequest) -> WindowId {
        let rules = self.config.rules_for(&request.app_id, &request.title);
        let id = self.windows.create(request, self.workspace);

        if self.config.decoration.enabled {
            self.decorate(id);
        }
        self.apply_rules(id, &rules);

        let Some(window) = self.windows.get(id) else {
            return id;
        };
        let (workspace, floating, root) = (window.workspace, window.floating, window.root_node());
        debug!(
            window = id,
            app_id = %window.app_id,
            title = %window.title,
            workspace,
            floating,
            "window mapped"
        );

        if floating {
            let content = rules.size.unwrap_or_else(|| self.content_size_of(id));
            let header = window.header_height();
            let size = Size::new(content.width, content.height + header);
            let rect = match rules.position {
                Some(pos) => Rect::from_pos_size(pos, size),
                None => self.output.centered(size),
            };
            self.place_window(id, rect);
        }

        let visible = workspace == self.workspace;
        if !visible {
            self.backend.set_node_enabled(root, false);
        }

        self.recompute_layout();

        if rules.fullscreen == Some(true) {
            self.set_fullscreen(id, true);
        }

        if visible {
            self.open_transition(id);
            self.focus_window(id);
        }
        id
    }

    fn apply_rules(&mut self, id: WindowId, rules: &RuleOverrides) {
        let workspaces = self.config.workspaces;
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if let Some(floating) = rules.floating {
            window.floating = floating;
        }
        if let Some(workspace) = rules.workspace {
            window.workspace = workspace.clamp(1, workspaces);
        }
        if let Some(opacity) = rules.opacity {
            window.opacity = opacity.clamp(0.0, 1.0);
        }
        // A floating position or size implies floating
        if !window.floating && (rules.position.is_some() || rules.size.is_some()) && rules.floating.is_none() {
            window.floating = true;
        }
        let (root, opacity) = (window.root_node(), window.opacity);
        self.backend.set_node_opacity(root, opacity);
    }

    /// Wrap a window in a decoration; failure leaves it undecorated
    pub(crate) fn decorate(&mut self, id: WindowId) -> bool {
        let size = self.content_size_of(id);
        let Some(window) = self.windows.get_mut(id) else {
            return false;
        };
        if window.decoration.is_some() {
            return true;
        }
        match Decoration::create(&mut self.backend, &self.config.decoration, window.content, size) {
            Ok(mut deco) => {
                if window.fullscreen {
                    // Hidden chrome puts content at the frame origin
                    let frame = deco.frame();
                    let pos = self.backend.node_position(frame).unwrap_or(Vec2::ZERO);
                    deco.set_visible(&mut self.backend, window.content, false);
                    self.backend
                        .set_node_position(frame, pos + Vec2::new(0.0, self.config.decoration.height));
                }
                window.decoration = Some(deco);
                true
            }
            Err(e) => {
                warn!(window = id, error = %e, "failed to create decoration, leaving window undecorated");
                false
            }
        }
    }

    fn open_transition(&mut self, id: WindowId) {
        if !self.config.animation.animate_open() {
            return;
        }
        let Some(target) = self.target_box(id) else {
            return;
        };
        let now = self.backend.now_ms();
        let (duration, curve) = (self.config.animation.duration_ms, self.config.animation.curve);
        let animation = match self.config.animation.open_style {
            OpenStyle::Zoom => Animation::zoom_in(target, now, duration, curve),
            OpenStyle::Fade => {
                self.place_window(id, target);
                Animation::fade(target, 0.0, 1.0, now, duration, curve)
            }
        };
        self.start_animation(id, animation);
    }

    /// The surface was unmapped: leave the sequence, recompute, refocus.
    ///
    /// With a close transition configured the window stays in the arena
    /// until its animation finishes.
    pub fn unmap_window(&mut self, id: WindowId) {
        self.remove_window(id, true);
    }

    /// The surface was destroyed: finalize immediately, including a window
    /// whose close transition is still running
    pub fn destroy_window(&mut self, id: WindowId) {
        let closing = self.windows.get(id).map(|w| w.closing);
        match closing {
            Some(true) => self.finalize_window(id),
            Some(false) => self.remove_window(id, false),
            None => {}
        }
    }

    fn remove_window(&mut self, id: WindowId, animate: bool) {
        let had_focus = self.focused() == Some(id);
        if !self.windows.detach(id) {
            return;
        }

        if self.grab.references(id) {
            self.release_grab();
        }

        let visible = self
            .windows
            .get(id)
            .map_or(false, |w| w.workspace == self.workspace && !w.minimized);
        let close_box = if animate && visible && self.config.animation.animate_close() {
            self.window_box(id)
        } else {
            None
        };

        match close_box {
            Some(rect) => {
                if let Some(window) = self.windows.get_mut(id) {
                    window.closing = true;
                    self.backend.set_activated(window.surface, false);
                }
                let now = self.backend.now_ms();
                let anim = &self.config.animation;
                let animation = match anim.open_style {
                    OpenStyle::Zoom => Animation::zoom_out(rect, now, anim.duration_ms, anim.curve),
                    OpenStyle::Fade => Animation::fade(rect, 1.0, 0.0, now, anim.duration_ms, anim.curve),
                };
                self.start_animation(id, animation.with_completion(Completion::FinalizeClose));
                debug!(window = id, "window unmapped, closing");
            }
            None => self.finalize_window(id),
        }

        self.recompute_layout();
        if had_focus || self.focused().is_none() {
            self.focus_fallback();
        }
    }

    /// Drop a window from the arena and destroy its scene nodes
    pub(crate) fn finalize_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.remove(id) else {
            return;
        };
        if self.grab.references(id) {
            self.grab = GrabState::Normal;
        }
        self.backend.destroy_node(window.root_node());
        debug!(window = id, "window finalized");
    }

    /// The client committed new content geometry
    pub fn commit_window(&mut self, id: WindowId) {
        let size = self.content_size_of(id);
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if let Some(deco) = window.decoration.as_mut() {
            if (deco.width() - size.width).abs() > f32::EPSILON {
                deco.resize(&mut self.backend, &self.config.decoration, size);
            } else {
                deco.set_content_height(size.height);
            }
        }
    }

    /// The client asked to enter or leave fullscreen
    pub fn request_fullscreen(&mut self, id: WindowId, fullscreen: bool) {
        self.set_fullscreen(id, fullscreen);
    }

    /// The client asked to be minimized
    pub fn request_minimize(&mut self, id: WindowId) {
        self.set_minimized(id, true);
    }

    /// Update the declared title
    pub fn set_title(&mut self, id: WindowId, title: impl Into<String>) {
        if let Some(window) = self.windows.get_mut(id) {
            window.title = title.into();
        }
    }

    /// Update the declared application identifier
    pub fn set_app_id(&mut self, id: WindowId, app_id: impl Into<String>) {
        if let Some(window) = self.windows.get_mut(id) {
            window.app_id = app_id.into();
        }
    }
}
