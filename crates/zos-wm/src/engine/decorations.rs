//! Runtime decoration enable/disable

use tracing::debug;

use crate::backend::Backend;
use crate::window::WindowId;
use super::Server;

impl<B: Backend> Server<B> {
    /// Turn server-side decorations on or off for every window.
    ///
    /// Content stays where it is on screen: disabling reparents it back to
    /// the scene root, enabling wraps it in a new frame above it.
    pub fn set_decorations_enabled(&mut self, enabled: bool) {
        if self.config.decoration.enabled == enabled {
            return;
        }
        self.config.decoration.enabled = enabled;
        self.sync_decorations(false);
        self.recompute_layout();
    }

    /// Bring every live window's decoration in line with the config.
    /// With `rebuild`, existing decorations are recreated from scratch.
    pub(crate) fn sync_decorations(&mut self, rebuild: bool) {
        let enabled = self.config.decoration.enabled;
        self.release_grab();

        for id in self.windows.ids() {
            let Some(window) = self.windows.get(id) else {
                continue;
            };
            if window.closing {
                continue;
            }
            let decorated = window.is_decorated();
            if decorated && (rebuild || !enabled) {
                self.settle_animation(id);
                self.strip(id);
            }
            if enabled && !self.windows.get(id).map_or(true, |w| w.is_decorated()) {
                self.settle_animation(id);
                self.decorate(id);
            }
            self.refresh_root(id);
        }

        let focused = self.focused();
        self.restyle_focus(focused);
        debug!(enabled, rebuild, "decorations synced");
    }

    /// Jump a live animation to its end so geometry is final before the root
    /// node changes
    fn settle_animation(&mut self, id: WindowId) {
        let Some(anim) = self.windows.get_mut(id).and_then(|w| w.animation.take()) else {
            return;
        };
        self.apply_frame(id, &anim.final_frame());
    }

    fn strip(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if let Some(deco) = window.decoration.take() {
            deco.destroy(&mut self.backend, window.content);
        }
    }

    /// Reapply visibility and opacity to whichever node is now the root
    fn refresh_root(&mut self, id: WindowId) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        let visible = window.workspace == self.workspace && !window.minimized;
        let (root, content, opacity) = (window.root_node(), window.content, window.opacity);
        if root != content {
            self.backend.set_node_opacity(content, 1.0);
            self.backend.set_node_enabled(content, true);
        }
        self.backend.set_node_opacity(root, opacity);
        self.backend.set_node_enabled(root, visible);
    }
}
