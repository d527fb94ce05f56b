//! Workspace switching and window moves between workspaces

use tracing::debug;

use crate::backend::Backend;
use crate::input::GrabState;
use crate::window::WindowId;
use super::Server;

impl<B: Backend> Server<B> {
    fn clamp_workspace(&self, n: u8) -> u8 {
        n.clamp(1, self.config.workspaces.max(1))
    }

    /// Make workspace `n` current.
    ///
    /// Exactly the non-minimized windows of `n` end up visible. The grab is
    /// dropped, the layout recomputed and focus moves to the first focusable
    /// window of `n` (or is cleared).
    pub fn switch_workspace(&mut self, n: u8) {
        let n = self.clamp_workspace(n);
        if n == self.workspace {
            return;
        }
        debug!(from = self.workspace, to = n, "switching workspace");
        self.workspace = n;
        self.sync_visibility();
        self.release_grab();
        self.recompute_layout();
        self.focus_fallback();
    }

    /// Enable exactly the non-minimized windows of the current workspace
    pub(crate) fn sync_visibility(&mut self) {
        for id in self.windows.ids() {
            let Some(window) = self.windows.get(id) else {
                continue;
            };
            let visible = window.workspace == self.workspace && !window.minimized;
            self.backend.set_node_enabled(window.root_node(), visible);
        }
    }

    /// Next workspace, wrapping from the last to 1
    pub fn next_workspace(&mut self) {
        let count = self.config.workspaces.max(1);
        let next = if self.workspace >= count { 1 } else { self.workspace + 1 };
        self.switch_workspace(next);
    }

    /// Previous workspace, wrapping from 1 to the last
    pub fn prev_workspace(&mut self) {
        let count = self.config.workspaces.max(1);
        let prev = if self.workspace <= 1 { count } else { self.workspace - 1 };
        self.switch_workspace(prev);
    }

    /// Send a window to workspace `n`; it disappears if `n` is not current
    pub fn move_to_workspace(&mut self, id: WindowId, n: u8) {
        let n = self.clamp_workspace(n);
        let had_focus = self.focused() == Some(id);
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if window.workspace == n {
            return;
        }
        window.workspace = n;
        let visible = n == self.workspace && !window.minimized;
        let root = window.root_node();
        debug!(window = id, workspace = n, "window moved to workspace");

        self.backend.set_node_enabled(root, visible);
        if !visible && self.grab.references(id) {
            self.release_grab();
        }
        self.recompute_layout();
        if had_focus && !visible {
            self.focus_fallback();
        }
    }

    /// Back to `Normal`, telling a resized surface the drag is over
    pub(crate) fn release_grab(&mut self) {
        let grab = std::mem::take(&mut self.grab);
        if let GrabState::Resize { window, .. } = grab {
            if let Some(surface) = self.windows.get(window).map(|w| w.surface) {
                self.backend.set_resizing(surface, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::MockBackend;
    use crate::config::Config;
    use crate::engine::Server;
    use crate::math::Size;
    use crate::window::MapRequest;

    fn server() -> Server<MockBackend> {
        let mut config = Config::default();
        config.animation.enabled = false;
        config.workspaces = 4;
        Server::with_config(MockBackend::new(), config)
    }

    fn map(server: &mut Server<MockBackend>) -> u64 {
        let (surface, node) = server.backend_mut().create_surface(Some(Size::new(300.0, 200.0)));
        server.map_window(MapRequest::native(surface, node))
    }

    fn visible(server: &Server<MockBackend>, id: u64) -> bool {
        let root = server.window(id).unwrap().root_node();
        server.backend().is_visible(root)
    }

    #[test]
    fn test_switch_shows_only_current_workspace() {
        let mut server = server();
        let a = map(&mut server);
        server.switch_workspace(2);
        let b = map(&mut server);
        let c = map(&mut server);
        server.move_to_workspace(c, 3);

        for n in [1, 2, 3, 4, 2, 1] {
            server.switch_workspace(n);
            for id in [a, b, c] {
                let on_n = server.window(id).unwrap().workspace == n;
                assert_eq!(visible(&server, id), on_n, "window {id} on workspace {n}");
            }
        }
    }

    #[test]
    fn test_switch_focuses_first_window_or_clears() {
        let mut server = server();
        let a = map(&mut server);
        server.switch_workspace(2);
        assert_eq!(server.focused(), None);
        let b = map(&mut server);
        assert_eq!(server.focused(), Some(b));
        server.switch_workspace(1);
        assert_eq!(server.focused(), Some(a));
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let mut server = server();
        server.prev_workspace();
        assert_eq!(server.current_workspace(), 4);
        server.next_workspace();
        assert_eq!(server.current_workspace(), 1);
        server.next_workspace();
        assert_eq!(server.current_workspace(), 2);
    }

    #[test]
    fn test_switch_clamps_out_of_range() {
        let mut server = server();
        server.switch_workspace(9);
        assert_eq!(server.current_workspace(), 4);
        server.switch_workspace(0);
        assert_eq!(server.current_workspace(), 1);
    }

    #[test]
    fn test_minimized_stays_hidden_across_switch() {
        let mut server = server();
        let a = map(&mut server);
        server.set_minimized(a, true);
        server.switch_workspace(2);
        server.switch_workspace(1);
        assert!(!visible(&server, a));
        assert_eq!(server.focused(), None);
    }

    #[test]
    fn test_move_focused_window_away_refocuses() {
        let mut server = server();
        let a = map(&mut server);
        let b = map(&mut server);
        server.move_to_workspace(b, 2);
        assert!(!visible(&server, b));
        assert_eq!(server.focused(), Some(a));
        assert_eq!(server.window(b).unwrap().workspace, 2);
    }
}
