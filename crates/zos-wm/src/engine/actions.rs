//! Action dispatch and config reload

use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::config::{Action, Config, ResizeStep, MASTER_RATIO_STEP};
use crate::focus::Direction;
use crate::layout::LayoutMode;
use crate::math::{Size, Vec2};
use crate::window::WindowId;
use super::Server;

impl<B: Backend> Server<B> {
    /// Run one action against the focused window or the server
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatching action");
        let focused = self.focused();

        match action {
            Action::Close => {
                if let Some(surface) = focused.and_then(|id| self.windows.get(id)).map(|w| w.surface) {
                    self.backend.close(surface);
                }
            }
            Action::ToggleFullscreen => {
                if let Some(id) = focused {
                    self.toggle_fullscreen(id);
                }
            }
            Action::ToggleFloating => {
                if let Some(id) = focused {
                    self.toggle_floating(id);
                }
            }
            Action::ToggleMaximize => {
                if let Some(id) = focused {
                    self.toggle_maximized(id);
                }
            }
            Action::Focus(direction) => self.focus_direction(direction),
            Action::FocusNext => self.focus_next(),
            Action::FocusPrev => self.focus_prev(),
            Action::Move(direction) => {
                if let Some(id) = focused {
                    self.move_window(id, direction);
                }
            }
            Action::Resize(step) => {
                if let Some(id) = focused {
                    self.resize_window(id, step);
                }
            }
            Action::Workspace(n) => self.switch_workspace(n),
            Action::WorkspaceNext => self.next_workspace(),
            Action::WorkspacePrev => self.prev_workspace(),
            Action::MoveToWorkspace(n) => {
                if let Some(id) = focused {
                    self.move_to_workspace(id, n);
                }
            }
            Action::ModeTiling => self.set_mode(LayoutMode::Tiling),
            Action::ModeFloating => self.set_mode(LayoutMode::Floating),
            Action::ModeToggle => self.toggle_mode(),
            Action::MasterCountInc => self.adjust_master_count(1),
            Action::MasterCountDec => self.adjust_master_count(-1),
            Action::MasterRatioInc => self.adjust_master_ratio(MASTER_RATIO_STEP),
            Action::MasterRatioDec => self.adjust_master_ratio(-MASTER_RATIO_STEP),
            Action::Reload => self.reload_config(),
            Action::Exit => {
                info!("exit requested");
                self.running = false;
            }
        }
    }

    /// Change the master column size (never below 1) and re-tile
    pub fn adjust_master_count(&mut self, delta: i32) {
        self.config.adjust_master_count(delta);
        self.recompute_layout();
    }

    /// Change the master share (clamped to `[0.1, 0.9]`) and re-tile
    pub fn adjust_master_ratio(&mut self, delta: f32) {
        self.config.adjust_master_ratio(delta);
        self.recompute_layout();
    }

    fn is_free(&self, id: WindowId) -> bool {
        self.mode == LayoutMode::Floating || self.windows.get(id).map_or(false, |w| w.floating)
    }

    /// Directional move: floating windows are nudged by `move_step`, tiled
    /// windows swap places in the sequence with their spatial neighbour
    pub fn move_window(&mut self, id: WindowId, direction: Direction) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        if window.fullscreen {
            return;
        }

        if self.is_free(id) {
            let Some(rect) = self.window_box(id) else {
                return;
            };
            let (dx, dy) = direction.delta();
            let step = self.config.move_step;
            let target = rect.position() + Vec2::new(f32::from(dx) * step, f32::from(dy) * step);
            if let Some(window) = self.windows.get_mut(id) {
                window.animation = None;
            }
            self.set_window_position(id, target);
            return;
        }

        let Some(neighbour) = self.neighbour(id, direction) else {
            return;
        };
        if direction.inserts_before() {
            self.windows.move_before(id, neighbour);
        } else {
            self.windows.move_after(id, neighbour);
        }
        debug!(window = id, neighbour, ?direction, "window reordered");
        self.recompute_layout();
    }

    /// Resize step: floating windows change content size by `resize_step`,
    /// tiled windows move the master/stack boundary on the width axis
    pub fn resize_window(&mut self, id: WindowId, step: ResizeStep) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        if window.fullscreen || window.maximized {
            return;
        }

        if self.is_free(id) {
            let amount = self.config.resize_step;
            let size = self.content_size_of(id);
            let resized = match step {
                ResizeStep::GrowWidth => Size::new(size.width + amount, size.height),
                ResizeStep::ShrinkWidth => Size::new(size.width - amount, size.height),
                ResizeStep::GrowHeight => Size::new(size.width, size.height + amount),
                ResizeStep::ShrinkHeight => Size::new(size.width, size.height - amount),
            };
            if let Some(window) = self.windows.get_mut(id) {
                window.animation = None;
            }
            self.set_content_size(id, resized.at_least(Size::MIN_WINDOW));
            return;
        }

        let grow = match step {
            ResizeStep::GrowWidth => true,
            ResizeStep::ShrinkWidth => false,
            // Column heights are shared equally
            ResizeStep::GrowHeight | ResizeStep::ShrinkHeight => return,
        };
        let in_master = self.tiled_index(id).map_or(true, |i| i < self.config.master_count);
        let delta = if grow == in_master {
            MASTER_RATIO_STEP
        } else {
            -MASTER_RATIO_STEP
        };
        self.adjust_master_ratio(delta);
    }

    /// Position of a window among the tiled windows of the current workspace
    fn tiled_index(&self, id: WindowId) -> Option<usize> {
        self.windows
            .ordered()
            .filter(|w| w.is_tiled() && w.workspace == self.workspace)
            .position(|w| w.id == id)
    }

    /// Re-read the config store; a failed load keeps the current config
    pub fn reload_config(&mut self) {
        match self.backend.load() {
            Ok(config) => {
                self.apply_config(config);
                info!("config reloaded");
            }
            Err(e) => warn!(error = %e, "config reload failed, keeping current config"),
        }
    }

    /// Swap in a new config snapshot and bring every window in line with it
    pub fn apply_config(&mut self, config: Config) {
        let decoration_changed = self.config.decoration != config.decoration;
        self.config = config;

        let count = self.config.workspaces;
        for id in self.windows.ids() {
            if let Some(window) = self.windows.get_mut(id) {
                window.workspace = window.workspace.min(count);
            }
        }

        if decoration_changed {
            self.sync_decorations(true);
        }
        if self.workspace > count {
            self.switch_workspace(count);
        } else {
            self.sync_visibility();
        }
        self.recompute_layout();
    }
}
