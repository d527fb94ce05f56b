//! Window manager server coordinating all components
//!
//! This module is split into focused submodules:
//! - `lifecycle`: Map, unmap, commit and destroy
//! - `modes`: Floating, fullscreen, maximize and minimize toggles
//! - `workspaces`: Workspace switching and window moves between workspaces
//! - `layout`: Geometry helpers and tiling recompute
//! - `focus`: Keyboard focus and navigation
//! - `input`: Pointer grabs and key dispatch
//! - `animation`: Animation start and tick
//! - `actions`: Action dispatch and config reload
//! - `decorations`: Runtime decoration enable/disable

mod lifecycle;
mod modes;
mod workspaces;
mod layout;
mod focus;
mod input;
mod animation;
mod actions;
mod decorations;

use tracing::warn;

use crate::backend::Backend;
use crate::config::Config;
use crate::input::GrabState;
use crate::layout::{LayoutMode, Output};
use crate::window::{Window, WindowId, WindowManager};

/// Window manager server
///
/// Owns the config snapshot, the window arena and sequence, the current
/// workspace, the layout mode and the pointer grab. Every collaborator call
/// goes through the backend `B`.
pub struct Server<B: Backend> {
    pub(crate) backend: B,
    pub(crate) config: Config,
    pub(crate) windows: WindowManager,
    pub(crate) output: Output,
    /// Current workspace (1-based)
    pub(crate) workspace: u8,
    pub(crate) mode: LayoutMode,
    pub(crate) grab: GrabState,
    /// A tick is scheduled with the clock
    pub(crate) ticking: bool,
    pub(crate) running: bool,
}

impl<B: Backend> Server<B> {
    /// Create a server, loading the initial config from the backend's store.
    /// A failed load falls back to the defaults.
    pub fn new(backend: B) -> Self {
        let config = match backend.load() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "failed to load config, using defaults");
                Config::default()
            }
        };
        Self::with_config(backend, config)
    }

    /// Create a server with an explicit config snapshot
    pub fn with_config(backend: B, config: Config) -> Self {
        Self {
            mode: config.mode,
            backend,
            config,
            windows: WindowManager::new(),
            output: Output::default(),
            workspace: 1,
            grab: GrabState::Normal,
            ticking: false,
            running: true,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    /// Get a window by ID
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id)
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn current_workspace(&self) -> u8 {
        self.workspace
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn grab(&self) -> &GrabState {
        &self.grab
    }

    /// False once the exit action ran
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether any window has a live animation
    pub fn is_animating(&self) -> bool {
        self.windows.ids().into_iter().any(|id| {
            self.windows
                .get(id)
                .map_or(false, |w| w.animation.is_some())
        })
    }
}
