//! Tiling Window Manager Core for Zero OS
//!
//! This crate provides the decision core of a tiling window manager:
//! - Window lifecycle and mode toggles (floating, fullscreen, maximize, minimize)
//! - Master/stack tiling layout across numbered workspaces
//! - Keyboard focus, list and directional navigation
//! - Pointer move/resize grabs and decoration hit-testing
//! - Time-driven window animations with easing curves
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`, `Rect`)
//! - [`config`]: TOML configuration, keybinds and window rules
//! - [`backend`]: Collaborator traits (scene graph, surfaces, seat, clock) and a mock
//! - [`window`]: Window arena and ordered sequence
//! - [`layout`]: Pure master/stack arrangement
//! - [`focus`]: Pure navigation queries
//! - [`input`]: Grab state and resize math
//! - [`decoration`]: Titlebar/border chrome and hit-testing
//! - [`transition`]: Easing curves and animation records
//!
//! [`Server`] ties them together and is driven entirely by method calls from
//! the host compositor.
//!
//! ## Example
//!
//! ```rust
//! use zos_wm::{MapRequest, MockBackend, Server, Size};
//!
//! let mut server = Server::new(MockBackend::new());
//! let (surface, content) = server.backend_mut().create_surface(Some(Size::new(640.0, 480.0)));
//!
//! let id = server.map_window(MapRequest::native(surface, content).with_app_id("term"));
//! assert_eq!(server.focused(), Some(id));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Single-threaded core**: every event runs to completion on one thread
//! 2. **Handles, not pointers**: windows are addressed by `WindowId` through an arena
//! 3. **Injectable collaborators**: time, scene and seat come from the backend
//! 4. **Full recompute**: tiling is recalculated from scratch on every trigger

pub mod backend;
pub mod config;
pub mod decoration;
pub mod error;
pub mod focus;
pub mod input;
pub mod layout;
pub mod math;
pub mod transition;
pub mod window;

mod engine;

// Re-export core types for convenience
pub use math::{Rect, Size, Vec2};
pub use backend::{Backend, Clock, ConfigStore, MockBackend, NodeId, SceneGraph, Seat, SurfaceHost, SurfaceId};
pub use config::{Action, Config, FileConfigStore, Modifiers, WindowRule};
pub use decoration::{ButtonKind, DecorationHit, Edges};
pub use error::{BackendError, ConfigError};
pub use focus::Direction;
pub use input::{ButtonState, GrabState, InputResult, PointerButton};
pub use layout::{LayoutMode, Output};
pub use transition::{Curve, TICK_INTERVAL_MS};
pub use window::{MapRequest, SurfaceKind, Window, WindowId, WindowManager};

pub use engine::Server;
