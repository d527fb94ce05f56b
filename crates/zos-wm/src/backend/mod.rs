//! Collaborator contracts
//!
//! The window manager never renders, speaks a wire protocol or reads devices
//! itself. Everything it needs from the compositor scaffold goes through the
//! traits below, bundled as [`Backend`].
//!
//! # Implementations
//!
//! - **Compositor hosts**: wrap the real scene graph, surface and seat objects
//! - **Tests / headless**: [`MockBackend`] records every command in memory

mod mock;

pub use mock::{MockBackend, MockNode, MockSurface};

use crate::config::{Color, Config};
use crate::error::{BackendError, ConfigError};
use crate::math::{Size, Vec2};

/// Handle to a scene graph node
pub type NodeId = u64;

/// Handle to a client surface
pub type SurfaceId = u64;

/// Positionable, paintable scene graph
pub trait SceneGraph {
    // === Creation ===

    /// Create an empty tree node
    ///
    /// # Arguments
    /// * `parent` - Parent node, or `None` for the scene root
    fn create_node(&mut self, parent: Option<NodeId>) -> Result<NodeId, BackendError>;

    /// Create a solid rectangle primitive under `parent`
    fn create_rect(&mut self, parent: NodeId, size: Size, color: Color) -> Result<NodeId, BackendError>;

    /// Update a rectangle primitive's size and colour
    fn set_rect(&mut self, node: NodeId, size: Size, color: Color);

    /// Destroy a node and its subtree
    fn destroy_node(&mut self, node: NodeId);

    // === Placement ===

    /// Set a node's position relative to its parent
    fn set_node_position(&mut self, node: NodeId, position: Vec2);

    /// Position relative to the parent, `None` for an unknown node
    fn node_position(&self, node: NodeId) -> Option<Vec2>;

    /// Show or hide a node and its subtree
    fn set_node_enabled(&mut self, node: NodeId, enabled: bool);

    fn set_node_opacity(&mut self, node: NodeId, opacity: f32);

    /// Move a node above its siblings
    fn raise_node(&mut self, node: NodeId);

    /// Move a node under a new parent (`None` = scene root), keeping its
    /// relative position
    fn reparent_node(&mut self, node: NodeId, parent: Option<NodeId>);

    // === Queries ===

    /// Topmost enabled root-level node whose subtree covers `point`
    fn node_at(&self, point: Vec2) -> Option<NodeId>;
}

/// Client surfaces (native and legacy)
pub trait SurfaceHost {
    /// Current content geometry, `None` when the client has not committed one
    fn surface_size(&self, surface: SurfaceId) -> Option<Size>;

    /// Ask the client for a new content size
    fn configure_size(&mut self, surface: SurfaceId, size: Size);

    /// Tell a legacy client where it sits (native clients do not know)
    fn configure_position(&mut self, surface: SurfaceId, position: Vec2);

    /// Ask the client to close
    fn close(&mut self, surface: SurfaceId);

    fn set_fullscreen(&mut self, surface: SurfaceId, fullscreen: bool);

    fn set_activated(&mut self, surface: SurfaceId, activated: bool);

    /// Mark an interactive resize as in progress or finished
    fn set_resizing(&mut self, surface: SurfaceId, resizing: bool);
}

/// The single pointer/keyboard seat
pub trait Seat {
    fn focused_surface(&self) -> Option<SurfaceId>;

    fn set_keyboard_focus(&mut self, surface: SurfaceId);

    fn clear_keyboard_focus(&mut self);

    /// Whether the window-manager modifier (usually logo) is held
    fn modifier_held(&self) -> bool;
}

/// Monotonic time plus a tick scheduler
pub trait Clock {
    /// Milliseconds on a monotonic clock
    fn now_ms(&self) -> f64;

    /// Request a call to `Server::tick` after `after_ms`
    fn schedule_tick(&mut self, after_ms: f64);
}

/// Source of configuration snapshots
pub trait ConfigStore {
    fn load(&self) -> Result<Config, ConfigError>;
}

/// Everything the server needs from its host
pub trait Backend: SceneGraph + SurfaceHost + Seat + Clock + ConfigStore {}

impl<T> Backend for T where T: SceneGraph + SurfaceHost + Seat + Clock + ConfigStore {}
