//! In-memory backend for tests and headless hosts
//!
//! Every command is applied to a plain data model that tests can inspect.
//! Clients are cooperative: a configured size is committed immediately.

use std::collections::HashMap;

use crate::config::{Color, Config};
use crate::error::{BackendError, ConfigError};
use crate::math::{Rect, Size, Vec2};
use super::{Clock, ConfigStore, NodeId, SceneGraph, Seat, SurfaceHost, SurfaceId};

/// Simulated scene node
#[derive(Clone, Debug)]
pub struct MockNode {
    pub parent: Option<NodeId>,
    /// Children, bottom to top
    pub children: Vec<NodeId>,
    pub position: Vec2,
    /// Painted extent (rectangles and surface content only)
    pub size: Option<Size>,
    pub color: Option<Color>,
    pub enabled: bool,
    pub opacity: f32,
}

impl MockNode {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            position: Vec2::ZERO,
            size: None,
            color: None,
            enabled: true,
            opacity: 1.0,
        }
    }
}

/// Simulated client surface
#[derive(Clone, Debug, Default)]
pub struct MockSurface {
    /// Content node the surface paints into
    pub node: NodeId,
    pub size: Option<Size>,
    /// Last position sent to a legacy client
    pub configured_position: Option<Vec2>,
    pub fullscreen: bool,
    pub activated: bool,
    pub resizing: bool,
    pub close_requested: bool,
}

/// Mock backend for unit and integration testing
pub struct MockBackend {
    nodes: HashMap<NodeId, MockNode>,
    /// Root-level nodes, bottom to top
    roots: Vec<NodeId>,
    surfaces: HashMap<SurfaceId, MockSurface>,
    next_node: NodeId,
    next_surface: SurfaceId,
    focused: Option<SurfaceId>,
    modifier: bool,
    now_ms: f64,
    scheduled_ticks: Vec<f64>,
    config: Config,
    load_error: Option<String>,
    fail_allocations: bool,
}

impl MockBackend {
    /// Create an empty mock backend at time 0
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a mock backend whose store serves `config`
    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            surfaces: HashMap::new(),
            next_node: 1,
            next_surface: 1,
            focused: None,
            modifier: false,
            now_ms: 0.0,
            scheduled_ticks: Vec::new(),
            config,
            load_error: None,
            fail_allocations: false,
        }
    }

    // === Test controls ===

    /// Simulate a client mapping a surface; returns its surface and content node
    pub fn create_surface(&mut self, size: Option<Size>) -> (SurfaceId, NodeId) {
        let node = self.alloc(None);
        if let Some(n) = self.nodes.get_mut(&node) {
            n.size = Some(size.unwrap_or(Size::PLACEHOLDER));
        }
        let id = self.next_surface;
        self.next_surface += 1;
        self.surfaces.insert(
            id,
            MockSurface {
                node,
                size,
                ..Default::default()
            },
        );
        (id, node)
    }

    /// Simulate a client committing a new buffer size on its own
    pub fn commit_surface(&mut self, surface: SurfaceId, size: Size) {
        self.configure_size(surface, size);
    }

    /// Advance the simulated clock
    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    /// Set the simulated clock
    pub fn set_time(&mut self, ms: f64) {
        self.now_ms = ms;
    }

    pub fn set_modifier(&mut self, held: bool) {
        self.modifier = held;
    }

    /// Replace the snapshot served by `load`
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
        self.load_error = None;
    }

    /// Make the next `load` calls fail
    pub fn fail_loads(&mut self, message: &str) {
        self.load_error = Some(message.to_string());
    }

    /// Make node allocation fail
    pub fn fail_allocations(&mut self, fail: bool) {
        self.fail_allocations = fail;
    }

    /// Drain the tick requests recorded so far
    pub fn take_scheduled_ticks(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.scheduled_ticks)
    }

    // === Inspection ===

    pub fn node(&self, node: NodeId) -> Option<&MockNode> {
        self.nodes.get(&node)
    }

    pub fn surface(&self, surface: SurfaceId) -> Option<&MockSurface> {
        self.surfaces.get(&surface)
    }

    /// Root-level nodes, bottom to top
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Position in layout coordinates (sum of ancestor offsets)
    pub fn world_position(&self, node: NodeId) -> Option<Vec2> {
        let n = self.nodes.get(&node)?;
        match n.parent {
            Some(parent) => Some(self.world_position(parent)? + n.position),
            None => Some(n.position),
        }
    }

    /// Whether the node and every ancestor are enabled
    pub fn is_visible(&self, node: NodeId) -> bool {
        match self.nodes.get(&node) {
            Some(n) if n.enabled => n.parent.map_or(true, |p| self.is_visible(p)),
            _ => false,
        }
    }

    fn alloc(&mut self, parent: Option<NodeId>) -> NodeId {
        let id = self.next_node;
        self.next_node += 1;
        self.nodes.insert(id, MockNode::new(parent));
        match parent {
            Some(p) => {
                if let Some(parent) = self.nodes.get_mut(&p) {
                    parent.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.nodes.get(&node).and_then(|n| n.parent);
        match parent {
            Some(p) => {
                if let Some(parent) = self.nodes.get_mut(&p) {
                    parent.children.retain(|&c| c != node);
                }
            }
            None => self.roots.retain(|&r| r != node),
        }
    }

    fn covers(&self, node: NodeId, origin: Vec2, point: Vec2) -> bool {
        let Some(n) = self.nodes.get(&node) else {
            return false;
        };
        if !n.enabled {
            return false;
        }
        let pos = origin + n.position;
        if let Some(size) = n.size {
            if Rect::from_pos_size(pos, size).contains(point) {
                return true;
            }
        }
        n.children.iter().any(|&c| self.covers(c, pos, point))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for MockBackend {
    fn create_node(&mut self, parent: Option<NodeId>) -> Result<NodeId, BackendError> {
        if self.fail_allocations {
            return Err(BackendError::NodeAllocation("mock allocation disabled".into()));
        }
        if let Some(p) = parent {
            if !self.nodes.contains_key(&p) {
                return Err(BackendError::UnknownNode(p));
            }
        }
        Ok(self.alloc(parent))
    }

    fn create_rect(&mut self, parent: NodeId, size: Size, color: Color) -> Result<NodeId, BackendError> {
        let id = self.create_node(Some(parent))?;
        self.set_rect(id, size, color);
        Ok(id)
    }

    fn set_rect(&mut self, node: NodeId, size: Size, color: Color) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.size = Some(size);
            n.color = Some(color);
        }
    }

    fn destroy_node(&mut self, node: NodeId) {
        self.detach(node);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.remove(&id) {
                stack.extend(n.children);
            }
        }
    }

    fn set_node_position(&mut self, node: NodeId, position: Vec2) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.position = position;
        }
    }

    fn node_position(&self, node: NodeId) -> Option<Vec2> {
        self.nodes.get(&node).map(|n| n.position)
    }

    fn set_node_enabled(&mut self, node: NodeId, enabled: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.enabled = enabled;
        }
    }

    fn set_node_opacity(&mut self, node: NodeId, opacity: f32) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.opacity = opacity;
        }
    }

    fn raise_node(&mut self, node: NodeId) {
        let parent = match self.nodes.get(&node) {
            Some(n) => n.parent,
            None => return,
        };
        let siblings = match parent {
            Some(p) => match self.nodes.get_mut(&p) {
                Some(parent) => &mut parent.children,
                None => return,
            },
            None => &mut self.roots,
        };
        siblings.retain(|&s| s != node);
        siblings.push(node);
    }

    fn reparent_node(&mut self, node: NodeId, parent: Option<NodeId>) {
        if !self.nodes.contains_key(&node) {
            return;
        }
        self.detach(node);
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = parent;
        }
        match parent {
            Some(p) => {
                if let Some(parent) = self.nodes.get_mut(&p) {
                    parent.children.push(node);
                }
            }
            None => self.roots.push(node),
        }
    }

    fn node_at(&self, point: Vec2) -> Option<NodeId> {
        self.roots
            .iter()
            .rev()
            .copied()
            .find(|&root| self.covers(root, Vec2::ZERO, point))
    }
}

impl SurfaceHost for MockBackend {
    fn surface_size(&self, surface: SurfaceId) -> Option<Size> {
        self.surfaces.get(&surface).and_then(|s| s.size)
    }

    fn configure_size(&mut self, surface: SurfaceId, size: Size) {
        let Some(s) = self.surfaces.get_mut(&surface) else {
            return;
        };
        s.size = Some(size);
        let node = s.node;
        if let Some(n) = self.nodes.get_mut(&node) {
            n.size = Some(size);
        }
    }

    fn configure_position(&mut self, surface: SurfaceId, position: Vec2) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.configured_position = Some(position);
        }
    }

    fn close(&mut self, surface: SurfaceId) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.close_requested = true;
        }
    }

    fn set_fullscreen(&mut self, surface: SurfaceId, fullscreen: bool) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.fullscreen = fullscreen;
        }
    }

    fn set_activated(&mut self, surface: SurfaceId, activated: bool) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.activated = activated;
        }
    }

    fn set_resizing(&mut self, surface: SurfaceId, resizing: bool) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.resizing = resizing;
        }
    }
}

impl Seat for MockBackend {
    fn focused_surface(&self) -> Option<SurfaceId> {
        self.focused
    }

    fn set_keyboard_focus(&mut self, surface: SurfaceId) {
        self.focused = Some(surface);
    }

    fn clear_keyboard_focus(&mut self) {
        self.focused = None;
    }

    fn modifier_held(&self) -> bool {
        self.modifier
    }
}

impl Clock for MockBackend {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn schedule_tick(&mut self, after_ms: f64) {
        self.scheduled_ticks.push(after_ms);
    }
}

impl ConfigStore for MockBackend {
    fn load(&self) -> Result<Config, ConfigError> {
        match &self.load_error {
            Some(message) => Err(ConfigError::Unavailable(message.clone())),
            None => Ok(self.config.clone()),
        }
    }
}
