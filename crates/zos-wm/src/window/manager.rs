//! Window arena plus the ordered sequence

use std::collections::HashMap;

use crate::backend::{NodeId, SurfaceId};
use super::{MapRequest, Window, WindowId};

/// Window arena and ordered sequence
///
/// The sequence is tiling order and raise order at once. Windows whose close
/// transition is animating stay in the arena but have left the sequence.
pub struct WindowManager {
    /// All windows by ID
    windows: HashMap<WindowId, Window>,
    /// Ordered sequence, head first
    order: Vec<WindowId>,
    /// Next window ID
    next_id: u64,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    /// Create an empty window manager
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a window at the head of the sequence
    pub fn create(&mut self, request: MapRequest, workspace: u8) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;

        self.windows.insert(id, Window::new(id, request, workspace));
        self.order.insert(0, id);
        id
    }

    /// Drop a window from the arena and the sequence
    pub fn remove(&mut self, id: WindowId) -> Option<Window> {
        self.order.retain(|&wid| wid != id);
        self.windows.remove(&id)
    }

    /// Take a window out of the sequence, keeping it in the arena.
    /// Returns false if it was not in the sequence.
    pub fn detach(&mut self, id: WindowId) -> bool {
        let before = self.order.len();
        self.order.retain(|&wid| wid != id);
        self.order.len() != before
    }

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    /// Get a mutable window by ID
    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Number of windows in the arena (closing ones included)
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The ordered sequence, head first
    pub fn order(&self) -> &[WindowId] {
        &self.order
    }

    /// Index of a window in the sequence
    pub fn index_of(&self, id: WindowId) -> Option<usize> {
        self.order.iter().position(|&wid| wid == id)
    }

    /// Windows in sequence order
    pub fn ordered(&self) -> impl Iterator<Item = &Window> + '_ {
        self.order.iter().filter_map(move |id| self.windows.get(id))
    }

    /// Every arena ID in ascending order (stable across runs)
    pub fn ids(&self) -> Vec<WindowId> {
        let mut ids: Vec<WindowId> = self.windows.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Window whose surface matches
    pub fn find_by_surface(&self, surface: SurfaceId) -> Option<WindowId> {
        self.windows
            .values()
            .find(|w| w.surface == surface)
            .map(|w| w.id)
    }

    /// Window whose root node matches
    pub fn find_by_root(&self, node: NodeId) -> Option<WindowId> {
        self.windows
            .values()
            .find(|w| w.root_node() == node)
            .map(|w| w.id)
    }

    /// Move `id` so it sits immediately before `anchor` in the sequence
    pub fn move_before(&mut self, id: WindowId, anchor: WindowId) {
        self.reinsert(id, anchor, 0);
    }

    /// Move `id` so it sits immediately after `anchor` in the sequence
    pub fn move_after(&mut self, id: WindowId, anchor: WindowId) {
        self.reinsert(id, anchor, 1);
    }

    fn reinsert(&mut self, id: WindowId, anchor: WindowId, offset: usize) {
        if id == anchor || self.index_of(id).is_none() {
            return;
        }
        self.order.retain(|&wid| wid != id);
        match self.index_of(anchor) {
            Some(index) => self.order.insert(index + offset, id),
            None => self.order.insert(0, id),
        }
    }
}
