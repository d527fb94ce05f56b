//! Window struct and mode flags

use serde::{Deserialize, Serialize};

use crate::backend::{NodeId, SurfaceId};
use crate::decoration::Decoration;
use crate::math::Rect;
use crate::transition::Animation;
use super::{MapRequest, WindowId};

/// Which protocol family a surface belongs to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Native clients never learn their position
    #[default]
    Native,
    /// Legacy clients are told their position on every move
    Legacy,
}

/// A managed window
///
/// The displayed box is not cached here: position lives on the scene node
/// returned by [`Window::root_node`] and content size on the surface.
#[derive(Clone, Debug)]
pub struct Window {
    /// Unique identifier
    pub id: WindowId,
    pub surface: SurfaceId,
    pub kind: SurfaceKind,
    /// Declared title
    pub title: String,
    /// Declared application identifier
    pub app_id: String,
    /// Content node supplied by the compositor
    pub content: NodeId,

    pub floating: bool,
    pub fullscreen: bool,
    pub minimized: bool,
    pub maximized: bool,
    /// Close transition in flight; already out of the ordered sequence
    pub closing: bool,

    /// Workspace this window lives on (1-based)
    pub workspace: u8,
    pub opacity: f32,

    /// Box captured on entering fullscreen
    pub saved: Option<Rect>,
    /// Box captured on entering maximize
    pub pre_max: Option<Rect>,

    pub decoration: Option<Decoration>,
    pub animation: Option<Animation>,
}

impl Window {
    /// Create a window from a map request
    pub fn new(id: WindowId, request: MapRequest, workspace: u8) -> Self {
        Self {
            id,
            surface: request.surface,
            kind: request.kind,
            title: request.title,
            app_id: request.app_id,
            content: request.content,
            floating: false,
            fullscreen: false,
            minimized: false,
            maximized: false,
            closing: false,
            workspace,
            opacity: 1.0,
            saved: None,
            pre_max: None,
            decoration: None,
            animation: None,
        }
    }

    /// The node that positions the whole window (frame if decorated)
    #[inline]
    pub fn root_node(&self) -> NodeId {
        match &self.decoration {
            Some(deco) => deco.frame(),
            None => self.content,
        }
    }

    #[inline]
    pub fn is_decorated(&self) -> bool {
        self.decoration.is_some()
    }

    /// Height of the visible header above the content
    pub fn header_height(&self) -> f32 {
        self.decoration.as_ref().map_or(0.0, |d| d.header_height())
    }

    /// Participates in tiling (mode-wise; workspace is checked separately)
    #[inline]
    pub fn is_tiled(&self) -> bool {
        !self.floating && !self.fullscreen
    }

    /// Can take focus while `workspace` is current
    #[inline]
    pub fn is_focusable_on(&self, workspace: u8) -> bool {
        self.workspace == workspace && !self.minimized && !self.closing
    }

    #[inline]
    pub fn is_legacy(&self) -> bool {
        self.kind == SurfaceKind::Legacy
    }
}
