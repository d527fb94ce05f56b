//! Map request announced by the protocol layer

use crate::backend::{NodeId, SurfaceId};
use super::SurfaceKind;

/// A surface that became mappable
#[derive(Clone, Debug)]
pub struct MapRequest {
    pub surface: SurfaceId,
    pub kind: SurfaceKind,
    /// Content node the compositor created for the surface
    pub content: NodeId,
    /// Declared title
    pub title: String,
    /// Declared application identifier
    pub app_id: String,
}

impl MapRequest {
    /// Request for a native surface with no declared metadata
    pub fn native(surface: SurfaceId, content: NodeId) -> Self {
        Self {
            surface,
            kind: SurfaceKind::Native,
            content,
            title: String::new(),
            app_id: String::new(),
        }
    }

    /// Request for a legacy surface with no declared metadata
    pub fn legacy(surface: SurfaceId, content: NodeId) -> Self {
        Self {
            kind: SurfaceKind::Legacy,
            ..Self::native(surface, content)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }
}
