//! Server-side window decorations
//!
//! A decoration is a frame tree node holding a background rectangle (which
//! doubles as the border), a titlebar rectangle and one rectangle per button.
//! The client's content node is reparented under the frame, below the
//! titlebar.

mod hit;

pub use hit::{ButtonKind, DecorationGeometry, DecorationHit, Edges, CORNER_SIZE};

use tracing::trace;

use crate::backend::{NodeId, SceneGraph};
use crate::config::DecorationConfig;
use crate::error::BackendError;
use crate::math::{Size, Vec2};

#[derive(Clone, Debug)]
struct ButtonNode {
    kind: ButtonKind,
    node: NodeId,
    hovered: bool,
}

/// Decoration scene nodes plus hit-test geometry
#[derive(Clone, Debug)]
pub struct Decoration {
    frame: NodeId,
    background: NodeId,
    titlebar: NodeId,
    buttons: Vec<ButtonNode>,
    geometry: DecorationGeometry,
    focused: bool,
    visible: bool,
}

impl Decoration {
    /// Build a decoration around `content`, keeping the content where it is.
    ///
    /// On failure every node created so far is destroyed and the content is
    /// left untouched at the scene root.
    pub fn create<S: SceneGraph + ?Sized>(
        scene: &mut S,
        config: &DecorationConfig,
        content: NodeId,
        content_size: Size,
    ) -> Result<Self, BackendError> {
        let content_pos = scene.node_position(content).ok_or(BackendError::UnknownNode(content))?;
        let frame = scene.create_node(None)?;

        match Self::build(scene, config, frame, content_size) {
            Ok(mut decoration) => {
                scene.set_node_position(frame, content_pos - Vec2::new(0.0, config.height));
                scene.reparent_node(content, Some(frame));
                scene.set_node_position(content, Vec2::new(0.0, config.height));
                decoration.visible = true;
                trace!(frame, content, "decoration created");
                Ok(decoration)
            }
            Err(e) => {
                scene.destroy_node(frame);
                Err(e)
            }
        }
    }

    fn build<S: SceneGraph + ?Sized>(
        scene: &mut S,
        config: &DecorationConfig,
        frame: NodeId,
        content_size: Size,
    ) -> Result<Self, BackendError> {
        let geometry = DecorationGeometry::new(config, content_size.width, content_size.height);
        let background = scene.create_rect(
            frame,
            Size::new(geometry.width, geometry.total_height()),
            config.border_color,
        )?;
        let titlebar = scene.create_rect(
            frame,
            Size::new(geometry.width, geometry.titlebar_height),
            config.titlebar_color,
        )?;

        let mut buttons = Vec::with_capacity(geometry.buttons.len());
        for (kind, rect) in geometry.button_rects() {
            let node = scene.create_rect(frame, rect.size(), config.button_color)?;
            scene.set_node_position(node, rect.position());
            buttons.push(ButtonNode {
                kind,
                node,
                hovered: false,
            });
        }

        Ok(Self {
            frame,
            background,
            titlebar,
            buttons,
            geometry,
            focused: false,
            visible: false,
        })
    }

    /// The frame node that positions the whole decorated window
    #[inline]
    pub fn frame(&self) -> NodeId {
        self.frame
    }

    #[inline]
    pub fn geometry(&self) -> &DecorationGeometry {
        &self.geometry
    }

    /// Width the decoration was last laid out for
    #[inline]
    pub fn width(&self) -> f32 {
        self.geometry.width
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Offset of the content below the frame origin (0 while hidden)
    pub fn header_height(&self) -> f32 {
        if self.visible {
            self.geometry.titlebar_height
        } else {
            0.0
        }
    }

    /// Classify a frame-local point; hidden decorations never hit
    pub fn hit_test(&self, local: Vec2) -> Option<DecorationHit> {
        if !self.visible {
            return None;
        }
        self.geometry.hit_test(local)
    }

    /// Track a height-only content change; hit zones follow, nodes are left as drawn
    pub fn set_content_height(&mut self, height: f32) {
        self.geometry.content_height = height;
    }

    /// Relayout for new content geometry
    pub fn resize<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, config: &DecorationConfig, content_size: Size) {
        self.geometry.width = content_size.width;
        self.geometry.content_height = content_size.height;

        scene.set_rect(
            self.background,
            Size::new(self.geometry.width, self.geometry.total_height()),
            config.border_color,
        );
        scene.set_rect(
            self.titlebar,
            Size::new(self.geometry.width, self.geometry.titlebar_height),
            self.titlebar_color(config),
        );
        for (i, button) in self.buttons.iter().enumerate() {
            scene.set_node_position(button.node, self.geometry.button_rect(i).position());
        }
    }

    fn titlebar_color(&self, config: &DecorationConfig) -> crate::config::Color {
        if self.focused {
            config.titlebar_focused_color
        } else {
            config.titlebar_color
        }
    }

    /// Restyle for focus; returns whether anything changed
    pub fn set_focused<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, config: &DecorationConfig, focused: bool) -> bool {
        if self.focused == focused {
            return false;
        }
        self.focused = focused;
        scene.set_rect(
            self.titlebar,
            Size::new(self.geometry.width, self.geometry.titlebar_height),
            self.titlebar_color(config),
        );
        true
    }

    /// Recompute button hover from a frame-local pointer position
    /// (`None` = pointer elsewhere). Returns the buttons whose state flipped.
    pub fn update_hover<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        config: &DecorationConfig,
        local: Option<Vec2>,
    ) -> Vec<ButtonKind> {
        let hovered_kind = match local.and_then(|p| self.hit_test(p)) {
            Some(DecorationHit::Button(kind)) => Some(kind),
            _ => None,
        };

        let mut changed = Vec::new();
        for (i, button) in self.buttons.iter_mut().enumerate() {
            let hovered = hovered_kind == Some(button.kind);
            if button.hovered == hovered {
                continue;
            }
            button.hovered = hovered;
            let color = if hovered {
                config.button_hover_color
            } else {
                config.button_color
            };
            scene.set_rect(button.node, self.geometry.button_rect(i).size(), color);
            changed.push(button.kind);
        }
        changed
    }

    /// Whether a button is currently hovered
    pub fn is_hovered(&self, kind: ButtonKind) -> bool {
        self.buttons.iter().any(|b| b.kind == kind && b.hovered)
    }

    /// Show or hide the chrome; hidden chrome puts content at the frame origin
    pub fn set_visible<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, content: NodeId, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        scene.set_node_enabled(self.background, visible);
        scene.set_node_enabled(self.titlebar, visible);
        for button in &self.buttons {
            scene.set_node_enabled(button.node, visible);
        }
        scene.set_node_position(content, Vec2::new(0.0, self.header_height()));
    }

    /// Tear down the chrome, moving content back to the scene root at its
    /// current on-screen position
    pub fn destroy<S: SceneGraph + ?Sized>(self, scene: &mut S, content: NodeId) {
        let frame_pos = scene.node_position(self.frame).unwrap_or(Vec2::ZERO);
        let content_pos = frame_pos + Vec2::new(0.0, self.header_height());
        scene.reparent_node(content, None);
        scene.set_node_position(content, content_pos);
        scene.destroy_node(self.frame);
        trace!(frame = self.frame, content, "decoration destroyed");
    }
}
