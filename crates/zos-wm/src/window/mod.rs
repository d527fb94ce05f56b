//! Window management module
//!
//! Provides the window entity, map requests, and the window arena with its
//! ordered sequence.

#[allow(clippy::module_inception)]
mod window;
mod request;
mod manager;

pub use window::{SurfaceKind, Window};
pub use request::MapRequest;
pub use manager::WindowManager;

/// Unique window identifier
pub type WindowId = u64;
