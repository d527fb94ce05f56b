//! Error types for the window manager core
//!
//! Almost every window-manager operation is total. Errors only surface from
//! collaborator calls that can fail (scene node allocation) and from loading
//! a configuration snapshot.

use std::path::PathBuf;

use thiserror::Error;

use crate::backend::NodeId;

/// Errors reported by the scene graph or surface collaborators
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The scene graph could not allocate a node
    #[error("scene node allocation failed: {0}")]
    NodeAllocation(String),

    /// A node handle did not resolve to a live node
    #[error("unknown scene node {0}")]
    UnknownNode(NodeId),
}

/// Errors raised while loading or validating a configuration snapshot
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed into a config
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A window rule pattern is not a valid regular expression
    #[error("invalid window rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A keybind string could not be parsed
    #[error("invalid keybind '{0}'")]
    InvalidKeybind(String),

    /// An action identifier is not part of the action set
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// The config file exists but could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config store could not provide a snapshot
    #[error("config unavailable: {0}")]
    Unavailable(String),
}
