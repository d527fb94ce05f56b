//! Layout: server mode, output geometry and the master/stack tiler

mod output;
mod tiling;

pub use output::Output;
pub use tiling::{arrange, content_size, Arrangement, Tile, TilingParams};

use serde::{Deserialize, Serialize};

/// Server-wide layout mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Eligible windows are arranged master/stack
    #[default]
    Tiling,
    /// Every window keeps its absolute box; recompute is suppressed
    Floating,
}

impl LayoutMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            LayoutMode::Tiling => LayoutMode::Floating,
            LayoutMode::Floating => LayoutMode::Tiling,
        }
    }
}
