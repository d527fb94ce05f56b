//! Focus queries: list cycling and spatial navigation

mod navigation;

pub use navigation::{cycle, find_in_direction, Direction};
