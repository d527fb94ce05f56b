//! Master/stack tiling
//!
//! A pure function of the ordered eligible windows, the output and the gap
//! and master settings. No state is carried between calls.

use crate::config::Config;
use crate::math::{Rect, Size};
use crate::window::WindowId;
use super::Output;

/// Inputs to the tiler taken from the config
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilingParams {
    pub inner_gap: f32,
    pub outer_gap: f32,
    pub master_count: usize,
    pub master_ratio: f32,
}

impl TilingParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            inner_gap: config.inner_gap,
            outer_gap: config.outer_gap,
            master_count: config.master_count.max(1),
            master_ratio: config.master_ratio,
        }
    }
}

/// Slot assigned to one window (decorated box, header included)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub window: WindowId,
    pub rect: Rect,
}

/// Result of one arrangement pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arrangement {
    pub master_width: f32,
    pub stack_width: f32,
    /// Tiles in input order
    pub tiles: Vec<Tile>,
}

/// Arrange `windows` (sequence order, already filtered) on `output`
pub fn arrange(windows: &[WindowId], output: &Output, params: &TilingParams) -> Arrangement {
    let count = windows.len();
    if count == 0 {
        return Arrangement::default();
    }

    let usable = output.usable_area(params.outer_gap);
    let gap = params.inner_gap;
    let master_count = params.master_count.max(1);

    let (master_width, stack_width) = if count <= master_count {
        (usable.width, 0.0)
    } else {
        let master = ((usable.width - gap) * params.master_ratio).round();
        (master, usable.width - master - gap)
    };

    let masters = count.min(master_count);
    let mut tiles = Vec::with_capacity(count);
    column(&windows[..masters], usable.x, master_width, &usable, gap, &mut tiles);
    column(
        &windows[masters..],
        usable.x + master_width + gap,
        stack_width,
        &usable,
        gap,
        &mut tiles,
    );

    Arrangement {
        master_width,
        stack_width,
        tiles,
    }
}

fn column(windows: &[WindowId], x: f32, width: f32, usable: &Rect, gap: f32, tiles: &mut Vec<Tile>) {
    if windows.is_empty() {
        return;
    }
    let n = windows.len() as f32;
    let height = (usable.height - gap * (n - 1.0)) / n;
    for (i, &window) in windows.iter().enumerate() {
        let y = usable.y + i as f32 * (height + gap);
        tiles.push(Tile {
            window,
            rect: Rect::new(x, y, width, height),
        });
    }
}

/// Content size for a slot: header removed, floored at 100×50
pub fn content_size(slot: Size, header: f32) -> Size {
    Size::new(slot.width, slot.height - header).at_least(Size::MIN_WINDOW)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(master_count: usize) -> TilingParams {
        TilingParams {
            inner_gap: 10.0,
            outer_gap: 20.0,
            master_count,
            master_ratio: 0.5,
        }
    }

    fn ids(n: usize) -> Vec<WindowId> {
        (1..=n as u64).collect()
    }

    #[test]
    fn test_empty_is_noop() {
        let out = arrange(&[], &Output::default(), &params(1));
        assert!(out.tiles.is_empty());
    }

    #[test]
    fn test_single_window_fills_usable_area() {
        let output = Output::new(Size::new(1000.0, 800.0));
        let out = arrange(&ids(1), &output, &params(1));
        assert_eq!(out.tiles[0].rect, Rect::new(20.0, 20.0, 960.0, 760.0));
        assert_eq!(out.stack_width, 0.0);
    }

    #[test]
    fn test_master_and_stack() {
        let output = Output::new(Size::new(1000.0, 800.0));
        let out = arrange(&ids(3), &output, &params(1));

        // usable 960x760; master = round((960 - 10) * 0.5) = 475
        assert_eq!(out.master_width, 475.0);
        assert_eq!(out.stack_width, 475.0);
        assert_eq!(out.tiles[0].rect, Rect::new(20.0, 20.0, 475.0, 760.0));
        // stack of 2: height (760 - 10) / 2 = 375
        assert_eq!(out.tiles[1].rect, Rect::new(505.0, 20.0, 475.0, 375.0));
        assert_eq!(out.tiles[2].rect, Rect::new(505.0, 405.0, 475.0, 375.0));
    }

    #[test]
    fn test_master_width_is_rounded() {
        let output = Output::new(Size::new(1000.0, 800.0));
        let p = TilingParams {
            master_ratio: 0.55,
            ..params(1)
        };
        let out = arrange(&ids(2), &output, &p);
        // (960 - 10) * 0.55 = 522.5 -> 523
        assert_eq!(out.master_width, 523.0);
        assert_eq!(out.stack_width, 427.0);
    }

    #[test]
    fn test_content_size_clamps() {
        assert_eq!(content_size(Size::new(400.0, 300.0), 24.0), Size::new(400.0, 276.0));
        assert_eq!(content_size(Size::new(40.0, 60.0), 24.0), Size::new(100.0, 50.0));
    }

    proptest! {
        #[test]
        fn prop_arrangement_is_deterministic(
            count in 1usize..=20,
            master_count in 1usize..=5,
            ratio in 0.1f32..=0.9,
        ) {
            let output = Output::new(Size::new(1920.0, 1080.0));
            let p = TilingParams { master_ratio: ratio, ..params(master_count) };
            let windows = ids(count);
            let first = arrange(&windows, &output, &p);
            let second = arrange(&windows, &output, &p);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.tiles.len(), count);
            let order: Vec<WindowId> = first.tiles.iter().map(|t| t.window).collect();
            prop_assert_eq!(order, windows);
        }

        #[test]
        fn prop_column_widths_partition_usable_width(
            count in 1usize..=20,
            master_count in 1usize..=5,
            ratio in 0.1f32..=0.9,
        ) {
            let output = Output::new(Size::new(1920.0, 1080.0));
            let p = TilingParams { master_ratio: ratio, ..params(master_count) };
            let usable = output.usable_area(p.outer_gap);
            let out = arrange(&ids(count), &output, &p);

            if count <= master_count {
                prop_assert_eq!(out.master_width, usable.width);
            } else {
                let total = out.master_width + p.inner_gap + out.stack_width;
                prop_assert!((total - usable.width).abs() < 0.01);
            }
            for tile in &out.tiles {
                prop_assert!(tile.rect.x >= usable.x - 0.01);
                prop_assert!(tile.rect.right() <= usable.right() + 0.01);
                prop_assert!(tile.rect.bottom() <= usable.bottom() + 0.01);
            }
        }
    }
}
