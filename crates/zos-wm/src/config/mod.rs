//! Configuration snapshot
//!
//! A [`Config`] is deserialised from TOML, then prepared: numeric fields are
//! clamped, keybind strings are parsed and rule patterns compiled. The
//! server owns exactly one snapshot and swaps it wholesale on reload.

mod action;
mod keybind;
mod rules;
mod store;

pub use action::{Action, ResizeStep};
pub use keybind::{KeyCombo, Keybind, Modifiers};
pub use rules::{resolve, RuleOverrides, RuleSpec, WindowRule};
pub use store::FileConfigStore;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::decoration::ButtonKind;
use crate::error::ConfigError;
use crate::layout::LayoutMode;
use crate::math::clamp;
use crate::transition::Curve;

/// RGBA colour, components in `[0, 1]`
pub type Color = [f32; 4];

/// Lower bound for the master column ratio
pub const MASTER_RATIO_MIN: f32 = 0.1;
/// Upper bound for the master column ratio
pub const MASTER_RATIO_MAX: f32 = 0.9;
/// Step applied by the master-ratio actions
pub const MASTER_RATIO_STEP: f32 = 0.05;
/// Highest workspace count a config may declare
pub const MAX_WORKSPACES: u8 = 10;

/// Horizontal placement of titlebar buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonAlign {
    Left,
    #[default]
    Right,
}

/// Titlebar and border settings
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    pub enabled: bool,
    /// Titlebar (header) height
    pub height: f32,
    pub border_width: f32,
    pub button_size: f32,
    pub button_spacing: f32,
    pub button_margin: f32,
    /// Buttons in placement order, starting from the aligned edge
    pub buttons: Vec<ButtonKind>,
    pub align: ButtonAlign,
    pub titlebar_color: Color,
    pub titlebar_focused_color: Color,
    pub border_color: Color,
    pub button_color: Color,
    pub button_hover_color: Color,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            height: 24.0,
            border_width: 2.0,
            button_size: 16.0,
            button_spacing: 6.0,
            button_margin: 8.0,
            buttons: vec![ButtonKind::Close, ButtonKind::Maximize, ButtonKind::Minimize],
            align: ButtonAlign::Right,
            titlebar_color: [0.16, 0.16, 0.18, 1.0],
            titlebar_focused_color: [0.22, 0.30, 0.45, 1.0],
            border_color: [0.10, 0.10, 0.12, 1.0],
            button_color: [0.45, 0.45, 0.50, 1.0],
            button_hover_color: [0.85, 0.35, 0.35, 1.0],
        }
    }
}

/// How a newly mapped window appears
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpenStyle {
    #[default]
    Zoom,
    Fade,
}

/// Animation settings
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Master switch; when off every transition is immediate
    pub enabled: bool,
    pub duration_ms: f64,
    pub curve: Curve,
    pub open: bool,
    pub close: bool,
    pub layout: bool,
    pub minimize: bool,
    pub open_style: OpenStyle,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 200.0,
            curve: Curve::EaseOut,
            open: true,
            close: true,
            layout: true,
            minimize: true,
            open_style: OpenStyle::Zoom,
        }
    }
}

impl AnimationConfig {
    pub fn animate_open(&self) -> bool {
        self.enabled && self.open
    }

    pub fn animate_close(&self) -> bool {
        self.enabled && self.close
    }

    pub fn animate_layout(&self) -> bool {
        self.enabled && self.layout
    }

    pub fn animate_minimize(&self) -> bool {
        self.enabled && self.minimize
    }
}

/// Window manager configuration snapshot
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inner_gap: f32,
    pub outer_gap: f32,
    /// Windows in the master column (at least 1)
    pub master_count: usize,
    /// Master column share of the usable width, within `[0.1, 0.9]`
    pub master_ratio: f32,
    /// Workspace count, within `1..=10`
    pub workspaces: u8,
    /// Server mode at startup
    pub mode: LayoutMode,
    pub decoration: DecorationConfig,
    pub animation: AnimationConfig,
    /// Pixels a floating window grows/shrinks per resize action
    pub resize_step: f32,
    /// Pixels a floating window moves per directional move action
    pub move_step: f32,
    /// Key combo string to action
    pub keybinds: BTreeMap<String, Action>,
    pub rules: Vec<RuleSpec>,

    #[serde(skip)]
    bindings: Vec<Keybind>,
    #[serde(skip)]
    compiled_rules: Vec<WindowRule>,
}

fn default_keybinds() -> BTreeMap<String, Action> {
    use crate::focus::Direction::*;

    let mut map = BTreeMap::new();
    let mut bind = |combo: &str, action: Action| {
        map.insert(combo.to_string(), action);
    };

    bind("super+shift+q", Action::Close);
    bind("super+f", Action::ToggleFullscreen);
    bind("super+shift+space", Action::ToggleFloating);
    bind("super+m", Action::ToggleMaximize);
    bind("super+space", Action::ModeToggle);
    bind("super+tab", Action::FocusNext);
    bind("super+shift+tab", Action::FocusPrev);
    for (key, dir) in [("h", Left), ("j", Down), ("k", Up), ("l", Right)] {
        bind(&format!("super+{}", key), Action::Focus(dir));
        bind(&format!("super+shift+{}", key), Action::Move(dir));
    }
    bind("super+ctrl+l", Action::Resize(ResizeStep::GrowWidth));
    bind("super+ctrl+h", Action::Resize(ResizeStep::ShrinkWidth));
    bind("super+ctrl+j", Action::Resize(ResizeStep::GrowHeight));
    bind("super+ctrl+k", Action::Resize(ResizeStep::ShrinkHeight));
    bind("super+i", Action::MasterCountInc);
    bind("super+d", Action::MasterCountDec);
    bind("super+equal", Action::MasterRatioInc);
    bind("super+minus", Action::MasterRatioDec);
    bind("super+bracketright", Action::WorkspaceNext);
    bind("super+bracketleft", Action::WorkspacePrev);
    for n in 1..=9u8 {
        bind(&format!("super+{}", n), Action::Workspace(n));
        bind(&format!("super+shift+{}", n), Action::MoveToWorkspace(n));
    }
    bind("super+shift+r", Action::Reload);
    bind("super+shift+e", Action::Exit);
    map
}

fn parse_bindings(keybinds: &BTreeMap<String, Action>) -> Result<Vec<Keybind>, ConfigError> {
    keybinds
        .iter()
        .map(|(combo, action)| {
            Ok(Keybind {
                combo: combo.parse()?,
                action: *action,
            })
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        let keybinds = default_keybinds();
        // Built-in combos are known to parse
        let bindings = keybinds
            .iter()
            .filter_map(|(combo, action)| {
                combo.parse().ok().map(|combo| Keybind {
                    combo,
                    action: *action,
                })
            })
            .collect();

        Self {
            inner_gap: 8.0,
            outer_gap: 8.0,
            master_count: 1,
            master_ratio: 0.55,
            workspaces: 9,
            mode: LayoutMode::Tiling,
            decoration: DecorationConfig::default(),
            animation: AnimationConfig::default(),
            resize_step: 20.0,
            move_step: 20.0,
            keybinds,
            rules: Vec::new(),
            bindings,
            compiled_rules: Vec::new(),
        }
    }
}

impl Config {
    /// Parse and prepare a config from a TOML document.
    ///
    /// Missing fields take their defaults. A `[keybinds]` table replaces the
    /// built-in bindings as a whole.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(source)?;
        config.prepare()?;
        Ok(config)
    }

    /// Clamp numeric fields, parse keybinds, compile rule patterns
    pub fn prepare(&mut self) -> Result<(), ConfigError> {
        self.inner_gap = self.inner_gap.max(0.0);
        self.outer_gap = self.outer_gap.max(0.0);
        self.master_count = self.master_count.max(1);
        self.master_ratio = clamp(self.master_ratio, MASTER_RATIO_MIN, MASTER_RATIO_MAX);
        self.workspaces = self.workspaces.clamp(1, MAX_WORKSPACES);
        self.resize_step = self.resize_step.max(1.0);
        self.move_step = self.move_step.max(1.0);
        self.animation.duration_ms = self.animation.duration_ms.max(0.0);

        let deco = &mut self.decoration;
        deco.height = deco.height.max(0.0);
        deco.border_width = deco.border_width.max(0.0);
        deco.button_size = deco.button_size.max(0.0);

        self.bindings = parse_bindings(&self.keybinds)?;
        self.compiled_rules = self
            .rules
            .iter()
            .map(WindowRule::from_spec)
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    /// Action bound to a key event, if any
    pub fn action_for(&self, modifiers: Modifiers, key: &str) -> Option<Action> {
        self.bindings
            .iter()
            .find(|bind| bind.combo.matches(modifiers, key))
            .map(|bind| bind.action)
    }

    /// Merged overrides of every rule matching a window
    pub fn rules_for(&self, app_id: &str, title: &str) -> RuleOverrides {
        resolve(&self.compiled_rules, app_id, title)
    }

    /// Append a compiled rule (rules added this way are not serialised back)
    pub fn push_rule(&mut self, rule: WindowRule) {
        self.compiled_rules.push(rule);
    }

    /// Decoration header height, or 0 when decorations are off
    pub fn header_height(&self) -> f32 {
        if self.decoration.enabled {
            self.decoration.height
        } else {
            0.0
        }
    }

    /// Shift the master ratio, clamped to `[0.1, 0.9]`
    pub fn adjust_master_ratio(&mut self, delta: f32) {
        self.master_ratio = clamp(self.master_ratio + delta, MASTER_RATIO_MIN, MASTER_RATIO_MAX);
    }

    /// Shift the master count, never below 1
    pub fn adjust_master_count(&mut self, delta: i32) {
        let count = (self.master_count as i64 + delta as i64).max(1);
        self.master_count = count as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::Direction;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.master_count, 1);
        assert_eq!(config.workspaces, 9);
        assert_eq!(config.mode, LayoutMode::Tiling);
        assert!(config.decoration.enabled);
        assert!((config.header_height() - 24.0).abs() < f32::EPSILON);
        assert_eq!(config.action_for(Modifiers::LOGO, "f"), Some(Action::ToggleFullscreen));
        assert_eq!(
            config.action_for(Modifiers::LOGO_SHIFT, "3"),
            Some(Action::MoveToWorkspace(3))
        );
        assert_eq!(config.action_for(Modifiers::NONE, "f"), None);
    }

    #[test]
    fn test_master_ratio_converges_to_lower_bound() {
        let mut config = Config::default();
        for _ in 0..50 {
            config.adjust_master_ratio(-MASTER_RATIO_STEP);
        }
        assert_eq!(config.master_ratio, 0.1);

        for _ in 0..50 {
            config.adjust_master_ratio(MASTER_RATIO_STEP);
        }
        assert_eq!(config.master_ratio, 0.9);
    }

    #[test]
    fn test_master_count_never_below_one() {
        let mut config = Config::default();
        config.adjust_master_count(-3);
        assert_eq!(config.master_count, 1);
        config.adjust_master_count(2);
        assert_eq!(config.master_count, 3);
    }

    #[test]
    fn test_from_toml_str() {
        let config = Config::from_toml_str(
            r#"
            inner_gap = 4
            outer_gap = 12.5
            master_count = 2
            master_ratio = 0.6
            mode = "floating"

            [decoration]
            enabled = false
            align = "left"
            buttons = ["minimize", "close"]

            [animation]
            curve = "spring"
            duration_ms = 300
            open_style = "fade"

            [keybinds]
            "super+return" = "toggle-maximize"
            "alt+shift+l" = "focus-right"

            [[rules]]
            app_id = "^mpv$"
            floating = true
            size = { width = 640, height = 360 }
            "#,
        )
        .unwrap();

        assert!((config.inner_gap - 4.0).abs() < f32::EPSILON);
        assert!((config.outer_gap - 12.5).abs() < f32::EPSILON);
        assert_eq!(config.master_count, 2);
        assert_eq!(config.mode, LayoutMode::Floating);
        assert!(!config.decoration.enabled);
        assert_eq!(config.decoration.align, ButtonAlign::Left);
        assert_eq!(config.decoration.buttons, vec![ButtonKind::Minimize, ButtonKind::Close]);
        assert_eq!(config.animation.curve, Curve::Spring);
        assert_eq!(config.animation.open_style, OpenStyle::Fade);

        // Explicit table replaces the defaults
        assert_eq!(config.action_for(Modifiers::LOGO, "Return"), Some(Action::ToggleMaximize));
        let alt_shift = Modifiers {
            alt: true,
            shift: true,
            ..Modifiers::NONE
        };
        assert_eq!(config.action_for(alt_shift, "l"), Some(Action::Focus(Direction::Right)));
        assert_eq!(config.action_for(Modifiers::LOGO, "f"), None);

        let rule = config.rules_for("mpv", "video.mkv");
        assert_eq!(rule.floating, Some(true));
        assert_eq!(rule.size, Some(crate::math::Size::new(640.0, 360.0)));
        assert_eq!(config.rules_for("firefox", ""), RuleOverrides::default());
    }

    #[test]
    fn test_load_clamps_values() {
        let config = Config::from_toml_str(
            r#"
            master_count = 0
            master_ratio = 1.5
            workspaces = 42
            inner_gap = -3
            "#,
        )
        .unwrap();
        assert_eq!(config.master_count, 1);
        assert_eq!(config.master_ratio, 0.9);
        assert_eq!(config.workspaces, 10);
        assert_eq!(config.inner_gap, 0.0);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            Config::from_toml_str("master_count = \"many\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[keybinds]\n\"super+\" = \"close\""),
            Err(ConfigError::InvalidKeybind(_))
        ));
        assert!(Config::from_toml_str("[keybinds]\n\"super+x\" = \"teleport\"").is_err());
        assert!(matches!(
            Config::from_toml_str("[[rules]]\ntitle = \"(\"\nfloating = true"),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }
}
