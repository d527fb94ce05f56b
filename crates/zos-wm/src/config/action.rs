//! Closed set of user-triggerable actions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::focus::Direction;

/// Step applied by the resize actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeStep {
    GrowWidth,
    ShrinkWidth,
    GrowHeight,
    ShrinkHeight,
}

/// An action a keybind can trigger
///
/// Actions are written in kebab-case in the config (`"focus-left"`,
/// `"workspace-3"`, `"move-to-workspace-2"`). Each maps onto exactly one
/// server operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    Close,
    ToggleFullscreen,
    ToggleFloating,
    ToggleMaximize,
    Focus(Direction),
    FocusNext,
    FocusPrev,
    Move(Direction),
    Resize(ResizeStep),
    Workspace(u8),
    WorkspaceNext,
    WorkspacePrev,
    MoveToWorkspace(u8),
    ModeTiling,
    ModeFloating,
    ModeToggle,
    MasterCountInc,
    MasterCountDec,
    MasterRatioInc,
    MasterRatioDec,
    Reload,
    Exit,
}

fn parse_direction(s: &str) -> Option<Direction> {
    match s {
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        _ => None,
    }
}

fn direction_name(dir: Direction) -> &'static str {
    match dir {
        Direction::Left => "left",
        Direction::Right => "right",
        Direction::Up => "up",
        Direction::Down => "down",
    }
}

impl FromStr for Action {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ConfigError::UnknownAction(s.to_string());
        let action = match s {
            "close" => Action::Close,
            "toggle-fullscreen" => Action::ToggleFullscreen,
            "toggle-floating" => Action::ToggleFloating,
            "toggle-maximize" => Action::ToggleMaximize,
            "focus-next" => Action::FocusNext,
            "focus-prev" => Action::FocusPrev,
            "resize-grow-width" => Action::Resize(ResizeStep::GrowWidth),
            "resize-shrink-width" => Action::Resize(ResizeStep::ShrinkWidth),
            "resize-grow-height" => Action::Resize(ResizeStep::GrowHeight),
            "resize-shrink-height" => Action::Resize(ResizeStep::ShrinkHeight),
            "workspace-next" => Action::WorkspaceNext,
            "workspace-prev" => Action::WorkspacePrev,
            "mode-tiling" => Action::ModeTiling,
            "mode-floating" => Action::ModeFloating,
            "mode-toggle" => Action::ModeToggle,
            "master-count-inc" => Action::MasterCountInc,
            "master-count-dec" => Action::MasterCountDec,
            "master-ratio-inc" => Action::MasterRatioInc,
            "master-ratio-dec" => Action::MasterRatioDec,
            "reload" => Action::Reload,
            "exit" => Action::Exit,
            _ => {
                if let Some(rest) = s.strip_prefix("move-to-workspace-") {
                    Action::MoveToWorkspace(rest.parse().map_err(|_| unknown())?)
                } else if let Some(rest) = s.strip_prefix("workspace-") {
                    Action::Workspace(rest.parse().map_err(|_| unknown())?)
                } else if let Some(rest) = s.strip_prefix("focus-") {
                    Action::Focus(parse_direction(rest).ok_or_else(unknown)?)
                } else if let Some(rest) = s.strip_prefix("move-") {
                    Action::Move(parse_direction(rest).ok_or_else(unknown)?)
                } else {
                    return Err(unknown());
                }
            }
        };
        Ok(action)
    }
}

impl TryFrom<String> for Action {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Close => write!(f, "close"),
            Action::ToggleFullscreen => write!(f, "toggle-fullscreen"),
            Action::ToggleFloating => write!(f, "toggle-floating"),
            Action::ToggleMaximize => write!(f, "toggle-maximize"),
            Action::Focus(dir) => write!(f, "focus-{}", direction_name(*dir)),
            Action::FocusNext => write!(f, "focus-next"),
            Action::FocusPrev => write!(f, "focus-prev"),
            Action::Move(dir) => write!(f, "move-{}", direction_name(*dir)),
            Action::Resize(ResizeStep::GrowWidth) => write!(f, "resize-grow-width"),
            Action::Resize(ResizeStep::ShrinkWidth) => write!(f, "resize-shrink-width"),
            Action::Resize(ResizeStep::GrowHeight) => write!(f, "resize-grow-height"),
            Action::Resize(ResizeStep::ShrinkHeight) => write!(f, "resize-shrink-height"),
            Action::Workspace(n) => write!(f, "workspace-{}", n),
            Action::WorkspaceNext => write!(f, "workspace-next"),
            Action::WorkspacePrev => write!(f, "workspace-prev"),
            Action::MoveToWorkspace(n) => write!(f, "move-to-workspace-{}", n),
            Action::ModeTiling => write!(f, "mode-tiling"),
            Action::ModeFloating => write!(f, "mode-floating"),
            Action::ModeToggle => write!(f, "mode-toggle"),
            Action::MasterCountInc => write!(f, "master-count-inc"),
            Action::MasterCountDec => write!(f, "master-count-dec"),
            Action::MasterRatioInc => write!(f, "master-ratio-inc"),
            Action::MasterRatioDec => write!(f, "master-ratio-dec"),
            Action::Reload => write!(f, "reload"),
            Action::Exit => write!(f, "exit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_actions() {
        assert_eq!("close".parse::<Action>().unwrap(), Action::Close);
        assert_eq!("mode-toggle".parse::<Action>().unwrap(), Action::ModeToggle);
        assert_eq!(
            "resize-shrink-height".parse::<Action>().unwrap(),
            Action::Resize(ResizeStep::ShrinkHeight)
        );
    }

    #[test]
    fn test_parse_parameterised_actions() {
        assert_eq!("workspace-3".parse::<Action>().unwrap(), Action::Workspace(3));
        assert_eq!(
            "move-to-workspace-10".parse::<Action>().unwrap(),
            Action::MoveToWorkspace(10)
        );
        assert_eq!(
            "focus-left".parse::<Action>().unwrap(),
            Action::Focus(Direction::Left)
        );
        assert_eq!(
            "move-down".parse::<Action>().unwrap(),
            Action::Move(Direction::Down)
        );
    }

    #[test]
    fn test_workspace_prefixes_do_not_collide() {
        // "move-to-workspace-" must win over the "move-" direction prefix
        assert_eq!(
            "move-to-workspace-2".parse::<Action>().unwrap(),
            Action::MoveToWorkspace(2)
        );
        assert_eq!("workspace-next".parse::<Action>().unwrap(), Action::WorkspaceNext);
    }

    #[test]
    fn test_unknown_actions_rejected() {
        assert!(matches!(
            "focus-sideways".parse::<Action>(),
            Err(ConfigError::UnknownAction(_))
        ));
        assert!("workspace-x".parse::<Action>().is_err());
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for name in ["toggle-floating", "focus-prev", "workspace-4", "move-up", "exit"] {
            let action: Action = name.parse().unwrap();
            assert_eq!(action.to_string(), name);
        }
    }
}
