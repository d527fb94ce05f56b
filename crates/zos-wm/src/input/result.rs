//! Input result type

use serde::Serialize;

use crate::window::WindowId;

/// Result of input handling
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResult {
    /// Input was consumed by the window manager
    Handled,
    /// Input hit nothing the window manager cares about
    Unhandled,
    /// Input should be delivered to the window's client
    Forward {
        /// Target window
        window_id: WindowId,
        /// X coordinate in content-local space
        local_x: f32,
        /// Y coordinate in content-local space
        local_y: f32,
    },
}

impl InputResult {
    /// Check if input was handled
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, InputResult::Handled | InputResult::Forward { .. })
    }

    /// Check if input should be forwarded
    #[inline]
    pub fn is_forward(&self) -> bool {
        matches!(self, InputResult::Forward { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_serializes_with_tag() {
        let result = InputResult::Forward {
            window_id: 3,
            local_x: 12.0,
            local_y: 4.5,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "forward");
        assert_eq!(json["window_id"], 3);
        assert_eq!(json["local_y"], 4.5);
        assert!(result.is_handled());
        assert!(result.is_forward());
    }

    #[test]
    fn test_unit_variants() {
        assert_eq!(serde_json::to_string(&InputResult::Handled).unwrap(), r#"{"type":"handled"}"#);
        assert!(!InputResult::Unhandled.is_handled());
    }
}
