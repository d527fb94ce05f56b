//! Window rules: regex patterns on app id / title mapped to placement overrides

use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::math::{Size, Vec2};

/// A window rule as written in the config file
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RuleSpec {
    /// Regex matched against the declared app identifier
    pub app_id: Option<String>,
    /// Regex matched against the declared title
    pub title: Option<String>,
    #[serde(flatten)]
    pub overrides: RuleOverrides,
}

/// Overrides a matching rule forces on a newly mapped window
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuleOverrides {
    pub floating: Option<bool>,
    pub fullscreen: Option<bool>,
    pub workspace: Option<u8>,
    pub position: Option<Vec2>,
    pub size: Option<Size>,
    pub opacity: Option<f32>,
}

impl RuleOverrides {
    /// Layer `other` on top of `self`; set fields in `other` win
    pub fn merge(&mut self, other: &RuleOverrides) {
        if other.floating.is_some() {
            self.floating = other.floating;
        }
        if other.fullscreen.is_some() {
            self.fullscreen = other.fullscreen;
        }
        if other.workspace.is_some() {
            self.workspace = other.workspace;
        }
        if other.position.is_some() {
            self.position = other.position;
        }
        if other.size.is_some() {
            self.size = other.size;
        }
        if other.opacity.is_some() {
            self.opacity = other.opacity;
        }
    }
}

/// A compiled window rule
#[derive(Clone, Debug)]
pub struct WindowRule {
    app_id: Option<Regex>,
    title: Option<Regex>,
    pub overrides: RuleOverrides,
}

fn compile(pattern: Option<&str>) -> Result<Option<Regex>, ConfigError> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|source| ConfigError::InvalidPattern {
                pattern: p.to_string(),
                source,
            })
        })
        .transpose()
}

impl WindowRule {
    /// Compile a rule from its patterns
    pub fn new(
        app_id: Option<&str>,
        title: Option<&str>,
        overrides: RuleOverrides,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            app_id: compile(app_id)?,
            title: compile(title)?,
            overrides,
        })
    }

    /// Compile a rule read from the config
    pub fn from_spec(spec: &RuleSpec) -> Result<Self, ConfigError> {
        Self::new(
            spec.app_id.as_deref(),
            spec.title.as_deref(),
            spec.overrides.clone(),
        )
    }

    /// A rule matches when every pattern it declares matches.
    /// A rule without patterns matches nothing.
    pub fn matches(&self, app_id: &str, title: &str) -> bool {
        if self.app_id.is_none() && self.title.is_none() {
            return false;
        }
        let app_ok = self.app_id.as_ref().map_or(true, |re| re.is_match(app_id));
        let title_ok = self.title.as_ref().map_or(true, |re| re.is_match(title));
        app_ok && title_ok
    }
}

/// Fold every matching rule, in table order, into one set of overrides
pub fn resolve(rules: &[WindowRule], app_id: &str, title: &str) -> RuleOverrides {
    let mut resolved = RuleOverrides::default();
    for rule in rules.iter().filter(|r| r.matches(app_id, title)) {
        resolved.merge(&rule.overrides);
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floating() -> RuleOverrides {
        RuleOverrides {
            floating: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_rule_matches_app_id() {
        let rule = WindowRule::new(Some("^pavucontrol$"), None, floating()).unwrap();
        assert!(rule.matches("pavucontrol", "Volume Control"));
        assert!(!rule.matches("pavucontrol-qt", "Volume Control"));
    }

    #[test]
    fn test_rule_requires_all_patterns() {
        let rule = WindowRule::new(Some("firefox"), Some("Picture-in-Picture"), floating()).unwrap();
        assert!(rule.matches("firefox", "Picture-in-Picture"));
        assert!(!rule.matches("firefox", "Mozilla Firefox"));
    }

    #[test]
    fn test_rule_without_patterns_matches_nothing() {
        let rule = WindowRule::new(None, None, floating()).unwrap();
        assert!(!rule.matches("anything", "at all"));
    }

    #[test]
    fn test_invalid_pattern_reported() {
        let err = WindowRule::new(Some("[oops"), None, floating()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_resolve_later_rules_win() {
        let rules = vec![
            WindowRule::new(
                Some("term"),
                None,
                RuleOverrides {
                    workspace: Some(2),
                    opacity: Some(0.9),
                    ..Default::default()
                },
            )
            .unwrap(),
            WindowRule::new(
                Some("terminal"),
                None,
                RuleOverrides {
                    workspace: Some(3),
                    ..Default::default()
                },
            )
            .unwrap(),
        ];

        let resolved = resolve(&rules, "terminal", "");
        assert_eq!(resolved.workspace, Some(3));
        assert_eq!(resolved.opacity, Some(0.9));
        assert_eq!(resolved.floating, None);
    }
}
