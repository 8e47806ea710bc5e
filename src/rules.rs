//! Combat rules configuration.
//!
//! Loads the casualty ratios and bomb divisor from a JSON file. Every field
//! is optional and falls back to the standard game rules.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or checking a rules file.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange { field: &'static str, value: u32 },

    #[error("bomb_divisor must be at least 1")]
    ZeroBombDivisor,
}

/// Tunable constants used when resolving combat and bombing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Percentage of committed attackers that kill a defender each.
    pub defender_loss_percent: u32,
    /// Percentage of defending armies that kill an attacker each.
    pub attacker_loss_percent: u32,
    /// A bombed territory loses `armies / bomb_divisor` armies.
    pub bomb_divisor: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            defender_loss_percent: 60,
            attacker_loss_percent: 70,
            bomb_divisor: 2,
        }
    }
}

impl Rules {
    /// Parses rules from a JSON document and checks them.
    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.check()?;
        Ok(rules)
    }

    /// Reads and parses a JSON rules file.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let data = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    /// Rejects percentages above 100 and a zero bomb divisor.
    pub fn check(&self) -> Result<(), RulesError> {
        if self.defender_loss_percent > 100 {
            return Err(RulesError::PercentOutOfRange {
                field: "defender_loss_percent",
                value: self.defender_loss_percent,
            });
        }
        if self.attacker_loss_percent > 100 {
            return Err(RulesError::PercentOutOfRange {
                field: "attacker_loss_percent",
                value: self.attacker_loss_percent,
            });
        }
        if self.bomb_divisor == 0 {
            return Err(RulesError::ZeroBombDivisor);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_rules() {
        let rules = Rules::default();
        assert_eq!(rules.defender_loss_percent, 60);
        assert_eq!(rules.attacker_loss_percent, 70);
        assert_eq!(rules.bomb_divisor, 2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let rules = Rules::from_json_str(r#"{ "attacker_loss_percent": 50 }"#).unwrap();
        assert_eq!(rules.attacker_loss_percent, 50);
        assert_eq!(rules.defender_loss_percent, 60);
        assert_eq!(rules.bomb_divisor, 2);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Rules::from_json_str("{}").unwrap(), Rules::default());
    }

    #[test]
    fn rejects_percent_over_100() {
        let err = Rules::from_json_str(r#"{ "defender_loss_percent": 101 }"#).unwrap_err();
        assert!(matches!(
            err,
            RulesError::PercentOutOfRange { field: "defender_loss_percent", value: 101 }
        ));
    }

    #[test]
    fn rejects_zero_divisor() {
        let err = Rules::from_json_str(r#"{ "bomb_divisor": 0 }"#).unwrap_err();
        assert!(matches!(err, RulesError::ZeroBombDivisor));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Rules::from_json_str("{ not json"),
            Err(RulesError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Rules::load(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules.json"));
    }
}
