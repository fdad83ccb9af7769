//! Race configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use raceboard_types::RaceParams;

use crate::RaceError;

/// Configuration for a race deployment.
///
/// Can be loaded from a TOML file via [`RaceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Data directory for leaderboard storage.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Number of leaderboard slots per race.
    #[serde(default = "default_max_slots")]
    pub max_slots: u32,

    /// Longest participant name kept on the board, in characters.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Longest race an instructor may open, in minutes.
    #[serde(default = "default_max_duration_minutes")]
    pub max_duration_minutes: u32,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./raceboard_data")
}

fn default_max_slots() -> u32 {
    RaceParams::classroom_defaults().max_slots
}

fn default_max_name_len() -> usize {
    RaceParams::classroom_defaults().max_name_len
}

fn default_max_duration_minutes() -> u32 {
    RaceParams::classroom_defaults().max_duration_minutes
}

fn default_log_format() -> String {
    "human".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RaceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, RaceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RaceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RaceError> {
        toml::from_str(s).map_err(|e| RaceError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("RaceConfig is always serializable to TOML")
    }

    /// The engine parameters this configuration describes.
    pub fn params(&self) -> RaceParams {
        RaceParams {
            max_slots: self.max_slots,
            max_name_len: self.max_name_len,
            max_duration_minutes: self.max_duration_minutes,
        }
    }

    /// Install the tracing subscriber named by `log_format`.
    pub fn init_logging(&self) {
        match self.log_format.as_str() {
            "json" => raceboard_utils::init_tracing_json(),
            _ => raceboard_utils::init_tracing(),
        }
    }
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_slots: default_max_slots(),
            max_name_len: default_max_name_len(),
            max_duration_minutes: default_max_duration_minutes(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = RaceConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = RaceConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.max_slots, config.max_slots);
        assert_eq!(parsed.max_duration_minutes, config.max_duration_minutes);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = RaceConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.max_slots, 3);
        assert_eq!(config.max_name_len, 64);
        assert_eq!(config.max_duration_minutes, 30);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            max_slots = 5
            max_duration_minutes = 90
        "#;
        let config = RaceConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.max_slots, 5);
        assert_eq!(config.max_duration_minutes, 90);
        assert_eq!(config.log_format, "human"); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = RaceConfig::from_toml_file("/nonexistent/raceboard.toml");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, RaceError::Config(_)));
    }

    #[test]
    fn params_reflect_configured_limits() {
        let toml = r#"
            max_slots = 10
            max_name_len = 16
        "#;
        let config = RaceConfig::from_toml_str(toml).expect("should parse");
        let params = config.params();
        assert_eq!(params.max_slots, 10);
        assert_eq!(params.max_name_len, 16);
        assert_eq!(params.max_duration_minutes, 30);
    }

    #[test]
    fn init_logging_tolerates_repeat_calls() {
        let human = RaceConfig::default();
        human.init_logging();
        human.init_logging();

        let json = RaceConfig {
            log_format: "json".to_string(),
            ..Default::default()
        };
        // A subscriber may already be installed; this must not panic.
        json.init_logging();
    }
}
