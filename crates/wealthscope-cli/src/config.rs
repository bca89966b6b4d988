//! Configuration for the CLI.
//!
//! The configuration file is only ever read. Threshold edits made in a session
//! are not written back.

use crate::error::{CliError, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use wealthscope_domain::config::DEFAULT_RECONCILIATION_TOLERANCE;
use wealthscope_domain::{DisplayMode, EngineConfig, UnboundedBinPolicy};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dataset document to load; the built-in reference dataset when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<PathBuf>,

    /// Thresholds used when none are given; the reference preset when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_thresholds: Option<Vec<f64>>,

    /// Display settings
    #[serde(default)]
    pub settings: Settings,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineSettings,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Default display mode
    #[serde(default, deserialize_with = "deserialize_parsed", serialize_with = "serialize_display")]
    pub mode: DisplayMode,

    /// REPL history size (in memory only)
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Attribution rule for the open-ended bin
    #[serde(default, deserialize_with = "deserialize_parsed", serialize_with = "serialize_display")]
    pub unbounded_bin_policy: UnboundedBinPolicy,

    /// Reject datasets whose bin sums drift from the totals
    #[serde(default = "default_true")]
    pub check_reconciliation: bool,

    /// Maximum relative drift when `check_reconciliation` is on
    #[serde(default = "default_tolerance")]
    pub reconciliation_tolerance: f64,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".wealthscope").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is tried and
    /// a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.engine_config(None)?;
        Ok(config)
    }

    /// Build the engine configuration, optionally overriding the policy.
    pub fn engine_config(&self, policy_override: Option<UnboundedBinPolicy>) -> Result<EngineConfig> {
        let config = EngineConfig {
            unbounded_bin_policy: policy_override.unwrap_or(self.engine.unbounded_bin_policy),
            reconciliation_tolerance: self
                .engine
                .check_reconciliation
                .then_some(self.engine.reconciliation_tolerance),
        };
        config.validate().map_err(CliError::Config)?;
        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            mode: DisplayMode::Percentage,
            history_size: 1000,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            unbounded_bin_policy: UnboundedBinPolicy::StartWithinBin,
            check_reconciliation: true,
            reconciliation_tolerance: DEFAULT_RECONCILIATION_TOLERANCE,
        }
    }
}

/// Read a config value through its `FromStr` implementation.
fn deserialize_parsed<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = String::deserialize(deserializer)?;
    value.parse().map_err(de::Error::custom)
}

fn serialize_display<S, T>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    T: fmt::Display,
{
    serializer.collect_str(value)
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

fn default_tolerance() -> f64 {
    DEFAULT_RECONCILIATION_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.dataset_path.is_none());
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.engine_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(
            r#"
            dataset_path = "data/wealth_distribution.json"
            default_thresholds = [0, 50000, 1000000]

            [settings]
            color = false
            format = "json"
            mode = "absolute"

            [engine]
            unbounded_bin_policy = "lowest-bracket-only"
            check_reconciliation = false
            "#,
        )
        .unwrap();

        assert_eq!(config.dataset_path, Some(PathBuf::from("data/wealth_distribution.json")));
        assert_eq!(config.default_thresholds, Some(vec![0.0, 50_000.0, 1_000_000.0]));
        assert!(!config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.settings.mode, DisplayMode::Absolute);
        assert_eq!(config.settings.history_size, 1000);

        let engine = config.engine_config(None).unwrap();
        assert_eq!(engine.unbounded_bin_policy, UnboundedBinPolicy::LowestBracketOnly);
        assert_eq!(engine.reconciliation_tolerance, None);
    }

    #[test]
    fn test_policy_override() {
        let config = Config::default();
        let engine = config.engine_config(Some(UnboundedBinPolicy::LowestBracketOnly)).unwrap();
        assert_eq!(engine.unbounded_bin_policy, UnboundedBinPolicy::LowestBracketOnly);
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        let result = Config::from_toml_str("[engine]\nreconciliation_tolerance = -1.0\n");
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = Config::from_toml_str("[engine]\nunbounded_bin_policy = \"split\"\n");
        assert!(matches!(result, Err(CliError::Toml(_))));
    }

    #[test]
    fn test_setting_aliases_accepted() {
        let config = Config::from_toml_str(
            "[settings]\nmode = \"abs\"\n\n[engine]\nunbounded_bin_policy = \"lowest_bracket_only\"\n",
        )
        .unwrap();
        assert_eq!(config.settings.mode, DisplayMode::Absolute);
        assert_eq!(config.engine.unbounded_bin_policy, UnboundedBinPolicy::LowestBracketOnly);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = Config::from_toml_str("[settings]\nmode = \"fractions\"\n");
        assert!(matches!(result, Err(CliError::Toml(_))));
    }

    #[test]
    fn test_settings_serialize_as_names() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("mode = \"percentage\""));
        assert!(toml.contains("unbounded_bin_policy = \"start-within-bin\""));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/no/such/config.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\nmode = \"absolute\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.settings.mode, DisplayMode::Absolute);
    }
}
