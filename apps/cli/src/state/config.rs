//! # Calculator Configuration
//!
//! Startup defaults for the calculator session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by the CLI)          │
//! │     --plan advanced --billing yearly                                   │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SHOPCALC_PLAN=shopify                                              │
//! │     SHOPCALC_BILLING=yearly                                            │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/shopcalc/shopcalc.toml (Linux)                           │
//! │     ~/Library/Application Support/com.shopcalc.shopcalc/ (macOS)       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     basic / monthly, empty inputs, compact JSON                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shopcalc.toml
//! [defaults]
//! plan = "shopify"            # basic | shopify | advanced
//! billing = "yearly"          # monthly | yearly
//! use_industry_averages = true
//!
//! [output]
//! pretty = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use shopcalc_core::{lookup_plan, BillingPeriod, CoreError, PlanTier};

const CONFIG_FILE_NAME: &str = "shopcalc.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] CoreError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Session defaults applied at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_plan")]
    pub plan: String,

    #[serde(default = "default_billing")]
    pub billing: String,

    /// Pre-fill the inputs with the industry averages preset.
    #[serde(default)]
    pub use_industry_averages: bool,
}

fn default_plan() -> String {
    "basic".to_string()
}

fn default_billing() -> String {
    BillingPeriod::default().as_str().to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            plan: default_plan(),
            billing: default_billing(),
            use_industry_averages: false,
        }
    }
}

/// How responses are printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON responses.
    #[serde(default)]
    pub pretty: bool,
}

// =============================================================================
// Calculator Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl CalculatorConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`shopcalc.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. Without one, a missing file at
    /// the platform default location means defaults.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Self::read_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::read_file(&path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load calculator config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document (missing sections fall back to defaults).
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn read_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading calculator config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validates that the default plan and billing period resolve.
    pub fn validate(&self) -> ConfigResult<()> {
        self.plan()?;
        self.billing()?;
        Ok(())
    }

    /// Applies `SHOPCALC_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a key lookup.
    ///
    /// Unparseable boolean values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(plan) = lookup("SHOPCALC_PLAN") {
            debug!(plan = %plan, "Overriding default plan from environment");
            self.defaults.plan = plan;
        }

        if let Some(billing) = lookup("SHOPCALC_BILLING") {
            debug!(billing = %billing, "Overriding billing period from environment");
            self.defaults.billing = billing;
        }

        if let Some(value) = lookup("SHOPCALC_USE_AVERAGES") {
            match parse_flag(&value) {
                Some(flag) => self.defaults.use_industry_averages = flag,
                None => warn!(value = %value, "Ignoring invalid SHOPCALC_USE_AVERAGES"),
            }
        }

        if let Some(value) = lookup("SHOPCALC_PRETTY") {
            match parse_flag(&value) {
                Some(flag) => self.output.pretty = flag,
                None => warn!(value = %value, "Ignoring invalid SHOPCALC_PRETTY"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopcalc", "shopcalc")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolves the default plan.
    pub fn plan(&self) -> Result<PlanTier, CoreError> {
        lookup_plan(&self.defaults.plan)
    }

    /// Resolves the default billing period.
    pub fn billing(&self) -> Result<BillingPeriod, CoreError> {
        self.defaults.billing.parse()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcalc_core::PlanId;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.plan().unwrap().id, PlanId::Basic);
        assert_eq!(config.billing().unwrap(), BillingPeriod::Monthly);
        assert!(!config.defaults.use_industry_averages);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_parse_full_file() {
        let config = CalculatorConfig::from_toml_str(
            r#"
            [defaults]
            plan = "advanced"
            billing = "yearly"
            use_industry_averages = true

            [output]
            pretty = true
            "#,
        )
        .unwrap();

        assert_eq!(config.plan().unwrap().id, PlanId::Advanced);
        assert_eq!(config.billing().unwrap(), BillingPeriod::Yearly);
        assert!(config.defaults.use_industry_averages);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = CalculatorConfig::from_toml_str("[output]\npretty = true\n").unwrap();
        assert_eq!(config.defaults, DefaultsConfig::default());
        assert!(config.output.pretty);

        let config = CalculatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, CalculatorConfig::default());
    }

    #[test]
    fn test_malformed_toml() {
        let err = CalculatorConfig::from_toml_str("[defaults\nplan = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_unknown_ids() {
        let config = CalculatorConfig::from_toml_str("[defaults]\nplan = \"plus\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(CoreError::PlanNotFound(_)))
        ));

        let config =
            CalculatorConfig::from_toml_str("[defaults]\nbilling = \"weekly\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(CoreError::BillingPeriodNotFound(_)))
        ));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = CalculatorConfig::from_toml_str(
            "[defaults]\nplan = \"shopify\"\nbilling = \"monthly\"\n",
        )
        .unwrap();
        config.apply_overrides(env(&[
            ("SHOPCALC_BILLING", "yearly"),
            ("SHOPCALC_USE_AVERAGES", "yes"),
            ("SHOPCALC_PRETTY", "1"),
        ]));

        assert_eq!(config.plan().unwrap().id, PlanId::Shopify);
        assert_eq!(config.billing().unwrap(), BillingPeriod::Yearly);
        assert!(config.defaults.use_industry_averages);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_invalid_env_flag_is_ignored() {
        let mut config = CalculatorConfig::default();
        config.apply_overrides(env(&[("SHOPCALC_PRETTY", "sometimes")]));
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("shopcalc-does-not-exist/shopcalc.toml");
        let err = CalculatorConfig::load(Some(path.clone())).unwrap_err();
        assert!(matches!(&err, ConfigError::NotFound(p) if *p == path));
        assert!(err.to_string().starts_with("Config file not found: "));

        // The lenient loader still falls back
        let config = CalculatorConfig::load_or_default(Some(path));
        assert!(config.validate().is_ok());
    }
}
