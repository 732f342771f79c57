//! # Application Configuration
//!
//! Company profile, quote defaults and output location.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --tax-rate 7.5, -o out.pdf                                         │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     DRAPE_TAX_RATE=5                                                   │
//! │     DRAPE_OUTPUT_DIR=/srv/quotes                                       │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/quote/config.toml (Linux)                                │
//! │     ~/Library/Application Support/com.drapes.quote/config.toml (macOS) │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     Built-in company profile, 5% VAT, prefix QT                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [company]
//! name = "DRAPES AND FITOUT FZE"
//! address = "OFFICE B40-003, BLOCK B, SHARJAH, UAE"
//! phone = "+971 58 580 9365"
//! tax_id = "104706477700003"
//! logo_path = "/etc/drape/logo.png"
//! terms = ["This quotation is valid for 30 days from the date of issue."]
//!
//! [company.bank_details]
//! bank = "RAK Bank"
//! account = "0353425596001"
//! iban = "AE31 0400 0003 5342 5596 001"
//!
//! [quote]
//! tax_rate_bps = 500
//! number_prefix = "QT"
//!
//! [output]
//! directory = "."
//! ```

use std::path::{Path, PathBuf};

use drape_core::validation::validate_tax_rate_bps;
use drape_core::{CompanyProfile, TaxRate, DEFAULT_QUOTE_PREFIX, DEFAULT_TAX_RATE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

// =============================================================================
// Quote Settings
// =============================================================================

/// Defaults applied to every new quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// VAT in basis points (500 = 5%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Prefix of generated quote numbers.
    #[serde(default = "default_number_prefix")]
    pub number_prefix: String,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE.bps()
}

fn default_number_prefix() -> String {
    DEFAULT_QUOTE_PREFIX.to_string()
}

impl Default for QuoteSettings {
    fn default() -> Self {
        QuoteSettings {
            tax_rate_bps: default_tax_rate_bps(),
            number_prefix: default_number_prefix(),
        }
    }
}

impl QuoteSettings {
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

// =============================================================================
// Output Settings
// =============================================================================

/// Where generated documents go when no path is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            directory: default_output_dir(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// The issuing company.
    #[serde(default)]
    pub company: CompanyProfile,

    /// Quote defaults.
    #[serde(default)]
    pub quote: QuoteSettings,

    /// Output location.
    #[serde(default)]
    pub output: OutputSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; a missing default file just
    /// means defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves configuration to `config_path` (or the default location).
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn save(&self, config_path: Option<&Path>, force: bool) -> Result<PathBuf, ConfigError> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path));
        }

        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = self.to_toml()?;
        std::fs::write(&path, contents).map_err(write_err)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.company.name.trim().is_empty() {
            return Err(ConfigError::Invalid("company.name must not be empty".into()));
        }

        if self.company.currency_code.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "company.currency_code must not be empty".into(),
            ));
        }

        validate_tax_rate_bps(self.quote.tax_rate_bps)
            .map_err(|e| ConfigError::Invalid(format!("quote.tax_rate_bps: {}", e)))?;

        if self.quote.number_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "quote.number_prefix must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Tax rate, as a percentage
        if let Some(rate) = var("DRAPE_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() && (0.0..=100.0).contains(&pct) => {
                    debug!(rate = %rate, "Overriding tax rate from environment");
                    self.quote.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(rate = %rate, "Ignoring invalid DRAPE_TAX_RATE"),
            }
        }

        // Logo
        if let Some(path) = var("DRAPE_LOGO_PATH") {
            debug!(path = %path, "Overriding logo path from environment");
            self.company.logo_path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        // Output directory
        if let Some(dir) = var("DRAPE_OUTPUT_DIR") {
            debug!(dir = %dir, "Overriding output directory from environment");
            self.output.directory = PathBuf::from(dir);
        }

        // Company name
        if let Some(name) = var("DRAPE_COMPANY_NAME") {
            self.company.name = name;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "drapes", "quote")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.company.name, "DRAPES AND FITOUT FZE");
        assert_eq!(config.quote.tax_rate(), TaxRate::from_bps(500));
        assert_eq!(config.quote.number_prefix, "QT");
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.company.name = "  ".to_string();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.quote.tax_rate_bps = 10_001;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.quote.number_prefix = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            ("DRAPE_TAX_RATE", "7.5"),
            ("DRAPE_LOGO_PATH", "/srv/logo.png"),
            ("DRAPE_OUTPUT_DIR", "/srv/quotes"),
            ("DRAPE_COMPANY_NAME", "Blinds R Us"),
        ]));

        assert_eq!(config.quote.tax_rate_bps, 750);
        assert_eq!(config.company.logo_path, Some(PathBuf::from("/srv/logo.png")));
        assert_eq!(config.output.directory, PathBuf::from("/srv/quotes"));
        assert_eq!(config.company.name, "Blinds R Us");
    }

    #[test]
    fn test_invalid_tax_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[("DRAPE_TAX_RATE", "lots")]));
        assert_eq!(config.quote.tax_rate_bps, 500);

        config.apply_overrides(env(&[("DRAPE_TAX_RATE", "-3")]));
        assert_eq!(config.quote.tax_rate_bps, 500);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [quote]
            tax_rate_bps = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.quote.tax_rate_bps, 0);
        assert_eq!(config.quote.number_prefix, "QT");
        assert_eq!(config.company, CompanyProfile::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.quote.number_prefix = "DQ".to_string();
        config.save(Some(&path), false).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine").unwrap();

        let err = AppConfig::default().save(Some(&path), false).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        AppConfig::default().save(Some(&path), true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[company]"));
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[quote\ntax_rate_bps = ").unwrap();
        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
