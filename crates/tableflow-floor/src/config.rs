//! # Floor Configuration
//!
//! Configuration for the runtime: floor size, timer, payment, display.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TABLEFLOW_ALMOST_FREE_SECS=30                                      │
//! │     TABLEFLOW_TABLE_COUNT=12                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/floor/floor.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.tableflow.floor/floor.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     10 tables, 2 minute countdown, 1 s poll, 2 s payment               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # floor.toml
//! [floor]
//! table_count = 10
//!
//! [timer]
//! almost_free_secs = 120
//! poll_interval_ms = 1000
//!
//! [payment]
//! delay_ms = 2000
//!
//! [display]
//! currency_symbol = "₹"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use tableflow_core::validation::validate_table_count;
use tableflow_core::{
    EngineConfig, Money, RestaurantState, DEFAULT_ALMOST_FREE_SECS, DEFAULT_TABLE_COUNT,
};

use crate::error::{FloorError, FloorResult};
use crate::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_PAYMENT_DELAY_MS, DEFAULT_POLL_INTERVAL_MS};

// =============================================================================
// Sections
// =============================================================================

/// Floor layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorSettings {
    #[serde(default = "default_table_count")]
    pub table_count: u32,
}

fn default_table_count() -> u32 {
    DEFAULT_TABLE_COUNT
}

impl Default for FloorSettings {
    fn default() -> Self {
        FloorSettings {
            table_count: default_table_count(),
        }
    }
}

/// ALMOST_FREE countdown and the monitor that watches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Countdown length once every item of an order is served.
    #[serde(default = "default_almost_free_secs")]
    pub almost_free_secs: u64,

    /// How often the timer monitor looks for expired tables.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_almost_free_secs() -> u64 {
    DEFAULT_ALMOST_FREE_SECS
}
fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for TimerSettings {
    fn default() -> Self {
        TimerSettings {
            almost_free_secs: default_almost_free_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Simulated payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettings {
    #[serde(default = "default_payment_delay_ms")]
    pub delay_ms: u64,
}

fn default_payment_delay_ms() -> u64 {
    DEFAULT_PAYMENT_DELAY_MS
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            delay_ms: default_payment_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Floor Config
// =============================================================================

/// Complete runtime configuration.
///
/// Every section and field is optional in the file; missing values take
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorConfig {
    #[serde(default)]
    pub floor: FloorSettings,

    #[serde(default)]
    pub timer: TimerSettings,

    #[serde(default)]
    pub payment: PaymentSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl FloorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (floor.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> FloorResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading floor config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load floor config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> FloorResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| FloorError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Floor config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> FloorResult<()> {
        validate_table_count(self.floor.table_count)
            .map_err(|e| FloorError::InvalidConfig(e.to_string()))?;

        if self.timer.almost_free_secs == 0 {
            return Err(FloorError::InvalidConfig(
                "almost_free_secs must be greater than 0".into(),
            ));
        }

        if self.timer.poll_interval_ms == 0 {
            return Err(FloorError::InvalidConfig(
                "poll_interval_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `TABLEFLOW_*` overrides read through `lookup`.
    ///
    /// Unparsable values are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(count) = parse_override(&lookup, "TABLEFLOW_TABLE_COUNT") {
            debug!(table_count = count, "Overriding table count from environment");
            self.floor.table_count = count;
        }

        if let Some(secs) = parse_override(&lookup, "TABLEFLOW_ALMOST_FREE_SECS") {
            debug!(almost_free_secs = secs, "Overriding countdown from environment");
            self.timer.almost_free_secs = secs;
        }

        if let Some(ms) = parse_override(&lookup, "TABLEFLOW_POLL_INTERVAL_MS") {
            self.timer.poll_interval_ms = ms;
        }

        if let Some(ms) = parse_override(&lookup, "TABLEFLOW_PAYMENT_DELAY_MS") {
            self.payment.delay_ms = ms;
        }

        if let Some(symbol) = lookup("TABLEFLOW_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tableflow", "floor").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("floor.toml")
        })
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            almost_free_duration: self.almost_free_duration(),
        }
    }

    pub fn almost_free_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.timer.almost_free_secs as i64)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.timer.poll_interval_ms)
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment.delay_ms)
    }

    /// A fresh floor of `table_count` FREE tables.
    pub fn initial_state(&self) -> RestaurantState {
        RestaurantState::with_tables(self.floor.table_count)
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use tableflow_core::Money;
    /// use tableflow_floor::FloorConfig;
    ///
    /// let config = FloorConfig::default();
    /// assert_eq!(config.format_amount(Money::from_major(300)), "₹300.00");
    /// ```
    pub fn format_amount(&self, amount: Money) -> String {
        if amount.is_negative() {
            let positive = Money::from_minor(-amount.minor());
            format!("-{}{}", self.display.currency_symbol, positive)
        } else {
            format!("{}{}", self.display.currency_symbol, amount)
        }
    }
}

fn parse_override<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = FloorConfig::default();
        assert_eq!(config.floor.table_count, 10);
        assert_eq!(config.timer.almost_free_secs, 120);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.payment_delay(), Duration::from_secs(2));
        assert_eq!(config.display.currency_symbol, "₹");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = FloorConfig::default();
        config.floor.table_count = 0;
        assert!(matches!(config.validate(), Err(FloorError::InvalidConfig(_))));

        let mut config = FloorConfig::default();
        config.floor.table_count = tableflow_core::MAX_TABLES + 1;
        assert!(config.validate().is_err());

        let mut config = FloorConfig::default();
        config.timer.almost_free_secs = 0;
        assert!(config.validate().is_err());

        let mut config = FloorConfig::default();
        config.timer.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        // An instant payment is fine.
        let mut config = FloorConfig::default();
        config.payment.delay_ms = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config: FloorConfig = toml::from_str(
            r#"
            [timer]
            almost_free_secs = 720
            "#,
        )
        .unwrap();

        assert_eq!(config.timer.almost_free_secs, 720);
        assert_eq!(config.timer.poll_interval_ms, 1000);
        assert_eq!(config.floor.table_count, 10);
        assert_eq!(
            config.engine_config().almost_free_duration,
            chrono::Duration::minutes(12)
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("floor.toml");

        let mut config = FloorConfig::default();
        config.floor.table_count = 14;
        config.display.currency_symbol = "$".into();
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[floor]"));
        assert!(contents.contains("table_count = 14"));

        let mut loaded: FloorConfig = toml::from_str(&contents).unwrap();
        loaded.apply_overrides(|_| None);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FloorConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert!(!config.display.currency_symbol.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_bad_files() {
        let dir = tempfile::tempdir().unwrap();

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[floor\ntable_count = ").unwrap();
        assert!(matches!(
            FloorConfig::load(Some(broken.clone())),
            Err(FloorError::ConfigLoadFailed(_))
        ));
        assert_eq!(
            FloorConfig::load_or_default(Some(broken)).floor.table_count,
            DEFAULT_TABLE_COUNT
        );

        let invalid = dir.path().join("invalid.toml");
        std::fs::write(&invalid, "[floor]\ntable_count = 0\n").unwrap();
        assert!(matches!(
            FloorConfig::load(Some(invalid)),
            Err(FloorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("TABLEFLOW_TABLE_COUNT", "6"),
            ("TABLEFLOW_ALMOST_FREE_SECS", " 5 "),
            ("TABLEFLOW_POLL_INTERVAL_MS", "250"),
            ("TABLEFLOW_PAYMENT_DELAY_MS", "soon"),
            ("TABLEFLOW_CURRENCY_SYMBOL", "Rs "),
        ]
        .into_iter()
        .collect();

        let mut config = FloorConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.floor.table_count, 6);
        assert_eq!(config.timer.almost_free_secs, 5);
        assert_eq!(config.timer.poll_interval_ms, 250);
        // Unparsable values leave the previous setting.
        assert_eq!(config.payment.delay_ms, DEFAULT_PAYMENT_DELAY_MS);
        assert_eq!(config.format_amount(Money::from_minor(1550)), "Rs 15.50");
    }

    #[test]
    fn test_format_amount() {
        let config = FloorConfig::default();
        assert_eq!(config.format_amount(Money::from_major(340)), "₹340.00");
        assert_eq!(config.format_amount(Money::zero()), "₹0.00");
        assert_eq!(config.format_amount(Money::from_minor(-250)), "-₹2.50");
    }

    #[test]
    fn test_initial_state() {
        let mut config = FloorConfig::default();
        config.floor.table_count = 3;
        let state = config.initial_state();
        assert_eq!(state.tables.len(), 3);
        assert_eq!(state.tables[2].id, "table-3");
    }
}
