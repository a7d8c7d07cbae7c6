//! User settings for the ledger
//!
//! Manages display preferences and the carry-over algorithm.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::amount::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_NEGATIVE_MARKER};
use crate::models::{Amount, Month};
use crate::services::carry_over::CarryOverMode;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol printed before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Marker printed before negative amounts
    #[serde(default = "default_negative_marker")]
    pub negative_marker: String,

    /// How the balance carried into a month is computed
    #[serde(default)]
    pub carry_over_mode: CarryOverMode,

    /// Month selected when a command doesn't name one (current month if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_month: Option<Month>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_negative_marker() -> String {
    DEFAULT_NEGATIVE_MARKER.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            negative_marker: default_negative_marker(),
            carry_over_mode: CarryOverMode::default(),
            default_month: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let existed = paths.settings_file().exists();
        let settings: Self = read_json(paths.settings_file()).map_err(|e| match e {
            LedgerError::Storage(msg) => {
                LedgerError::Config(format!("Failed to load settings: {}", msg))
            }
            other => other,
        })?;

        if !existed {
            settings.save(paths)?;
        }
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// The month commands fall back to
    pub fn selected_month(&self) -> Month {
        self.default_month.unwrap_or_else(Month::current)
    }

    /// Format an amount with the configured symbol and marker
    pub fn format_amount(&self, amount: Amount) -> String {
        amount.format_with_symbol(&self.currency_symbol, &self.negative_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.currency_symbol, "¥");
        assert_eq!(settings.negative_marker, "△");
        assert_eq!(settings.carry_over_mode, CarryOverMode::Cumulative);
        assert!(settings.default_month.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.carry_over_mode, CarryOverMode::Cumulative);
        assert!(paths.settings_file().exists());

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.carry_over_mode = CarryOverMode::PreviousMonth;
        settings.currency_symbol = "$".to_string();
        settings.default_month = Month::new(2025, 6);

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.carry_over_mode, CarryOverMode::PreviousMonth);
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.selected_month(), Month::new(2025, 6).unwrap());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"carry_over_mode":"previous-month"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.carry_over_mode, CarryOverMode::PreviousMonth);
        assert_eq!(loaded.negative_marker, "△");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let result = Settings::load_or_create(&paths);
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_format_amount() {
        let settings = Settings::default();
        assert_eq!(settings.format_amount(Amount::from_units(-500)), "△¥500");
    }
}
