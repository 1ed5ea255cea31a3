//! # Engine Settings
//!
//! Tunable rates and thresholds used by the mode helper functions.
//! Settings serialize to plain JSON; missing fields fall back to defaults so a
//! settings file only needs the values it wants to change.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::EngineSettings;
//!
//! let settings: EngineSettings = serde_json::from_str(r#"{ "tax_rate": 0.0725 }"#).unwrap();
//! assert_eq!(settings.tax_rate, 0.0725);
//! assert_eq!(settings.display_width, 20);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Rates and thresholds for the Shopping, Budgeting and Cooking helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Sales tax applied by the Tax button (0.08 = 8%)
    pub tax_rate: f64,

    /// Tip rates offered by the Tip button
    pub tip_rates: Vec<f64>,

    /// Savings rates offered by the Budgeting "Save" button
    pub savings_rates: Vec<f64>,

    /// Temperatures above this are read as Fahrenheit by the °C/°F button
    pub fahrenheit_threshold: f64,

    /// Characters shown before the display text is truncated
    pub display_width: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            tax_rate: 0.08,
            tip_rates: vec![0.15, 0.18, 0.20],
            savings_rates: vec![0.10, 0.20, 0.30],
            fahrenheit_threshold: 100.0,
            display_width: 20,
        }
    }
}

impl EngineSettings {
    /// Load settings from a JSON file.
    ///
    /// Returns `CalcError::InvalidInput` when the file cannot be read or
    /// parsed, naming the path in the reason.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CalcError::invalid_input(format!("Cannot read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            CalcError::invalid_input(format!("Invalid JSON in {}: {}", path.display(), e))
        })
    }

    /// Whole-percent label for a rate, e.g. `0.15` -> `"15%"`.
    pub fn percent_label(rate: f64) -> String {
        format!("{}%", crate::format::format_rounded(rate * 100.0, 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.tax_rate, 0.08);
        assert_eq!(settings.tip_rates.len(), 3);
        assert_eq!(settings.fahrenheit_threshold, 100.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{ "tip_rates": [0.1] }"#).unwrap();
        assert_eq!(settings.tip_rates, vec![0.1]);
        assert_eq!(settings.tax_rate, 0.08);
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(EngineSettings::percent_label(0.15), "15%");
        assert_eq!(EngineSettings::percent_label(0.0725), "7.25%");
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_dir().join("calc_core_settings_test.json");
        fs::write(&path, r#"{ "display_width": 12 }"#).unwrap();

        let settings = EngineSettings::load(&path).unwrap();
        assert_eq!(settings.display_width, 12);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_dir().join("calc_core_settings_does_not_exist.json");
        let err = EngineSettings::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
