//! User settings for FAM
//!
//! Policy knobs: per-archetype warning thresholds, the Angel minimum age,
//! the Saving frequency cap and the low-balance notice.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::paths::FamPaths;
use crate::error::FamError;
use crate::models::{Archetype, FrequencyLimit, Money};

/// Default warning fraction for each archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningThresholds {
    pub angel: Decimal,
    pub rebel: Decimal,
    pub trouble_maker: Decimal,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            angel: Decimal::new(9, 1),
            rebel: Decimal::new(5, 1),
            trouble_maker: Decimal::new(75, 2),
        }
    }
}

impl WarningThresholds {
    pub fn for_archetype(&self, archetype: Archetype) -> Decimal {
        match archetype {
            Archetype::Angel => self.angel,
            Archetype::Rebel => self.rebel,
            Archetype::TroubleMaker => self.trouble_maker,
        }
    }
}

/// Saving account frequency cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingSettings {
    /// Transactions allowed inside the window before the account locks
    pub max_transactions: usize,
    /// Trailing window length in days
    pub window_days: i64,
}

impl Default for SavingSettings {
    fn default() -> Self {
        Self {
            max_transactions: 2,
            window_days: 30,
        }
    }
}

impl SavingSettings {
    pub fn frequency_limit(&self) -> FrequencyLimit {
        FrequencyLimit {
            max_transactions: self.max_transactions,
            window: Duration::days(self.window_days),
        }
    }
}

/// User settings for FAM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub warning_thresholds: WarningThresholds,

    /// Minimum age, in whole years, to register as an Angel
    #[serde(default = "default_angel_minimum_age")]
    pub angel_minimum_age: u32,

    #[serde(default)]
    pub saving: SavingSettings,

    /// Balances strictly between zero and this amount trigger a notice
    #[serde(default = "default_low_balance_threshold")]
    pub low_balance_threshold: Money,

    /// Timestamp format for listings (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_angel_minimum_age() -> u32 {
    16
}

fn default_low_balance_threshold() -> Money {
    Money::from_dollars(5)
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            warning_thresholds: WarningThresholds::default(),
            angel_minimum_age: default_angel_minimum_age(),
            saving: SavingSettings::default(),
            low_balance_threshold: default_low_balance_threshold(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &FamPaths) -> Result<Self, FamError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FamError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| FamError::Config(format!("Failed to parse settings file: {}", e)))?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FamPaths) -> Result<(), FamError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FamError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FamError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check that every setting is in range
    pub fn validate(&self) -> Result<(), FamError> {
        for archetype in Archetype::ALL {
            let t = self.warning_thresholds.for_archetype(archetype);
            if t <= Decimal::ZERO || t > Decimal::ONE {
                return Err(FamError::Config(format!(
                    "{} warning threshold must be in (0, 1], got {}",
                    archetype, t
                )));
            }
        }

        if self.saving.max_transactions == 0 {
            return Err(FamError::Config(
                "saving.max_transactions must be at least 1".into(),
            ));
        }

        if self.saving.window_days <= 0 {
            return Err(FamError::Config(
                "saving.window_days must be positive".into(),
            ));
        }

        if self.low_balance_threshold.is_negative() {
            return Err(FamError::Config(
                "low_balance_threshold cannot be negative".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.warning_thresholds.for_archetype(Archetype::Angel), dec!(0.9));
        assert_eq!(settings.warning_thresholds.for_archetype(Archetype::Rebel), dec!(0.5));
        assert_eq!(
            settings.warning_thresholds.for_archetype(Archetype::TroubleMaker),
            dec!(0.75)
        );
        assert_eq!(settings.angel_minimum_age, 16);
        assert_eq!(settings.saving.frequency_limit(), FrequencyLimit::default());
        assert_eq!(settings.low_balance_threshold, Money::from_dollars(5));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.warning_thresholds.rebel = dec!(0.6);
        settings.saving.window_days = 7;

        settings.save(&paths).unwrap();
        assert!(paths.is_initialized());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.warning_thresholds.rebel, dec!(0.6));
        assert_eq!(loaded.saving.frequency_limit().window, Duration::days(7));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"angel_minimum_age": 14}"#).unwrap();
        assert_eq!(settings.angel_minimum_age, 14);
        assert_eq!(settings.saving.max_transactions, 2);
        assert_eq!(settings.date_format, "%Y-%m-%d %H:%M:%S");
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let mut settings = Settings::default();
        settings.warning_thresholds.angel = dec!(1.5);
        assert!(matches!(settings.validate(), Err(FamError::Config(_))));

        settings.warning_thresholds.angel = dec!(0);
        assert!(settings.validate().is_err());

        settings.warning_thresholds.angel = dec!(1);
        assert!(settings.validate().is_ok());
    }
}
