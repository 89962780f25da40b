//! Configuration management for the fasting ticker
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FT__)

use crate::error::{TickerError, TickerResult};
use fasting_tracker_core::{validate_profile, BodyProfile, EnergyUnit, FastRecord, Goal};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub ticker: TickerConfig,
    #[serde(default)]
    pub profile: Option<BodyProfile>,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Tick loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Milliseconds between re-evaluations of an open fast
    pub interval_ms: u64,
    /// JSON file holding the fast record as returned by the API
    #[serde(default)]
    pub fast_file: Option<String>,
}

/// How results are shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub energy_unit: EnergyUnit,
    /// Goal used for the preset target when no profile is configured
    pub fallback_goal: Goal,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            energy_unit: EnergyUnit::Kcal,
            fallback_goal: Goal::Maintenance,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ticker: TickerConfig {
                interval_ms: 1000,
                fast_file: None,
            },
            profile: None,
            display: DisplayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FT__ prefix
    pub fn load() -> TickerResult<Self> {
        // e.g., FT__TICKER__INTERVAL_MS=500 sets ticker.interval_ms
        Self::load_with_env(config::Environment::with_prefix("FT").separator("__"))
    }

    fn load_with_env(environment: config::Environment) -> TickerResult<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            .add_source(environment.try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Reject settings the ticker cannot run with
    pub fn validate(&self) -> TickerResult<()> {
        if self.ticker.interval_ms == 0 {
            return Err(TickerError::InvalidConfig(
                "ticker.interval_ms must be positive".to_string(),
            ));
        }
        if let Some(profile) = &self.profile {
            validate_profile(profile)?;
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.ticker.interval_ms)
    }

    /// Read the configured fast record, if any
    ///
    /// A file containing `null` means there is no active fast.
    pub fn load_fast(&self) -> TickerResult<Option<FastRecord>> {
        let Some(path) = &self.ticker.fast_file else {
            return Ok(None);
        };

        let contents = std::fs::read_to_string(path).map_err(|source| TickerError::FastFile {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| TickerError::FastRecord {
            path: path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fasting_tracker_core::{ActivityLevel, Sex};
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("fasting-ticker-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ticker.interval_ms, 1000);
        assert_eq!(config.interval(), Duration::from_secs(1));
        assert!(config.profile.is_none());
        assert_eq!(config.display.energy_unit, EnergyUnit::Kcal);
        assert_eq!(config.display.fallback_goal, Goal::Maintenance);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = AppConfig::default();
        config.ticker.interval_ms = 0;
        assert!(matches!(config.validate(), Err(TickerError::InvalidConfig(_))));
    }

    #[test]
    fn test_implausible_profile_rejected() {
        let mut config = AppConfig::default();
        config.profile = Some(BodyProfile {
            sex: Sex::Male,
            age_years: 30,
            height_cm: 180.0,
            weight_kg: 5.0,
            activity: ActivityLevel::Moderate,
            goal: Goal::WeightLoss,
        });
        match config.validate() {
            Err(TickerError::Profile(err)) => assert_eq!(err.field, "weightKg"),
            other => panic!("expected profile error, got {:?}", other),
        }
    }

    fn env_vars(vars: &[(&str, &str)]) -> config::Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("FT")
            .separator("__")
            .source(Some(source))
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = AppConfig::load_with_env(env_vars(&[
            ("FT__TICKER__INTERVAL_MS", "250"),
            ("FT__DISPLAY__ENERGY_UNIT", "kj"),
            ("FT__DISPLAY__FALLBACK_GOAL", "MUSCLE_GAIN"),
            ("OTHER__TICKER__INTERVAL_MS", "9"),
        ]))
        .unwrap();

        assert_eq!(config.interval(), Duration::from_millis(250));
        assert_eq!(config.display.energy_unit, EnergyUnit::Kj);
        assert_eq!(config.display.fallback_goal, Goal::MuscleGain);
    }

    #[test]
    fn test_env_supplies_profile() {
        let config = AppConfig::load_with_env(env_vars(&[
            ("FT__PROFILE__SEX", "male"),
            ("FT__PROFILE__AGE_YEARS", "30"),
            ("FT__PROFILE__HEIGHT_CM", "180"),
            ("FT__PROFILE__WEIGHT_KG", "80.5"),
            ("FT__PROFILE__ACTIVITY", "MODERATE"),
            ("FT__PROFILE__GOAL", "WEIGHT_LOSS"),
        ]))
        .unwrap();

        let profile = config.profile.unwrap();
        assert_eq!(profile.age_years, 30);
        assert_eq!(profile.height_cm, 180.0);
        assert_eq!(profile.weight_kg, 80.5);
        assert_eq!(profile.activity, ActivityLevel::Moderate);
    }

    #[test]
    fn test_env_rejects_bad_value() {
        let result = AppConfig::load_with_env(env_vars(&[("FT__TICKER__INTERVAL_MS", "soon")]));
        assert!(matches!(result, Err(TickerError::Config(_))));
    }

    #[test]
    fn test_load_fast_without_file() {
        assert_eq!(AppConfig::default().load_fast().unwrap(), None);
    }

    #[test]
    fn test_load_fast_from_file() {
        let path = temp_file(
            "open.json",
            r#"{"startAt":"2024-03-01T20:00:00Z","targetDurationHours":16}"#,
        );
        let mut config = AppConfig::default();
        config.ticker.fast_file = Some(path.to_string_lossy().into_owned());

        let fast = config.load_fast().unwrap().unwrap();
        assert_eq!(fast.target_duration_hours, Some(16.0));
        assert!(!fast.is_closed());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_fast_null_file() {
        let path = temp_file("null.json", "null");
        let mut config = AppConfig::default();
        config.ticker.fast_file = Some(path.to_string_lossy().into_owned());

        assert_eq!(config.load_fast().unwrap(), None);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_fast_errors() {
        let mut config = AppConfig::default();
        config.ticker.fast_file = Some("/definitely/not/here.json".to_string());
        assert!(matches!(config.load_fast(), Err(TickerError::FastFile { .. })));

        let path = temp_file("bad.json", r#"{"endAt":"2024-03-01T20:00:00Z"}"#);
        config.ticker.fast_file = Some(path.to_string_lossy().into_owned());
        assert!(matches!(config.load_fast(), Err(TickerError::FastRecord { .. })));
        std::fs::remove_file(path).ok();
    }
}
