use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::core::matcher::DEFAULT_MIN_SCORE;
use crate::models::ScoringPolicy;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringPolicy,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            min_score: default_min_score(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }
fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingSettings {
    /// Apply `LOG_LEVEL` / `LOG_FORMAT` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(std::env::var("LOG_LEVEL").ok(), std::env::var("LOG_FORMAT").ok())
    }

    /// Replace level and format with any explicitly given (non-blank) values
    pub fn with_overrides(self, level: Option<String>, format: Option<String>) -> Self {
        let given = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            level: given(level).unwrap_or(self.level),
            format: given(format).unwrap_or(self.format),
        }
    }

    pub fn is_pretty(&self) -> bool {
        self.format.eq_ignore_ascii_case("pretty")
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

fn environment() -> Environment {
    // e.g., CARRY__SCORING__WEIGHTS__ROUTE -> scoring.weights.route
    Environment::with_prefix("CARRY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CARRY__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject policy values the scorer cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = &self.scoring.weights;
        let trust = &self.scoring.trust;

        let non_negative = [
            ("scoring.weights.route", weights.route),
            ("scoring.weights.date", weights.date),
            ("scoring.weights.capacity", weights.capacity),
            ("scoring.weights.trust", weights.trust),
            ("scoring.trust.identity", trust.identity),
            ("scoring.trust.sailor", trust.sailor),
            ("scoring.trust.rating", trust.rating),
            ("scoring.trust.deliveries", trust.deliveries),
            ("scoring.trust.subscription", trust.subscription),
            ("scoring.capacity.full_headroom_ratio", self.scoring.capacity.full_headroom_ratio),
            ("matching.min_score", self.matching.min_score),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(key, format!("must be a finite non-negative number, got {}", value)));
            }
        }

        let unit_interval = [
            ("scoring.route.partial_score", self.scoring.route.partial_score),
            ("scoring.dates.perfect_coverage", self.scoring.dates.perfect_coverage),
            ("scoring.dates.good_coverage", self.scoring.dates.good_coverage),
            ("scoring.dates.perfect_score", self.scoring.dates.perfect_score),
            ("scoring.dates.good_score", self.scoring.dates.good_score),
            ("scoring.dates.poor_score", self.scoring.dates.poor_score),
            ("scoring.capacity.base_score", self.scoring.capacity.base_score),
            ("scoring.capacity.unconfirmed_fit_factor", self.scoring.capacity.unconfirmed_fit_factor),
        ];
        for (key, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(key, format!("must be within 0-1, got {}", value)));
            }
        }

        let dates = &self.scoring.dates;
        if dates.perfect_margin_days < 0 || dates.grace_days < 0 {
            return Err(invalid("scoring.dates", "day thresholds must not be negative".to_string()));
        }
        if dates.good_coverage > dates.perfect_coverage {
            return Err(invalid(
                "scoring.dates.good_coverage",
                "must not exceed perfect_coverage".to_string(),
            ));
        }
        if !(dates.perfect_score >= dates.good_score && dates.good_score >= dates.poor_score) {
            return Err(invalid(
                "scoring.dates",
                "category scores must be ordered perfect >= good >= poor".to_string(),
            ));
        }

        if self.matching.default_limit == 0 || self.matching.default_limit > self.matching.max_limit {
            return Err(invalid(
                "matching.default_limit",
                format!("must be within 1-{}", self.matching.max_limit),
            ));
        }

        Ok(())
    }

    /// Scoring policy handed to the matcher
    pub fn scoring_policy(&self) -> ScoringPolicy {
        self.scoring
    }
}

fn invalid(key: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason,
    }
}
