//! CLI configuration resolved from flags and `VIBES_*` environment variables.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use vibes_core::constants::GRAVITY;
use vibes_trending::{TrendingEngine, TrendingParams};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event, for log aggregation.
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown log format: {other} (expected \"text\" or \"json\")")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Resolved settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Decay parameters for every scoring call.
    pub params: TrendingParams,
    /// Log level filter string (e.g. "warn", "debug", "vibes_trending=trace").
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            params: TrendingParams::default(),
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl CliConfig {
    /// Validate raw flag values into a config.
    pub fn resolve(gravity: f64, log_level: &str, log_format: &str) -> Result<Self> {
        let params = TrendingParams::with_gravity(gravity)
            .with_context(|| format!("--gravity / VIBES_GRAVITY rejected: {gravity}"))?;
        let log_format = log_format.parse()?;
        Ok(Self {
            params,
            log_level: log_level.to_string(),
            log_format,
        })
    }

    /// Engine configured with these parameters.
    pub fn engine(&self) -> TrendingEngine {
        TrendingEngine::with_params(self.params)
    }

    /// Whether gravity differs from the built-in constant.
    pub fn custom_gravity(&self) -> bool {
        self.params.gravity() != GRAVITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = CliConfig::default();
        assert_eq!(cfg.params, TrendingParams::default());
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.log_format, LogFormat::Text);
        assert!(!cfg.custom_gravity());
    }

    #[test]
    fn resolve_accepts_valid_values() {
        let cfg = CliConfig::resolve(2.2, "debug", "json").unwrap();
        assert_eq!(cfg.params.gravity(), 2.2);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert!(cfg.custom_gravity());
    }

    #[test]
    fn resolve_rejects_bad_gravity() {
        let err = CliConfig::resolve(0.0, "info", "text").unwrap_err();
        assert!(format!("{err:#}").contains("invalid gravity"));
    }

    #[test]
    fn resolve_rejects_bad_format() {
        assert!(CliConfig::resolve(GRAVITY, "info", "yaml").is_err());
    }

    #[test]
    fn log_format_round_trips_display() {
        for fmt in [LogFormat::Text, LogFormat::Json] {
            assert_eq!(fmt.to_string().parse::<LogFormat>().unwrap(), fmt);
        }
    }

    #[test]
    fn engine_uses_params() {
        let cfg = CliConfig::resolve(3.0, "info", "text").unwrap();
        assert_eq!(cfg.engine().params().gravity(), 3.0);
    }
}
