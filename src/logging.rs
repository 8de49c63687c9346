//! Structured logging setup for the CLI.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job. Logs go to stderr so stdout stays clean JSON.
//!
//! Environment:
//! - `CARCONFIG_LOG`: level (`error`, `warn`, `info`, `debug`, `trace`)
//! - `CARCONFIG_LOG_FORMAT`: `human` or `json`
//! - `RUST_LOG`: full filter directive, wins over the above

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<LogFormat> {
        match s.trim().to_lowercase().as_str() {
            "human" | "text" | "pretty" => Some(LogFormat::Human),
            "json" | "jsonl" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LogConfig {
    /// CLI values win; otherwise the environment; otherwise defaults.
    pub fn from_env(cli_level: Option<&str>, cli_format: Option<&str>) -> Self {
        let env_level = std::env::var("CARCONFIG_LOG").ok();
        let env_format = std::env::var("CARCONFIG_LOG_FORMAT").ok();
        Self::resolve(
            cli_level.or(env_level.as_deref()),
            cli_format.or(env_format.as_deref()),
        )
    }

    fn resolve(level: Option<&str>, format: Option<&str>) -> Self {
        Self {
            level: level.and_then(LogLevel::parse).unwrap_or_default(),
            format: format.and_then(LogFormat::parse).unwrap_or_default(),
        }
    }
}

fn default_directive(config: &LogConfig) -> String {
    format!("carconfig_core={}", config.level)
}

/// Install the global subscriber. Call once, at startup.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let builder = tracing_fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A second init (tests, embedding) is not an error worth surfacing.
    let _ = match config.format {
        LogFormat::Human => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = LogConfig::resolve(None, None);
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Human);
    }

    #[test]
    fn test_resolve_explicit_values() {
        let config = LogConfig::resolve(Some("DEBUG"), Some("jsonl"));
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let config = LogConfig::resolve(Some("loud"), Some("xml"));
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn test_default_directive_scopes_to_crate() {
        let config = LogConfig::resolve(Some("trace"), None);
        assert_eq!(default_directive(&config), "carconfig_core=trace");
        assert_eq!(default_directive(&LogConfig::default()), "carconfig_core=warn");
    }

    #[test]
    fn test_scoped_subscriber_leaves_global_untouched() {
        let config = LogConfig::resolve(Some("debug"), None);
        let subscriber = tracing_fmt()
            .with_env_filter(EnvFilter::new(default_directive(&config)))
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(level = config.level.as_str(), "scoped subscriber active");
        });
        assert!(!tracing::dispatcher::has_been_set());
    }
}
