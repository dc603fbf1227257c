//! Tracing setup for the binaries. Diagnostics go to stderr; stdout carries
//! command output only.

use crate::config::TelemetryConfig;
use std::io::IsTerminal;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}' from {origin}: {source}")]
    Filter {
        value: String,
        origin: &'static str,
        #[source]
        source: ParseError,
    },
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

/// `RUST_LOG` wins over `APP_LOG_LEVEL` when set and non-empty.
pub fn build_filter(
    config: &TelemetryConfig,
    rust_log: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    let (value, origin) = match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => (directives, "RUST_LOG"),
        _ => (config.log_level.trim(), "APP_LOG_LEVEL"),
    };

    EnvFilter::try_new(value).map_err(|source| TelemetryError::Filter {
        value: value.to_string(),
        origin,
        source,
    })
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(config, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: log_level.to_string(),
        }
    }

    #[test]
    fn falls_back_to_configured_level() {
        let filter = build_filter(&config("civic_prefill=debug"), None).expect("filter builds");
        assert_eq!(filter.to_string(), "civic_prefill=debug");

        let blank_override = build_filter(&config("warn"), Some("  ")).expect("filter builds");
        assert_eq!(blank_override.to_string(), "warn");
    }

    #[test]
    fn rust_log_takes_precedence() {
        let filter = build_filter(&config("info"), Some("trace")).expect("filter builds");
        assert_eq!(filter.to_string(), "trace");
    }

    #[test]
    fn names_the_source_of_a_bad_filter() {
        match build_filter(&config("civic_prefill=notalevel"), None) {
            Err(TelemetryError::Filter { value, origin, .. }) => {
                assert_eq!(value, "civic_prefill=notalevel");
                assert_eq!(origin, "APP_LOG_LEVEL");
            }
            other => panic!("expected filter error, got {other:?}"),
        }

        let error = build_filter(&config("info"), Some("civic_prefill=notalevel"))
            .expect_err("bad RUST_LOG rejected");
        assert!(error.to_string().contains("RUST_LOG"));
    }
}
