use crate::prefill::{Locale, MatchScope, PrefillOptions};
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the pre-fill tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub prefill: PrefillOptions,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let match_scope = match env::var("PREFILL_MATCH_SCOPE") {
            Ok(value) => {
                MatchScope::parse(&value).ok_or(ConfigError::InvalidMatchScope { value })?
            }
            Err(_) => MatchScope::default(),
        };

        let apply_masks = match env::var("PREFILL_APPLY_MASKS") {
            Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
                variable: "PREFILL_APPLY_MASKS",
                value,
            })?,
            Err(_) => false,
        };

        let locale = match env::var("PREFILL_LOCALE") {
            Ok(value) => Locale::parse(&value).ok_or(ConfigError::InvalidLocale { value })?,
            Err(_) => Locale::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            prefill: PrefillOptions {
                match_scope,
                apply_masks,
                locale,
            },
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMatchScope {
        value: String,
    },
    InvalidFlag {
        variable: &'static str,
        value: String,
    },
    InvalidLocale {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMatchScope { value } => write!(
                f,
                "PREFILL_MATCH_SCOPE must be `all` or `citizen`, got '{}'",
                value
            ),
            ConfigError::InvalidFlag { variable, value } => {
                write!(f, "{} must be true or false, got '{}'", variable, value)
            }
            ConfigError::InvalidLocale { value } => {
                write!(f, "PREFILL_LOCALE must be `pt-BR` or `en`, got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
