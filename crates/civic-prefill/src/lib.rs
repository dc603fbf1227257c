//! Citizen form pre-fill.
//!
//! - `prefill`: field-id normalization, direct and keyword matching, value
//!   resolution, completeness feedback and staleness checks.
//! - `config`: environment-driven settings.
//! - `telemetry`: tracing subscriber setup for binaries.
//! - `error`: top-level error type.

pub mod config;
pub mod error;
pub mod prefill;
pub mod telemetry;
