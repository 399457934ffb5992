//! Logging infrastructure for diagram builds
//!
//! Structured logging through `tracing`. The library itself only emits
//! events; binaries call [`init_logging`] once to install a subscriber.
//!
//! # Log Levels
//!
//! - `trace`: every declared node and edge
//! - `debug`: diagram and cluster scopes opening and closing, Graphviz invocations
//! - `info`: finished descriptions and written artifacts (default)
//! - `warn`: recoverable problems such as a viewer that failed to launch
//! - `error`: error messages
//!
//! # Log Formats
//!
//! - `compact`: single-line format, good for scripts
//! - `pretty`: multi-line format with colors, good for development
//! - `json`: JSON format, good for log aggregation systems
//!
//! # Environment Variables
//!
//! - `ARCHGRAPH_LOG_LEVEL`: log level or filter directive
//! - `ARCHGRAPH_LOG_FORMAT`: log format
//! - `RUST_LOG`: standard `tracing-subscriber` filter, used when no level is given
//!
//! ```bash
//! # Trace builder events only
//! RUST_LOG="info,archgraph::core::builder=trace" archgraph render load-balanced
//! ```

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self as tracing_fmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable for the log level
pub const LOG_LEVEL_ENV: &str = "ARCHGRAPH_LOG_LEVEL";
/// Environment variable for the log format
pub const LOG_FORMAT_ENV: &str = "ARCHGRAPH_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Resolve the filter directive from an explicit level, then the environment
fn resolve_filter(level: Option<&str>) -> EnvFilter {
    let directive = level
        .map(|s| s.to_string())
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global tracing subscriber
///
/// # Arguments
///
/// * `level` - Optional level or filter directive. Falls back to
///   `ARCHGRAPH_LOG_LEVEL`, then `RUST_LOG`, then `info`. Unparseable
///   directives fall back to `info`.
/// * `format` - Optional format (compact|pretty|json). Falls back to
///   `ARCHGRAPH_LOG_FORMAT`, then `compact`.
///
/// # Errors
///
/// Returns an error for an unknown format, or if a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = resolve_filter(level);

    let format = match format
        .map(|s| s.to_string())
        .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
    {
        Some(name) => {
            LogFormat::from_str(&name).map_err(|e| format!("Invalid log format: {}", e))?
        }
        None => LogFormat::default(),
    };

    // Logs go to stderr so stdout stays clean for `list` and `describe` output
    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    tracing_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_level(true)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    tracing_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    tracing_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("PRETTY").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_log_format_display_matches_variants() {
        let names: Vec<String> = [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json]
            .iter()
            .map(|f| f.to_string())
            .collect();
        assert_eq!(names, LogFormat::variants());
    }
}
