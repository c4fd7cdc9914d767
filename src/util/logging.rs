//! Structured logging setup for ketryx-report
//!
//! Diagnostics go through `tracing` and are written to stderr, so stdout stays
//! reserved for workflow commands read by the CI runner.
//!
//! # Example
//!
//! ```no_run
//! use ketryx_report::util::logging;
//! use tracing::{debug, info};
//!
//! logging::init_from_env();
//!
//! info!("Step started");
//! debug!(project = "KXPRJ1", "Reading inputs");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Crate target used in filter directives
const LOG_TARGET: &str = "ketryx_report";

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., ketryx_report::runner) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Reads `KETRYX_LOG_LEVEL` and `KETRYX_LOG_JSON`.
    ///
    /// When no level is given and the runner has step debugging enabled
    /// (`RUNNER_DEBUG=1`), the level is DEBUG.
    pub fn from_env() -> Self {
        let level = match env::var("KETRYX_LOG_LEVEL") {
            Ok(level_str) => parse_level(&level_str),
            Err(_) if runner_debug_enabled() => Level::DEBUG,
            Err(_) => Level::INFO,
        };

        let use_json = env::var("KETRYX_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }
}

/// True when the runner was started with step debug logging
pub fn runner_debug_enabled() -> bool {
    env::var("RUNNER_DEBUG").map(|v| v == "1").unwrap_or(false)
}

/// Parses a log level, falling back to INFO for unknown values
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn directives(config: &LoggingConfig) -> Vec<Directive> {
    let mut raw = vec![format!("{}={}", LOG_TARGET, config.level)];
    if env::var("RUST_LOG").is_err() {
        raw.extend(["h2=warn", "hyper=warn", "reqwest=warn"].map(String::from));
    }
    raw.iter().filter_map(|d| d.parse().ok()).collect()
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = directives(&config)
            .into_iter()
            .fold(EnvFilter::from_default_env(), |filter, d| filter.add_directive(d));

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init();
        } else {
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

pub fn init_from_env() {
    init_logging(LoggingConfig::from_env());
}
