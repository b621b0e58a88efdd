//! Logging setup for connprobe binaries.
//!
//! Structured logging is controlled by environment variables:
//!
//! - `CONNPROBE_DEBUG=true|1|yes` - Enable debug logging
//! - `CONNPROBE_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `CONNPROBE_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! Library code only uses the `tracing` macros. Connection strings are always
//! passed through [`mask_password`](crate::mask_password) before being logged.
//!
//! ```rust,no_run
//! use connprobe_core::logging;
//!
//! // Silent unless CONNPROBE_DEBUG or CONNPROBE_LOG_LEVEL is set.
//! logging::init();
//!
//! // Log at `info` unless the environment asks for something else.
//! logging::init_with_default("info");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Crates whose events pass the filter.
const TARGETS: [&str; 5] = [
    "connprobe",
    "connprobe_core",
    "connprobe_driver",
    "connprobe_axum",
    "connprobe_cli",
];

/// Check if debug logging is enabled via `CONNPROBE_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("CONNPROBE_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn normalize_level(level: &str) -> Option<&'static str> {
    match level.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Resolve the log level from the environment, falling back to `default`.
///
/// `CONNPROBE_LOG_LEVEL` wins, then `CONNPROBE_DEBUG` (debug), then `default`.
pub fn get_log_level(default: &str) -> &'static str {
    if let Some(level) = env::var("CONNPROBE_LOG_LEVEL")
        .ok()
        .and_then(|l| normalize_level(&l))
    {
        return level;
    }
    if is_debug_enabled() {
        return "debug";
    }
    normalize_level(default).unwrap_or("warn")
}

/// Get the configured log format from `CONNPROBE_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var("CONNPROBE_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Build the filter directive for a level, e.g. `connprobe=info,connprobe_core=info,...`.
pub fn filter_directive(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize logging only if the environment asks for it.
///
/// Subsequent calls are no-ops.
pub fn init() {
    if !is_debug_enabled() && env::var("CONNPROBE_LOG_LEVEL").is_err() {
        return;
    }
    init_with_default("warn");
}

/// Initialize logging at `default` unless the environment overrides it.
///
/// Subsequent calls are no-ops.
pub fn init_with_default(default: &str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level(default);
            let filter = EnvFilter::try_new(filter_directive(level))
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            match get_log_format() {
                "json" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
            }

            tracing::info!(
                level = level,
                format = get_log_format(),
                "connprobe logging initialized"
            );
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            let _ = default;
        }
    });
}
