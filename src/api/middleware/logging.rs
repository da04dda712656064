//! Logging setup.
//!
//! JSON lines suit CloudWatch Logs Insights and other centralized log stores;
//! the compact text format is easier to read during local development.

use tracing::warn;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::config::Settings;

/// Targets that are too chatty at INFO.
const NOISY_TARGETS: [&str; 4] = ["hyper", "tower_http", "aws_config", "aws_smithy_runtime"];

/// Map a LOG_LEVEL value (DEBUG, INFO, WARNING, ...) to a tracing level name.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_uppercase().as_str() {
        "CRITICAL" | "FATAL" | "ERROR" => "error",
        "WARNING" | "WARN" => "warn",
        "DEBUG" => "debug",
        "TRACE" => "trace",
        _ => "info",
    }
}

/// Default filter directives for a LOG_LEVEL value.
pub fn default_directives(level: &str) -> String {
    let mut directives = vec![level_directive(level).to_string()];
    directives.extend(NOISY_TARGETS.iter().map(|target| format!("{}=warn", target)));
    directives.join(",")
}

/// Pick the filter from RUST_LOG, falling back to the LOG_LEVEL directives.
///
/// Returns a warning message alongside the fallback filter when RUST_LOG is
/// set but cannot be parsed.
pub fn resolve_env_filter(rust_log: Option<&str>, log_level: &str) -> (EnvFilter, Option<String>) {
    let fallback = || EnvFilter::new(default_directives(log_level));

    match rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(e) => (
                fallback(),
                Some(format!(
                    "Ignoring invalid RUST_LOG {:?} ({}), using LOG_LEVEL={}",
                    directives, e, log_level
                )),
            ),
        },
        None => (fallback(), None),
    }
}

/// Install the global tracing subscriber.
///
/// RUST_LOG overrides LOG_LEVEL when set.
pub fn init_logging(settings: &Settings) -> Result<(), TryInitError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (env_filter, warning) = resolve_env_filter(rust_log.as_deref(), &settings.log_level);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if settings.log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    };
    installed?;

    if let Some(warning) = warning {
        warn!("{}", warning);
    }
    Ok(())
}
