//! Logging initialization.
//!
//! The subscriber is driven by the `LOG_LEVEL` and `LOG_FORMAT` settings:
//! `json` selects structured output for deployments, any other format
//! value falls back to the human-readable development format. A `RUST_LOG`
//! environment filter, when set, overrides the configured level entirely.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initializes the logging subsystem based on configuration.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_target(true),
                )
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true))
                .init();
        }
    }
}

/// Default filter directives for a configured level.
///
/// Applies the level globally but caps sqlx at warn; per-statement query
/// logging drowns out the request logs otherwise.
fn default_directives(level: &str) -> String {
    format!("{level},sqlx=warn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cap_sqlx() {
        assert_eq!(default_directives("info"), "info,sqlx=warn");
        assert_eq!(default_directives("debug"), "debug,sqlx=warn");
    }

    #[test]
    fn test_default_directives_parse_as_filter() {
        assert!(EnvFilter::builder()
            .parse(default_directives("info"))
            .is_ok());
    }
}
