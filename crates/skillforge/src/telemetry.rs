use crate::config::{AppConfig, AppEnvironment};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Filter { directive: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { directive, .. } => {
                write!(f, "invalid log filter directive '{directive}'")
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Install the global subscriber. An explicit `RUST_LOG` wins over the
/// configured `SKILLFORGE_LOG_LEVEL`, which in turn wins over the
/// per-environment default.
pub fn init(config: &AppConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_from(&config.telemetry.log_level, config.environment)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

fn filter_from(level: &str, environment: AppEnvironment) -> Result<EnvFilter, TelemetryError> {
    let directive = match level.trim() {
        "" => default_directive(environment),
        explicit => explicit,
    };

    EnvFilter::try_new(directive).map_err(|source| TelemetryError::Filter {
        directive: directive.to_string(),
        source,
    })
}

/// Development runs chatty, test runs keep assertion output readable,
/// production sticks to operational events.
fn default_directive(environment: AppEnvironment) -> &'static str {
    match environment {
        AppEnvironment::Development => "debug",
        AppEnvironment::Test => "warn",
        AppEnvironment::Production => "info",
    }
}
