//! Setup logging subsystem.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::config;
use crate::error::ConfigurationError;

/// Crates of this workspace that log at the configured level; everything else logs at WARN.
const WORKSPACE_CRATES: &[&str] = &[
    "connector_integration",
    "domain_types",
    "interfaces",
    "ucs_common_utils",
    "external_services",
];

/// Contains guards necessary for logging
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

/// Setup logging sub-system specifying the logging configuration, service (binary) name, and a
/// list of external crates for which a more verbose logging must be enabled. Console output goes
/// to stderr so it never mixes with what a binary prints on stdout.
pub fn setup(
    config: &config::Log,
    service_name: &str,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> Result<TelemetryGuard, ConfigurationError> {
    let mut guards = Vec::new();
    let mut subscriber_layers = Vec::new();

    if config.console.enabled {
        let console_filter_directive =
            config
                .console
                .filtering_directive
                .clone()
                .unwrap_or_else(|| {
                    get_envfilter_directive(
                        tracing::Level::WARN,
                        config.console.level.into_level(),
                        crates_to_filter.as_ref(),
                    )
                });
        let console_filter = EnvFilter::builder()
            .with_default_directive(config.console.level.into_level().into())
            .parse_lossy(console_filter_directive);

        let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
        guards.push(guard);

        let console_layer = match config.console.log_format {
            config::LogFormat::Default => tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .compact()
                .with_filter(console_filter)
                .boxed(),
            config::LogFormat::Json => {
                // Disable color or emphasis related ANSI escape codes for JSON formats
                error_stack::Report::set_color_mode(error_stack::fmt::ColorMode::None);

                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(writer)
                    .with_filter(console_filter)
                    .boxed()
            }
        };
        subscriber_layers.push(console_layer);
    }

    tracing_subscriber::registry()
        .with(subscriber_layers)
        .try_init()
        .map_err(|error| ConfigurationError::LoggerError(error.to_string()))?;

    tracing::info!(service_name, "Logging subsystem initialized");

    Ok(TelemetryGuard {
        _log_guards: guards,
    })
}

fn get_envfilter_directive(
    default_log_level: tracing::Level,
    filter_log_level: tracing::Level,
    crates_to_filter: &[&'static str],
) -> String {
    WORKSPACE_CRATES
        .iter()
        .chain(crates_to_filter.iter())
        .map(|crate_name| crate_name.replace('-', "_"))
        .fold(
            vec![default_log_level.to_string()],
            |mut directives, target| {
                directives.push(format!("{target}={filter_log_level}"));
                directives
            },
        )
        .join(",")
}
