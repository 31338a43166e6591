#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed while loading configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("Failed while installing the log subscriber: {0}")]
    LoggerError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failures of the gateway driver before or around a processor call.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Unknown connector '{0}'")]
    UnknownConnector(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("Invalid argument {name}: {value}")]
    InvalidArgument { name: &'static str, value: String },
    #[error("Processing step failed")]
    ProcessingStepFailed,
    #[error("Failed to render the outcome")]
    OutcomeSerializationFailed,
}
