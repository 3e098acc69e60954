use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Settings file error: {0}")]
    SettingsParseError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{method} {path} failed: {message}")]
    ApiError {
        method: String,
        path: String,
        message: String,
    },

    #[error("No bridge found on {host} ports {ports:?}. Is the editor running with the bridge extension?")]
    DiscoveryError { host: String, ports: Vec<u16> },
}

pub type Result<T> = std::result::Result<T, BridgeError>;
