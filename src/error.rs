use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanderError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Evolution error: {0}")]
    Evolution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, LanderError>;
