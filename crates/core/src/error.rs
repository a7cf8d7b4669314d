use thiserror::Error;

pub type InsightsResult<T> = Result<T, InsightsError>;

/// Errors raised at the edges of the analysis pipeline. The engine itself is
/// total over well-formed records and never produces one of these.
#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for InsightsError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
