use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Classifier returned status {0}")]
    Status(StatusCode),

    #[error("Malformed classifier response: {0}")]
    Decode(String),

    #[error("Invalid classifier configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
