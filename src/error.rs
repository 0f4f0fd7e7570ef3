use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImouError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("API error {code}: {msg}")]
    ApiError { code: String, msg: String },

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, ImouError>;
