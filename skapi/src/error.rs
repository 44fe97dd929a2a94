use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkapiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Error reported by the service. The message is shown to users as-is.
    #[error("{0}")]
    Response(String),
    #[error("ParsingError: {0}")]
    Parsing(String),
    #[error("Other: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SkapiError {
    fn from(e: reqwest::Error) -> Self {
        SkapiError::Response(e.to_string())
    }
}

impl From<serde_json::Error> for SkapiError {
    fn from(e: serde_json::Error) -> Self {
        SkapiError::Parsing(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SkapiError>;
