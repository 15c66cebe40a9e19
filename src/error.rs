//! Error types.

use thiserror::Error;

/// Failure talking to the region data source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NationStates API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed API response: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for SourceError {
    fn from(e: quick_xml::Error) -> Self {
        SourceError::Xml(e.to_string())
    }
}

/// Failure of an embassy check run.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The query was configured incorrectly. Nothing was fetched.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The region whose embassies should be checked does not exist.
    #[error("region does not exist: {0}")]
    RegionNotFound(String),

    /// The region whose embassies should be checked could not be fetched.
    #[error("failed to retrieve region: {0}")]
    Source(#[from] SourceError),

    #[error("embassy check was cancelled")]
    Cancelled,
}

impl CheckError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CheckError::InvalidConfiguration(message.into())
    }
}
