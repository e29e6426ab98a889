//! Error types for the Radarr client.

use thiserror::Error;

/// Errors that can occur talking to Radarr.
#[derive(Debug, Error)]
pub enum RadarrError {
    /// The configured base URL could not be parsed.
    #[error("Invalid Radarr URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport failure (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Radarr answered with a non-success status.
    #[error("Radarr API error {status}: {body}")]
    Api { status: u16, body: String },

    /// JSON decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The movie is already in the library (add conflict).
    #[error("Movie is already in the library")]
    AlreadyAdded,

    /// No movie with the given TMDB id exists in the catalog.
    #[error("No movie found in the catalog for TMDB id {0}")]
    LookupNotFound(u64),

    /// Radarr has no root folder configured, so nothing can be added.
    #[error("No root folder configured in Radarr")]
    NoRootFolder,

    /// Radarr has no quality profiles configured.
    #[error("No quality profiles configured in Radarr")]
    NoQualityProfile,
}

/// Result type for Radarr operations.
pub type Result<T> = std::result::Result<T, RadarrError>;

impl From<reqwest::Error> for RadarrError {
    fn from(e: reqwest::Error) -> Self {
        RadarrError::Http(e.to_string())
    }
}

impl From<url::ParseError> for RadarrError {
    fn from(e: url::ParseError) -> Self {
        RadarrError::InvalidUrl(e.to_string())
    }
}
