//! Unified error types for dexcrawl.
//!
//! These are resource-level failures: anything here aborts the run or the
//! single operation that raised it. Section-level parse problems are handled
//! by the client crate and never surface as an [`Error`].

use tokio_rusqlite::rusqlite;

/// Unified error type for resource failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Robots.txt disallowed access.
    #[error("ROBOTS_DISALLOWED: {0}")]
    RobotsDisallowed(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Render mode requested but not compiled in.
    #[error("RENDER_DISABLED")]
    RenderDisabled,

    /// Headless browser failed.
    #[error("RENDER_FAILED: {0}")]
    RenderFailed(String),

    /// The document source could not produce the next page.
    #[error("NAVIGATION_FAILED: {0}")]
    NavigationFailed(String),

    /// An asset could not be downloaded or written.
    #[error("ASSET_FAILED: {0}")]
    AssetFailed(String),

    /// Record could not be encoded for storage.
    #[error("ENCODE_FAILED: {0}")]
    Encode(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encode(err.to_string())
    }
}

impl Error {
    /// Short machine-readable code, the prefix of the display string.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::RobotsDisallowed(_) => "ROBOTS_DISALLOWED",
            Error::FetchTimeout(_) => "FETCH_TIMEOUT",
            Error::FetchTooLarge(_) => "FETCH_TOO_LARGE",
            Error::HttpError(_) => "HTTP_ERROR",
            Error::RenderDisabled => "RENDER_DISABLED",
            Error::RenderFailed(_) => "RENDER_FAILED",
            Error::NavigationFailed(_) => "NAVIGATION_FAILED",
            Error::AssetFailed(_) => "ASSET_FAILED",
            Error::Encode(_) => "ENCODE_FAILED",
            Error::Database(_) | Error::MigrationFailed(_) => "STORE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NavigationFailed("https://www.serebii.net/pokedex-swsh/ivysaur".to_string());
        assert!(err.to_string().starts_with("NAVIGATION_FAILED"));
        assert!(err.to_string().contains("ivysaur"));
    }

    #[test]
    fn test_error_code_matches_display_prefix() {
        let errors = [
            Error::InvalidUrl("x".into()),
            Error::HttpError("status 503".into()),
            Error::RenderDisabled,
            Error::MigrationFailed("bad".into()),
        ];
        for err in errors {
            assert!(err.to_string().starts_with(err.code()), "{err}");
        }
    }

    #[test]
    fn test_serde_json_error_maps_to_encode() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.code(), "ENCODE_FAILED");
    }
}
