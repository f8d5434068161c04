//! Error types and handling for the tienda search service

use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Catalog fetch failed: {0}")]
    CatalogFetchFailed(String),

    #[error("Catalog parse failed: {0}")]
    CatalogParseFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the stable error code used in logs and CLI exit handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::CatalogFetchFailed(_) => "catalog_fetch_failed",
            AppError::CatalogParseFailed(_) => "catalog_parse_failed",
            AppError::Timeout(_) => "timeout",
            AppError::Internal(_) => "internal_error",
        }
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert reqwest::Error to AppError
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            AppError::CatalogFetchFailed(err.to_string())
        } else if err.is_decode() {
            AppError::CatalogParseFailed(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::CatalogParseFailed(err.to_string())
    }
}

/// Validate a raw search query before it reaches the ranker.
///
/// An empty query is valid (it produces an empty result set, not an error);
/// only pathological input is rejected here.
pub fn validate_query(query: &str) -> Result<(), AppError> {
    if query.len() > 500 {
        return Err(AppError::InvalidInput(
            "Query too long, maximum 500 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::InvalidInput("x".to_string()).error_code(),
            "invalid_input"
        );
        assert_eq!(
            AppError::CatalogFetchFailed("x".to_string()).error_code(),
            "catalog_fetch_failed"
        );
        assert_eq!(AppError::Timeout("x".to_string()).error_code(), "timeout");
    }

    #[test]
    fn test_validate_query_empty_is_ok() {
        assert!(validate_query("").is_ok());
        assert!(validate_query("   ").is_ok());
    }

    #[test]
    fn test_validate_query_too_long() {
        let long = "a".repeat(501);
        assert!(validate_query(&long).is_err());
        let ok = "a".repeat(500);
        assert!(validate_query(&ok).is_ok());
    }

    #[test]
    fn test_display_messages() {
        let err = AppError::CatalogFetchFailed("connection refused".to_string());
        assert_eq!(err.to_string(), "Catalog fetch failed: connection refused");
    }
}
