//! Error types for tacmap services.

use thiserror::Error;

/// Result type alias using TacmapError.
pub type TacmapResult<T> = Result<T, TacmapError>;

/// Primary error type for tile-service operations.
#[derive(Debug, Error)]
pub enum TacmapError {
    // === Protocol Errors ===
    #[error("Malformed tile address: {0}")]
    MalformedTileAddress(String),

    // === Data Errors ===
    #[error("Database error: {0}")]
    DatabaseError(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl TacmapError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            TacmapError::MalformedTileAddress(_) => 400,
            _ => 500,
        }
    }
}

impl From<std::io::Error> for TacmapError {
    fn from(err: std::io::Error) -> Self {
        TacmapError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            TacmapError::MalformedTileAddress("z".into()).http_status_code(),
            400
        );
        assert_eq!(TacmapError::DatabaseError("x".into()).http_status_code(), 500);
        assert_eq!(TacmapError::RenderError("x".into()).http_status_code(), 500);
    }

    #[test]
    fn test_io_errors_map_to_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = TacmapError::from(io);
        assert!(matches!(err, TacmapError::InternalError(_)));
        assert_eq!(err.http_status_code(), 500);
    }
}
