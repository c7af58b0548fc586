use thiserror::Error;

/// Errors that can occur during reltag core operations.
///
/// The tagging, scoring and classification functions themselves never fail;
/// these variants cover construction, configuration and payload decoding.
#[derive(Debug, Error)]
pub enum ReltagError {
    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// A catalog or status payload was not valid JSON.
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A catalog search term is shorter than the configured minimum.
    #[error("search query must be at least {min} characters, got {len}")]
    QueryTooShort {
        /// Configured minimum length in characters.
        min: usize,
        /// Length of the trimmed query in characters.
        len: usize,
    },

    /// A scoring profile contains a non-finite adjustment.
    #[error("invalid scoring profile: {0}")]
    InvalidProfile(String),

    /// The status payload did not contain any snapshot entry.
    #[error("status payload contains no snapshot entry")]
    EmptySnapshot,

    /// The SFDL queue listing reported a failure instead of a file list.
    #[error("SFDL queue unavailable: {0}")]
    QueueUnavailable(String),
}

/// Result type alias for reltag operations.
pub type Result<T> = std::result::Result<T, ReltagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ReltagError::EmptySnapshot;
        assert_eq!(err.to_string(), "status payload contains no snapshot entry");

        let err = ReltagError::QueryTooShort { min: 2, len: 1 };
        assert_eq!(
            err.to_string(),
            "search query must be at least 2 characters, got 1"
        );

        let err = ReltagError::InvalidProfile("remux is NaN".into());
        assert!(err.to_string().contains("remux is NaN"));

        let err = ReltagError::QueueUnavailable("permission denied".into());
        assert_eq!(err.to_string(), "SFDL queue unavailable: permission denied");
    }

    #[test]
    fn json_errors_convert() {
        let err: ReltagError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ReltagError::Json(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReltagError>();
    }
}
