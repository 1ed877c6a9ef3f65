//! Error types for passkey verification.

/// Errors that can occur when talking to the delegated verification service.
#[derive(Debug, thiserror::Error)]
pub enum PasskeyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Server returned a non-2xx response.
    #[error("server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code.
        status_code: u16,
        /// Response body, or the status reason if the body was empty.
        message: String,
    },

    /// Service answered with a non-zero `err_no`.
    #[error("service error ({code}): {message}")]
    ApiError {
        /// The `err_no` value.
        code: i64,
        /// The `err_msg` value.
        message: String,
    },

    /// Service reported success but sent no `data`.
    #[error("response missing data")]
    MissingData,
}
