//! Error types for the extraction client.

use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// User-facing text for transport failures.
pub(crate) const NETWORK_ERROR_MESSAGE: &str =
    "Network error occurred. Please check your internet connection and try again.";

/// Error types for the extraction client.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unusable configuration, such as an empty API key.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request is missing its URL or question.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The API rejected the creation call.
    #[error("Failed to start extraction: {status} - {message}")]
    Submission {
        /// HTTP status code
        status: u16,
        /// Vendor error message, or the HTTP reason phrase
        message: String,
    },

    /// The API answered with a body this client cannot act on.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The API rejected a status query.
    #[error("Failed to check extraction status: {status} - {message}")]
    StatusCheck {
        /// HTTP status code
        status: u16,
        /// Vendor error message, or the HTTP reason phrase
        message: String,
    },

    /// The remote job finished unsuccessfully.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// The remote job was cancelled.
    #[error("Extraction was cancelled")]
    ExtractionCancelled,

    /// The poll loop ran out of attempts.
    #[error(
        "Extraction timed out after {attempts} attempts. \
         The job may still be processing - please try again later."
    )]
    ExtractionTimeout {
        /// Number of status queries issued
        attempts: u32,
    },

    /// The request never got an HTTP response.
    #[error("{message}")]
    Network {
        /// User-facing description
        message: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// Whether this is a transport failure rather than a vendor-reported one.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network { .. })
    }

    /// Build a submission error from a non-success creation response.
    pub(crate) async fn submission(response: reqwest::Response) -> Self {
        let (status, message) = vendor_error(response).await;
        Error::Submission { status, message }
    }

    /// Build a status-check error from a non-success status response.
    pub(crate) async fn status_check(response: reqwest::Response) -> Self {
        let (status, message) = vendor_error(response).await;
        Error::StatusCheck { status, message }
    }

    pub(crate) fn malformed(err: serde_json::Error) -> Self {
        Error::Protocol(format!("malformed response body: {}", err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            source,
        }
    }
}

/// Pull the vendor `error` field out of a failed response.
///
/// Falls back to the HTTP reason phrase when the body is not JSON or has no
/// `error` field.
async fn vendor_error(response: reqwest::Response) -> (u16, String) {
    let status = response.status();
    let fallback = status.canonical_reason().unwrap_or("Unknown error");

    let body: std::result::Result<ErrorResponse, _> = response.json().await;
    let message = match body {
        Ok(ErrorResponse { error: Some(msg) }) if !msg.is_empty() => msg,
        _ => fallback.to_string(),
    };

    (status.as_u16(), message)
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}
