//! Error types for the corpuslens SDK.

use corpuslens_domain::{Capability, ErrorCategory};
use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// HTTP 401: the API key was rejected
    #[error("401 Unauthorized - Invalid API key. Response: {0}")]
    Unauthorized(String),

    /// HTTP 403: the API key lacks the capability the call needs
    #[error("403 Forbidden - {hint}. Response: {detail}", hint = .capability.remediation())]
    Forbidden {
        /// Capability the rejected call required
        capability: Capability,
        /// Raw server detail
        detail: String,
    },

    /// HTTP 404: the corpus identifier does not exist
    #[error("404 Not Found - Invalid Corpus ID. Response: {0}")]
    NotFound(String),

    /// Any other non-success status, detail passed through untouched
    #[error("Request failed ({status}): {detail}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Raw server detail
        detail: String,
    },

    /// Connection error (network, DNS, TLS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The service answered with a body we could not decode
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The connection parameters cannot be used for this call
    #[error("Invalid connection: {0}")]
    InvalidConnection(String),

    /// The request was rejected locally before any call was made
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client not validated (a connection test must pass first)
    #[error("Client not connected - a successful connection test is required first")]
    NotConnected,
}

impl SdkError {
    /// Build the error for a non-success HTTP status.
    ///
    /// `capability` is what the call needed; it selects the 403 remediation.
    pub fn from_status(status: u16, detail: String, capability: Capability) -> Self {
        match status {
            401 => SdkError::Unauthorized(detail),
            403 => SdkError::Forbidden { capability, detail },
            404 => SdkError::NotFound(detail),
            _ => SdkError::Service { status, detail },
        }
    }

    /// Coarse category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            SdkError::Unauthorized(_) => ErrorCategory::Credential,
            SdkError::Forbidden { .. } => ErrorCategory::Permission,
            SdkError::NotFound(_) => ErrorCategory::NotFound,
            SdkError::Service { .. } | SdkError::InvalidResponse(_) => ErrorCategory::Service,
            SdkError::Connection(_) => ErrorCategory::Transport,
            SdkError::InvalidConnection(_) | SdkError::InvalidRequest(_) | SdkError::NotConnected => {
                ErrorCategory::Client
            }
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            SdkError::InvalidConnection(e.to_string())
        } else if e.is_decode() {
            SdkError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::Service {
                status: status.as_u16(),
                detail: e.to_string(),
            }
        } else {
            SdkError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}
