//! Error category module - how remote failures are classified

use std::fmt;

/// Classification of a failed remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// HTTP 401: the credential is invalid
    Credential,
    /// HTTP 403: the credential lacks a capability
    Permission,
    /// HTTP 404: the corpus identifier is wrong
    NotFound,
    /// Network-level failure before a response arrived
    Transport,
    /// Any other non-2xx status
    Service,
    /// Rejected locally before any call was made
    Client,
}

impl ErrorCategory {
    /// Map an HTTP status code to a category. Returns `None` for 2xx.
    ///
    /// # Examples
    ///
    /// ```
    /// use corpuslens_domain::ErrorCategory;
    ///
    /// assert_eq!(ErrorCategory::from_status(403), Some(ErrorCategory::Permission));
    /// assert_eq!(ErrorCategory::from_status(201), None);
    /// assert_eq!(ErrorCategory::from_status(500), Some(ErrorCategory::Service));
    /// ```
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(ErrorCategory::Credential),
            403 => Some(ErrorCategory::Permission),
            404 => Some(ErrorCategory::NotFound),
            _ => Some(ErrorCategory::Service),
        }
    }

    /// Short user-facing label
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Credential => "unauthorized",
            ErrorCategory::Permission => "forbidden",
            ErrorCategory::NotFound => "not found",
            ErrorCategory::Transport => "connection error",
            ErrorCategory::Service => "service error",
            ErrorCategory::Client => "client error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
