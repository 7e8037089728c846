//! Permission module - capabilities a credential may carry

use std::fmt;

/// A capability a scoped API key may or may not carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Run searches and generate summaries
    Query,
    /// Add documents to a corpus
    Index,
    /// List documents and read corpus details
    Read,
}

impl Capability {
    /// Get the capability name as the service's console labels it
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Query => "QUERY",
            Capability::Index => "INDEX",
            Capability::Read => "READ",
        }
    }

    /// Static remediation hint shown when a call is rejected with 403
    pub fn remediation(&self) -> &'static str {
        match self {
            Capability::Query => {
                "Check query permissions: the API key needs QUERY access to this corpus"
            }
            Capability::Index => {
                "Your API key doesn't have INDEX permission. Enable \"Index\" for this corpus in the API key settings and reconnect"
            }
            Capability::Read => {
                "Check your API key and permissions: READ access is needed to view the corpus"
            }
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse capability report derived from read-only probes.
///
/// INDEX permission is never probed; it can only be inferred from failed
/// uploads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionReport {
    /// Listing documents succeeded
    pub can_read: bool,
    /// The corpus existence check succeeded
    pub can_view_corpus: bool,
    /// Why listing failed, when it did
    pub read_error: Option<String>,
}
