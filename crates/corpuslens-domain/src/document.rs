//! Document module - upload requests, strategies and listed documents

use std::time::SystemTime;

/// Wire format used to submit a document to the remote corpus.
///
/// The service has exposed two incompatible ingestion endpoints; the caller
/// picks one per call and the client never falls back from one to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UploadStrategy {
    /// Raw bytes as a multipart file part plus a typed JSON metadata part
    #[default]
    Multipart,

    /// Base64 body embedded as section text in a JSON document payload
    StructuredDocument,
}

impl UploadStrategy {
    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStrategy::Multipart => "multipart",
            UploadStrategy::StructuredDocument => "structured",
        }
    }

    /// Parse a strategy from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "multipart" | "v2" => Some(UploadStrategy::Multipart),
            "structured" | "structured-document" | "v1" => Some(UploadStrategy::StructuredDocument),
            _ => None,
        }
    }
}

impl std::str::FromStr for UploadStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid upload strategy: {}", s))
    }
}

/// A single file to upload. Built per file and dropped once the call resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Raw file body, shipped opaquely to the service
    pub content: Vec<u8>,
    /// Original file name
    pub filename: String,
    /// Submission time, used for metadata and synthesized document ids
    pub uploaded_at: SystemTime,
}

impl UploadRequest {
    /// Create a request stamped with the current time
    pub fn new(content: Vec<u8>, filename: impl Into<String>) -> Self {
        Self::with_timestamp(content, filename, SystemTime::now())
    }

    /// Create a request with an explicit submission time
    pub fn with_timestamp(
        content: Vec<u8>,
        filename: impl Into<String>,
        uploaded_at: SystemTime,
    ) -> Self {
        Self {
            content,
            filename: filename.into(),
            uploaded_at,
        }
    }
}

/// A document as listed by the remote corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Service-assigned document id
    pub id: String,
    /// Raw metadata JSON, if the service returned any
    pub metadata: Option<String>,
}
