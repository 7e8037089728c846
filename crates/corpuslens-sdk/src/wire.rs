//! Request and response bodies exchanged with the retrieval service.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use corpuslens_domain::{DocumentInfo, QueryResult, Snippet, UploadRequest};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Generation preset requested for every query
pub const GENERATION_PRESET: &str = "vectara-summary-ext-v1.2.0";

/// Number of top-ranked results the summary is generated over
pub const SUMMARY_RESULT_COUNT: usize = 5;

/// Metadata attached to every uploaded document
#[derive(Debug, Serialize)]
pub struct UploadMetadata {
    /// Original file name
    pub filename: String,
    /// ISO-8601 submission time
    pub upload_date: String,
}

impl UploadMetadata {
    /// Build metadata for a file submitted at `uploaded_at`
    pub fn new(filename: &str, uploaded_at: SystemTime) -> Self {
        Self {
            filename: filename.to_string(),
            upload_date: DateTime::<Utc>::from(uploaded_at).to_rfc3339(),
        }
    }
}

/// Body of the structured-document indexing call
#[derive(Debug, Serialize)]
pub struct IndexDocumentRequest {
    /// Numeric tenant id
    pub customer_id: u64,
    /// Numeric corpus id
    pub corpus_id: u64,
    /// Document to create
    pub document: IndexedDocument,
}

/// Document created by the structured-document strategy
#[derive(Debug, Serialize)]
pub struct IndexedDocument {
    /// Synthesized unique id
    pub document_id: String,
    /// Document title (the file name)
    pub title: String,
    /// Metadata, JSON-encoded as a string
    pub metadata_json: String,
    /// Sections; the whole file is a single base64 section
    pub section: Vec<Section>,
}

/// A single document section
#[derive(Debug, Serialize)]
pub struct Section {
    /// Section body
    pub text: String,
}

impl IndexDocumentRequest {
    /// Build the payload for `request`, embedding the file body as base64.
    pub fn new(
        customer_id: u64,
        corpus_id: u64,
        request: &UploadRequest,
    ) -> Result<Self, serde_json::Error> {
        let metadata = UploadMetadata::new(&request.filename, request.uploaded_at);

        Ok(Self {
            customer_id,
            corpus_id,
            document: IndexedDocument {
                document_id: document_id(&request.filename, request.uploaded_at),
                title: request.filename.clone(),
                metadata_json: serde_json::to_string(&metadata)?,
                section: vec![Section {
                    text: STANDARD.encode(&request.content),
                }],
            },
        })
    }
}

/// Unique document id derived from the file name and submission time
pub fn document_id(filename: &str, uploaded_at: SystemTime) -> String {
    let at = DateTime::<Utc>::from(uploaded_at);
    format!(
        "doc_{}.{:06}_{}",
        at.timestamp(),
        at.timestamp_subsec_micros(),
        filename
    )
}

/// Body of the query call
#[derive(Debug, Serialize)]
pub struct QueryRequest {
    /// Natural-language question
    pub query: String,
    /// Search parameters
    pub search: SearchParameters,
    /// Summary generation parameters
    pub generation: GenerationParameters,
}

/// Search half of a query
#[derive(Debug, Serialize)]
pub struct SearchParameters {
    /// Corpora to search
    pub corpora: Vec<CorpusRef>,
    /// Maximum results to return
    pub limit: usize,
    /// Result offset
    pub offset: usize,
}

/// Reference to a corpus by key
#[derive(Debug, Serialize)]
pub struct CorpusRef {
    /// Corpus key
    pub corpus_key: String,
}

/// Generation half of a query
#[derive(Debug, Serialize)]
pub struct GenerationParameters {
    /// Named generation preset
    pub generation_preset_name: String,
    /// Number of search results the summary may use
    pub max_used_search_results: usize,
}

impl QueryRequest {
    /// Build a query against a single corpus
    pub fn new(text: &str, corpus_key: &str, limit: usize) -> Self {
        Self {
            query: text.to_string(),
            search: SearchParameters {
                corpora: vec![CorpusRef {
                    corpus_key: corpus_key.to_string(),
                }],
                limit,
                offset: 0,
            },
            generation: GenerationParameters {
                generation_preset_name: GENERATION_PRESET.to_string(),
                max_used_search_results: SUMMARY_RESULT_COUNT,
            },
        }
    }
}

/// Query response. Every field is optional on the wire.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    /// Generated summary
    #[serde(default)]
    pub summary: Option<String>,
    /// Ranked search results
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
}

/// One ranked search result
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    /// Excerpt text
    #[serde(default)]
    pub text: String,
    /// Relevance score
    #[serde(default)]
    pub score: f64,
    /// Source document id
    #[serde(default)]
    pub document_id: Option<String>,
}

impl From<QueryResponse> for QueryResult {
    fn from(response: QueryResponse) -> Self {
        QueryResult {
            summary: response.summary,
            snippets: response
                .search_results
                .into_iter()
                .map(|r| Snippet {
                    text: r.text,
                    score: r.score,
                    document_id: r.document_id,
                })
                .collect(),
        }
    }
}

/// Document listing response
#[derive(Debug, Deserialize)]
pub struct ListDocumentsResponse {
    /// Listed documents
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
}

/// One listed document
#[derive(Debug, Deserialize)]
pub struct DocumentEntry {
    /// Document id
    #[serde(default)]
    pub id: Option<String>,
    /// Free-form metadata
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl From<DocumentEntry> for DocumentInfo {
    fn from(entry: DocumentEntry) -> Self {
        DocumentInfo {
            id: entry.id.unwrap_or_else(|| "N/A".to_string()),
            metadata: entry
                .metadata
                .filter(|m| !m.is_null())
                .map(|m| m.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_query_response_parsing() {
        let json = r#"{
            "summary": "Revenue was $1.2M [1]",
            "search_results": [
                {"text": "Revenue: $1,200,000", "score": 0.91, "document_id": "q3.pdf"},
                {"score": 0.4}
            ]
        }"#;

        let response: QueryResponse = serde_json::from_str(json).unwrap();
        let result: QueryResult = response.into();
        assert_eq!(result.summary.as_deref(), Some("Revenue was $1.2M [1]"));
        assert_eq!(result.snippets.len(), 2);
        assert_eq!(result.snippets[0].document_id.as_deref(), Some("q3.pdf"));
        assert_eq!(result.snippets[1].text, "");
    }

    #[test]
    fn test_query_request_shape() {
        let request = QueryRequest::new("What is revenue?", "fin-reports", 10);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["search"]["corpora"][0]["corpus_key"], "fin-reports");
        assert_eq!(value["search"]["limit"], 10);
        assert_eq!(value["search"]["offset"], 0);
        assert_eq!(value["generation"]["max_used_search_results"], 5);
        assert_eq!(value["generation"]["generation_preset_name"], GENERATION_PRESET);
    }

    #[test]
    fn test_index_document_payload() {
        let at = UNIX_EPOCH + Duration::from_micros(1_700_000_000_123_456);
        let request = UploadRequest::with_timestamp(b"%PDF-1.4".to_vec(), "q3.pdf", at);
        let payload = IndexDocumentRequest::new(42, 7, &request).unwrap();

        assert_eq!(payload.document.document_id, "doc_1700000000.123456_q3.pdf");
        assert_eq!(payload.document.section[0].text, STANDARD.encode(b"%PDF-1.4"));

        let metadata: serde_json::Value =
            serde_json::from_str(&payload.document.metadata_json).unwrap();
        assert_eq!(metadata["filename"], "q3.pdf");
        assert!(metadata["upload_date"].as_str().unwrap().starts_with("2023-11-14"));
    }

    #[test]
    fn test_document_entry_without_id() {
        let response: ListDocumentsResponse =
            serde_json::from_str(r#"{"documents": [{"id": "a"}, {}]}"#).unwrap();
        let docs: Vec<DocumentInfo> = response.documents.into_iter().map(Into::into).collect();
        assert_eq!(docs[0].id, "a");
        assert_eq!(docs[1].id, "N/A");
        assert!(docs[0].metadata.is_none());
    }
}
