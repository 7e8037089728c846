//! corpuslens client implementation.

use crate::error::SdkError;
use crate::outcome::{BatchReport, ConnectionCheck, UploadOutcome};
use crate::wire::{IndexDocumentRequest, ListDocumentsResponse, QueryRequest, QueryResponse, UploadMetadata};
use corpuslens_domain::{
    Capability, Connection, DocumentInfo, PermissionReport, QueryResult, UploadRequest, UploadStrategy,
};
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default timeout for a single remote call (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of ranked results requested per query
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Client for one remote corpus.
///
/// Every operation is a single attempt: no retries, no backoff, and no
/// fallback between upload strategies. Uploads, queries and listings fail
/// with [`SdkError::NotConnected`] without touching the network until a
/// connection test has passed.
pub struct CorpusClient {
    connection: Connection,
    http: reqwest::Client,
    validated: bool,
}

impl CorpusClient {
    /// Create an unvalidated client with the default timeout
    pub fn new(connection: Connection) -> Result<Self, SdkError> {
        Self::with_timeout(connection, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
    }

    /// Create an unvalidated client. `None` leaves calls without a timeout.
    pub fn with_timeout(connection: Connection, timeout: Option<Duration>) -> Result<Self, SdkError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SdkError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            connection,
            http,
            validated: false,
        })
    }

    /// Create a client and validate it, returning it only if the corpus is reachable
    pub async fn connect(connection: Connection, timeout: Option<Duration>) -> Result<Self, SdkError> {
        let mut client = Self::with_timeout(connection, timeout)?;
        client.probe_corpus().await?;
        client.validated = true;
        info!(corpus = %client.connection.corpus_id(), "connected to corpus");
        Ok(client)
    }

    /// Connection this client talks to
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Whether the most recent connection test passed
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Check that the configured corpus exists and the credentials are accepted.
    ///
    /// Never fails: the outcome is folded into a [`ConnectionCheck`]. Success
    /// validates the client; failure invalidates it.
    pub async fn test_connection(&mut self) -> ConnectionCheck {
        match self.probe_corpus().await {
            Ok(()) => {
                self.validated = true;
                ConnectionCheck::passed()
            }
            Err(e) => {
                warn!(error = %e, "connection test failed");
                self.validated = false;
                ConnectionCheck::failed(&e)
            }
        }
    }

    /// Upload one document with the given strategy.
    ///
    /// On success the document becomes visible to later queries once the
    /// service has indexed it.
    pub async fn upload_document(&self, request: &UploadRequest, strategy: UploadStrategy) -> UploadOutcome {
        let result = match self.ensure_validated() {
            Ok(()) => match strategy {
                UploadStrategy::Multipart => self.upload_multipart(request).await,
                UploadStrategy::StructuredDocument => self.upload_structured(request).await,
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!(filename = %request.filename, strategy = strategy.as_str(), "document uploaded");
                UploadOutcome::succeeded(&request.filename)
            }
            Err(e) => {
                warn!(filename = %request.filename, strategy = strategy.as_str(), error = %e, "upload failed");
                UploadOutcome::failed(&request.filename, &e)
            }
        }
    }

    /// Upload several documents one after another.
    ///
    /// A failure never stops the batch; every file is attempted.
    pub async fn upload_batch(&self, requests: &[UploadRequest], strategy: UploadStrategy) -> BatchReport {
        self.upload_batch_with(requests, strategy, |_, _| {}).await
    }

    /// Like [`upload_batch`](Self::upload_batch), reporting each outcome as it lands
    pub async fn upload_batch_with<F>(
        &self,
        requests: &[UploadRequest],
        strategy: UploadStrategy,
        mut on_outcome: F,
    ) -> BatchReport
    where
        F: FnMut(usize, &UploadOutcome),
    {
        let mut report = BatchReport::default();
        for (index, request) in requests.iter().enumerate() {
            let outcome = self.upload_document(request, strategy).await;
            on_outcome(index, &outcome);
            report.outcomes.push(outcome);
        }
        report
    }

    /// Ask a natural-language question and request a generated summary
    pub async fn query(&self, text: &str, limit: usize) -> Result<QueryResult, SdkError> {
        self.ensure_validated()?;

        let text = text.trim();
        if text.is_empty() {
            return Err(SdkError::InvalidRequest("Query text must not be empty".to_string()));
        }
        if limit == 0 {
            return Err(SdkError::InvalidRequest("Result limit must be at least 1".to_string()));
        }

        let url = self.url("/v2/query");
        let body = QueryRequest::new(text, self.connection.corpus_id(), limit);
        debug!(%url, limit, "querying corpus");

        let response = self
            .authorized(self.http.post(&url))
            .json(&body)
            .send()
            .await?;
        let response = check_status(response, &[200], Capability::Query).await?;

        let parsed: QueryResponse = response.json().await?;
        Ok(parsed.into())
    }

    /// List the documents currently indexed in the corpus
    pub async fn list_documents(&self) -> Result<Vec<DocumentInfo>, SdkError> {
        self.ensure_validated()?;
        self.fetch_documents().await
    }

    /// Probe read access and corpus visibility.
    ///
    /// Never uploads anything, so INDEX permission is not covered.
    pub async fn check_permissions(&self) -> PermissionReport {
        let read = self.fetch_documents().await;
        let corpus = self.probe_corpus().await;

        PermissionReport {
            can_read: read.is_ok(),
            can_view_corpus: corpus.is_ok(),
            read_error: read.err().map(|e| e.to_string()),
        }
    }

    async fn probe_corpus(&self) -> Result<(), SdkError> {
        let url = self.corpus_url("");
        debug!(%url, "checking corpus");

        let response = self.authorized(self.http.get(&url)).send().await?;
        check_status(response, &[200], Capability::Read).await?;
        Ok(())
    }

    async fn fetch_documents(&self) -> Result<Vec<DocumentInfo>, SdkError> {
        let url = self.corpus_url("/documents");
        debug!(%url, "listing documents");

        let response = self.authorized(self.http.get(&url)).send().await?;
        let response = check_status(response, &[200], Capability::Read).await?;

        let parsed: ListDocumentsResponse = response.json().await?;
        Ok(parsed.documents.into_iter().map(Into::into).collect())
    }

    async fn upload_multipart(&self, request: &UploadRequest) -> Result<(), SdkError> {
        let url = self.corpus_url("/upload_file");
        let metadata = serde_json::to_string(&UploadMetadata::new(&request.filename, request.uploaded_at))?;

        // The service rejects metadata parts that are not tagged as JSON
        let form = Form::new()
            .part(
                "file",
                Part::bytes(request.content.clone())
                    .file_name(request.filename.clone())
                    .mime_str("application/pdf")?,
            )
            .part(
                "metadata",
                Part::text(metadata)
                    .file_name("metadata")
                    .mime_str("application/json")?,
            );

        debug!(%url, filename = %request.filename, bytes = request.content.len(), "multipart upload");
        let response = self.authorized(self.http.post(&url)).multipart(form).send().await?;
        check_status(response, &[200, 201], Capability::Index).await?;
        Ok(())
    }

    async fn upload_structured(&self, request: &UploadRequest) -> Result<(), SdkError> {
        let customer_id = numeric_id("customer ID", self.connection.customer_id())?;
        let corpus_id = numeric_id("corpus ID", self.connection.corpus_id())?;
        let url = self.url("/v1/index");
        let body = IndexDocumentRequest::new(customer_id, corpus_id, request)?;

        debug!(%url, document_id = %body.document.document_id, "structured upload");
        let response = self.authorized(self.http.post(&url)).json(&body).send().await?;
        check_status(response, &[200, 201], Capability::Index).await?;
        Ok(())
    }

    fn ensure_validated(&self) -> Result<(), SdkError> {
        if self.validated {
            Ok(())
        } else {
            Err(SdkError::NotConnected)
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("x-api-key", self.connection.api_key())
            .header("customer-id", self.connection.customer_id())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.connection.base_url(), path)
    }

    fn corpus_url(&self, suffix: &str) -> String {
        self.url(&format!("/v2/corpora/{}{}", self.connection.corpus_id(), suffix))
    }
}

/// Accept only the listed statuses; everything else becomes a classified error
async fn check_status(
    response: reqwest::Response,
    accepted: &[u16],
    capability: Capability,
) -> Result<reqwest::Response, SdkError> {
    let status = response.status().as_u16();
    if accepted.contains(&status) {
        return Ok(response);
    }

    let detail = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(SdkError::from_status(status, detail, capability))
}

fn numeric_id(field: &str, value: &str) -> Result<u64, SdkError> {
    value.parse().map_err(|_| {
        SdkError::InvalidConnection(format!(
            "{} '{}' must be numeric for the structured-document strategy",
            field, value
        ))
    })
}
