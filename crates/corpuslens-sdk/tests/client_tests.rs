//! Integration tests for the corpus client
//!
//! Each test starts an in-process mock of the retrieval service on a random
//! local port and points a client at it.

use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use corpuslens_domain::{Connection, ErrorCategory, UploadRequest, UploadStrategy};
use corpuslens_sdk::{CorpusClient, SdkError};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Start `app` on an ephemeral port and return its base URL
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn connection(base_url: &str) -> Connection {
    Connection::new("zut_test_key", "1234", "7")
        .unwrap()
        .with_base_url(base_url)
}

/// Every route answers with the same status and body
fn fixed_status(status: StatusCode, body: &'static str) -> Router {
    Router::new().fallback(move || async move { (status, body) })
}

/// Corpus check succeeds; both upload endpoints answer with `upload_status`
fn upload_service(upload_status: StatusCode) -> Router {
    Router::new()
        .route("/v2/corpora/:corpus", get(|| async { Json(json!({"key": "7"})) }))
        .route(
            "/v2/corpora/:corpus/upload_file",
            post(move || async move { (upload_status, "upload detail") }),
        )
        .route(
            "/v1/index",
            post(move || async move { (upload_status, "index detail") }),
        )
}

async fn validated_client(base_url: &str) -> CorpusClient {
    CorpusClient::connect(connection(base_url), None)
        .await
        .expect("mock corpus should be reachable")
}

fn pdf(name: &str) -> UploadRequest {
    UploadRequest::new(b"%PDF-1.4 test body".to_vec(), name)
}

#[tokio::test]
async fn test_connection_success() {
    let base = spawn(upload_service(StatusCode::OK)).await;
    let mut client = CorpusClient::new(connection(&base)).unwrap();

    let check = client.test_connection().await;

    assert!(check.ok);
    assert_eq!(check.message, "Connection successful!");
    assert!(client.is_validated());
}

#[tokio::test]
async fn test_connection_status_categories() {
    let cases = [
        (StatusCode::UNAUTHORIZED, "Unauthorized", ErrorCategory::Credential),
        (StatusCode::FORBIDDEN, "Forbidden", ErrorCategory::Permission),
        (StatusCode::NOT_FOUND, "Not Found", ErrorCategory::NotFound),
    ];

    for (status, label, category) in cases {
        let base = spawn(fixed_status(status, "nope")).await;
        let mut client = CorpusClient::new(connection(&base)).unwrap();

        let check = client.test_connection().await;

        assert!(!check.ok, "status {} should fail", status);
        assert!(check.message.contains(label), "message was {}", check.message);
        assert_eq!(check.category, Some(category));
        assert!(!client.is_validated());
    }
}

#[tokio::test]
async fn test_connection_passes_through_server_detail() {
    let base = spawn(fixed_status(StatusCode::INTERNAL_SERVER_ERROR, "corpus shard offline")).await;
    let mut client = CorpusClient::new(connection(&base)).unwrap();

    let check = client.test_connection().await;

    assert!(!check.ok);
    assert_eq!(check.message, "Request failed (500): corpus shard offline");
    assert_eq!(check.category, Some(ErrorCategory::Service));
}

#[tokio::test]
async fn test_connection_transport_failure() {
    // Nothing listens on port 1
    let mut client = CorpusClient::new(connection("http://127.0.0.1:1")).unwrap();

    let check = client.test_connection().await;

    assert!(!check.ok);
    assert!(check.message.starts_with("Connection error"));
    assert_eq!(check.category, Some(ErrorCategory::Transport));
}

#[tokio::test]
async fn test_connect_rejects_bad_credentials() {
    let base = spawn(fixed_status(StatusCode::UNAUTHORIZED, "invalid key")).await;

    let result = CorpusClient::connect(connection(&base), None).await;

    assert!(matches!(result, Err(SdkError::Unauthorized(_))));
}

#[tokio::test]
async fn test_upload_success_mentions_filename() {
    for status in [StatusCode::OK, StatusCode::CREATED] {
        let base = spawn(upload_service(status)).await;
        let client = validated_client(&base).await;

        for strategy in [UploadStrategy::Multipart, UploadStrategy::StructuredDocument] {
            let outcome = client.upload_document(&pdf("annual-report.pdf"), strategy).await;
            assert!(outcome.ok, "{:?} with {} failed: {}", strategy, status, outcome.message);
            assert!(outcome.message.contains("annual-report.pdf"));
            assert_eq!(outcome.category, None);
        }
    }
}

#[tokio::test]
async fn test_upload_status_categories() {
    let cases = [
        (StatusCode::UNAUTHORIZED, "Unauthorized", ErrorCategory::Credential),
        (StatusCode::FORBIDDEN, "Forbidden", ErrorCategory::Permission),
        (StatusCode::NOT_FOUND, "Not Found", ErrorCategory::NotFound),
    ];

    for (status, label, category) in cases {
        let base = spawn(upload_service(status)).await;
        let client = validated_client(&base).await;

        let outcome = client.upload_document(&pdf("q3.pdf"), UploadStrategy::Multipart).await;

        assert!(!outcome.ok);
        assert!(outcome.message.contains(label), "message was {}", outcome.message);
        assert_eq!(outcome.category, Some(category));
    }
}

#[tokio::test]
async fn test_forbidden_upload_names_missing_capability() {
    let base = spawn(upload_service(StatusCode::FORBIDDEN)).await;
    let client = validated_client(&base).await;

    let outcome = client
        .upload_document(&pdf("q3.pdf"), UploadStrategy::StructuredDocument)
        .await;

    assert!(!outcome.ok);
    assert!(outcome.message.contains("INDEX"));
    assert!(outcome.message.contains("index detail"));
}

#[tokio::test]
async fn test_other_success_statuses_are_not_inferred_as_success() {
    let base = spawn(upload_service(StatusCode::ACCEPTED)).await;
    let client = validated_client(&base).await;

    let outcome = client.upload_document(&pdf("q3.pdf"), UploadStrategy::Multipart).await;

    assert!(!outcome.ok);
    assert_eq!(outcome.category, Some(ErrorCategory::Service));
}

#[derive(Debug, Clone)]
struct CapturedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

type Parts = Arc<Mutex<Vec<CapturedPart>>>;
type Headers = Arc<Mutex<Option<HeaderMap>>>;

#[tokio::test]
async fn test_multipart_wire_format() {
    let parts: Parts = Arc::default();
    let headers: Headers = Arc::default();

    async fn capture(
        State((parts, seen)): State<(Parts, Headers)>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> StatusCode {
        *seen.lock().unwrap() = Some(headers);
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.unwrap().to_vec();
            parts.lock().unwrap().push(CapturedPart {
                name,
                file_name,
                content_type,
                data,
            });
        }
        StatusCode::CREATED
    }

    let app = Router::new()
        .route("/v2/corpora/:corpus", get(|| async { StatusCode::OK }))
        .route("/v2/corpora/:corpus/upload_file", post(capture))
        .with_state((parts.clone(), headers.clone()));
    let base = spawn(app).await;
    let client = validated_client(&base).await;

    let outcome = client.upload_document(&pdf("q3.pdf"), UploadStrategy::Multipart).await;
    assert!(outcome.ok, "{}", outcome.message);

    let headers = headers.lock().unwrap().clone().unwrap();
    assert_eq!(headers["x-api-key"], "zut_test_key");
    assert_eq!(headers["customer-id"], "1234");

    let parts = parts.lock().unwrap().clone();
    assert_eq!(parts.len(), 2);

    let file = parts.iter().find(|p| p.name == "file").unwrap();
    assert_eq!(file.file_name.as_deref(), Some("q3.pdf"));
    assert_eq!(file.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(file.data, b"%PDF-1.4 test body");

    let metadata = parts.iter().find(|p| p.name == "metadata").unwrap();
    assert_eq!(metadata.content_type.as_deref(), Some("application/json"));
    let metadata: Value = serde_json::from_slice(&metadata.data).unwrap();
    assert_eq!(metadata["filename"], "q3.pdf");
    assert!(metadata["upload_date"].is_string());
}

#[tokio::test]
async fn test_structured_document_wire_format() {
    let bodies: Arc<Mutex<Vec<Value>>> = Arc::default();

    let app = Router::new()
        .route("/v2/corpora/:corpus", get(|| async { StatusCode::OK }))
        .route(
            "/v1/index",
            post(|State(bodies): State<Arc<Mutex<Vec<Value>>>>, Json(body): Json<Value>| async move {
                bodies.lock().unwrap().push(body);
                StatusCode::OK
            }),
        )
        .with_state(bodies.clone());
    let base = spawn(app).await;
    let client = validated_client(&base).await;

    let outcome = client
        .upload_document(&pdf("q3.pdf"), UploadStrategy::StructuredDocument)
        .await;
    assert!(outcome.ok, "{}", outcome.message);

    let body = bodies.lock().unwrap()[0].clone();
    assert_eq!(body["customer_id"], 1234);
    assert_eq!(body["corpus_id"], 7);
    assert_eq!(body["document"]["title"], "q3.pdf");
    assert!(body["document"]["document_id"]
        .as_str()
        .unwrap()
        .starts_with("doc_"));
    assert!(body["document"]["document_id"]
        .as_str()
        .unwrap()
        .ends_with("_q3.pdf"));
    // base64 of "%PDF-1.4 test body"
    assert_eq!(
        body["document"]["section"][0]["text"],
        "JVBERi0xLjQgdGVzdCBib2R5"
    );
}

#[tokio::test]
async fn test_structured_strategy_requires_numeric_ids() {
    let base = spawn(upload_service(StatusCode::OK)).await;
    let connection = Connection::new("zut_test_key", "1234", "fin-reports")
        .unwrap()
        .with_base_url(&base);
    let client = CorpusClient::connect(connection, None).await.unwrap();

    let outcome = client
        .upload_document(&pdf("q3.pdf"), UploadStrategy::StructuredDocument)
        .await;

    assert!(!outcome.ok);
    assert_eq!(outcome.category, Some(ErrorCategory::Client));
    assert!(outcome.message.contains("fin-reports"));
}

#[tokio::test]
async fn test_batch_continues_past_failure() {
    let attempts = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route("/v2/corpora/:corpus", get(|| async { StatusCode::OK }))
        .route(
            "/v1/index",
            post(|State(attempts): State<Arc<AtomicUsize>>, Json(body): Json<Value>| async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                if body["document"]["title"] == "b.pdf" {
                    (StatusCode::FORBIDDEN, "missing index permission").into_response()
                } else {
                    StatusCode::OK.into_response()
                }
            }),
        )
        .with_state(attempts.clone());
    let base = spawn(app).await;
    let client = validated_client(&base).await;

    let files = vec![pdf("a.pdf"), pdf("b.pdf"), pdf("c.pdf")];
    let mut seen = Vec::new();
    let report = client
        .upload_batch_with(&files, UploadStrategy::StructuredDocument, |index, outcome| {
            seen.push((index, outcome.ok));
        })
        .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_eq!(report.total(), 3);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(seen, vec![(0, true), (1, false), (2, true)]);
    assert_eq!(report.outcomes[1].filename, "b.pdf");
    assert_eq!(report.outcomes[1].category, Some(ErrorCategory::Permission));
    assert_eq!(report.summary(), "Upload complete! 2/3 files uploaded successfully.");
}

#[tokio::test]
async fn test_unvalidated_client_fails_fast() {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .fallback(|State(calls): State<Arc<AtomicUsize>>| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            StatusCode::OK
        })
        .with_state(calls.clone());
    let base = spawn(app).await;
    let client = CorpusClient::new(connection(&base)).unwrap();

    let outcome = client.upload_document(&pdf("q3.pdf"), UploadStrategy::Multipart).await;
    assert!(!outcome.ok);
    assert_eq!(outcome.category, Some(ErrorCategory::Client));

    assert!(matches!(client.query("revenue", 10).await, Err(SdkError::NotConnected)));
    assert!(matches!(client.list_documents().await, Err(SdkError::NotConnected)));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_query_round_trip() {
    let requests: Arc<Mutex<Vec<Value>>> = Arc::default();

    let app = Router::new()
        .route("/v2/corpora/:corpus", get(|| async { StatusCode::OK }))
        .route(
            "/v2/query",
            post(|State(requests): State<Arc<Mutex<Vec<Value>>>>, Json(body): Json<Value>| async move {
                requests.lock().unwrap().push(body);
                Json(json!({
                    "summary": "Revenue reached $1.2M in FY2024.",
                    "search_results": [
                        {"text": "Revenue: $1,200,000", "score": 0.92, "document_id": "fy24.pdf"},
                        {"text": "Net Profit: $310,000", "score": 0.81, "document_id": "fy24.pdf"}
                    ]
                }))
            }),
        )
        .with_state(requests.clone());
    let base = spawn(app).await;
    let client = validated_client(&base).await;

    let result = client.query("  What was revenue in FY2024?  ", 4).await.unwrap();

    assert_eq!(result.summary.as_deref(), Some("Revenue reached $1.2M in FY2024."));
    assert_eq!(result.snippets.len(), 2);
    assert_eq!(result.snippets[0].document_id.as_deref(), Some("fy24.pdf"));
    assert!((result.snippets[1].score - 0.81).abs() < f64::EPSILON);

    let body = requests.lock().unwrap()[0].clone();
    assert_eq!(body["query"], "What was revenue in FY2024?");
    assert_eq!(body["search"]["limit"], 4);
    assert_eq!(body["search"]["corpora"][0]["corpus_key"], "7");
}

#[tokio::test]
async fn test_query_forbidden() {
    let app = Router::new()
        .route("/v2/corpora/:corpus", get(|| async { StatusCode::OK }))
        .route(
            "/v2/query",
            post(|| async { (StatusCode::FORBIDDEN, "query not allowed") }),
        );
    let base = spawn(app).await;
    let client = validated_client(&base).await;

    let err = client.query("revenue", 10).await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Permission);
    assert!(err.to_string().contains("QUERY"));
    assert!(err.to_string().contains("query not allowed"));
}

#[tokio::test]
async fn test_query_rejects_empty_text() {
    let base = spawn(upload_service(StatusCode::OK)).await;
    let client = validated_client(&base).await;

    let err = client.query("   ", 10).await.unwrap_err();

    assert!(matches!(err, SdkError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_list_documents() {
    let app = Router::new()
        .route("/v2/corpora/:corpus", get(|| async { StatusCode::OK }))
        .route(
            "/v2/corpora/:corpus/documents",
            get(|| async {
                Json(json!({
                    "documents": [
                        {"id": "doc_1", "metadata": {"filename": "q1.pdf"}},
                        {"id": "doc_2"}
                    ]
                }))
            }),
        );
    let base = spawn(app).await;
    let client = validated_client(&base).await;

    let docs = client.list_documents().await.unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id, "doc_1");
    assert!(docs[0].metadata.as_deref().unwrap().contains("q1.pdf"));
    assert!(docs[1].metadata.is_none());
}

#[tokio::test]
async fn test_check_permissions_reports_read_failure() {
    let app = Router::new()
        .route("/v2/corpora/:corpus", get(|| async { StatusCode::OK }))
        .route(
            "/v2/corpora/:corpus/documents",
            get(|| async { (StatusCode::FORBIDDEN, "read denied") }),
        );
    let base = spawn(app).await;
    let client = CorpusClient::new(connection(&base)).unwrap();

    let report = client.check_permissions().await;

    assert!(report.can_view_corpus);
    assert!(!report.can_read);
    assert!(report.read_error.unwrap().contains("read denied"));
}
