//! corpuslens Rust SDK
//!
//! Client library for a hosted retrieval service: connectivity checks,
//! document upload over two interchangeable wire strategies, natural-language
//! queries with generated summaries, and document listing.
//!
//! # Example
//!
//! ```no_run
//! use corpuslens_domain::{Connection, UploadRequest, UploadStrategy};
//! use corpuslens_sdk::CorpusClient;
//!
//! # async fn example() -> Result<(), corpuslens_sdk::SdkError> {
//! let connection = Connection::new("zut_...", "1234567", "3").expect("valid connection");
//! let client = CorpusClient::connect(connection, None).await?;
//!
//! let request = UploadRequest::new(std::fs::read("q3.pdf").unwrap(), "q3.pdf");
//! let outcome = client.upload_document(&request, UploadStrategy::Multipart).await;
//! println!("{}", outcome.message);
//!
//! let result = client.query("What was total revenue in FY2024?", 10).await?;
//! println!("{:?}", result.summary);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod outcome;
pub mod wire;

pub use client::{CorpusClient, DEFAULT_RESULT_LIMIT, DEFAULT_TIMEOUT_SECS};
pub use error::SdkError;
pub use outcome::{BatchReport, ConnectionCheck, UploadOutcome};
