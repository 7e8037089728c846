//! corpuslens Domain Layer
//!
//! Value types shared by every corpuslens crate. Like the rest of the domain
//! layer it has ZERO external dependencies; wire formats, HTTP and rendering
//! live in the SDK and CLI crates.
//!
//! ## Key Concepts
//!
//! - **Connection**: credentials and identifiers for one remote corpus
//! - **Corpus**: a named collection of documents on the remote service
//! - **Snippet**: a scored text excerpt returned as evidence for an answer
//! - **Upload strategy**: one of two wire formats for submitting a document
//! - **Error category**: the coarse classification every remote failure maps to

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod connection;
pub mod document;
pub mod permission;
pub mod query;

// Re-exports for convenience
pub use category::ErrorCategory;
pub use connection::{Connection, DEFAULT_BASE_URL};
pub use document::{DocumentInfo, UploadRequest, UploadStrategy};
pub use permission::{Capability, PermissionReport};
pub use query::{QueryResult, Snippet};
