//! Process-lifetime session state.
//!
//! Everything here vanishes when the process exits: the validated client,
//! the names of files uploaded during this run, and the conversation log.

use crate::error::{CliError, Result};
use chrono::Local;
use corpuslens_domain::QueryResult;
use corpuslens_sdk::{CorpusClient, UploadOutcome};

/// One question and the answer it got.
#[derive(Debug, Clone)]
pub struct ConversationEntry {
    /// Local time the answer arrived (`HH:MM:SS`)
    pub timestamp: String,
    /// Question as asked
    pub question: String,
    /// Service response
    pub result: QueryResult,
}

/// State owned by the front end across commands.
#[derive(Default)]
pub struct Session {
    client: Option<CorpusClient>,
    uploaded_files: Vec<String>,
    history: Vec<ConversationEntry>,
}

impl Session {
    /// Create an empty, disconnected session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current client with a validated one.
    pub fn attach(&mut self, client: CorpusClient) {
        self.client = Some(client);
    }

    /// Drop the client. Uploaded file names and history are kept.
    pub fn disconnect(&mut self) -> bool {
        self.client.take().is_some()
    }

    /// Whether a validated client is attached.
    pub fn is_connected(&self) -> bool {
        self.client.as_ref().is_some_and(CorpusClient::is_validated)
    }

    /// The attached client, or `NotConnected`.
    pub fn client(&self) -> Result<&CorpusClient> {
        self.client.as_ref().ok_or(CliError::NotConnected)
    }

    /// Remember a successful upload. Names are kept once, in first-upload order.
    pub fn record_upload(&mut self, outcome: &UploadOutcome) {
        if outcome.ok && !self.uploaded_files.contains(&outcome.filename) {
            self.uploaded_files.push(outcome.filename.clone());
        }
    }

    /// Files uploaded during this session.
    pub fn uploaded_files(&self) -> &[String] {
        &self.uploaded_files
    }

    /// Append a question and its answer to the conversation log.
    pub fn record_query(&mut self, question: &str, result: QueryResult) -> &ConversationEntry {
        self.history.push(ConversationEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            question: question.to_string(),
            result,
        });
        // Just pushed, so the log is non-empty
        &self.history[self.history.len() - 1]
    }

    /// Conversation log, oldest first.
    pub fn history(&self) -> &[ConversationEntry] {
        &self.history
    }

    /// Forget the conversation log.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
