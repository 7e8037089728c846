//! Query module - generated answers and ranked snippets

/// A scored text excerpt returned as supporting evidence
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    /// Excerpt text
    pub text: String,
    /// Relevance score assigned by the service
    pub score: f64,
    /// Source document reference, when the service provides one
    pub document_id: Option<String>,
}

impl Snippet {
    /// Create a snippet without a source reference
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
            document_id: None,
        }
    }

    /// Text truncated to `max_chars` characters, with `...` appended when cut
    pub fn preview(&self, max_chars: usize) -> String {
        if self.text.chars().count() > max_chars {
            let cut: String = self.text.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            self.text.clone()
        }
    }
}

/// Result of one natural-language query.
///
/// Snippets keep the order the service returned them in, which is assumed to
/// be relevance order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    /// Generated summary over the top-ranked snippets
    pub summary: Option<String>,
    /// Ranked snippets
    pub snippets: Vec<Snippet>,
}

impl QueryResult {
    /// True when the service returned neither a summary nor snippets
    pub fn is_empty(&self) -> bool {
        self.summary.as_deref().map_or(true, str::is_empty) && self.snippets.is_empty()
    }
}
