//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::session::ConversationEntry;
use colored::*;
use corpuslens_domain::{DocumentInfo, PermissionReport, QueryResult};
use corpuslens_metrics::MetricTable;
use corpuslens_sdk::{BatchReport, UploadOutcome};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Snippets shown under each answer
pub const SOURCES_SHOWN: usize = 3;

/// Characters of snippet text shown before truncation
pub const PREVIEW_CHARS: usize = 300;

/// Column heading used for the single comparison column
pub const COMPARISON_COLUMN: &str = "Document Analysis";

const BAR_WIDTH: usize = 40;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format one conversation entry (question, answer, sources).
    pub fn format_answer(&self, entry: &ConversationEntry) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&answer_json(entry))?),
            OutputFormat::Quiet => Ok(entry.result.summary.clone().unwrap_or_default()),
            OutputFormat::Table => Ok(self.format_answer_text(entry)),
        }
    }

    fn format_answer_text(&self, entry: &ConversationEntry) -> String {
        let mut out = Vec::new();
        out.push(self.colorize(&format!("[{}]", entry.timestamp), "cyan"));
        out.push(format!("Q: {}", entry.question));

        match entry.result.summary.as_deref() {
            Some(summary) if !summary.is_empty() => out.push(format!("A: {}", summary)),
            _ => out.push(self.warning("No summary was generated")),
        }

        for (i, snippet) in entry.result.snippets.iter().take(SOURCES_SHOWN).enumerate() {
            out.push(String::new());
            let source = snippet.document_id.as_deref().unwrap_or("unknown document");
            out.push(self.colorize(
                &format!("Source {} (Score: {:.3}) - {}", i + 1, snippet.score, source),
                "blue",
            ));
            out.push(snippet.preview(PREVIEW_CHARS));
        }

        out.join("\n")
    }

    /// Format the conversation log, newest first.
    pub fn format_history(&self, history: &[ConversationEntry]) -> Result<String> {
        if history.is_empty() {
            return Ok(self.info("No questions asked yet."));
        }

        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = history.iter().rev().map(answer_json).collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            _ => {
                let rendered: Vec<String> = history
                    .iter()
                    .rev()
                    .map(|e| self.format_answer(e))
                    .collect::<Result<_>>()?;
                Ok(rendered.join(&format!("\n{}\n", "-".repeat(40))))
            }
        }
    }

    /// Format listed documents, showing at most `limit`.
    pub fn format_documents(&self, documents: &[DocumentInfo], limit: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let docs: Vec<serde_json::Value> = documents
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "id": d.id,
                            "metadata": d.metadata,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&docs)?)
            }
            OutputFormat::Quiet => Ok(documents
                .iter()
                .map(|d| d.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if documents.is_empty() {
                    return Ok(self.colorize("No documents found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "ID"]);
                for (i, doc) in documents.iter().take(limit).enumerate() {
                    builder.push_record([(i + 1).to_string(), doc.id.clone()]);
                }

                Ok(format!(
                    "Documents in corpus: {}\n{}",
                    documents.len(),
                    self.table(builder)
                ))
            }
        }
    }

    /// Format an extracted metric table.
    pub fn format_metrics(&self, table: &MetricTable) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = table
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.as_str().into()))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    COMPARISON_COLUMN: map
                }))?)
            }
            OutputFormat::Quiet => Ok(table
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if table.is_empty() {
                    return Ok(self.colorize("No metrics requested.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Metric", COMPARISON_COLUMN]);
                for (name, value) in table.iter() {
                    builder.push_record([name, value.as_str()]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Horizontal bar chart of the numeric metrics.
    pub fn format_chart(&self, table: &MetricTable) -> String {
        let values = table.numeric();
        if values.is_empty() {
            return self.info("No numeric data available for these metrics.");
        }

        let max = values.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        let label_width = values.iter().map(|(n, _)| n.len()).max().unwrap_or(0);

        values
            .iter()
            .map(|(name, value)| {
                let len = if max > 0.0 {
                    ((value / max) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                format!(
                    "{:<width$} | {} {}",
                    name,
                    self.colorize(&"█".repeat(len), "green"),
                    value,
                    width = label_width
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the permission probe report.
    pub fn format_permissions(&self, report: &PermissionReport) -> Result<String> {
        if let OutputFormat::Json = self.format {
            return Ok(serde_json::to_string_pretty(&serde_json::json!({
                "can_view_corpus": report.can_view_corpus,
                "can_read": report.can_read,
                "read_error": report.read_error,
            }))?);
        }

        let mut out = vec![
            self.flag("Can view corpus", report.can_view_corpus),
            self.flag("Can read/list documents", report.can_read),
        ];
        if let Some(err) = &report.read_error {
            out.push(self.error(&format!("Read error: {}", err)));
        }
        out.push(self.warning(
            "Cannot test INDEX permission without uploading. If uploads fail with 403, your key is missing INDEX permission.",
        ));
        Ok(out.join("\n"))
    }

    /// Format one upload outcome.
    pub fn upload_outcome(&self, outcome: &UploadOutcome) -> String {
        if outcome.ok {
            self.success(&outcome.message)
        } else {
            self.error(&outcome.message)
        }
    }

    /// Format the batch summary line.
    pub fn batch_summary(&self, report: &BatchReport) -> String {
        if report.succeeded() == report.total() {
            self.success(&report.summary())
        } else {
            self.warning(&report.summary())
        }
    }

    /// Format the list of files uploaded in this session.
    pub fn format_uploaded_files(&self, files: &[String]) -> String {
        if files.is_empty() {
            return self.info("No files uploaded in this session.");
        }
        files
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{}. {}", i + 1, f))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format connection info.
    pub fn connection_info(&self, base_url: &str, corpus_id: &str) -> String {
        self.success(&format!("Connected to {} (corpus: {})", base_url, corpus_id))
    }

    fn flag(&self, label: &str, value: bool) -> String {
        if value {
            self.success(&format!("{}: yes", label))
        } else {
            self.error(&format!("{}: no", label))
        }
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn answer_json(entry: &ConversationEntry) -> serde_json::Value {
    let result: &QueryResult = &entry.result;
    serde_json::json!({
        "timestamp": entry.timestamp,
        "query": entry.question,
        "summary": result.summary,
        "search_results": result.snippets.iter().map(|s| serde_json::json!({
            "text": s.text,
            "score": s.score,
            "document_id": s.document_id,
        })).collect::<Vec<_>>(),
    })
}
