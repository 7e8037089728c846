//! Regex scan of snippet text for labelled figures

use crate::table::{MetricTable, MetricValue};
use corpuslens_domain::Snippet;
use regex::RegexBuilder;
use tracing::{debug, warn};

/// Only the first snippets (in the order received) are scanned
pub const SNIPPET_WINDOW: usize = 5;

/// Metrics extracted when the caller does not name any
pub const DEFAULT_METRICS: [&str; 5] = [
    "Revenue",
    "Net Profit",
    "Gross Profit",
    "Total Assets",
    "Total Liabilities",
];

/// Metrics pre-selected in the comparison view
pub const COMPARISON_METRICS: [&str; 4] = ["Revenue", "Net Profit", "Gross Profit", "Total Assets"];

/// Decimal number with optional thousands separators and two decimals
const NUMBER: &str = r"(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)";

/// Extract each metric from the first [`SNIPPET_WINDOW`] snippets.
///
/// Stateless: identical inputs always produce identical tables.
pub fn extract<S: AsRef<str>>(snippets: &[Snippet], metric_names: &[S]) -> MetricTable {
    let buffer = snippets
        .iter()
        .take(SNIPPET_WINDOW)
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    extract_from_text(&buffer, metric_names)
}

/// Extract each metric from an already concatenated buffer.
///
/// Names are trimmed; blank names are skipped and names repeated under a
/// different case keep their first occurrence.
pub fn extract_from_text<S: AsRef<str>>(buffer: &str, metric_names: &[S]) -> MetricTable {
    let mut table = MetricTable::default();

    for name in metric_names {
        let name = name.as_ref().trim();
        if name.is_empty() || table.contains(name) {
            continue;
        }

        let value = match find_value(buffer, name) {
            Some(number) => MetricValue::Found(number),
            None => MetricValue::NotAvailable,
        };
        debug!(metric = name, value = %value, "metric scanned");
        table.push(name.to_string(), value);
    }

    table
}

/// Try both label patterns in order; the first match anywhere wins
fn find_value(buffer: &str, metric: &str) -> Option<String> {
    let label = regex::escape(metric);
    let patterns = [
        // "Revenue: $1,234.56", "Revenue - 1,234"
        format!(r"{}\s*[:\-]?\s*\$?\s*{}", label, NUMBER),
        // "Revenue ($1,234.56)"
        format!(r"{}\s*\(?\$?{}\)?", label, NUMBER),
    ];

    for pattern in &patterns {
        let regex = match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => regex,
            Err(e) => {
                warn!(metric, error = %e, "skipping metric pattern");
                continue;
            }
        };

        if let Some(captures) = regex.captures(buffer) {
            if let Some(number) = captures.get(1) {
                return Some(number.as_str().replace(',', ""));
            }
        }
    }

    None
}

/// Question sent to the service for the comparison view
pub fn comparison_query<S: AsRef<str>>(metric_names: &[S]) -> String {
    let names: Vec<&str> = metric_names.iter().map(AsRef::as_ref).collect();
    format!("financial statements showing: {}", names.join(", "))
}

/// Split a comma-separated list of metric names, dropping blanks
pub fn parse_metric_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
