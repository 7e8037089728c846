//! corpuslens Metrics
//!
//! Best-effort extraction of labelled financial figures from snippet text.
//!
//! # Overview
//!
//! The retrieval service answers questions with a generated summary and a
//! ranked list of snippets. For the comparison view we scan the text of the
//! top snippets for each requested metric name ("Revenue", "Net Profit", ...)
//! followed by a number, and tabulate what we find.
//!
//! # Caveats
//!
//! This is a heuristic, not a financial-statement parser:
//!
//! - It has no notion of statement structure, fiscal period, or currency unit.
//! - A label that appears near an unrelated number will produce a false positive.
//! - Numbers without thousands separators are only read up to three integer
//!   digits (`1234` reads as `123`).
//!
//! # Example Usage
//!
//! ```
//! use corpuslens_domain::Snippet;
//! use corpuslens_metrics::{extract, MetricValue};
//!
//! let snippets = vec![Snippet::new("Revenue: $1,234.56 for the year", 0.9)];
//! let table = extract(&snippets, &["Revenue", "Total Assets"]);
//!
//! assert_eq!(table.get("revenue"), Some(&MetricValue::Found("1234.56".to_string())));
//! assert_eq!(table.get("Total Assets"), Some(&MetricValue::NotAvailable));
//! ```

#![warn(missing_docs)]

mod extractor;
mod table;

#[cfg(test)]
mod tests;

pub use extractor::{
    comparison_query, extract, extract_from_text, parse_metric_list, COMPARISON_METRICS,
    DEFAULT_METRICS, SNIPPET_WINDOW,
};
pub use table::{MetricTable, MetricValue, NOT_AVAILABLE};
