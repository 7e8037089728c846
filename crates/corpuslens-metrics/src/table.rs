//! Metric tables and their CSV rendering

use std::fmt;

/// Sentinel rendered for metrics that were not found
pub const NOT_AVAILABLE: &str = "N/A";

/// Extracted value for one metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricValue {
    /// Numeric string with thousands separators removed
    Found(String),
    /// No pattern matched
    NotAvailable,
}

impl MetricValue {
    /// Value as displayed, `N/A` when missing
    pub fn as_str(&self) -> &str {
        match self {
            MetricValue::Found(value) => value,
            MetricValue::NotAvailable => NOT_AVAILABLE,
        }
    }

    /// Numeric view of the value, `None` when missing or unparsable
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Found(value) => value.parse().ok(),
            MetricValue::NotAvailable => None,
        }
    }

    /// True if a pattern matched
    pub fn is_found(&self) -> bool {
        matches!(self, MetricValue::Found(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric name to value, in the order the metrics were requested.
///
/// Lookups ignore case. A table is always rebuilt by a fresh extraction,
/// never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricTable {
    entries: Vec<(String, MetricValue)>,
}

impl MetricTable {
    pub(crate) fn push(&mut self, name: String, value: MetricValue) {
        self.entries.push((name, value));
    }

    /// Whether a metric with this name (any case) is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look up a metric by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        let name = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(n, _)| n.to_lowercase() == name)
            .map(|(_, v)| v)
    }

    /// Entries in request order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of metrics in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no metrics were requested
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of metrics that were found
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| v.is_found()).count()
    }

    /// Metrics with a numeric value, in request order
    pub fn numeric(&self) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .filter_map(|(n, v)| v.as_f64().map(|x| (n.as_str(), x)))
            .collect()
    }

    /// Render as CSV: a `Metric,<column>` header, then one row per metric
    pub fn to_csv(&self, column: &str) -> String {
        let mut out = format!("Metric,{}\n", csv_field(column));
        for (name, value) in &self.entries {
            out.push_str(&csv_field(name));
            out.push(',');
            out.push_str(&csv_field(value.as_str()));
            out.push('\n');
        }
        out
    }
}

/// Quote a field if it contains a delimiter, quote or line break
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MetricTable {
        let mut table = MetricTable::default();
        table.push("Revenue".into(), MetricValue::Found("1234.56".into()));
        table.push("Net Profit".into(), MetricValue::NotAvailable);
        table
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let table = table();
        assert!(table.get("REVENUE").unwrap().is_found());
        assert_eq!(table.get("net profit"), Some(&MetricValue::NotAvailable));
        assert!(table.get("Total Assets").is_none());
    }

    #[test]
    fn test_numeric_skips_missing() {
        let table = table();
        assert_eq!(table.numeric(), vec![("Revenue", 1234.56)]);
        assert_eq!(table.found_count(), 1);
    }

    #[test]
    fn test_csv_export() {
        let csv = table().to_csv("Document Analysis");
        assert_eq!(
            csv,
            "Metric,Document Analysis\nRevenue,1234.56\nNet Profit,N/A\n"
        );
    }

    #[test]
    fn test_csv_quotes_delimiters() {
        let mut table = MetricTable::default();
        table.push("Cash, end of \"year\"".into(), MetricValue::NotAvailable);
        let csv = table.to_csv("Doc");
        assert!(csv.contains("\"Cash, end of \"\"year\"\"\",N/A"));
    }
}
