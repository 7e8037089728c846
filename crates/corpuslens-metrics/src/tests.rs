//! Extraction tests against realistic snippet text

#[cfg(test)]
mod tests {
    use crate::{
        comparison_query, extract, extract_from_text, parse_metric_list, MetricTable, MetricValue,
        DEFAULT_METRICS,
    };
    use corpuslens_domain::Snippet;
    use proptest::prelude::*;

    fn value<'a>(table: &'a MetricTable, name: &str) -> &'a str {
        table.get(name).map(MetricValue::as_str).unwrap_or("<missing>")
    }

    fn snippets(texts: &[&str]) -> Vec<Snippet> {
        texts.iter().map(|t| Snippet::new(*t, 0.5)).collect()
    }

    #[test]
    fn test_currency_and_separators_stripped() {
        let table = extract(&snippets(&["Revenue: $1,234.56 for fiscal 2024"]), &["Revenue"]);
        assert_eq!(value(&table, "Revenue"), "1234.56");
    }

    #[test]
    fn test_case_insensitive_label_with_dash() {
        let table = extract_from_text("TOTAL REVENUE - 2,500 units", &["revenue"]);
        assert_eq!(value(&table, "revenue"), "2500");
    }

    #[test]
    fn test_parenthesised_value_uses_second_pattern() {
        let table = extract_from_text("Net Profit ($4,500.00) after tax", &["Net Profit"]);
        assert_eq!(value(&table, "Net Profit"), "4500.00");
    }

    #[test]
    fn test_missing_metric_is_not_available() {
        let text = "Revenue: $10,000. Operating cash flow 3,200. Headcount 45.";
        let table = extract_from_text(text, &["Total Liabilities"]);
        assert_eq!(table.get("Total Liabilities"), Some(&MetricValue::NotAvailable));
        assert_eq!(table.found_count(), 0);
    }

    #[test]
    fn test_only_first_five_snippets_scanned() {
        let texts = [
            "Revenue: $1,000",
            "no figures here",
            "still nothing",
            "more prose",
            "Net Profit: 250",
            "Gross Profit: 999",
            "Total Assets: 5,000",
        ];
        let table = extract(&snippets(&texts), &["Revenue", "Net Profit", "Gross Profit", "Total Assets"]);

        assert_eq!(value(&table, "Revenue"), "1000");
        assert_eq!(value(&table, "Net Profit"), "250");
        assert_eq!(table.get("Gross Profit"), Some(&MetricValue::NotAvailable));
        assert_eq!(table.get("Total Assets"), Some(&MetricValue::NotAvailable));
    }

    #[test]
    fn test_first_match_wins() {
        let table = extract(
            &snippets(&["Revenue: 1,100 (restated)", "Revenue: 9,900"]),
            &["Revenue"],
        );
        assert_eq!(value(&table, "Revenue"), "1100");
    }

    #[test]
    fn test_label_with_regex_metacharacters() {
        let table = extract_from_text("EPS (diluted): 3.45 per share", &["EPS (diluted)"]);
        assert_eq!(value(&table, "EPS (diluted)"), "3.45");
    }

    #[test]
    fn test_unseparated_numbers_read_three_digits() {
        // Known heuristic limitation
        let table = extract_from_text("Revenue 1234 thousand", &["Revenue"]);
        assert_eq!(value(&table, "Revenue"), "123");
    }

    #[test]
    fn test_duplicate_and_blank_names() {
        let table = extract_from_text("Revenue: 5", &["Revenue", "  ", "REVENUE", "Net Profit"]);
        assert_eq!(table.len(), 2);
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Revenue", "Net Profit"]);
    }

    #[test]
    fn test_default_metrics_table_shape() {
        let table = extract(&[], &DEFAULT_METRICS);
        assert_eq!(table.len(), 5);
        assert!(table.iter().all(|(_, v)| *v == MetricValue::NotAvailable));
    }

    #[test]
    fn test_comparison_query() {
        assert_eq!(
            comparison_query(&["Revenue", "Net Profit"]),
            "financial statements showing: Revenue, Net Profit"
        );
    }

    #[test]
    fn test_parse_metric_list() {
        assert_eq!(
            parse_metric_list(" Operating Expenses, Cash Flow ,,"),
            vec!["Operating Expenses".to_string(), "Cash Flow".to_string()]
        );
        assert!(parse_metric_list("").is_empty());
    }

    proptest! {
        #[test]
        fn prop_extraction_is_idempotent(
            texts in proptest::collection::vec("[A-Za-z0-9 :$,.()-]{0,60}", 0..8),
            names in proptest::collection::vec("[A-Za-z ]{0,12}", 0..6),
        ) {
            let snippets: Vec<Snippet> = texts.iter().map(|t| Snippet::new(t.as_str(), 0.1)).collect();
            let first = extract(&snippets, &names);
            let second = extract(&snippets, &names);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_found_values_are_plain_numbers(
            text in "[A-Za-z0-9 :$,.()-]{0,80}",
            name in "[A-Za-z]{1,8}",
        ) {
            let table = extract_from_text(&text, &[name.as_str()]);
            if let Some(MetricValue::Found(value)) = table.get(&name) {
                prop_assert!(!value.contains(','));
                prop_assert!(value.parse::<f64>().is_ok());
            }
        }
    }
}
