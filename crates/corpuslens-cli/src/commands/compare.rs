//! Compare command implementation.

use crate::cli::CompareArgs;
use crate::error::Result;
use crate::output::{Formatter, COMPARISON_COLUMN};
use crate::session::Session;
use corpuslens_metrics::{comparison_query, extract, parse_metric_list, MetricTable, COMPARISON_METRICS};
use corpuslens_sdk::DEFAULT_RESULT_LIMIT;
use std::fs;
use tracing::debug;

/// Execute the compare command.
pub async fn execute_compare(args: CompareArgs, session: &Session, formatter: &Formatter) -> Result<MetricTable> {
    let metrics = metric_names(args.metrics.as_deref());
    let question = comparison_query(&metrics);
    debug!(%question, "running comparison query");

    let result = session.client()?.query(&question, DEFAULT_RESULT_LIMIT).await?;
    let table = extract(&result.snippets, &metrics);

    println!("{}", formatter.format_metrics(&table)?);

    if let Some(path) = &args.csv {
        fs::write(path, table.to_csv(COMPARISON_COLUMN))?;
        println!("{}", formatter.success(&format!("Metrics written to {}", path)));
    }

    if args.chart {
        println!("{}", formatter.format_chart(&table));
    }

    Ok(table)
}

/// Standard comparison metrics followed by any extras the user asked for.
pub fn metric_names(extra: Option<&str>) -> Vec<String> {
    let mut names: Vec<String> = COMPARISON_METRICS.iter().map(|m| m.to_string()).collect();
    if let Some(extra) = extra {
        names.extend(parse_metric_list(extra));
    }
    names
}
