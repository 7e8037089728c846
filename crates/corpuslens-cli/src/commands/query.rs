//! Query command implementation.

use crate::cli::QueryArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;

/// Execute the query command.
pub async fn execute_query(args: QueryArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let question = args.question.join(" ");
    if question.trim().is_empty() {
        return Err(CliError::InvalidInput("Question must not be empty".to_string()));
    }

    let result = session.client()?.query(&question, args.limit).await?;
    let entry = session.record_query(question.trim(), result);

    println!("{}", formatter.format_answer(entry)?);
    Ok(())
}
