//! Documents command implementation.

use crate::cli::DocumentsArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the documents command.
pub async fn execute_documents(args: DocumentsArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let documents = session.client()?.list_documents().await?;
    println!("{}", formatter.format_documents(&documents, args.limit)?);
    Ok(())
}
