//! Permissions command implementation.

use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the permissions command.
pub async fn execute_permissions(session: &Session, formatter: &Formatter) -> Result<()> {
    let report = session.client()?.check_permissions().await;
    println!("{}", formatter.format_permissions(&report)?);
    Ok(())
}
