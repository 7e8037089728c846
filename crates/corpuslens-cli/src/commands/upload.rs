//! Upload command implementation.

use crate::cli::UploadArgs;
use crate::config::Settings;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use corpuslens_domain::{UploadRequest, UploadStrategy};
use corpuslens_sdk::BatchReport;
use std::path::Path;

/// Execute the upload command.
///
/// Every file is checked and read before the first upload starts.
pub async fn execute_upload(
    args: UploadArgs,
    session: &mut Session,
    settings: &Settings,
    formatter: &Formatter,
) -> Result<BatchReport> {
    let strategy: UploadStrategy = match args.strategy {
        Some(strategy) => strategy.into(),
        None => settings.upload_strategy()?,
    };
    let requests = load_requests(&args.files)?;

    let client = session.client()?;
    let report = client
        .upload_batch_with(&requests, strategy, |_, outcome| {
            println!("{}", formatter.upload_outcome(outcome));
        })
        .await;

    for outcome in &report.outcomes {
        session.record_upload(outcome);
    }
    println!("{}", formatter.batch_summary(&report));

    Ok(report)
}

/// Read each path into an upload request named after the file.
pub fn load_requests(paths: &[String]) -> Result<Vec<UploadRequest>> {
    paths.iter().map(|p| load_request(Path::new(p))).collect()
}

fn load_request(path: &Path) -> Result<UploadRequest> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(CliError::InvalidInput(format!(
            "{} is not a PDF file",
            path.display()
        )));
    }

    if !path.is_file() {
        return Err(CliError::InvalidInput(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidInput(format!("Invalid file name: {}", path.display())))?;

    let content = std::fs::read(path)?;
    Ok(UploadRequest::new(content, filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_requests_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Q3-Report.PDF");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let requests = load_requests(&[path.display().to_string()]).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].filename, "Q3-Report.PDF");
        assert_eq!(requests[0].content, b"%PDF-1.4");
    }

    #[test]
    fn test_non_pdf_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        let err = load_requests(&[path.display().to_string()]).unwrap_err();
        assert!(err.to_string().contains("not a PDF"));
    }

    #[test]
    fn test_missing_file_rejects_whole_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.pdf");
        fs::write(&good, b"%PDF").unwrap();
        let missing = dir.path().join("b.pdf");

        let err = load_requests(&[good.display().to_string(), missing.display().to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[tokio::test]
    async fn test_upload_requires_connection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        fs::write(&path, b"%PDF").unwrap();

        let mut session = Session::new();
        let formatter = Formatter::new(crate::config::OutputFormat::Quiet, false);
        let args = UploadArgs {
            files: vec![path.display().to_string()],
            strategy: None,
        };

        let result = execute_upload(args, &mut session, &Settings::default(), &formatter).await;
        assert!(matches!(result, Err(CliError::NotConnected)));
    }
}
