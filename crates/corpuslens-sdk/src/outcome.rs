//! Result pairs returned by operations that never raise.

use crate::error::SdkError;
use corpuslens_domain::ErrorCategory;

/// Outcome of a connectivity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionCheck {
    /// The corpus was reachable with these credentials
    pub ok: bool,
    /// Human-readable result
    pub message: String,
    /// Failure category, `None` on success
    pub category: Option<ErrorCategory>,
}

impl ConnectionCheck {
    pub(crate) fn passed() -> Self {
        Self {
            ok: true,
            message: "Connection successful!".to_string(),
            category: None,
        }
    }

    pub(crate) fn failed(error: &SdkError) -> Self {
        Self {
            ok: false,
            message: error.to_string(),
            category: Some(error.category()),
        }
    }
}

/// Outcome of uploading one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// File the outcome belongs to
    pub filename: String,
    /// The service accepted the file
    pub ok: bool,
    /// Human-readable result
    pub message: String,
    /// Failure category, `None` on success
    pub category: Option<ErrorCategory>,
}

impl UploadOutcome {
    pub(crate) fn succeeded(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            ok: true,
            message: format!("Successfully uploaded: {}", filename),
            category: None,
        }
    }

    pub(crate) fn failed(filename: &str, error: &SdkError) -> Self {
        Self {
            filename: filename.to_string(),
            ok: false,
            message: format!("Error uploading {}: {}", filename, error),
            category: Some(error.category()),
        }
    }
}

/// Per-file outcomes of a sequential batch upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One outcome per attempted file, in submission order
    pub outcomes: Vec<UploadOutcome>,
}

impl BatchReport {
    /// Number of files the service accepted
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.ok).count()
    }

    /// Number of files attempted
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Outcomes that failed
    pub fn failures(&self) -> impl Iterator<Item = &UploadOutcome> {
        self.outcomes.iter().filter(|o| !o.ok)
    }

    /// One-line summary of the batch
    pub fn summary(&self) -> String {
        format!(
            "Upload complete! {}/{} files uploaded successfully.",
            self.succeeded(),
            self.total()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpuslens_domain::Capability;

    #[test]
    fn test_batch_counts() {
        let denied = SdkError::from_status(403, String::new(), Capability::Index);
        let report = BatchReport {
            outcomes: vec![
                UploadOutcome::succeeded("a.pdf"),
                UploadOutcome::failed("b.pdf", &denied),
                UploadOutcome::succeeded("c.pdf"),
            ],
        };

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.total(), 3);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(
            report.summary(),
            "Upload complete! 2/3 files uploaded successfully."
        );
    }

    #[test]
    fn test_failed_upload_message() {
        let outcome = UploadOutcome::failed("b.pdf", &SdkError::Connection("refused".into()));
        assert!(!outcome.ok);
        assert_eq!(outcome.message, "Error uploading b.pdf: Connection error: refused");
        assert_eq!(outcome.category, Some(ErrorCategory::Transport));
    }
}
