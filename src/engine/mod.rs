mod service;

use crate::model::{AnalysisResult, SubmitConfig, SubmitError, SubmitEvent};
use std::path::Path;
use tokio::sync::mpsc;

/// Check a submission's inputs before any network action. Each check is
/// independent of the other field's value.
pub fn validate(resume: &Path, job_description: &str) -> Result<(), SubmitError> {
    if !resume.is_file() {
        return Err(SubmitError::Validation(format!(
            "resume file not found: {}",
            resume.display()
        )));
    }
    if job_description.trim().is_empty() {
        return Err(SubmitError::Validation(
            "job description is empty; pass --job-desc or --job-desc-file".into(),
        ));
    }
    Ok(())
}

/// Runs exactly one analysis submission against the service. Callers are
/// expected to have validated the inputs already.
pub struct SubmitEngine {
    cfg: SubmitConfig,
}

impl SubmitEngine {
    pub fn new(cfg: SubmitConfig) -> Self {
        Self { cfg }
    }

    pub async fn run(
        self,
        event_tx: mpsc::UnboundedSender<SubmitEvent>,
    ) -> Result<AnalysisResult, SubmitError> {
        let _ = event_tx.send(SubmitEvent::SubmissionStarted);

        let client = service::AnalysisClient::new(&self.cfg)?;
        let resume_name = self
            .cfg
            .resume
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume");
        let _ = event_tx.send(SubmitEvent::Info(format!(
            "Submitting {} to {}",
            resume_name, self.cfg.base_url
        )));

        client
            .analyze(&self.cfg.resume, &self.cfg.job_description)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn validate_accepts_file_and_non_blank_text() {
        let mut resume = tempfile::NamedTempFile::new().unwrap();
        resume.write_all(b"resume body").unwrap();
        assert!(validate(resume.path(), "Backend engineer role.").is_ok());
    }

    #[test]
    fn validate_rejects_missing_file_regardless_of_text() {
        let err = validate(Path::new("/no/such/resume.pdf"), "Backend engineer role.")
            .expect_err("missing file must be rejected");
        assert!(matches!(err, SubmitError::Validation(_)));
    }

    #[test]
    fn validate_rejects_blank_text_regardless_of_file() {
        let resume = tempfile::NamedTempFile::new().unwrap();
        for blank in ["", "   ", "\n\t "] {
            let err = validate(resume.path(), blank).expect_err("blank text must be rejected");
            assert!(matches!(err, SubmitError::Validation(_)));
        }
    }
}
