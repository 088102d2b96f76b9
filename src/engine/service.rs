//! HTTP client for the analysis service.

use crate::model::{AnalysisResult, SubmitConfig, SubmitError};
use reqwest::multipart::{Form, Part};
use std::path::Path;

const ANALYZE_ENDPOINT: &str = "/analyze";

pub(crate) struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(cfg: &SubmitConfig) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| SubmitError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue the single multipart POST and decode the response.
    pub async fn analyze(
        &self,
        resume: &Path,
        job_description: &str,
    ) -> Result<AnalysisResult, SubmitError> {
        let file_name = resume
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();
        let content_type = guess_content_type(&file_name);

        let file_content = tokio::fs::read(resume)
            .await
            .map_err(|e| SubmitError::Network(format!("could not read {file_name}: {e}")))?;

        let form = Form::new()
            .part(
                "resume",
                Part::bytes(file_content)
                    .file_name(file_name)
                    .mime_str(content_type)
                    .map_err(|e| SubmitError::Network(format!("failed to create multipart: {e}")))?,
            )
            .text("job_description", job_description.to_string());

        let url = format!("{}{}", self.base_url, ANALYZE_ENDPOINT);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        decode_response(status, &body)
    }
}

/// Decode the service response. The body is parsed as JSON regardless of HTTP
/// status: failure bodies may embed a structured error message.
pub(crate) fn decode_response(status: u16, body: &str) -> Result<AnalysisResult, SubmitError> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SubmitError::Network(format!("invalid response body: {e}")))?;

    if !(200..300).contains(&status) {
        let message = json
            .get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error: status {status}"));
        return Err(SubmitError::Service { status, message });
    }

    serde_json::from_value(json)
        .map_err(|e| SubmitError::Network(format!("malformed analysis payload: {e}")))
}

fn guess_content_type(file_name: &str) -> &'static str {
    let lower_name = file_name.to_lowercase();
    if lower_name.ends_with(".pdf") {
        "application/pdf"
    } else if lower_name.ends_with(".txt") || lower_name.ends_with(".md") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_status_uses_body_error_message() {
        let err = decode_response(500, r#"{"error":"PDF parse failed"}"#)
            .expect_err("500 must be a service error");
        assert_eq!(
            err,
            SubmitError::Service {
                status: 500,
                message: "PDF parse failed".to_string(),
            }
        );
        assert_eq!(err.to_string(), "PDF parse failed");
    }

    #[test]
    fn failure_status_without_error_field_is_generic() {
        let err = decode_response(502, "{}").expect_err("502 must be a service error");
        assert_eq!(err.to_string(), "HTTP error: status 502");
    }

    #[test]
    fn non_json_body_is_a_network_error() {
        let err = decode_response(200, "<html>oops</html>").expect_err("not JSON");
        assert!(matches!(err, SubmitError::Network(_)));
        let err = decode_response(500, "Bad Gateway").expect_err("not JSON");
        assert!(matches!(err, SubmitError::Network(_)));
    }

    #[test]
    fn success_body_with_wrong_shape_is_a_network_error() {
        let err = decode_response(200, r#"{"matchScore":"high"}"#).expect_err("wrong shape");
        assert!(matches!(err, SubmitError::Network(_)));
    }

    #[test]
    fn success_body_decodes() {
        let result = decode_response(
            200,
            r#"{
                "matchScore": 64,
                "missingSkills": ["time_management"],
                "suggestions": ["Block out focus hours."],
                "aiFeedback": "Decent fit."
            }"#,
        )
        .unwrap();
        assert_eq!(result.match_score, 64);
        assert_eq!(result.missing_skills, vec!["time_management"]);
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(guess_content_type("cv.PDF"), "application/pdf");
        assert_eq!(guess_content_type("cv.txt"), "text/plain");
        assert_eq!(guess_content_type("cv.docx"), "application/octet-stream");
    }
}
