use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
    pub base_url: String,
    pub resume: std::path::PathBuf,
    pub job_description: String,
    pub user_agent: String,
}

/// Request lifecycle phase. Created Idle on startup, transitions on
/// submit/settle, lives for the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Idle,
    Submitting,
    Settled,
}

/// Analysis payload returned by the service. Field names follow the wire
/// contract (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Match score out of 100. Display-only; never clamped locally.
    pub match_score: i64,
    /// Ordered snake_case skill identifiers, may be empty.
    pub missing_skills: Vec<String>,
    /// Free-text improvement suggestions, index-paired with `missing_skills`.
    pub suggestions: Vec<String>,
    /// Free text carrying `**bold**` spans and literal line breaks.
    pub ai_feedback: String,
}

/// A missing skill paired with its improvement suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillGap {
    pub skill: String,
    pub suggestion: String,
}

impl AnalysisResult {
    /// Pair each missing skill with its suggestion by position, replacing the
    /// unchecked parallel-array contract with one ordered sequence. A skill
    /// without a counterpart suggestion gets an empty one.
    pub fn skill_gaps(&self) -> Vec<SkillGap> {
        self.missing_skills
            .iter()
            .enumerate()
            .map(|(i, skill)| SkillGap {
                skill: skill.clone(),
                suggestion: self.suggestions.get(i).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

/// Failure kinds for a single submission. All are terminal for the current
/// request only; none abort the interactive front-end.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Missing/unreadable resume or blank job description. Raised before any
    /// network action; lifecycle state is not touched.
    #[error("{0}")]
    Validation(String),

    /// The service answered with a non-success status. The message is the
    /// body's `error` field when present, else a generic status line.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// Transport failure or a body that could not be understood.
    #[error("{0}")]
    Network(String),
}

/// Events emitted by the engine/controller and consumed by front-ends.
#[derive(Debug, Clone)]
pub enum SubmitEvent {
    /// The request has been accepted and is on the wire.
    SubmissionStarted,
    /// Success settle.
    Completed {
        // Box to keep SubmitEvent small; the payload carries free text.
        result: Box<AnalysisResult>,
        /// RFC 3339 stamp of when the submission settled.
        analyzed_at: String,
    },
    /// Failure settle.
    Failed { error: SubmitError },
    Info(String),
}

/// RFC 3339 timestamp for settle events.
pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "now".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(skills: &[&str], suggestions: &[&str]) -> AnalysisResult {
        AnalysisResult {
            match_score: 70,
            missing_skills: skills.iter().map(|s| s.to_string()).collect(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            ai_feedback: String::new(),
        }
    }

    #[test]
    fn skill_gaps_pair_by_position() {
        let r = result_with(&["rust", "sql"], &["Learn Rust.", "Learn SQL."]);
        let gaps = r.skill_gaps();
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].skill, "rust");
        assert_eq!(gaps[0].suggestion, "Learn Rust.");
        assert_eq!(gaps[1].skill, "sql");
        assert_eq!(gaps[1].suggestion, "Learn SQL.");
    }

    #[test]
    fn skill_gaps_tolerate_short_suggestions() {
        let r = result_with(&["rust", "sql"], &["Learn Rust."]);
        let gaps = r.skill_gaps();
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[1].suggestion, "");
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let json = r#"{
            "matchScore": 85,
            "missingSkills": ["time_management"],
            "suggestions": ["Block out focus hours."],
            "aiFeedback": "**Strong** fit."
        }"#;
        let r: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.match_score, 85);
        assert_eq!(r.missing_skills, vec!["time_management"]);
        assert_eq!(r.ai_feedback, "**Strong** fit.");
    }
}
