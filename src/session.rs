//! Submission session state shared by the front-ends.
//!
//! Applies lifecycle events to the state the submit affordance and result
//! region are drawn from. Pure and framework-free so the transitions are
//! testable without a terminal or a network.

use crate::model::{AnalysisResult, LifecycleState, SubmitEvent};
use crate::render::{self, ContentBlock};

pub const LABEL_DEFAULT: &str = "Analyze Resume";
pub const LABEL_BUSY: &str = "Analyzing...";
pub const LOADING_PLACEHOLDER: &str = "Analyzing your resume, please wait...";

/// The result display region holds exactly one of these at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultRegion {
    Empty,
    Loading,
    Rendered(Vec<ContentBlock>),
    Failed(ContentBlock),
}

/// Enabled/label state of the submit affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordance {
    pub label: &'static str,
    pub enabled: bool,
}

pub struct SubmissionState {
    pub lifecycle: LifecycleState,
    pub region: ResultRegion,
    pub info: String,
    pub last_result: Option<AnalysisResult>,
    pub analyzed_at: Option<String>,
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleState::Idle,
            region: ResultRegion::Empty,
            info: String::new(),
            last_result: None,
            analyzed_at: None,
        }
    }
}

impl SubmissionState {
    /// The affordance is disabled for exactly as long as a request is in
    /// flight, which is what prevents re-entrant submission.
    pub fn affordance(&self) -> Affordance {
        match self.lifecycle {
            LifecycleState::Submitting => Affordance {
                label: LABEL_BUSY,
                enabled: false,
            },
            LifecycleState::Idle | LifecycleState::Settled => Affordance {
                label: LABEL_DEFAULT,
                enabled: true,
            },
        }
    }

    pub fn apply_event(&mut self, ev: SubmitEvent) {
        match ev {
            SubmitEvent::SubmissionStarted => {
                self.lifecycle = LifecycleState::Submitting;
                // Loading replaces any prior rendered tree or error block.
                self.region = ResultRegion::Loading;
                self.last_result = None;
                self.analyzed_at = None;
            }
            SubmitEvent::Completed {
                result,
                analyzed_at,
            } => {
                self.region = ResultRegion::Rendered(render::render(&result));
                self.last_result = Some(*result);
                self.analyzed_at = Some(analyzed_at);
                self.lifecycle = LifecycleState::Settled;
            }
            SubmitEvent::Failed { error } => {
                self.region = ResultRegion::Failed(render::error_block(&error.to_string()));
                self.lifecycle = LifecycleState::Settled;
            }
            SubmitEvent::Info(msg) => {
                self.info = msg;
            }
        }
    }
}
