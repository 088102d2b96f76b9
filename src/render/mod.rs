//! Pure result-rendering pipeline.
//!
//! Maps an analysis payload to an ordered sequence of display blocks. No
//! network or mutable state; identical input yields an identical block tree.
//! Front-ends apply the tree through thin adapters (`text` for plain output,
//! the TUI's line builder for styled output).

pub mod markup;
pub mod text;

use crate::model::AnalysisResult;
use markup::FeedbackLine;

/// One display block. The order of blocks is the display order.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Title(String),
    /// Numeric match score out of 100, pass-through with no clamping.
    Score { value: i64 },
    Heading(String),
    /// A missing skill title paired with its improvement suggestion.
    SkillCard { title: String, body: String },
    FeedbackCard { lines: Vec<FeedbackLine> },
    ErrorBlock { message: String },
}

/// Render an analysis result into its display blocks.
pub fn render(result: &AnalysisResult) -> Vec<ContentBlock> {
    let mut blocks = vec![
        ContentBlock::Title("Analysis Result".to_string()),
        ContentBlock::Score {
            value: result.match_score,
        },
    ];

    let gaps = result.skill_gaps();
    if !gaps.is_empty() {
        blocks.push(ContentBlock::Heading("Missing Skills".to_string()));
        for gap in gaps {
            blocks.push(ContentBlock::SkillCard {
                title: skill_title(&gap.skill),
                body: gap.suggestion,
            });
        }
    }

    blocks.push(ContentBlock::Heading("AI Feedback".to_string()));
    blocks.push(ContentBlock::FeedbackCard {
        lines: markup::translate(&result.ai_feedback),
    });

    blocks
}

/// The single error block shown when a submission fails.
pub fn error_block(message: &str) -> ContentBlock {
    ContentBlock::ErrorBlock {
        message: message.to_string(),
    }
}

/// Turn a snake_case skill identifier into a card title: uppercase the first
/// character, replace every underscore with a space.
pub fn skill_title(skill: &str) -> String {
    let mut chars = skill.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    capitalized.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use markup::InlineSpan;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            match_score: 72,
            missing_skills: vec!["team_leadership".to_string()],
            suggestions: vec!["Lead a cross-functional project.".to_string()],
            ai_feedback: "**Strong** fit.\nConsider X.".to_string(),
        }
    }

    #[test]
    fn render_is_pure() {
        let result = sample_result();
        assert_eq!(render(&result), render(&result));
    }

    #[test]
    fn render_emits_blocks_in_display_order() {
        let blocks = render(&sample_result());
        assert_eq!(blocks[0], ContentBlock::Title("Analysis Result".into()));
        assert_eq!(blocks[1], ContentBlock::Score { value: 72 });
        assert_eq!(blocks[2], ContentBlock::Heading("Missing Skills".into()));
        assert_eq!(
            blocks[3],
            ContentBlock::SkillCard {
                title: "Team leadership".into(),
                body: "Lead a cross-functional project.".into(),
            }
        );
        assert_eq!(blocks[4], ContentBlock::Heading("AI Feedback".into()));
        assert!(matches!(blocks[5], ContentBlock::FeedbackCard { .. }));
        assert_eq!(blocks.len(), 6);
    }

    #[test]
    fn empty_skills_omit_heading_and_cards() {
        let result = AnalysisResult {
            match_score: 90,
            missing_skills: vec![],
            suggestions: vec![],
            ai_feedback: "Solid.".to_string(),
        };
        let blocks = render(&result);
        assert!(!blocks
            .iter()
            .any(|b| *b == ContentBlock::Heading("Missing Skills".into())));
        assert!(!blocks
            .iter()
            .any(|b| matches!(b, ContentBlock::SkillCard { .. })));
        assert!(blocks
            .iter()
            .any(|b| *b == ContentBlock::Heading("AI Feedback".into())));
        assert!(blocks
            .iter()
            .any(|b| matches!(b, ContentBlock::FeedbackCard { .. })));
    }

    #[test]
    fn feedback_card_carries_translated_markup() {
        let blocks = render(&sample_result());
        let Some(ContentBlock::FeedbackCard { lines }) = blocks.last() else {
            panic!("feedback card must be the final block");
        };
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0][0],
            InlineSpan {
                text: "Strong".into(),
                bold: true
            }
        );
    }

    #[test]
    fn score_is_not_clamped() {
        let mut result = sample_result();
        result.match_score = 120;
        assert_eq!(render(&result)[1], ContentBlock::Score { value: 120 });
    }

    #[test]
    fn skill_title_formats_and_is_idempotent() {
        assert_eq!(skill_title("time_management"), "Time management");
        assert_eq!(skill_title("Time management"), "Time management");
        assert_eq!(skill_title("sql"), "Sql");
        assert_eq!(skill_title(""), "");
    }
}
