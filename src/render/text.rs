//! Text summary builder for CLI output.
//!
//! Thin adapter applying a rendered block tree as plain lines for text mode.

use super::ContentBlock;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Flatten a block tree into plain text lines.
pub(crate) fn build_text_summary(blocks: &[ContentBlock]) -> TextSummary {
    let mut lines = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Title(title) => {
                lines.push(title.clone());
                lines.push("=".repeat(title.chars().count()));
            }
            ContentBlock::Score { value } => {
                lines.push(format!("Match Score: {value}/100"));
            }
            ContentBlock::Heading(heading) => {
                lines.push(String::new());
                lines.push(format!("{heading}:"));
            }
            ContentBlock::SkillCard { title, body } => {
                if body.is_empty() {
                    lines.push(format!("  - {title}"));
                } else {
                    lines.push(format!("  - {title}: {body}"));
                }
            }
            ContentBlock::FeedbackCard {
                lines: feedback_lines,
            } => {
                for line in feedback_lines {
                    let text: String = line.iter().map(|span| span.text.as_str()).collect();
                    lines.push(format!("  {text}").trim_end().to_string());
                }
            }
            ContentBlock::ErrorBlock { message } => {
                lines.push(format!("Error: {message}"));
            }
        }
    }

    TextSummary { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnalysisResult;
    use crate::render;

    #[test]
    fn summary_lines_follow_block_order() {
        let result = AnalysisResult {
            match_score: 72,
            missing_skills: vec!["team_leadership".to_string()],
            suggestions: vec!["Lead a cross-functional project.".to_string()],
            ai_feedback: "**Strong** fit.\nConsider X.".to_string(),
        };
        let summary = build_text_summary(&render::render(&result));
        assert_eq!(summary.lines[0], "Analysis Result");
        assert!(summary.lines.contains(&"Match Score: 72/100".to_string()));
        assert!(summary.lines.contains(&"Missing Skills:".to_string()));
        assert!(summary
            .lines
            .contains(&"  - Team leadership: Lead a cross-functional project.".to_string()));
        assert!(summary.lines.contains(&"  Strong fit.".to_string()));
        assert!(summary.lines.contains(&"  Consider X.".to_string()));
    }

    #[test]
    fn error_block_is_a_single_line() {
        let summary = build_text_summary(&[render::error_block("PDF parse failed")]);
        assert_eq!(summary.lines, vec!["Error: PDF parse failed".to_string()]);
    }
}
