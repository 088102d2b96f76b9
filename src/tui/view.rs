//! Thin adapter from the rendered block tree to styled terminal lines.

use crate::render::ContentBlock;
use crate::session::{ResultRegion, LOADING_PLACEHOLDER};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Lines for the result region. The region holds exactly one of: nothing,
/// the loading placeholder, a rendered tree, or an error block.
pub(crate) fn region_lines(region: &ResultRegion) -> Vec<Line<'static>> {
    match region {
        ResultRegion::Empty => Vec::new(),
        ResultRegion::Loading => vec![Line::from(Span::styled(
            LOADING_PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))],
        ResultRegion::Rendered(blocks) => blocks_to_lines(blocks),
        ResultRegion::Failed(block) => blocks_to_lines(std::slice::from_ref(block)),
    }
}

/// Border styling for the result panel: the loading tint is applied while
/// Submitting and reset to the neutral default once a tree is applied.
pub(crate) fn region_border_style(region: &ResultRegion) -> Style {
    match region {
        ResultRegion::Loading => Style::default().fg(Color::DarkGray),
        ResultRegion::Failed(_) => Style::default().fg(Color::Red),
        ResultRegion::Empty | ResultRegion::Rendered(_) => Style::default(),
    }
}

fn blocks_to_lines(blocks: &[ContentBlock]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Title(title) => {
                lines.push(Line::from(Span::styled(
                    title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
            }
            ContentBlock::Score { value } => {
                lines.push(Line::from(vec![
                    Span::raw("Match Score: "),
                    Span::styled(
                        format!("{value}/100"),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            ContentBlock::Heading(heading) => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("{heading}:"),
                    Style::default().fg(Color::Yellow),
                )));
            }
            ContentBlock::SkillCard { title, body } => {
                let mut spans = vec![
                    Span::raw("  • "),
                    Span::styled(title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ];
                if !body.is_empty() {
                    spans.push(Span::raw(": "));
                    spans.push(Span::raw(body.clone()));
                }
                lines.push(Line::from(spans));
            }
            ContentBlock::FeedbackCard {
                lines: feedback_lines,
            } => {
                for feedback_line in feedback_lines {
                    let mut spans = vec![Span::raw("  ")];
                    for span in feedback_line {
                        if span.bold {
                            spans.push(Span::styled(
                                span.text.clone(),
                                Style::default().add_modifier(Modifier::BOLD),
                            ));
                        } else {
                            spans.push(Span::raw(span.text.clone()));
                        }
                    }
                    lines.push(Line::from(spans));
                }
            }
            ContentBlock::ErrorBlock { message } => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "Error: ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(message.clone()),
                ]));
            }
        }
    }

    lines
}
