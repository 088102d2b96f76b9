//! Inline markup translator for free-text feedback.
//!
//! Handles exactly two conventions: bold spans delimited by a doubled `**`
//! marker and literal line breaks. Anything else (nested emphasis, escaped
//! markers, lists, links) passes through as literal text.

/// One run of text with a single emphasis attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub bold: bool,
}

impl InlineSpan {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
        }
    }

    fn bold(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: true,
        }
    }
}

/// One display line of the translated feedback.
pub type FeedbackLine = Vec<InlineSpan>;

/// Translate feedback text into styled lines.
///
/// Two passes, in order: bold markers are resolved first, then literal
/// newlines split the spans into lines. Resolving bold first matches the
/// substitution order the wire format assumes.
pub fn translate(text: &str) -> Vec<FeedbackLine> {
    split_lines(resolve_bold(text))
}

/// Replace each minimal `**…**` span with a bold span, inner text verbatim.
/// An unmatched trailing marker is left as literal text.
fn resolve_bold(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("**") else {
            break;
        };
        if open > 0 {
            spans.push(InlineSpan::plain(&rest[..open]));
        }
        spans.push(InlineSpan::bold(&after[..close]));
        rest = &after[close + 2..];
    }

    if !rest.is_empty() {
        spans.push(InlineSpan::plain(rest));
    }
    spans
}

/// Break spans at literal newlines, keeping each fragment's emphasis.
fn split_lines(spans: Vec<InlineSpan>) -> Vec<FeedbackLine> {
    let mut lines: Vec<FeedbackLine> = Vec::new();
    let mut current: FeedbackLine = Vec::new();

    for span in spans {
        let mut fragments = span.text.split('\n');
        if let Some(first) = fragments.next() {
            if !first.is_empty() {
                current.push(InlineSpan {
                    text: first.to_string(),
                    bold: span.bold,
                });
            }
        }
        for fragment in fragments {
            lines.push(std::mem::take(&mut current));
            if !fragment.is_empty() {
                current.push(InlineSpan {
                    text: fragment.to_string(),
                    bold: span.bold,
                });
            }
        }
    }

    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_then_line_break() {
        let lines = translate("**Strong** fit.\nConsider X.");
        assert_eq!(
            lines,
            vec![
                vec![InlineSpan::bold("Strong"), InlineSpan::plain(" fit.")],
                vec![InlineSpan::plain("Consider X.")],
            ]
        );
        for line in &lines {
            for span in line {
                assert!(!span.text.contains("**"));
            }
        }
    }

    #[test]
    fn unmatched_marker_passes_through() {
        let lines = translate("a **b");
        assert_eq!(lines, vec![vec![InlineSpan::plain("a **b")]]);
    }

    #[test]
    fn multiple_bold_spans_resolve_non_greedily() {
        let lines = translate("**a** and **b**");
        assert_eq!(
            lines,
            vec![vec![
                InlineSpan::bold("a"),
                InlineSpan::plain(" and "),
                InlineSpan::bold("b"),
            ]]
        );
    }

    #[test]
    fn blank_lines_are_kept() {
        let lines = translate("a\n\nb");
        assert_eq!(
            lines,
            vec![
                vec![InlineSpan::plain("a")],
                vec![],
                vec![InlineSpan::plain("b")],
            ]
        );
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        assert_eq!(translate(""), vec![Vec::<InlineSpan>::new()]);
    }
}
