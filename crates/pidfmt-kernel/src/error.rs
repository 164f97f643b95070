//! Errors produced while lexing, parsing and binding infix expressions.

use std::ops::Range;

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Why an expression was not accepted.
///
/// The format checker collapses all of these into one rejection; the variant
/// and span are kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfixError {
    #[error("syntax error at {}..{}: {message}", .span.start, .span.end)]
    Syntax { message: String, span: Range<usize> },

    #[error("unknown identifier `{name}`")]
    UnknownIdentifier { name: String, span: Range<usize> },

    #[error("unsupported operator `{op}`")]
    UnsupportedOperator { op: String, span: Range<usize> },
}

impl InfixError {
    /// Byte range of the offending input.
    pub fn span(&self) -> Range<usize> {
        match self {
            InfixError::Syntax { span, .. }
            | InfixError::UnknownIdentifier { span, .. }
            | InfixError::UnsupportedOperator { span, .. } => span.clone(),
        }
    }

    fn hint(&self) -> String {
        match self {
            InfixError::Syntax { message, .. } => message.clone(),
            InfixError::UnknownIdentifier { .. } => "only A, B, C and D are bound".to_string(),
            InfixError::UnsupportedOperator { .. } => {
                "supported operators are + - * /".to_string()
            }
        }
    }

    /// Render a plain-text report of this error against its source.
    ///
    /// Spans are byte offsets, as produced by the lexer.
    pub fn render(&self, source: &str) -> String {
        let span = char_aligned(source, self.span());
        let report = Report::build(ReportKind::Error, span.clone())
            .with_config(
                Config::default()
                    .with_color(false)
                    .with_index_type(IndexType::Byte),
            )
            .with_message(self.to_string())
            .with_label(Label::new(span).with_message(self.hint()))
            .finish();

        let mut buf = Vec::new();
        match report.write(Source::from(source), &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Clamp `span` to `source` and widen it outward to char boundaries.
fn char_aligned(source: &str, span: Range<usize>) -> Range<usize> {
    let mut start = span.start.min(source.len());
    let mut end = span.end.clamp(start, source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    while !source.is_char_boundary(end) {
        end += 1;
    }
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_problem() {
        let err = InfixError::UnknownIdentifier {
            name: "E".into(),
            span: 0..1,
        };
        assert_eq!(err.to_string(), "unknown identifier `E`");

        let err = InfixError::Syntax {
            message: "empty expression".into(),
            span: 0..0,
        };
        assert_eq!(err.to_string(), "syntax error at 0..0: empty expression");
    }

    #[test]
    fn render_mentions_message_and_hint() {
        let err = InfixError::UnsupportedOperator {
            op: "**".into(),
            span: 2..4,
        };
        let report = err.render("A ** 2");
        assert!(report.contains("unsupported operator `**`"), "{}", report);
        assert!(report.contains("supported operators are + - * /"), "{}", report);
        assert!(report.contains("A ** 2"), "{}", report);
    }

    #[test]
    fn render_non_ascii_source_keeps_label() {
        let source = "A + é";
        let err = crate::checker::infix::validate(source).expect_err("é is not a token");
        assert_eq!(err.span().start, 4);

        let report = err.render(source);
        assert!(report.contains("A + é"), "{}", report);
        assert!(report.contains("lexer error"), "{}", report);
        assert!(report.contains(":1:5"), "{}", report);
    }

    #[test]
    fn render_after_non_ascii_prefix() {
        let source = "é + A";
        let err = InfixError::UnknownIdentifier {
            name: "A".into(),
            span: 5..6,
        };
        let report = err.render(source);
        assert!(report.contains("é + A"), "{}", report);
        assert!(report.contains(":1:5"), "{}", report);
        assert!(report.contains("only A, B, C and D are bound"), "{}", report);
    }

    #[test]
    fn render_widens_spans_inside_a_char() {
        assert_eq!(char_aligned("A + é", 4..5), 4..6);
        assert_eq!(char_aligned("A + é", 5..6), 4..6);
        assert_eq!(char_aligned("A", 3..9), 1..1);

        let err = InfixError::Syntax {
            message: "lexer error: unexpected input".into(),
            span: 4..5,
        };
        let report = err.render("A + é");
        assert!(report.contains(":1:5"), "{}", report);
    }
}
