//! Parser for infix expressions.
//!
//! Transforms a token stream from the lexer into an expression tree.
//! Uses chumsky for parser combinators. Precedence is encoded structurally:
//!
//! ```text
//! expr   = term   { ("+" | "-") term }
//! term   = factor { ("*" | "/") factor }
//! factor = number | name | "(" expr ")"
//! ```
//!
//! Both levels are left associative. There are no unary operators, so `-1`
//! is not a literal.

use crate::ast::{BinaryOp, Expr};
use crate::error::InfixError;
use crate::lexer::{self, Token};
use chumsky::{input::ValueInput, prelude::*};

/// Span type used throughout the parser.
pub type Span = SimpleSpan;

/// Most tokens a single expression may contain.
///
/// Operator chains build a left-deep tree, and walking or dropping it recurses
/// once per operator. Real PID formulas are a few dozen tokens.
pub const MAX_TOKENS: usize = 4096;

/// Parse an infix expression into a tree.
///
/// Names are not resolved here; see [`crate::binder`].
pub fn parse(source: &str) -> Result<Expr, Vec<InfixError>> {
    // Tokenize with logos
    let tokens = lexer::tokenize(source).map_err(|errs| {
        errs.into_iter()
            .map(|e| InfixError::Syntax {
                message: format!("lexer error: {}", e),
                span: e.span,
            })
            .collect::<Vec<_>>()
    })?;

    // Operators outside the grammar get a dedicated error rather than
    // whatever the parser happens to say about them.
    let unsupported: Vec<_> = tokens
        .iter()
        .filter_map(|spanned| match &spanned.token {
            Token::Unsupported(op) => Some(InfixError::UnsupportedOperator {
                op: op.clone(),
                span: spanned.span.clone(),
            }),
            _ => None,
        })
        .collect();
    if !unsupported.is_empty() {
        return Err(unsupported);
    }

    if tokens.is_empty() {
        return Err(vec![InfixError::Syntax {
            message: "empty expression".to_string(),
            span: 0..source.len(),
        }]);
    }

    if tokens.len() > MAX_TOKENS {
        return Err(vec![InfixError::Syntax {
            message: format!(
                "expression too large: {} tokens, limit {}",
                tokens.len(),
                MAX_TOKENS
            ),
            span: 0..source.len(),
        }]);
    }

    let tokens: Vec<(Token, Span)> = tokens
        .into_iter()
        .map(|spanned| (spanned.token, spanned.span.into()))
        .collect();

    // End-of-input span
    let end_span: Span = (source.len()..source.len()).into();

    let parser = expr_parser();
    let result = parser.parse(tokens.as_slice().map(end_span, |(t, s)| (t, s)));

    result.into_result().map_err(|errs| {
        errs.into_iter()
            .map(|e| {
                let span = *e.span();
                InfixError::Syntax {
                    message: e.to_string(),
                    span: span.start..span.end,
                }
            })
            .collect()
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Parser Combinators - generic over input type
// ═══════════════════════════════════════════════════════════════════════════

/// Whole-input expression parser. Trailing tokens are an error.
fn expr_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Expr, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    recursive(|expr| {
        let factor = choice((
            number_parser(),
            name_parser(),
            expr.delimited_by(just(Token::LParen), just(Token::RParen)),
        ))
        .labelled("operand")
        .boxed();

        let mul_op = select! {
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
        };

        let add_op = select! {
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
        };

        // term: factor { mul_op factor }
        let term = factor
            .clone()
            .foldl(mul_op.then(factor).repeated(), |left, (op, right)| {
                Expr::binary(left, op, right)
            });

        // expr: term { add_op term }
        term.clone()
            .foldl(add_op.then(term).repeated(), |left, (op, right)| {
                Expr::binary(left, op, right)
            })
            .boxed()
    })
    .then_ignore(end())
    .labelled("expression")
}

/// Numeric literal.
fn number_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Expr, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    select! {
        Token::Number(text) => Expr::Number(text),
    }
    .labelled("number")
}

/// Identifier reference, with its span kept for the binder.
fn name_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Expr, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    select! {
        Token::Ident(name) => name,
    }
    .map_with(|name, e| {
        let span: Span = e.span();
        Expr::Name {
            name,
            span: span.start..span.end,
        }
    })
    .labelled("identifier")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::sexpr::format_expr;

    fn sexpr(source: &str) -> String {
        format_expr(&parse(source).expect("should parse"))
    }

    #[test]
    fn parse_single_name() {
        assert_eq!(sexpr("A"), "A");
    }

    #[test]
    fn parse_single_number() {
        assert_eq!(sexpr("255.0"), "255.0");
    }

    #[test]
    fn parse_product() {
        assert_eq!(sexpr("A * B"), "(* A B)");
    }

    #[test]
    fn parse_sum_with_decimal() {
        assert_eq!(sexpr("A + 255.0"), "(+ A 255.0)");
    }

    #[test]
    fn parse_grouped_division() {
        assert_eq!(sexpr("(A - B) / 10"), "(/ (- A B) 10)");
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(sexpr("A + B * C"), "(+ A (* B C))");
        assert_eq!(sexpr("A * B + C"), "(+ (* A B) C)");
    }

    #[test]
    fn left_associative() {
        assert_eq!(sexpr("A - B - C"), "(- (- A B) C)");
        assert_eq!(sexpr("A / B / C"), "(/ (/ A B) C)");
        assert_eq!(sexpr("A / B * C"), "(* (/ A B) C)");
    }

    #[test]
    fn nested_parens() {
        assert_eq!(sexpr("((A))"), "A");
        assert_eq!(sexpr("(A * (B + (C - D)))"), "(* A (+ B (- C D)))");
    }

    #[test]
    fn obd_style_formulas() {
        assert_eq!(sexpr("(256 * A + B) / 4"), "(/ (+ (* 256 A) B) 4)");
        assert_eq!(sexpr("A * 100 / 255"), "(/ (* A 100) 255)");
        assert_eq!(sexpr("A - 40"), "(- A 40)");
    }

    #[test]
    fn names_are_not_resolved_by_parser() {
        assert_eq!(sexpr("E + 1"), "(+ E 1)");
    }

    #[test]
    fn name_spans_are_recorded() {
        let expr = parse("A +  foo").expect("should parse");
        let names = expr.names();
        assert_eq!(names, vec![("A", 0..1), ("foo", 5..8)]);
    }

    #[test]
    fn error_empty() {
        let errs = parse("").expect_err("empty should fail");
        assert!(matches!(errs[0], InfixError::Syntax { .. }));
        assert!(parse("   ").is_err());
    }

    #[test]
    fn error_unbalanced_parens() {
        assert!(parse("(A + B").is_err());
        assert!(parse("A + B)").is_err());
        assert!(parse("()").is_err());
    }

    #[test]
    fn error_dangling_operator() {
        assert!(parse("A +").is_err());
        assert!(parse("* A").is_err());
        assert!(parse("A * / B").is_err());
    }

    #[test]
    fn error_unary_minus() {
        assert!(parse("-A").is_err());
        assert!(parse("A + -1").is_err());
    }

    #[test]
    fn error_adjacent_operands() {
        assert!(parse("A B").is_err());
        assert!(parse("2A").is_err());
        assert!(parse("1.5.3").is_err());
    }

    #[test]
    fn error_function_call() {
        assert!(parse("max(A, B)").is_err());
    }

    #[test]
    fn error_unsupported_operator_is_tagged() {
        let errs = parse("A ** 2").expect_err("should fail");
        assert_eq!(
            errs,
            vec![InfixError::UnsupportedOperator {
                op: "**".into(),
                span: 2..4,
            }]
        );

        let errs = parse("A % 2").expect_err("should fail");
        assert!(matches!(&errs[0], InfixError::UnsupportedOperator { op, .. } if op == "%"));

        let errs = parse("A // 2").expect_err("should fail");
        assert!(matches!(&errs[0], InfixError::UnsupportedOperator { op, .. } if op == "//"));
    }

    #[test]
    fn long_chain_is_rejected_not_overflowed() {
        let source = vec!["A"; 100_000].join("+");
        let errs = parse(&source).expect_err("too many tokens");
        assert_eq!(errs.len(), 1);
        match &errs[0] {
            InfixError::Syntax { message, span } => {
                assert!(message.starts_with("expression too large"), "{}", message);
                assert_eq!(*span, 0..source.len());
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn chain_at_the_limit_parses() {
        // n terms and n - 1 operators
        let terms = (MAX_TOKENS + 1) / 2;
        let source = vec!["B"; terms].join(" * ");
        assert!(parse(&source).is_ok());

        let over = vec!["B"; terms + 1].join(" * ");
        assert!(parse(&over).is_err());
    }

    #[test]
    fn error_lexer_garbage() {
        let errs = parse("A + 'x'").expect_err("should fail");
        assert!(matches!(&errs[0], InfixError::Syntax { message, .. } if message.contains("lexer error")));
    }
}
