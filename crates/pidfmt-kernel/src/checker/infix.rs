//! infix — arithmetic expressions over the CAN data inputs.
//!
//! Accepts strings such as:
//!
//! ```text
//! A * B
//! A + 255.0
//! (A - B) / 10
//! ```
//!
//! The expression is parsed and its names bound, never evaluated.

use serde_json::Value;

use crate::ast::Expr;
use crate::binder::{self, SymbolTable};
use crate::checker::{FormatChecker, FormatError, FormatErrorKind};
use crate::error::InfixError;
use crate::parser;

/// Format name for infix expressions.
pub const FORMAT_NAME: &str = "infix";

/// Parse `expression` and bind its names against `A`..`D`.
///
/// Returns the first problem found; the tree on success.
pub fn validate(expression: &str) -> Result<Expr, InfixError> {
    let expr = parser::parse(expression).map_err(first_error(expression))?;
    binder::bind(&expr, &SymbolTable::inputs())?;
    Ok(expr)
}

fn first_error(expression: &str) -> impl FnOnce(Vec<InfixError>) -> InfixError + '_ {
    move |errs| {
        errs.into_iter().next().unwrap_or_else(|| InfixError::Syntax {
            message: "invalid expression".to_string(),
            span: 0..expression.len(),
        })
    }
}

/// Accept `expression` if it is valid infix over `A`..`D`.
pub fn check(expression: &str) -> Result<(), FormatError> {
    match validate(expression) {
        Ok(_) => {
            tracing::trace!(format = FORMAT_NAME, expression, "accepted");
            Ok(())
        }
        Err(cause) => {
            tracing::debug!(format = FORMAT_NAME, expression, error = %cause, "rejected");
            Err(malformed(&Value::String(expression.to_string()), expression).with_cause(cause))
        }
    }
}

fn malformed(instance: &Value, shown: &str) -> FormatError {
    FormatError::new(
        FormatErrorKind::MalformedExpression,
        format!("\"{}\" is not valid infix", shown),
        instance,
    )
}

/// The `"infix"` format checker.
///
/// Non-string values are rejected: they cannot be expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfixFormat;

impl FormatChecker for InfixFormat {
    fn name(&self) -> &str {
        FORMAT_NAME
    }

    fn check(&self, instance: &Value) -> Result<(), FormatError> {
        match instance {
            Value::String(expression) => check(expression),
            other => {
                tracing::debug!(format = FORMAT_NAME, instance = %other, "rejected non-string");
                Err(malformed(other, &other.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_documented_examples() {
        assert!(check("A * B").is_ok());
        assert!(check("A + 255.0").is_ok());
        assert!(check("(A - B) / 10").is_ok());
    }

    #[test]
    fn rejection_carries_expression_and_cause() {
        let err = check("E + 1").expect_err("E is unbound");
        assert_eq!(err.kind(), FormatErrorKind::MalformedExpression);
        assert_eq!(err.message(), "\"E + 1\" is not valid infix");
        assert_eq!(err.instance(), &json!("E + 1"));
        assert!(matches!(
            err.cause(),
            Some(InfixError::UnknownIdentifier { name, .. }) if name == "E"
        ));
    }

    #[test]
    fn validate_returns_tree() {
        let expr = validate("A / 4").expect("valid");
        assert_eq!(crate::ast::sexpr::format_expr(&expr), "(/ A 4)");
    }

    #[test]
    fn checker_rejects_non_strings() {
        let err = InfixFormat.check(&json!(42)).expect_err("number is not infix");
        assert_eq!(err.kind(), FormatErrorKind::MalformedExpression);
        assert_eq!(err.instance(), &json!(42));
        assert!(err.cause().is_none());

        assert!(InfixFormat.check(&json!(null)).is_err());
        assert!(InfixFormat.check(&json!(["A"])).is_err());
    }

    #[test]
    fn checker_name() {
        assert_eq!(InfixFormat.name(), "infix");
    }
}
