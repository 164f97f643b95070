//! Format checkers for PID schema documents.
//!
//! A format checker is a named predicate a schema engine calls with the value
//! found at a location annotated with its format name. It either accepts the
//! value or rejects it with a [`FormatError`]; the engine decides what to do
//! with the rejection.
//!
//! - [`infix`]: `"infix"`, arithmetic over the inputs `A`..`D`
//! - [`nop_bytes`]: `"nop-bytes"`, CAN byte count vs. output type for
//!   passthrough PIDs

pub mod infix;
pub mod nop_bytes;

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::error::InfixError;

pub use infix::InfixFormat;
pub use nop_bytes::NopBytesFormat;

/// A named predicate over JSON values.
///
/// Implementations hold no mutable state and may be shared across threads.
pub trait FormatChecker: Send + Sync {
    /// Format name as written in the schema (`"format": "<name>"`).
    fn name(&self) -> &str;

    /// Accept or reject one value.
    fn check(&self, instance: &Value) -> Result<(), FormatError>;
}

/// The specific rule a value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatErrorKind {
    MalformedExpression,
    MissingExprKey,
    MissingValKey,
    MissingBytesKey,
    NonIntegerBytes,
    MissingTypeKey,
    FloatWidthMismatch,
    Int8WidthMismatch,
    Int16WidthMismatch,
    Int32WidthMismatch,
    /// Only raised when unknown types are configured to be rejected.
    UnknownType,
}

impl FormatErrorKind {
    /// Stable kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            FormatErrorKind::MalformedExpression => "malformed-expression",
            FormatErrorKind::MissingExprKey => "missing-expr-key",
            FormatErrorKind::MissingValKey => "missing-val-key",
            FormatErrorKind::MissingBytesKey => "missing-bytes-key",
            FormatErrorKind::NonIntegerBytes => "non-integer-bytes",
            FormatErrorKind::MissingTypeKey => "missing-type-key",
            FormatErrorKind::FloatWidthMismatch => "float-width-mismatch",
            FormatErrorKind::Int8WidthMismatch => "int8-width-mismatch",
            FormatErrorKind::Int16WidthMismatch => "int16-width-mismatch",
            FormatErrorKind::Int32WidthMismatch => "int32-width-mismatch",
            FormatErrorKind::UnknownType => "unknown-type",
        }
    }

    /// True when a required key is absent or not coercible; false when the
    /// value is present but breaks a domain rule.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            FormatErrorKind::MissingExprKey
                | FormatErrorKind::MissingValKey
                | FormatErrorKind::MissingBytesKey
                | FormatErrorKind::NonIntegerBytes
                | FormatErrorKind::MissingTypeKey
        )
    }
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value rejected by a format checker.
///
/// Carries the whole rejected value for context. Expression rejections also
/// keep the underlying [`InfixError`] as their source.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct FormatError {
    kind: FormatErrorKind,
    message: String,
    instance: Value,
    #[source]
    cause: Option<InfixError>,
}

impl FormatError {
    pub(crate) fn new(kind: FormatErrorKind, message: String, instance: &Value) -> Self {
        Self {
            kind,
            message,
            instance: instance.clone(),
            cause: None,
        }
    }

    pub(crate) fn with_cause(mut self, cause: InfixError) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn kind(&self) -> FormatErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The value that was checked.
    pub fn instance(&self) -> &Value {
        &self.instance
    }

    pub fn cause(&self) -> Option<&InfixError> {
        self.cause.as_ref()
    }
}
