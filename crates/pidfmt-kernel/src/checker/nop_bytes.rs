//! nop-bytes — CAN byte count vs. output type for passthrough PIDs.
//!
//! A passthrough (`"val": "nop"`) PID hands its raw CAN bytes straight to the
//! output type, so:
//!
//! - a `float` needs exactly 4 bytes, since the bytes are read as IEEE-754
//!   binary32;
//! - an integer type must be at least as wide as the byte count, so that
//!   output only ever widens.
//!
//! Formula PIDs (any other `val`) are not constrained here.

use serde_json::Value;

use pidfmt_types::{PidType, NOP};

use crate::checker::{FormatChecker, FormatError, FormatErrorKind};
use crate::config::{NopBytesConfig, UnknownTypePolicy};

/// Format name for the passthrough byte-count rule.
pub const FORMAT_NAME: &str = "nop-bytes";

/// Check `descriptor` with the default configuration.
pub fn check(descriptor: &Value) -> Result<(), FormatError> {
    NopBytesFormat::default().check_descriptor(descriptor)
}

/// The `"nop-bytes"` format checker.
#[derive(Debug, Clone, Default)]
pub struct NopBytesFormat {
    config: NopBytesConfig,
}

impl NopBytesFormat {
    pub fn new(config: NopBytesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NopBytesConfig {
        &self.config
    }

    /// Apply the rules to one PID descriptor. The first violation wins.
    pub fn check_descriptor(&self, desc: &Value) -> Result<(), FormatError> {
        let result = self.evaluate(desc);
        match &result {
            Ok(()) => tracing::trace!(format = FORMAT_NAME, "accepted"),
            Err(e) => tracing::debug!(
                format = FORMAT_NAME,
                kind = %e.kind(),
                descriptor = %desc,
                "rejected"
            ),
        }
        result
    }

    fn evaluate(&self, desc: &Value) -> Result<(), FormatError> {
        let reject = |kind, message: String| Err(FormatError::new(kind, message, desc));

        let Some(expr) = desc.get("expr") else {
            return reject(
                FormatErrorKind::MissingExprKey,
                format!("no \"expr\" key in {}", desc),
            );
        };

        let Some(val) = expr.get("val") else {
            return reject(
                FormatErrorKind::MissingValKey,
                format!("no \"val\" key in expr in {}", desc),
            );
        };

        if val.as_str() != Some(NOP) {
            return Ok(());
        }

        let Some(raw_bytes) = desc.get("bytes") else {
            return reject(
                FormatErrorKind::MissingBytesKey,
                format!("no \"bytes\" key in {}", desc),
            );
        };

        let Some(can_bytes) = coerce_int(raw_bytes) else {
            return reject(
                FormatErrorKind::NonIntegerBytes,
                format!("\"bytes\" value is not an int, in {}", desc),
            );
        };

        let Some(raw_type) = expr.get("type") else {
            return reject(
                FormatErrorKind::MissingTypeKey,
                format!("no \"type\" key in expr in {}", desc),
            );
        };

        let Some(pid_type) = raw_type.as_str().and_then(PidType::from_tag) else {
            return match self.config.unknown_types {
                UnknownTypePolicy::Accept => Ok(()),
                UnknownTypePolicy::Reject => reject(
                    FormatErrorKind::UnknownType,
                    format!("unrecognized output type {} in {}", raw_type, desc),
                ),
            };
        };

        let fits = i64::try_from(can_bytes)
            .map(|n| pid_type.allowed_bytes().contains(&n))
            .unwrap_or(false);
        if fits {
            return Ok(());
        }

        let (kind, rule) = match pid_type {
            PidType::Float => (
                FormatErrorKind::FloatWidthMismatch,
                "float output type must have 4 CAN bytes",
            ),
            PidType::Int8 | PidType::Uint8 => (
                FormatErrorKind::Int8WidthMismatch,
                "int8/uint8 types must have 1 CAN byte",
            ),
            PidType::Int16 | PidType::Uint16 => (
                FormatErrorKind::Int16WidthMismatch,
                "int16/uint16 types must have 1-2 CAN bytes",
            ),
            PidType::Int32 | PidType::Uint32 => (
                FormatErrorKind::Int32WidthMismatch,
                "int32/uint32 types must have 1-4 CAN bytes",
            ),
        };
        reject(kind, format!("{} in {}", rule, desc))
    }
}

impl FormatChecker for NopBytesFormat {
    fn name(&self) -> &str {
        FORMAT_NAME
    }

    fn check(&self, instance: &Value) -> Result<(), FormatError> {
        self.check_descriptor(instance)
    }
}

/// Integer coercion for the `bytes` field.
///
/// Integers pass; floats only when integral; strings when their trimmed text
/// is a signed decimal integer. Nothing else coerces.
fn coerce_int(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i128::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(i128::from(u))
            } else {
                // `as` saturates, so integral floats beyond i128 land outside
                // every width row instead of failing coercion.
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i128)
            }
        }
        Value::String(s) => s.trim().parse::<i128>().ok(),
        _ => None,
    }
}
