//! pidfmt-types: Pure data types for PID decoding descriptors.
//!
//! These are shared between the format checkers and anything that wants to
//! reason about output types without pulling in the parser.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// The marker value of `expr.val` for passthrough PIDs.
pub const NOP: &str = "nop";

/// Output numeric type of a PID.
///
/// Serialized as its lowercase tag (`"uint16"`, `"float"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PidType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    /// IEEE-754 binary32.
    Float,
}

impl PidType {
    /// Every recognized type, in table order.
    pub const ALL: [PidType; 7] = [
        PidType::Float,
        PidType::Int8,
        PidType::Uint8,
        PidType::Int16,
        PidType::Uint16,
        PidType::Int32,
        PidType::Uint32,
    ];

    /// Look up a type by its tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.tag() == tag)
    }

    /// The schema tag for this type.
    pub fn tag(self) -> &'static str {
        match self {
            PidType::Int8 => "int8",
            PidType::Uint8 => "uint8",
            PidType::Int16 => "int16",
            PidType::Uint16 => "uint16",
            PidType::Int32 => "int32",
            PidType::Uint32 => "uint32",
            PidType::Float => "float",
        }
    }

    /// Storage size of the output type in bytes.
    pub fn byte_capacity(self) -> u8 {
        match self {
            PidType::Int8 | PidType::Uint8 => 1,
            PidType::Int16 | PidType::Uint16 => 2,
            PidType::Int32 | PidType::Uint32 | PidType::Float => 4,
        }
    }

    /// Raw CAN byte counts a passthrough PID of this type may carry.
    ///
    /// Integers may be zero/sign-extended from fewer bytes, except the 8-bit
    /// types which have nothing to extend from. A float is reinterpreted
    /// bit-for-bit, so it needs exactly its own width.
    pub fn allowed_bytes(self) -> RangeInclusive<i64> {
        let cap = i64::from(self.byte_capacity());
        match self {
            PidType::Float => cap..=cap,
            _ => 1..=cap,
        }
    }
}

impl fmt::Display for PidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
