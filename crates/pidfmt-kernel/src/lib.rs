//! pidfmt-kernel: Format checkers for PID decoding schemas.
//!
//! This crate provides:
//!
//! - **Lexer**: Tokenizes infix expressions using logos
//! - **Parser**: Builds expression trees from tokens using chumsky
//! - **Binder**: Resolves names against the inputs `A`..`D`
//! - **Checkers**: The `"infix"` and `"nop-bytes"` format predicates
//! - **Registry**: Name → checker lookup for a schema engine to call into
//!
//! # Example
//!
//! ```
//! use pidfmt_kernel::FormatRegistry;
//! use serde_json::json;
//!
//! let registry = FormatRegistry::with_defaults();
//! assert_eq!(registry.check("infix", &json!("(A * 256 + B) / 4")), Some(Ok(())));
//!
//! let desc = json!({"expr": {"val": "nop", "type": "float"}, "bytes": 2});
//! let err = registry.check("nop-bytes", &desc).and_then(Result::err);
//! assert!(err.is_some());
//! ```

pub mod ast;
pub mod binder;
pub mod checker;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod registry;

pub use checker::{FormatChecker, FormatError, FormatErrorKind, InfixFormat, NopBytesFormat};
pub use config::{NopBytesConfig, UnknownTypePolicy};
pub use error::InfixError;
pub use pidfmt_types::PidType;
pub use registry::FormatRegistry;
