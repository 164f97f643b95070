//! Expression tree types for infix expressions.
//!
//! This module provides:
//! - Tree type definitions (`types` module, re-exported at this level)
//! - S-expression formatter for test snapshots (`sexpr` module)

mod types;
pub mod sexpr;

pub use types::*;
