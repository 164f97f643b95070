//! Name binding for parsed expressions.
//!
//! Tracks which names resolve without caring about their values. An
//! expression is only meaningful if every name it mentions is bound.

use std::collections::BTreeSet;

use crate::ast::{Expr, Input};
use crate::error::InfixError;

/// The set of names an expression may reference.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: BTreeSet<String>,
}

impl SymbolTable {
    /// An empty table. Nothing resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// The four CAN data inputs, `A` through `D`.
    pub fn inputs() -> Self {
        let mut table = Self::new();
        for input in Input::ALL {
            table.bind(input.name());
        }
        table
    }

    /// Bind a name.
    pub fn bind(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Check if a name is bound. Names are case-sensitive.
    pub fn is_bound(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// All bound names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }
}

/// Check that every name in `expr` is bound in `symbols`.
///
/// Reports the leftmost unbound name.
pub fn bind(expr: &Expr, symbols: &SymbolTable) -> Result<(), InfixError> {
    match expr
        .names()
        .into_iter()
        .find(|(name, _)| !symbols.is_bound(name))
    {
        Some((name, span)) => Err(InfixError::UnknownIdentifier {
            name: name.to_string(),
            span,
        }),
        None => Ok(()),
    }
}
