//! Format registry for looking up checkers by format name.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::checker::{FormatChecker, FormatError, InfixFormat, NopBytesFormat};
use crate::config::NopBytesConfig;

/// Registry of available format checkers.
#[derive(Default, Clone)]
pub struct FormatRegistry {
    checkers: HashMap<String, Arc<dyn FormatChecker>>,
}

impl FormatRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `"infix"` and `"nop-bytes"` using default settings.
    pub fn with_defaults() -> Self {
        Self::with_config(NopBytesConfig::default())
    }

    /// Registry with both checkers, `"nop-bytes"` configured as given.
    pub fn with_config(nop_bytes: NopBytesConfig) -> Self {
        let mut registry = Self::new();
        registry.register(InfixFormat);
        registry.register(NopBytesFormat::new(nop_bytes));
        registry
    }

    /// Register a checker, replacing any with the same name.
    pub fn register(&mut self, checker: impl FormatChecker + 'static) {
        let name = checker.name().to_string();
        self.checkers.insert(name, Arc::new(checker));
    }

    /// Look up a checker by format name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn FormatChecker>> {
        self.checkers.get(name).cloned()
    }

    /// Check if a format is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.checkers.contains_key(name)
    }

    /// Run the checker registered under `name`.
    ///
    /// Returns `None` for unregistered formats; schema engines conventionally
    /// ignore formats they don't know.
    pub fn check(&self, name: &str, instance: &Value) -> Option<Result<(), FormatError>> {
        self.checkers.get(name).map(|checker| checker.check(instance))
    }

    /// List all format names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.checkers.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Number of registered checkers.
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("checkers", &self.names())
            .finish()
    }
}
