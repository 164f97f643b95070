//! Checker configuration.
//!
//! Embedders build these directly or deserialize them from their own config
//! files; pidfmt does no file loading.

use serde::{Deserialize, Serialize};

/// What to do with a passthrough PID whose `type` is not a known tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTypePolicy {
    /// No width rule applies, so the descriptor passes.
    #[default]
    Accept,
    /// Fail with `unknown-type`.
    Reject,
}

/// Configuration for the `"nop-bytes"` checker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NopBytesConfig {
    pub unknown_types: UnknownTypePolicy,
}

impl NopBytesConfig {
    /// Reject type tags outside the known set instead of passing them.
    pub fn strict() -> Self {
        Self {
            unknown_types: UnknownTypePolicy::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_accept_unknown_types() {
        assert_eq!(NopBytesConfig::default().unknown_types, UnknownTypePolicy::Accept);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let config: NopBytesConfig = serde_json::from_str("{}").expect("valid config");
        assert_eq!(config, NopBytesConfig::default());
    }

    #[test]
    fn deserialize_reject() {
        let config: NopBytesConfig =
            serde_json::from_str(r#"{"unknown_types": "reject"}"#).expect("valid config");
        assert_eq!(config, NopBytesConfig::strict());
    }

    #[test]
    fn deserialize_bad_policy_fails() {
        assert!(serde_json::from_str::<NopBytesConfig>(r#"{"unknown_types": "maybe"}"#).is_err());
    }
}
