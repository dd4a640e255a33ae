//! Style definition configuration

use serde::{Deserialize, Serialize};

use crate::error::{StyleError, StyleResult};

/// Settings for one `StyleDef`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Prefix of generated class names (`<prefix>-<n>`)
    pub class_prefix: String,
    /// Reuse rule sets for structurally identical declarations
    pub memoize: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            class_prefix: String::from("css"),
            memoize: true,
        }
    }
}

impl StyleConfig {
    /// Check that the prefix yields usable class names
    pub fn validate(&self) -> StyleResult<()> {
        let invalid = |reason| StyleError::InvalidPrefix {
            prefix: self.class_prefix.clone(),
            reason,
        };

        let first = self.class_prefix.chars().next().ok_or_else(|| invalid("empty"))?;
        if first.is_ascii_digit() {
            return Err(invalid("must not start with a digit"));
        }
        if !self
            .class_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid("only ASCII letters, digits, '-' and '_' are allowed"));
        }
        Ok(())
    }
}
