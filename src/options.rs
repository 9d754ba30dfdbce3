//! Parser settings.

use serde::{Deserialize, Serialize};

/// Knobs for a top-level parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Check the `gitolite-admin` config invariants once the whole file is read.
    /// Nested parses never check them.
    pub check_admin_config: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            check_admin_config: true,
        }
    }
}

impl ParserOptions {
    /// Options for fragments that are not complete admin files.
    pub fn lenient() -> Self {
        ParserOptions {
            check_admin_config: false,
        }
    }
}
