//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Knobs for a single parse. Every field has a default, so a partial JSON
/// object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Nesting of expressions, type names, blocks and XML elements allowed
    /// before the parser reports an error and unwinds.
    pub max_nesting_depth: u32,
    /// Diagnostics recorded per unit; later ones are dropped.
    pub max_diagnostics: usize,
    /// Accept `start`, `foreach`, `continue` and `map` as function and method
    /// names.
    pub allow_any_identifier_names: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: 200,
            max_diagnostics: 100,
            allow_any_identifier_names: true,
        }
    }
}

impl ParseOptions {
    /// Load options from a JSON object such as `{"maxNestingDepth": 64}`.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
