use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TransformConfig {
    /// Deepest selection nesting accepted before the transformation fails.
    ///
    /// Can also be set via the `TYPEGEN_MAX_DEPTH` environment variable.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Type `__typename` as the type name literal (for example `"Droid"`) when the
    /// selection can only be a single object type, instead of `string`.
    ///
    /// Can also be set via the `TYPEGEN_EXACT_TYPENAME` environment variable.
    #[serde(default = "default_exact_typename")]
    pub exact_typename: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            exact_typename: default_exact_typename(),
        }
    }
}

fn default_max_depth() -> usize {
    64
}

fn default_exact_typename() -> bool {
    false
}
