use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphOptions {
    /// Fail on duplicate inserts, missing removals and dangling edges
    /// instead of tolerating them.
    #[serde(default)]
    pub strict: bool,
}

impl GraphOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn lenient() -> Self {
        Self { strict: false }
    }
}
