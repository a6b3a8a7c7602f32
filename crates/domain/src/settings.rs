//! Resolver settings
//!
//! Read-only execution options shared by every resolution call of a run.

use serde::{Deserialize, Serialize};

/// Default number of placeholder/expression passes before falling back to a
/// single pass over the original text.
pub const DEFAULT_MAX_DEPTH: usize = 16;

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Execution options for the resolution engine.
///
/// The value is created once before a run and shared read-only; concurrent
/// runs with different modes use separate instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverSettings {
    /// Dry-run mode: expressions and dynamic variables are not evaluated.
    #[serde(default)]
    pub dry_run: bool,

    /// Maximum number of resolution passes for a single step argument.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl ResolverSettings {
    /// Creates settings for a regular run.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dry_run: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates settings for a dry run.
    #[must_use]
    pub const fn dry_run() -> Self {
        Self {
            dry_run: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum number of resolution passes.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::new()
    }
}
