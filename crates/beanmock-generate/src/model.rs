use serde::{Deserialize, Serialize};

/// Default bound on nested bean construction.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Largest `max_depth` the engine accepts. Nested builds recurse on the
/// native stack, so the bound itself must stay well inside it.
pub const MAX_DEPTH_LIMIT: usize = 128;

/// Options for the mock engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Deepest nesting level a recursive build may reach.
    pub max_depth: usize,
    /// What happens when the bound is hit.
    pub depth_policy: DepthPolicy,
    /// Recursion policy used by `build` and `fill` without an explicit flag.
    pub default_recurse: bool,
}

impl BuildOptions {
    /// Copy of these options with `max_depth` capped at [`MAX_DEPTH_LIMIT`].
    pub fn clamped(self) -> Self {
        Self {
            max_depth: self.max_depth.min(MAX_DEPTH_LIMIT),
            ..self
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            depth_policy: DepthPolicy::Fail,
            default_recurse: true,
        }
    }
}

/// Behavior once nested building reaches `max_depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthPolicy {
    /// Abort the whole call with `MaxDepthExceeded`.
    #[default]
    Fail,
    /// Leave the too-deep field unset and carry on.
    Truncate,
}

/// How registered scalar rules produce values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueMode {
    /// Evaluate every rule once when the registry is built and hand out the
    /// same value for the registry's whole lifetime.
    #[default]
    Static,
    /// Draw a new value for each populated field.
    Fresh,
}

/// Inclusive integer range for a numeric rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: i64,
    pub max: i64,
}

impl NumericRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}
