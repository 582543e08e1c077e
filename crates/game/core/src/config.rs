/// Rules-core configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreConfig {
    /// When set, the dispatcher reports unbalanced `end()` calls as errors and
    /// treats a dispatcher dropped with open spans as a failed debug assertion.
    /// When clear, both are logged and otherwise tolerated.
    pub strict_spans: bool,
}

impl CoreConfig {
    // ===== compile-time constants =====
    /// Separator between tag path segments.
    pub const TAG_SEPARATOR: char = '.';
    /// Ability score whose modifier is zero.
    pub const ABILITY_BASELINE: i32 = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STRICT_SPANS: bool = false;
    pub const DEFAULT_PROFICIENCY_BONUS: i32 = 2;

    pub fn new() -> Self {
        Self {
            strict_spans: Self::DEFAULT_STRICT_SPANS,
        }
    }

    pub fn strict() -> Self {
        Self { strict_spans: true }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
