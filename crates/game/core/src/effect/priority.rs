/// Resolution order of an effect. Lower values run first.
///
/// Within one priority, effects run in attachment order. Because overrides
/// reset the running total, base-replacing effects belong in
/// [`Priority::OVERRIDE`] so that additive effects in [`Priority::NORMAL`]
/// stack on top of them regardless of which was attached first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Priority(pub i32);

impl Priority {
    /// Band for effects that replace an attribute's base value.
    pub const OVERRIDE: Self = Self(-100);

    /// Band for ordinary additive effects.
    pub const NORMAL: Self = Self(0);

    /// Band for adjustments that must see everything else first.
    pub const LATE: Self = Self(100);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
