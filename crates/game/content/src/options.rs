//! Construction options passed to archetype constructors.

use std::collections::BTreeMap;

use skirmish_core::ActorId;

use crate::error::RegistryError;

/// Per-instance knobs for an archetype.
///
/// Constructors read what they understand and ignore the rest. Values are
/// integers because every tunable in the rules core is one.
///
/// ```
/// # use skirmish_content::Options;
/// let options = Options::new().named("Sir Roland").with_value("base", 18);
/// assert_eq!(options.name_or("Knight"), "Sir Roland");
/// assert_eq!(options.value_or("base", 16), 18);
/// assert_eq!(options.value_or("bonus", 1), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Options {
    pub id: Option<ActorId>,
    pub name: Option<String>,
    pub values: BTreeMap<String, i32>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: ActorId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: i32) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn value(&self, key: &str) -> Option<i32> {
        self.values.get(key).copied()
    }

    pub fn value_or(&self, key: &str, default: i32) -> i32 {
        self.value(key).unwrap_or(default)
    }

    pub fn name_or(&self, default: &str) -> String {
        self.name.clone().unwrap_or_else(|| default.to_owned())
    }

    /// Reads `key`, rejecting values outside `range`.
    pub fn bounded(
        &self,
        archetype: &str,
        key: &str,
        default: i32,
        range: std::ops::RangeInclusive<i32>,
    ) -> Result<i32, RegistryError> {
        let value = self.value_or(key, default);
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(RegistryError::invalid_option(
                archetype,
                key,
                format!("must be within {}..={}, got {value}", range.start(), range.end()),
            ))
        }
    }

    /// The actor id for creature constructors.
    pub fn require_id(&self, archetype: &str) -> Result<ActorId, RegistryError> {
        self.id
            .ok_or_else(|| RegistryError::invalid_option(archetype, "id", "is required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_rejects_out_of_range() {
        let options = Options::new().with_value("base", 40);
        let err = options.bounded("armor.plate", "base", 16, 0..=30).unwrap_err();
        assert_eq!(
            err.to_string(),
            "archetype `armor.plate`: option `base` must be within 0..=30, got 40"
        );
        assert_eq!(Options::new().bounded("armor.plate", "base", 16, 0..=30), Ok(16));
    }

    #[test]
    fn creature_id_is_required() {
        assert!(Options::new().require_id("creature.fighter").is_err());
        assert_eq!(
            Options::new().with_id(ActorId(4)).require_id("creature.fighter"),
            Ok(ActorId(4))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reads_partial_json() {
        let options: Options = serde_json::from_str(r#"{"name":"Guard"}"#).unwrap();
        assert_eq!(options.name.as_deref(), Some("Guard"));
        assert!(options.values.is_empty());
    }
}
