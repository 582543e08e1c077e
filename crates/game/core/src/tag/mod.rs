//! Hierarchical labels and label sets.
//!
//! A [`Tag`] names a node in a dot-delimited hierarchy such as
//! `weapon.martial.sword`. A broad tag *covers* every tag below it, so a
//! proficiency in `weapon.martial` applies to a `weapon.martial.sword` attack
//! while the reverse does not hold.
//!
//! [`Container`] is the set type used for proficiencies, item categories and
//! action tags. Its matching is asymmetric: the container supplies the broad
//! side, the query supplies the specific side.

mod container;

pub use container::Container;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::CoreConfig;
use crate::error::{ErrorSeverity, RulesError};

/// Errors produced while parsing a tag path.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("tag path is empty")]
    Empty,

    #[error("tag path `{path}` contains an empty segment")]
    EmptySegment { path: String },
}

impl RulesError for TagError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "TAG_EMPTY",
            Self::EmptySegment { .. } => "TAG_EMPTY_SEGMENT",
        }
    }
}

/// Immutable identifier for a dot-delimited hierarchical path.
///
/// Tags are case-sensitive and never normalized after construction. Cloning
/// is cheap: the path is shared.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(Arc<str>);

impl Tag {
    /// Parses a tag from a dot-delimited path.
    ///
    /// Empty paths and empty segments (`a..b`, `.a`, `a.`) are rejected.
    pub fn from_path(path: &str) -> Result<Self, TagError> {
        if path.is_empty() {
            return Err(TagError::Empty);
        }
        if path.split(CoreConfig::TAG_SEPARATOR).any(str::is_empty) {
            return Err(TagError::EmptySegment {
                path: path.to_owned(),
            });
        }
        Ok(Self(Arc::from(path)))
    }

    /// Builds a tag from a path literal, panicking on malformed input.
    ///
    /// Intended for compile-time constants in content and tests; runtime
    /// input should go through [`Tag::from_path`].
    #[track_caller]
    pub fn new(path: &str) -> Self {
        match Self::from_path(path) {
            Ok(tag) => tag,
            Err(err) => panic!("invalid tag literal: {err}"),
        }
    }

    /// Returns the full path.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `other` equals this tag or lies below it in the hierarchy.
    ///
    /// `weapon.martial` covers `weapon.martial.sword` but not `weapon.martialarts`.
    pub fn covers(&self, other: &Tag) -> bool {
        match other.as_str().strip_prefix(self.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with(CoreConfig::TAG_SEPARATOR),
            None => false,
        }
    }

    /// Iterates the path segments from root to leaf.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(CoreConfig::TAG_SEPARATOR)
    }

    /// Number of segments in the path (a root tag has depth 1).
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// The tag one level up, or `None` for a root tag.
    pub fn parent(&self) -> Option<Tag> {
        self.0
            .rsplit_once(CoreConfig::TAG_SEPARATOR)
            .map(|(parent, _)| Self(Arc::from(parent)))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({:?})", self.as_str())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s)
    }
}

impl TryFrom<&str> for Tag {
    type Error = TagError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_path(value)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// Tags travel as plain strings and are validated again on the way in.
#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let path = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_path(&path).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_is_reflexive() {
        assert!(Tag::new("a.b").covers(&Tag::new("a.b")));
    }

    #[test]
    fn covers_descendants_but_not_ancestors() {
        assert!(Tag::new("a.b").covers(&Tag::new("a.b.c")));
        assert!(Tag::new("a").covers(&Tag::new("a.b.c")));
        assert!(!Tag::new("a.b.c").covers(&Tag::new("a.b")));
    }

    #[test]
    fn covers_respects_segment_boundaries() {
        let martial = Tag::new("weapon.martial");
        assert!(!martial.covers(&Tag::new("weapon.martialarts")));
        assert!(!martial.covers(&Tag::new("weapon")));
        assert!(!martial.covers(&Tag::new("armor.martial")));
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!(!Tag::new("Weapon").covers(&Tag::new("weapon.sword")));
        assert_ne!(Tag::new("weapon"), Tag::new("Weapon"));
    }

    #[test]
    fn rejects_empty_paths() {
        assert_eq!(Tag::from_path(""), Err(TagError::Empty));
        for path in ["a..b", ".a", "a.", "."] {
            assert!(
                matches!(Tag::from_path(path), Err(TagError::EmptySegment { .. })),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    #[should_panic(expected = "invalid tag literal")]
    fn new_panics_on_empty_literal() {
        let _ = Tag::new("");
    }

    #[test]
    fn hierarchy_helpers() {
        let sword = Tag::new("weapon.martial.sword");
        assert_eq!(sword.depth(), 3);
        assert_eq!(
            sword.segments().collect::<Vec<_>>(),
            ["weapon", "martial", "sword"]
        );
        assert_eq!(sword.parent(), Some(Tag::new("weapon.martial")));
        assert_eq!(Tag::new("weapon").parent(), None);
        assert_eq!("weapon.martial".parse::<Tag>(), Ok(Tag::new("weapon.martial")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_plain_string() {
        let tag = Tag::new("armor.heavy");
        assert_eq!(serde_json::to_string(&tag).unwrap(), "\"armor.heavy\"");
        assert!(serde_json::from_str::<Tag>("\"armor..heavy\"").is_err());
    }
}
