//! Tag sets with hierarchical matching.

use std::collections::BTreeSet;

use super::Tag;

/// An unordered set of [`Tag`]s.
///
/// Duplicates collapse on insertion. Iteration is sorted by path so logs and
/// serialized forms are reproducible.
///
/// # Matching
///
/// `has_any` is asymmetric containment: `self` supplies the broad tags and
/// the query supplies the specific ones.
///
/// ```
/// # use skirmish_core::{Container, Tag};
/// let proficiencies = Container::from_iter([Tag::new("weapon.martial")]);
/// let attack = Container::from_iter([Tag::new("weapon.martial.sword")]);
/// assert!(proficiencies.has_any(&attack));
/// assert!(!attack.has_any(&proficiencies));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Container {
    tags: BTreeSet<Tag>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tag; returns false if it was already present.
    pub fn add(&mut self, tag: Tag) -> bool {
        self.tags.insert(tag)
    }

    /// Builder-style insertion.
    pub fn with(mut self, tag: Tag) -> Self {
        self.add(tag);
        self
    }

    /// Removes an exact tag; returns false if it was not present.
    pub fn remove(&mut self, tag: &Tag) -> bool {
        self.tags.remove(tag)
    }

    /// True iff some tag in `self` covers some tag in `query`.
    ///
    /// An empty container matches nothing, and nothing matches an empty query.
    pub fn has_any(&self, query: &Container) -> bool {
        query.tags.iter().any(|q| self.has(q))
    }

    /// True iff some tag in `self` covers `tag`.
    pub fn has(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|c| c.covers(tag))
    }

    /// True iff `tag` is literally a member, without hierarchy traversal.
    pub fn match_exact(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }
}

impl FromIterator<Tag> for Container {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl Extend<Tag> for Container {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        self.tags.extend(iter);
    }
}

impl From<Tag> for Container {
    fn from(tag: Tag) -> Self {
        Self::new().with(tag)
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a Tag;
    type IntoIter = std::collections::btree_set::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
