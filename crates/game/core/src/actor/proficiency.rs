//! Proficiency tags and bonus.

use crate::config::CoreConfig;
use crate::tag::{Container, Tag};

/// Outcome of checking a set of tags against an actor's proficiencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProficiencyCheck {
    pub has: bool,
    /// The proficiency bonus when `has` is true, otherwise 0.
    pub value: i32,
}

/// What an actor is trained with, and how much that training is worth.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proficiencies {
    tags: Container,
    bonus: i32,
}

impl Proficiencies {
    pub fn new(bonus: i32) -> Self {
        Self {
            tags: Container::new(),
            bonus,
        }
    }

    pub fn add(&mut self, tag: Tag) -> bool {
        self.tags.add(tag)
    }

    pub fn tags(&self) -> &Container {
        &self.tags
    }

    pub fn bonus(&self) -> i32 {
        self.bonus
    }

    pub fn set_bonus(&mut self, bonus: i32) {
        self.bonus = bonus;
    }

    /// Checks `query` (e.g. an attack's tags) against the proficiency set.
    ///
    /// A broad proficiency covers specific query tags: `weapon.martial`
    /// applies to a `weapon.martial.sword` attack.
    pub fn check(&self, query: &Container) -> ProficiencyCheck {
        let has = self.tags.has_any(query);
        ProficiencyCheck {
            has,
            value: if has { self.bonus } else { 0 },
        }
    }
}

impl Default for Proficiencies {
    fn default() -> Self {
        Self::new(CoreConfig::DEFAULT_PROFICIENCY_BONUS)
    }
}
