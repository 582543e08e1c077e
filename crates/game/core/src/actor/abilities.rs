//! Raw ability scores.

use std::collections::BTreeMap;

use crate::config::CoreConfig;
use crate::tag::Tag;

/// Raw attribute scores keyed by ability tag (e.g. `ability.dexterity`).
///
/// Scores are stored, never derived. Effects read them through
/// [`Amount::AbilityModifier`](crate::effect::Amount::AbilityModifier).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AbilityScores {
    scores: BTreeMap<Tag, i32>,
}

impl AbilityScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a score, returning the previous one.
    pub fn set(&mut self, ability: Tag, score: i32) -> Option<i32> {
        self.scores.insert(ability, score)
    }

    /// Builder-style [`AbilityScores::set`].
    pub fn with(mut self, ability: Tag, score: i32) -> Self {
        self.set(ability, score);
        self
    }

    pub fn score(&self, ability: &Tag) -> Option<i32> {
        self.scores.get(ability).copied()
    }

    /// `floor((score - 10) / 2)`; an ability without a score has modifier 0.
    pub fn modifier(&self, ability: &Tag) -> i32 {
        self.score(ability)
            .map(|score| (score - CoreConfig::ABILITY_BASELINE).div_euclid(2))
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tag, i32)> {
        self.scores.iter().map(|(tag, score)| (tag, *score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_rounds_down() {
        let dex = Tag::new("ability.dexterity");
        let mut scores = AbilityScores::new();
        for (score, expected) in [(10, 0), (11, 0), (12, 1), (9, -1), (8, -1), (7, -2), (20, 5)] {
            scores.set(dex.clone(), score);
            assert_eq!(scores.modifier(&dex), expected, "score {score}");
        }
    }

    #[test]
    fn missing_ability_is_neutral() {
        let scores = AbilityScores::new();
        assert_eq!(scores.score(&Tag::new("ability.strength")), None);
        assert_eq!(scores.modifier(&Tag::new("ability.strength")), 0);
    }
}
