//! Data-driven calculation subscriptions.
//!
//! Most rules are "add N to attribute X while condition Y holds" or "attribute
//! X has base value N". [`Contribution`] expresses those without closures, so
//! content can be described as plain data and serialized.

use std::borrow::Cow;

use super::CalculationSubscriber;
use crate::actor::Actor;
use crate::calc::{AttributeCalculation, TermKind};
use crate::tag::{Container, Tag};

/// Where a contribution's number comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Amount {
    /// A literal value.
    Fixed(i32),
    /// The modifier of one of the actor's ability scores.
    AbilityModifier(Tag),
    /// The actor's proficiency bonus.
    ProficiencyBonus,
}

impl Amount {
    pub fn evaluate(&self, actor: &Actor) -> i32 {
        match self {
            Self::Fixed(value) => *value,
            Self::AbilityModifier(ability) => actor.abilities().modifier(ability),
            Self::ProficiencyBonus => actor.proficiencies().bonus(),
        }
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Self::Fixed(value)
    }
}

/// Condition on the source actor that gates a contribution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requirement {
    #[default]
    Always,
    /// Some equipped item falls under one of these categories.
    Wearing(Container),
    /// The actor is proficient with one of these tags.
    Proficient(Container),
    /// Every nested requirement holds.
    All(Vec<Requirement>),
}

impl Requirement {
    pub fn is_met(&self, actor: &Actor) -> bool {
        match self {
            Self::Always => true,
            Self::Wearing(categories) => actor.is_wearing(categories),
            Self::Proficient(tags) => actor.proficiencies().check(tags).has,
            Self::All(requirements) => requirements.iter().all(|r| r.is_met(actor)),
        }
    }
}

/// One term pushed onto every matching attribute calculation.
///
/// # Example
/// ```
/// # use skirmish_core::{Actor, ActorId, Container, Contribution, Effect, Priority, Requirement, Tag};
/// let ac = Tag::new("attribute.armor_class");
/// let defense = Effect::new("fighting_style.defense", "Defense", Priority::NORMAL).with(
///     Contribution::constant(ac.clone(), 1, "Defense")
///         .when(Requirement::Wearing(Container::from(Tag::new("armor")))),
/// );
///
/// let mut fighter = Actor::new(ActorId(1), "Fighter");
/// fighter.add_effect(defense);
/// // Not wearing armor: the requirement fails and nothing contributes.
/// assert_eq!(fighter.attribute(&ac), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contribution {
    /// Attributes this contribution applies to, matched exactly.
    pub attributes: Container,
    pub kind: TermKind,
    pub amount: Amount,
    pub label: Cow<'static, str>,
    pub requirement: Requirement,
}

impl Contribution {
    pub fn new(
        attribute: Tag,
        kind: TermKind,
        amount: impl Into<Amount>,
        label: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            attributes: Container::from(attribute),
            kind,
            amount: amount.into(),
            label: label.into(),
            requirement: Requirement::Always,
        }
    }

    /// Flat bonus.
    pub fn constant(attribute: Tag, value: i32, label: impl Into<Cow<'static, str>>) -> Self {
        Self::new(attribute, TermKind::Constant, value, label)
    }

    /// Scaling bonus, typically an ability modifier or the proficiency bonus.
    pub fn scalar(
        attribute: Tag,
        amount: impl Into<Amount>,
        label: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(attribute, TermKind::Scalar, amount, label)
    }

    /// Base replacement.
    pub fn replace(attribute: Tag, value: i32, label: impl Into<Cow<'static, str>>) -> Self {
        Self::new(attribute, TermKind::Replace, value, label)
    }

    /// Gates the contribution on a requirement.
    pub fn when(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Applies the same term to one more attribute.
    pub fn also_for(mut self, attribute: Tag) -> Self {
        self.attributes.add(attribute);
        self
    }
}

impl CalculationSubscriber for Contribution {
    fn apply(&self, calc: &mut AttributeCalculation<'_>) {
        if !calc.targets(&self.attributes) || !self.requirement.is_met(calc.source) {
            return;
        }
        let value = self.amount.evaluate(calc.source);
        calc.expression.push(self.kind, value, self.label.clone());
    }
}
