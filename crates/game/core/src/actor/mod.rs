//! Actors: the owners of effects, equipment, proficiencies and ability scores.
//!
//! This module contains:
//! - Actor: attachment and attribute resolution
//! - AbilityScores: raw scores and their modifiers
//! - Proficiencies: trained tags plus bonus
//! - Item: the equip boundary to external content

mod abilities;
mod item;
mod proficiency;

pub use abilities::AbilityScores;
pub use item::Item;
pub use proficiency::{Proficiencies, ProficiencyCheck};

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::calc::{self, AttributeCalculation};
use crate::effect::Effect;
use crate::tag::{Container, Tag};

/// Identifier of an actor within one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to one attached effect, returned by [`Actor::add_effect`].
///
/// Handles are unique per actor and increase with attachment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectHandle(u64);

#[derive(Debug)]
struct AttachedEffect {
    handle: EffectHandle,
    effect: Effect,
}

/// A combatant.
///
/// # Invariants
///
/// - Attached effects are kept in resolution order: priority ascending, then
///   attachment order ascending
/// - Attribute resolution (`attribute`, `calculate`) takes `&self` and never
///   mutates the actor or its effects
/// - Effects are owned by exactly one actor; dropping the actor drops them.
///   `Actor` is not `Clone` so attached effects are never duplicated.
#[derive(Debug)]
pub struct Actor {
    id: ActorId,
    name: String,
    effects: Vec<AttachedEffect>,
    next_handle: u64,
    equipped: Vec<Arc<dyn Item>>,
    proficiencies: Proficiencies,
    abilities: AbilityScores,
}

impl Actor {
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            effects: Vec::new(),
            next_handle: 0,
            equipped: Vec::new(),
            proficiencies: Proficiencies::default(),
            abilities: AbilityScores::new(),
        }
    }

    pub fn with_abilities(mut self, abilities: AbilityScores) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_proficiency_bonus(mut self, bonus: i32) -> Self {
        self.proficiencies.set_bonus(bonus);
        self
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // Effects
    // ========================================================================

    /// Attaches an effect.
    ///
    /// Attaching the same logical effect twice yields two independent
    /// contributions; there is no deduplication.
    pub fn add_effect(&mut self, effect: Effect) -> EffectHandle {
        let handle = EffectHandle(self.next_handle);
        self.next_handle += 1;

        // Insert after every effect of equal or lower priority so ties keep
        // attachment order.
        let priority = effect.priority();
        let index = self
            .effects
            .partition_point(|attached| attached.effect.priority() <= priority);

        debug!(
            target: "skirmish::actor",
            actor = %self.name,
            effect = effect.archetype(),
            priority = priority.value(),
            ?handle,
            "effect attached"
        );

        self.effects.insert(index, AttachedEffect { handle, effect });
        handle
    }

    /// Detaches one effect by handle.
    pub fn remove_effect(&mut self, handle: EffectHandle) -> Option<Effect> {
        let index = self.effects.iter().position(|a| a.handle == handle)?;
        let removed = self.effects.remove(index).effect;
        debug!(
            target: "skirmish::actor",
            actor = %self.name,
            effect = removed.archetype(),
            ?handle,
            "effect removed"
        );
        Some(removed)
    }

    /// Detaches every effect with the given archetype; returns how many were removed.
    pub fn remove_effects(&mut self, archetype: &str) -> usize {
        let before = self.effects.len();
        self.effects.retain(|a| a.effect.archetype() != archetype);
        let removed = before - self.effects.len();
        if removed > 0 {
            debug!(
                target: "skirmish::actor",
                actor = %self.name,
                effect = archetype,
                removed,
                "effects removed"
            );
        }
        removed
    }

    /// Attached effects in resolution order.
    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter().map(|a| &a.effect)
    }

    /// Attached effects with their handles, in resolution order.
    pub fn effect_handles(&self) -> impl Iterator<Item = (EffectHandle, &Effect)> {
        self.effects.iter().map(|a| (a.handle, &a.effect))
    }

    pub fn effect(&self, handle: EffectHandle) -> Option<&Effect> {
        self.effects
            .iter()
            .find(|a| a.handle == handle)
            .map(|a| &a.effect)
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Resolves an attribute. Zero when no effect contributes.
    pub fn attribute(&self, attribute: &Tag) -> i32 {
        self.calculate(attribute).resolve()
    }

    /// Runs the full calculation for an attribute, keeping the audit trail.
    pub fn calculate(&self, attribute: &Tag) -> AttributeCalculation<'_> {
        calc::calculate(self, attribute)
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn abilities_mut(&mut self) -> &mut AbilityScores {
        &mut self.abilities
    }

    // ========================================================================
    // Proficiencies
    // ========================================================================

    pub fn add_proficiency(&mut self, tag: Tag) -> bool {
        self.proficiencies.add(tag)
    }

    pub fn proficiencies(&self) -> &Proficiencies {
        &self.proficiencies
    }

    pub fn proficiencies_mut(&mut self) -> &mut Proficiencies {
        &mut self.proficiencies
    }

    // ========================================================================
    // Equipment
    // ========================================================================

    /// Records `item` as equipped and lets it attach its effects.
    pub fn equip(&mut self, item: Arc<dyn Item>) {
        debug!(
            target: "skirmish::actor",
            actor = %self.name,
            item = item.name(),
            "item equipped"
        );
        self.equipped.push(Arc::clone(&item));
        item.on_equip(self);
    }

    /// Removes the first equipped item with this name.
    ///
    /// Effects the item attached stay attached; detach them explicitly.
    pub fn unequip(&mut self, name: &str) -> Option<Arc<dyn Item>> {
        let index = self.equipped.iter().position(|i| i.name() == name)?;
        let item = self.equipped.remove(index);
        debug!(
            target: "skirmish::actor",
            actor = %self.name,
            item = name,
            "item unequipped"
        );
        Some(item)
    }

    pub fn equipped(&self) -> impl Iterator<Item = &(dyn Item + 'static)> {
        self.equipped.iter().map(|i| &**i)
    }

    /// True iff some equipped item falls under one of `categories`.
    ///
    /// `categories` is the broad side: `{armor}` matches an item tagged
    /// `armor.heavy.plate`.
    pub fn is_wearing(&self, categories: &Container) -> bool {
        self.equipped.iter().any(|i| categories.has_any(i.tags()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Contribution, Priority};

    fn ac() -> Tag {
        Tag::new("attribute.armor_class")
    }

    fn flat(archetype: &str, priority: Priority, value: i32) -> Effect {
        Effect::new(archetype, archetype, priority).with(Contribution::constant(ac(), value, "flat"))
    }

    fn base(archetype: &str, priority: Priority, value: i32) -> Effect {
        Effect::new(archetype, archetype, priority).with(Contribution::replace(ac(), value, "base"))
    }

    #[test]
    fn no_effects_resolves_to_zero() {
        let actor = Actor::new(ActorId(1), "Nobody");
        assert_eq!(actor.attribute(&ac()), 0);
    }

    #[test]
    fn override_band_runs_first_in_either_order() {
        let mut a = Actor::new(ActorId(1), "A");
        a.add_effect(base("armor", Priority::OVERRIDE, 16));
        a.add_effect(flat("style", Priority::NORMAL, 1));

        let mut b = Actor::new(ActorId(2), "B");
        b.add_effect(flat("style", Priority::NORMAL, 1));
        b.add_effect(base("armor", Priority::OVERRIDE, 16));

        assert_eq!(a.attribute(&ac()), 17);
        assert_eq!(b.attribute(&ac()), 17);
    }

    #[test]
    fn equal_priority_keeps_attachment_order() {
        let mut actor = Actor::new(ActorId(1), "A");
        actor.add_effect(flat("first", Priority::NORMAL, 2));
        actor.add_effect(base("second", Priority::NORMAL, 10));
        // The override attached later discards the earlier flat bonus.
        assert_eq!(actor.attribute(&ac()), 10);

        let order: Vec<_> = actor.effects().map(Effect::archetype).collect();
        assert_eq!(order, ["first", "second"]);
    }

    #[test]
    fn last_override_by_sorted_order_wins() {
        let mut actor = Actor::new(ActorId(1), "A");
        actor.add_effect(base("late", Priority::LATE, 20));
        actor.add_effect(base("early", Priority::OVERRIDE, 12));
        actor.add_effect(flat("bonus", Priority::NORMAL, 3));
        // OVERRIDE 12, NORMAL +3, LATE resets to 20.
        assert_eq!(actor.attribute(&ac()), 20);
    }

    #[test]
    fn readding_an_effect_contributes_twice() {
        let mut actor = Actor::new(ActorId(1), "A");
        let bless = flat("bless", Priority::NORMAL, 2);
        let first = actor.add_effect(bless.clone());
        let second = actor.add_effect(bless);
        assert_ne!(first, second);
        assert_eq!(actor.attribute(&ac()), 4);

        assert!(actor.remove_effect(first).is_some());
        assert!(actor.remove_effect(first).is_none());
        assert_eq!(actor.attribute(&ac()), 2);

        assert_eq!(actor.remove_effects("bless"), 1);
        assert_eq!(actor.attribute(&ac()), 0);
    }

    #[test]
    fn irrelevant_attributes_are_untouched() {
        let mut actor = Actor::new(ActorId(1), "A");
        actor.add_effect(flat("style", Priority::NORMAL, 1));
        assert_eq!(actor.attribute(&Tag::new("attribute.speed")), 0);
        // Exact matching: a parent tag is a different attribute.
        assert_eq!(actor.attribute(&Tag::new("attribute")), 0);
    }

    #[test]
    fn calculation_is_repeatable() {
        let mut actor = Actor::new(ActorId(1), "A");
        actor.add_effect(base("armor", Priority::OVERRIDE, 16));
        actor.add_effect(flat("style", Priority::NORMAL, 1));

        let first = actor.calculate(&ac());
        let second = actor.calculate(&ac());
        assert_eq!(first.expression, second.expression);
        assert_eq!(first.resolve(), 17);
        assert_eq!(first.expression.terms().len(), 2);
    }

    #[test]
    fn closures_can_subscribe() {
        let speed = Tag::new("attribute.speed");
        let target = speed.clone();
        let mut actor = Actor::new(ActorId(1), "A");
        actor.add_effect(Effect::new("walk", "Walking", Priority::OVERRIDE).with(
            move |calc: &mut AttributeCalculation<'_>| {
                if calc.is(&target) {
                    calc.replace_with(30, "Base speed");
                }
            },
        ));
        assert_eq!(actor.attribute(&speed), 30);
    }

    #[test]
    fn attached_copies_are_independent_per_actor() {
        let bless = flat("bless", Priority::NORMAL, 2);
        let mut a = Actor::new(ActorId(1), "A");
        let mut b = Actor::new(ActorId(2), "B");
        let handle = a.add_effect(bless.clone());
        b.add_effect(bless);

        let removed = a.remove_effect(handle).map(|e| e.archetype().to_owned());
        assert_eq!(removed.as_deref(), Some("bless"));
        assert_eq!(a.attribute(&ac()), 0);
        assert_eq!(b.attribute(&ac()), 2);
        assert!(a.remove_effect(handle).is_none());
    }
}
