use skirmish_core::{AbilityScores, Actor, Tag};

use crate::error::RegistryError;
use crate::options::Options;
use crate::registry::Registry;
use crate::tags;

/// Options every creature archetype understands: `id` (required), `name`,
/// `proficiency_bonus`.
fn base(
    archetype: &str,
    default_name: &str,
    options: &Options,
    abilities: AbilityScores,
    proficiencies: &[&str],
) -> Result<Actor, RegistryError> {
    let id = options.require_id(archetype)?;
    let bonus = options.bounded(archetype, "proficiency_bonus", 2, 0..=9)?;
    let mut actor = Actor::new(id, options.name_or(default_name))
        .with_abilities(abilities)
        .with_proficiency_bonus(bonus);
    for path in proficiencies {
        actor.add_proficiency(Tag::new(path));
    }
    Ok(actor)
}

fn fighter(options: &Options) -> Result<Actor, RegistryError> {
    let abilities = AbilityScores::new()
        .with(tags::strength(), options.value_or("strength", 16))
        .with(tags::dexterity(), options.value_or("dexterity", 12))
        .with(tags::constitution(), options.value_or("constitution", 14));
    base(
        "creature.fighter",
        "Fighter",
        options,
        abilities,
        &["armor", "weapon.simple", "weapon.martial"],
    )
}

fn rogue(options: &Options) -> Result<Actor, RegistryError> {
    let abilities = AbilityScores::new()
        .with(tags::strength(), options.value_or("strength", 10))
        .with(tags::dexterity(), options.value_or("dexterity", 16))
        .with(tags::constitution(), options.value_or("constitution", 12));
    base(
        "creature.rogue",
        "Rogue",
        options,
        abilities,
        &["armor.light", "weapon.simple"],
    )
}

pub(super) fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_creature("creature.fighter", fighter)?;
    registry.register_creature("creature.rogue", rogue)?;
    Ok(())
}
