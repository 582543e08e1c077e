use skirmish_core::{Container, Contribution, Effect, Priority, Requirement};

use crate::error::RegistryError;
use crate::options::Options;
use crate::registry::Registry;
use crate::tags;

/// +1 armor class while wearing any armor.
fn defense(options: &Options) -> Result<Effect, RegistryError> {
    let bonus = options.bounded("fighting_style.defense", "bonus", 1, 0..=5)?;
    Ok(
        Effect::new("fighting_style.defense", options.name_or("Defense"), Priority::NORMAL).with(
            Contribution::constant(tags::armor_class(), bonus, "Fighting Style: Defense")
                .when(Requirement::Wearing(Container::from(tags::armor()))),
        ),
    )
}

/// Flat bonus to attack rolls.
fn bless(options: &Options) -> Result<Effect, RegistryError> {
    let bonus = options.bounded("bless", "bonus", 2, 1..=10)?;
    Ok(Effect::new("bless", options.name_or("Bless"), Priority::NORMAL)
        .with(Contribution::constant(tags::attack_bonus(), bonus, "Bless")))
}

pub(super) fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_effect("fighting_style.defense", defense)?;
    registry.register_effect("bless", bless)?;
    Ok(())
}
