//! A small standard library of archetypes.
//!
//! | Kind | Archetypes |
//! |---|---|
//! | item | `armor.leather`, `armor.chain_mail`, `armor.plate`, `armor.shield` |
//! | effect | `fighting_style.defense`, `bless` |
//! | action | `attack.longsword`, `attack.dagger` |
//! | creature | `creature.fighter`, `creature.rogue` |

mod actions;
mod creatures;
mod effects;
mod items;

pub use actions::WeaponAttack;
pub use items::{Armor, Shield};

use crate::error::RegistryError;
use crate::registry::Registry;

/// Registers every standard archetype into `registry`.
pub fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    items::install(registry)?;
    effects::install(registry)?;
    actions::install(registry)?;
    creatures::install(registry)?;
    Ok(())
}
