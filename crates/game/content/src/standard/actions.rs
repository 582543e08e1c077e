use std::sync::Arc;

use skirmish_core::{Action, Actor, Container, Dispatcher, Message, Tag};

use crate::error::RegistryError;
use crate::options::Options;
use crate::registry::Registry;
use crate::tags;

/// A melee weapon attack.
///
/// Reports a proficiency check for the weapon's tags, then the resolved
/// attack bonus: ability modifier, proficiency (when trained) and every
/// effect contributing to `attribute.attack`.
#[derive(Clone, Debug)]
pub struct WeaponAttack {
    pub name: String,
    pub tags: Container,
    pub ability: Tag,
}

impl WeaponAttack {
    pub fn attack_bonus(&self, actor: &Actor) -> i32 {
        let proficiency = self.check_proficiency(actor).value;
        actor
            .abilities()
            .modifier(&self.ability)
            .saturating_add(proficiency)
            .saturating_add(actor.attribute(&tags::attack_bonus()))
    }
}

impl Action for WeaponAttack {
    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &Container {
        &self.tags
    }

    fn perform(&self, actor: &Actor, hub: &mut Dispatcher<Message>) {
        let check = self.check_proficiency(actor);
        hub.add(Message::Check {
            actor: actor.id(),
            tags: self.tags.clone(),
            proficient: check.has,
            bonus: check.value,
        });
        hub.add(Message::Attribute {
            actor: actor.id(),
            attribute: tags::attack_bonus(),
            value: self.attack_bonus(actor),
        });
    }
}

fn weapon(
    name: &'static str,
    weapon: &'static str,
    ability: fn() -> Tag,
) -> impl Fn(&Options) -> Result<Arc<dyn Action>, RegistryError> + Send + Sync + 'static {
    move |options: &Options| {
        let action: Arc<dyn Action> = Arc::new(WeaponAttack {
            name: options.name_or(name),
            tags: Container::from(Tag::new(weapon)),
            ability: ability(),
        });
        Ok(action)
    }
}

pub(super) fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_action(
        "attack.longsword",
        weapon("longsword attack", "weapon.martial.longsword", tags::strength),
    )?;
    registry.register_action(
        "attack.dagger",
        weapon("dagger attack", "weapon.simple.dagger", tags::dexterity),
    )?;
    Ok(())
}
