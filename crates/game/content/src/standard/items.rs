use std::sync::Arc;

use skirmish_core::{Actor, Amount, Container, Contribution, Effect, Item, Priority, Tag};

use crate::error::RegistryError;
use crate::options::Options;
use crate::registry::Registry;
use crate::tags;

/// Body armor. Sets the wearer's base armor class when equipped.
#[derive(Clone, Debug)]
pub struct Armor {
    pub name: String,
    pub tags: Container,
    pub base: i32,
    /// Light armor lets the wearer add their dexterity modifier.
    pub adds_dexterity: bool,
}

impl Armor {
    pub const EFFECT_ARCHETYPE: &'static str = "equipment.armor";
}

impl Item for Armor {
    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &Container {
        &self.tags
    }

    fn on_equip(&self, actor: &mut Actor) {
        let mut effect = Effect::new(Self::EFFECT_ARCHETYPE, self.name.clone(), Priority::OVERRIDE);
        effect.on(Contribution::replace(
            tags::armor_class(),
            self.base,
            self.name.clone(),
        ));
        if self.adds_dexterity {
            effect.on(Contribution::scalar(
                tags::armor_class(),
                Amount::AbilityModifier(tags::dexterity()),
                "Dexterity",
            ));
        }
        actor.add_effect(effect);
    }
}

/// A shield adds a flat bonus on top of whatever sets the base.
#[derive(Clone, Debug)]
pub struct Shield {
    pub name: String,
    pub tags: Container,
    pub bonus: i32,
}

impl Shield {
    pub const EFFECT_ARCHETYPE: &'static str = "equipment.shield";
}

impl Item for Shield {
    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &Container {
        &self.tags
    }

    fn on_equip(&self, actor: &mut Actor) {
        actor.add_effect(
            Effect::new(Self::EFFECT_ARCHETYPE, self.name.clone(), Priority::NORMAL).with(
                Contribution::constant(tags::armor_class(), self.bonus, self.name.clone()),
            ),
        );
    }
}

fn armor(
    archetype: &'static str,
    name: &'static str,
    category: &'static str,
    base: i32,
    adds_dexterity: bool,
) -> impl Fn(&Options) -> Result<Arc<dyn Item>, RegistryError> + Send + Sync + 'static {
    move |options: &Options| {
        let item: Arc<dyn Item> = Arc::new(Armor {
            name: options.name_or(name),
            tags: Container::from(Tag::new(category)),
            base: options.bounded(archetype, "base", base, 0..=30)?,
            adds_dexterity,
        });
        Ok(item)
    }
}

fn shield(options: &Options) -> Result<Arc<dyn Item>, RegistryError> {
    let item: Arc<dyn Item> = Arc::new(Shield {
        name: options.name_or("Shield"),
        tags: Container::from(Tag::new("armor.shield")),
        bonus: options.bounded("armor.shield", "bonus", 2, 0..=10)?,
    });
    Ok(item)
}

pub(super) fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_item(
        "armor.leather",
        armor("armor.leather", "Leather", "armor.light.leather", 11, true),
    )?;
    registry.register_item(
        "armor.chain_mail",
        armor("armor.chain_mail", "Chain Mail", "armor.heavy.chain_mail", 16, false),
    )?;
    registry.register_item(
        "armor.plate",
        armor("armor.plate", "Plate", "armor.heavy.plate", 18, false),
    )?;
    registry.register_item("armor.shield", shield)?;
    Ok(())
}
