//! Tags used by the standard content.

use skirmish_core::Tag;

pub fn armor_class() -> Tag {
    Tag::new("attribute.armor_class")
}

pub fn attack_bonus() -> Tag {
    Tag::new("attribute.attack")
}

pub fn strength() -> Tag {
    Tag::new("ability.strength")
}

pub fn dexterity() -> Tag {
    Tag::new("ability.dexterity")
}

pub fn constitution() -> Tag {
    Tag::new("ability.constitution")
}

pub fn armor() -> Tag {
    Tag::new("armor")
}
