//! The simulator's event payload.

use std::fmt;

use super::Payload;
use crate::actor::ActorId;
use crate::tag::{Container, Tag};

/// Everything the simulator reports about in-flight actions.
///
/// The kind of each message is its variant, exposed as [`MessageKind`].
#[derive(Clone, Debug, PartialEq, Eq, strum::EnumDiscriminants)]
#[strum_discriminants(name(MessageKind), derive(Hash, strum::Display, strum::AsRefStr))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    /// An actor performs an action; sub-actions nest inside this span.
    Action { actor: ActorId, action: String },

    /// A proficiency check against tagged equipment or actions.
    Check {
        actor: ActorId,
        tags: Container,
        proficient: bool,
        bonus: i32,
    },

    /// An attribute was resolved for use.
    Attribute {
        actor: ActorId,
        attribute: Tag,
        value: i32,
    },

    /// An item was equipped.
    Equip { actor: ActorId, item: String },

    /// An effect was attached.
    Effect { actor: ActorId, effect: String },

    /// Free-form narration.
    Note(String),
}

impl Payload for Message {
    type Kind = MessageKind;

    fn kind(&self) -> MessageKind {
        MessageKind::from(self)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action { actor, action } => write!(f, "{actor} {action}"),
            Self::Check {
                actor,
                tags,
                proficient,
                bonus,
            } => {
                let tags: Vec<_> = tags.iter().map(Tag::as_str).collect();
                write!(f, "{actor} check [{}]", tags.join(", "))?;
                if *proficient {
                    write!(f, " proficient +{bonus}")
                } else {
                    f.write_str(" not proficient")
                }
            }
            Self::Attribute {
                actor,
                attribute,
                value,
            } => write!(f, "{actor} {attribute} = {value}"),
            Self::Equip { actor, item } => write!(f, "{actor} equips {item}"),
            Self::Effect { actor, effect } => write!(f, "{actor} gains {effect}"),
            Self::Note(text) => f.write_str(text),
        }
    }
}
