//! The item boundary.

use std::fmt;

use super::Actor;
use crate::tag::Container;

/// Something an actor can equip.
///
/// Items live outside the core; the only thing the core asks of them is
/// [`Item::on_equip`], which conventionally builds a fresh [`Effect`] and
/// attaches it to the actor. Nothing undoes that automatically: whoever
/// unequips the item removes the effect.
///
/// [`Effect`]: crate::effect::Effect
pub trait Item: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Categories this item belongs to (e.g. `armor.heavy.plate`).
    fn tags(&self) -> &Container;

    /// Called by [`Actor::equip`] after the item is recorded as equipped.
    fn on_equip(&self, actor: &mut Actor);
}
