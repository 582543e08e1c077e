//! The action boundary.
//!
//! Concrete actions (attacks, spells, movement) are content and live outside
//! the core. The core only fixes how an action presents itself: a name, the
//! tags proficiency is checked against, and a `perform` step that reports
//! its sub-actions into the encounter's event log.

use std::fmt;

use crate::actor::{Actor, ProficiencyCheck};
use crate::event::{Dispatcher, Message};
use crate::tag::Container;

/// Something an actor does during its turn.
///
/// The host opens the action's span before calling [`Action::perform`] and
/// closes it afterwards; `perform` only opens spans for its own sub-actions.
pub trait Action: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Tags describing the action (e.g. `weapon.martial.sword`).
    fn tags(&self) -> &Container;

    /// Resolves the action for `actor`, reporting sub-actions to `hub`.
    fn perform(&self, actor: &Actor, hub: &mut Dispatcher<Message>);

    /// Whether `actor` is proficient with this action, and by how much.
    fn check_proficiency(&self, actor: &Actor) -> ProficiencyCheck {
        actor.proficiencies().check(self.tags())
    }
}
