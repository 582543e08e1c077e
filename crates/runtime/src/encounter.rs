//! One dispatcher plus one independent set of actors.

use std::collections::BTreeMap;
use std::sync::Arc;

use skirmish_content::{Options, Registry};
use skirmish_core::{
    Action, Actor, ActorId, Dispatcher, Effect, EffectHandle, Event, EventTree, Item, Message,
    Tag,
};
use tracing::{debug, info, warn};

use crate::config::EncounterConfig;
use crate::error::{EncounterError, Result};

/// The finished event log of an encounter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncounterLog {
    pub session_id: Option<String>,
    pub events: Vec<Event<Message>>,
}

impl EncounterLog {
    pub fn tree(&self) -> Result<EventTree<Message>> {
        Ok(EventTree::build(&self.events)?)
    }
}

/// Hosts actors and records everything they do.
///
/// Every mutation that changes what an actor is (equipping, gaining an
/// effect) and every action it performs goes through the encounter so the
/// event log stays complete. Actions run inside a span opened and closed by
/// [`Encounter::perform`]; sub-actions nest beneath it.
#[derive(Debug)]
pub struct Encounter {
    config: EncounterConfig,
    hub: Dispatcher<Message>,
    actors: BTreeMap<ActorId, Actor>,
    next_id: u32,
}

impl Encounter {
    pub fn new(config: EncounterConfig) -> Self {
        info!(
            target: "skirmish::encounter",
            session = config.session_id.as_deref().unwrap_or("-"),
            strict_spans = config.strict_spans,
            "encounter opened"
        );
        Self {
            hub: Dispatcher::with_config(config.core()),
            config,
            actors: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    // ========================================================================
    // Actors
    // ========================================================================

    /// Adds an already-built actor. Its id must be unused.
    pub fn add_actor(&mut self, actor: Actor) -> Result<ActorId> {
        let id = actor.id();
        if self.actors.contains_key(&id) {
            return Err(EncounterError::DuplicateActor(id));
        }
        debug!(target: "skirmish::encounter", actor = %id, name = actor.name(), "actor joined");
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.actors.insert(id, actor);
        Ok(id)
    }

    /// Builds a creature from `registry` and adds it.
    ///
    /// Missing `id` and `proficiency_bonus` options are filled from the
    /// encounter: the next free id and the configured bonus.
    pub fn spawn(
        &mut self,
        registry: &Registry,
        archetype: &str,
        options: &Options,
    ) -> Result<ActorId> {
        let mut options = options.clone();
        if options.id.is_none() {
            options.id = Some(ActorId(self.next_id));
        }
        options
            .values
            .entry("proficiency_bonus".to_owned())
            .or_insert(self.config.proficiency_bonus);

        let actor = registry.new_creature(archetype, &options)?;
        self.add_actor(actor)
    }

    pub fn actor(&self, id: ActorId) -> Result<&Actor> {
        self.actors.get(&id).ok_or(EncounterError::UnknownActor(id))
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor> {
        self.actors
            .get_mut(&id)
            .ok_or(EncounterError::UnknownActor(id))
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Removes an actor, dropping its effects and equipment with it.
    pub fn remove_actor(&mut self, id: ActorId) -> Result<Actor> {
        let actor = self
            .actors
            .remove(&id)
            .ok_or(EncounterError::UnknownActor(id))?;
        debug!(target: "skirmish::encounter", actor = %id, "actor left");
        Ok(actor)
    }

    // ========================================================================
    // Recorded mutations
    // ========================================================================

    /// Equips `item` on an actor inside an `Equip` span. Effects the item
    /// attaches are reported as children of that span.
    pub fn equip(&mut self, id: ActorId, item: Arc<dyn Item>) -> Result<()> {
        let actor = self
            .actors
            .get_mut(&id)
            .ok_or(EncounterError::UnknownActor(id))?;
        let before = actor.effect_handles().map(|(handle, _)| handle).max();

        let mut span = self.hub.span(Message::Equip {
            actor: id,
            item: item.name().to_owned(),
        });
        actor.equip(item);
        for (handle, effect) in actor.effect_handles() {
            if before.is_none_or(|last| handle > last) {
                span.add(Message::Effect {
                    actor: id,
                    effect: effect.name().to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Attaches `effect` to an actor and records it.
    pub fn add_effect(&mut self, id: ActorId, effect: Effect) -> Result<EffectHandle> {
        let actor = self
            .actors
            .get_mut(&id)
            .ok_or(EncounterError::UnknownActor(id))?;
        self.hub.add(Message::Effect {
            actor: id,
            effect: effect.name().to_owned(),
        });
        Ok(actor.add_effect(effect))
    }

    // ========================================================================
    // Actions and reads
    // ========================================================================

    /// Runs `action` for an actor inside its own `Action` span.
    pub fn perform(&mut self, id: ActorId, action: &dyn Action) -> Result<()> {
        let actor = self
            .actors
            .get(&id)
            .ok_or(EncounterError::UnknownActor(id))?;
        debug!(target: "skirmish::encounter", actor = %id, action = action.name(), "performing");

        let mut span = self.hub.span(Message::Action {
            actor: id,
            action: action.name().to_owned(),
        });
        action.perform(actor, &mut span);
        span.close();
        Ok(())
    }

    /// Resolves an attribute and records the value.
    pub fn resolve(&mut self, id: ActorId, attribute: &Tag) -> Result<i32> {
        let value = self.actor(id)?.attribute(attribute);
        self.hub.add(Message::Attribute {
            actor: id,
            attribute: attribute.clone(),
            value,
        });
        Ok(value)
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.hub.add(Message::Note(text.into()));
    }

    // ========================================================================
    // Event log
    // ========================================================================

    /// The dispatcher, for subscribing observers.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<Message> {
        &mut self.hub
    }

    pub fn events(&self) -> &[Event<Message>] {
        self.hub.events()
    }

    pub fn tree(&self) -> Result<EventTree<Message>> {
        Ok(EventTree::build(self.hub.events())?)
    }

    /// Ends the encounter and hands back its log.
    ///
    /// Fails if any span is still open.
    pub fn close(self) -> Result<EncounterLog> {
        let Self { config, hub, .. } = self;
        let events = hub.finish().inspect_err(|err| {
            warn!(target: "skirmish::encounter", %err, "encounter closed with open spans");
        })?;
        info!(
            target: "skirmish::encounter",
            session = config.session_id.as_deref().unwrap_or("-"),
            events = events.len(),
            "encounter closed"
        );
        Ok(EncounterLog {
            session_id: config.session_id,
            events,
        })
    }
}

impl Default for Encounter {
    fn default() -> Self {
        Self::new(EncounterConfig::default())
    }
}
