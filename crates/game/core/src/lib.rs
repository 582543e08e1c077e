//! Deterministic rules core for a turn-based tactical combat simulator.
//!
//! `skirmish-core` resolves numeric attributes from prioritized effects,
//! matches hierarchical capability tags, and records the nested structure of
//! in-flight actions in an event log. Content (items, effects, creatures) and
//! the archetype registry live in `skirmish-content`; the encounter host lives
//! in `skirmish-runtime`.
pub mod action;
pub mod actor;
pub mod calc;
pub mod config;
pub mod effect;
pub mod error;
pub mod event;
pub mod tag;

pub use action::Action;
pub use actor::{
    AbilityScores, Actor, ActorId, EffectHandle, Item, Proficiencies, ProficiencyCheck,
};
pub use calc::{AttributeCalculation, Expression, Term, TermKind};
pub use config::CoreConfig;
pub use effect::{Amount, CalculationSubscriber, Contribution, Effect, Priority, Requirement};
pub use error::{ErrorSeverity, RulesError};
pub use event::{
    Dispatcher, Event, EventTree, Message, MessageKind, Payload, SpanError, SpanGuard, SpanNode,
    SubscriptionId, TreeError,
};
pub use tag::{Container, Tag, TagError};
