//! Archetype registry and standard content.
//!
//! This crate maps archetype keys (`"armor.plate"`, `"creature.fighter"`) to
//! constructors for the four kinds of content the rules core consumes:
//! - Effects attached to actors
//! - Items equipped by actors
//! - Creatures (fully configured actors)
//! - Actions actors perform
//!
//! A [`Registry`] is an explicit value owned by the host. Nothing here is
//! global; two encounters can run with different registries side by side.
//!
//! [`standard`] ships a small set of archetypes used by the demo encounter
//! and the integration tests.

pub mod error;
pub mod options;
pub mod registry;
pub mod standard;
pub mod tags;

pub use error::{ArchetypeKind, RegistryError};
pub use options::Options;
pub use registry::Registry;
