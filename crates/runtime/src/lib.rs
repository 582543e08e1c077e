//! Encounter host for the skirmish rules core.
//!
//! An [`Encounter`] owns one event dispatcher and one independent set of
//! actors. It is the unit of isolation: two encounters share nothing, so a
//! host may run several side by side.
//!
//! Modules are organized by responsibility:
//! - [`encounter`] hosts actors and routes their actions through spans
//! - [`config`] reads encounter settings from the environment
//! - [`logging`] installs the `tracing` subscriber for binaries
pub mod config;
pub mod encounter;
pub mod error;
pub mod logging;

pub use config::{EncounterConfig, LogFormat};
pub use encounter::{Encounter, EncounterLog};
pub use error::{EncounterError, Result};
