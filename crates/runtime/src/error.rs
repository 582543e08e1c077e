//! Errors surfaced by the encounter host.
use skirmish_content::RegistryError;
use skirmish_core::{ActorId, ErrorSeverity, RulesError, SpanError, TreeError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EncounterError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EncounterError {
    #[error("no actor {0} in this encounter")]
    UnknownActor(ActorId),

    #[error("actor {0} is already part of this encounter")]
    DuplicateActor(ActorId),

    #[error(transparent)]
    Span(#[from] SpanError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl RulesError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActor(_) | Self::DuplicateActor(_) => ErrorSeverity::Validation,
            Self::Span(e) => e.severity(),
            Self::Tree(e) => e.severity(),
            Self::Registry(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActor(_) => "ENCOUNTER_UNKNOWN_ACTOR",
            Self::DuplicateActor(_) => "ENCOUNTER_DUPLICATE_ACTOR",
            Self::Span(e) => e.error_code(),
            Self::Tree(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
        }
    }
}
