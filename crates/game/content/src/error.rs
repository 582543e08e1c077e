//! Registry errors.

use skirmish_core::{ErrorSeverity, RulesError};

/// The four kinds of content a registry can construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ArchetypeKind {
    Effect,
    Item,
    Creature,
    Action,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown {kind} archetype `{archetype}`")]
    UnknownArchetype {
        kind: ArchetypeKind,
        archetype: String,
    },

    #[error("{kind} archetype `{archetype}` is already registered")]
    Duplicate {
        kind: ArchetypeKind,
        archetype: String,
    },

    #[error("archetype `{archetype}`: option `{key}` {reason}")]
    InvalidOption {
        archetype: String,
        key: String,
        reason: String,
    },
}

impl RegistryError {
    pub fn invalid_option(
        archetype: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            archetype: archetype.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl RulesError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownArchetype { .. } | Self::InvalidOption { .. } => {
                ErrorSeverity::Validation
            }
            // Registration happens at startup; a clash is a content bug.
            Self::Duplicate { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownArchetype { .. } => "REGISTRY_UNKNOWN_ARCHETYPE",
            Self::Duplicate { .. } => "REGISTRY_DUPLICATE",
            Self::InvalidOption { .. } => "REGISTRY_INVALID_OPTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_kind() {
        let err = RegistryError::UnknownArchetype {
            kind: ArchetypeKind::Item,
            archetype: "armor.mithral".into(),
        };
        assert_eq!(err.to_string(), "unknown item archetype `armor.mithral`");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "REGISTRY_UNKNOWN_ARCHETYPE");
    }

    #[test]
    fn duplicates_are_internal() {
        let err = RegistryError::Duplicate {
            kind: ArchetypeKind::Effect,
            archetype: "bless".into(),
        };
        assert!(err.severity().is_internal());
    }
}
