//! Common error infrastructure for skirmish-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g., `TagError`, `SpanError`) are defined in their
//! respective modules alongside the operations that produce them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Never on the hot path**: attribute calculation has no error type at all

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Tracing glitches the simulation can continue past
/// - **Validation**: Invalid caller input that should be rejected without retry
/// - **Internal**: Broken invariants that indicate a caller bug
/// - **Fatal**: Unrecoverable configuration errors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the simulation may continue.
    ///
    /// Examples: unbalanced `end()` in strict mode
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: empty tag path, unknown archetype key
    Validation,

    /// Internal error - a caller left shared state inconsistent.
    ///
    /// Examples: spans still open when the dispatcher is finished
    Internal,

    /// Fatal error - configuration cannot be used at all.
    ///
    /// Examples: the same archetype registered twice
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or broken configuration.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all rules errors.
///
/// This trait provides a uniform interface for error classification across
/// the core, content and runtime crates.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
