//! Attribute calculation.
//!
//! An attribute value is never stored. It is recomputed on demand by running
//! every calculation subscription of every attached effect, in resolution
//! order, against one shared [`AttributeCalculation`]:
//!
//! ```text
//! effects sorted by (priority, attachment order)
//!      ↓
//! each subscription: relevant? → push terms onto the shared Expression
//!      ↓
//! Expression::resolve()  (fold: add / reset)
//! ```
//!
//! The path is pure and deterministic: no randomness, no clocks, no mutation
//! of the actor or its effects.

pub mod calculation;
pub mod expression;

pub use calculation::{AttributeCalculation, calculate};
pub use expression::{Expression, Term, TermKind};
