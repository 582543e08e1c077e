//! Ordered additive/override contributions to one numeric attribute.

use std::borrow::Cow;

/// How a [`Term`] combines with the running total.
///
/// `Constant` and `Scalar` are numerically identical; they differ only in
/// audit provenance (flat bonus vs. a bonus that scales with something else,
/// such as an ability modifier).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermKind {
    /// Flat additive bonus.
    Constant,
    /// Scaling additive bonus.
    Scalar,
    /// Resets the running total to the term's value.
    Replace,
}

impl TermKind {
    #[inline]
    pub const fn is_override(self) -> bool {
        matches!(self, Self::Replace)
    }
}

/// A single labeled contribution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    pub kind: TermKind,
    pub value: i32,
    pub label: Cow<'static, str>,
}

impl Term {
    /// Folds this term into a running total.
    #[inline]
    pub fn apply(&self, total: i32) -> i32 {
        match self.kind {
            TermKind::Constant | TermKind::Scalar => total.saturating_add(self.value),
            TermKind::Replace => self.value,
        }
    }
}

/// An ordered, resolvable sequence of terms.
///
/// Resolution is a left-to-right fold starting at zero: additive terms add,
/// override terms reset. Terms before the last override no longer affect the
/// value but stay in the sequence for auditing.
///
/// # Example
/// ```
/// # use skirmish_core::calc::Expression;
/// let mut expr = Expression::new();
/// expr.add_constant(5, "Blessing");
/// expr.replace_with(10, "Mage Armor");
/// expr.add_scalar(3, "Dexterity");
/// assert_eq!(expr.resolve(), 13);
/// assert_eq!(expr.terms().len(), 3);
/// assert_eq!(expr.effective_terms().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expression {
    terms: Vec<Term>,
}

impl Expression {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Appends a flat additive term.
    pub fn add_constant(&mut self, value: i32, label: impl Into<Cow<'static, str>>) {
        self.push(TermKind::Constant, value, label);
    }

    /// Appends a scaling additive term.
    pub fn add_scalar(&mut self, value: i32, label: impl Into<Cow<'static, str>>) {
        self.push(TermKind::Scalar, value, label);
    }

    /// Appends an override term that resets the running total.
    pub fn replace_with(&mut self, value: i32, label: impl Into<Cow<'static, str>>) {
        self.push(TermKind::Replace, value, label);
    }

    /// Appends a term of the given kind.
    pub fn push(&mut self, kind: TermKind, value: i32, label: impl Into<Cow<'static, str>>) {
        self.terms.push(Term {
            kind,
            value,
            label: label.into(),
        });
    }

    /// Folds all terms in application order.
    ///
    /// No rule-level floor or ceiling is applied; additive terms saturate at
    /// the `i32` bounds instead of overflowing.
    pub fn resolve(&self) -> i32 {
        self.terms.iter().fold(0, |total, term| term.apply(total))
    }

    /// All terms in application order, including discarded ones.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The terms that still contribute: the last override and everything after it.
    pub fn effective_terms(&self) -> &[Term] {
        let start = self
            .terms
            .iter()
            .rposition(|t| t.kind.is_override())
            .unwrap_or(0);
        &self.terms[start..]
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}
