//! Calculation subscriptions: the units of work an effect runs.

use crate::calc::AttributeCalculation;

/// A predicate-guarded contribution to attribute calculations.
///
/// Implementations operate only on the calculation passed in: they read the
/// source actor and append terms to the expression. A subscription that does
/// not apply to the attribute under calculation must leave it untouched; the
/// engine calls every subscription for every attribute.
///
/// Closures implement this trait, so ad-hoc rules can be written inline:
///
/// ```
/// # use skirmish_core::{Effect, Priority, Tag, calc::AttributeCalculation};
/// let speed = Tag::new("attribute.speed");
/// let effect = Effect::new("haste", "Haste", Priority::NORMAL).with(
///     move |calc: &mut AttributeCalculation<'_>| {
///         if calc.is(&speed) {
///             calc.add_constant(10, "Haste");
///         }
///     },
/// );
/// assert_eq!(effect.subscriptions().count(), 1);
/// ```
pub trait CalculationSubscriber: Send + Sync {
    /// Contributes to `calc` if relevant.
    fn apply(&self, calc: &mut AttributeCalculation<'_>);
}

impl<F> CalculationSubscriber for F
where
    F: Fn(&mut AttributeCalculation<'_>) + Send + Sync,
{
    fn apply(&self, calc: &mut AttributeCalculation<'_>) {
        self(calc)
    }
}
