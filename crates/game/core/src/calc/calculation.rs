//! Shared calculation state and the resolution driver.

use std::borrow::Cow;

use tracing::trace;

use super::Expression;
use crate::actor::Actor;
use crate::tag::{Container, Tag};

/// State shared by every subscription while one attribute is resolved.
///
/// Subscriptions see the source actor read-only and may only append terms to
/// the expression.
#[derive(Debug)]
pub struct AttributeCalculation<'a> {
    /// The attribute being resolved.
    pub attribute: Tag,
    /// The actor whose effects are running.
    pub source: &'a Actor,
    /// Terms contributed so far.
    pub expression: Expression,
}

impl<'a> AttributeCalculation<'a> {
    pub fn new(attribute: Tag, source: &'a Actor) -> Self {
        Self {
            attribute,
            source,
            expression: Expression::new(),
        }
    }

    /// True iff the attribute under calculation is literally one of `attributes`.
    ///
    /// Subscriptions use this to decide relevance; it never walks the hierarchy,
    /// so a subscription on `attribute` does not fire for `attribute.armor_class`.
    #[inline]
    pub fn targets(&self, attributes: &Container) -> bool {
        attributes.match_exact(&self.attribute)
    }

    /// True iff the attribute under calculation is exactly `attribute`.
    #[inline]
    pub fn is(&self, attribute: &Tag) -> bool {
        self.attribute == *attribute
    }

    pub fn add_constant(&mut self, value: i32, label: impl Into<Cow<'static, str>>) {
        self.expression.add_constant(value, label);
    }

    pub fn add_scalar(&mut self, value: i32, label: impl Into<Cow<'static, str>>) {
        self.expression.add_scalar(value, label);
    }

    pub fn replace_with(&mut self, value: i32, label: impl Into<Cow<'static, str>>) {
        self.expression.replace_with(value, label);
    }

    /// Resolves the expression built so far.
    pub fn resolve(&self) -> i32 {
        self.expression.resolve()
    }
}

/// Runs every attached effect of `actor` against a fresh calculation for `attribute`.
///
/// Effects run in `(priority ascending, attachment order ascending)` order and
/// each one invokes all of its subscriptions. The returned calculation carries
/// the full audit trail; call [`AttributeCalculation::resolve`] for the value.
/// With no contributing effects the value is 0: there is no implicit base.
pub fn calculate<'a>(actor: &'a Actor, attribute: &Tag) -> AttributeCalculation<'a> {
    let mut calc = AttributeCalculation::new(attribute.clone(), actor);

    for effect in actor.effects() {
        for subscription in effect.subscriptions() {
            subscription.apply(&mut calc);
        }
    }

    trace!(
        target: "skirmish::calc",
        actor = %actor.name(),
        attribute = %attribute,
        terms = calc.expression.len(),
        value = calc.resolve(),
        "attribute resolved"
    );

    calc
}
