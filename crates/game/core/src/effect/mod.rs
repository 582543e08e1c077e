//! Effects: named, prioritized bundles of calculation subscriptions.
//!
//! An effect does nothing on its own. Once attached to an [`Actor`], its
//! subscriptions run every time one of the actor's attributes is calculated.
//!
//! [`Actor`]: crate::actor::Actor

mod contribution;
mod priority;
mod subscription;

pub use contribution::{Amount, Contribution, Requirement};
pub use priority::Priority;
pub use subscription::CalculationSubscriber;

use std::fmt;
use std::sync::Arc;

/// A named rule unit holding an ordered list of calculation subscriptions.
///
/// Cloning an effect shares its subscriptions, which are immutable. Attaching
/// a clone to the same actor yields a second, independent contribution.
#[derive(Clone)]
pub struct Effect {
    archetype: String,
    name: String,
    priority: Priority,
    subscriptions: Vec<Arc<dyn CalculationSubscriber>>,
}

impl Effect {
    /// Creates an effect with no subscriptions.
    ///
    /// `archetype` is the stable identity key (e.g. `armor.plate`), `name`
    /// the display name.
    pub fn new(archetype: impl Into<String>, name: impl Into<String>, priority: Priority) -> Self {
        Self {
            archetype: archetype.into(),
            name: name.into(),
            priority,
            subscriptions: Vec::new(),
        }
    }

    /// Registers a calculation subscription. Subscriptions run in registration order.
    pub fn on(&mut self, subscription: impl CalculationSubscriber + 'static) -> &mut Self {
        self.subscriptions.push(Arc::new(subscription));
        self
    }

    /// Builder-style [`Effect::on`].
    pub fn with(mut self, subscription: impl CalculationSubscriber + 'static) -> Self {
        self.on(subscription);
        self
    }

    pub fn archetype(&self) -> &str {
        &self.archetype
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = &(dyn CalculationSubscriber + 'static)> {
        self.subscriptions.iter().map(|s| &**s)
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("archetype", &self.archetype)
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
