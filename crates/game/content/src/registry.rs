//! Archetype registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use skirmish_core::{Action, Actor, Effect, Item};
use tracing::{debug, trace};

use crate::error::{ArchetypeKind, RegistryError};
use crate::options::Options;

type Constructor<T> = Arc<dyn Fn(&Options) -> Result<T, RegistryError> + Send + Sync>;

/// Constructors for one kind of content, keyed by archetype.
struct Catalog<T> {
    kind: ArchetypeKind,
    constructors: HashMap<String, Constructor<T>>,
}

impl<T> Catalog<T> {
    fn new(kind: ArchetypeKind) -> Self {
        Self {
            kind,
            constructors: HashMap::new(),
        }
    }

    fn register(&mut self, archetype: String, constructor: Constructor<T>) -> Result<(), RegistryError> {
        if self.constructors.contains_key(&archetype) {
            return Err(RegistryError::Duplicate {
                kind: self.kind,
                archetype,
            });
        }
        debug!(target: "skirmish::registry", kind = %self.kind, %archetype, "registered");
        self.constructors.insert(archetype, constructor);
        Ok(())
    }

    fn build(&self, archetype: &str, options: &Options) -> Result<T, RegistryError> {
        let constructor =
            self.constructors
                .get(archetype)
                .ok_or_else(|| RegistryError::UnknownArchetype {
                    kind: self.kind,
                    archetype: archetype.to_owned(),
                })?;
        trace!(target: "skirmish::registry", kind = %self.kind, archetype, "constructing");
        constructor(options)
    }

    fn contains(&self, archetype: &str) -> bool {
        self.constructors.contains_key(archetype)
    }

    fn archetypes(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.constructors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Maps archetype keys to content constructors.
///
/// # Example
///
/// ```
/// # use skirmish_content::{Options, Registry, RegistryError};
/// # use skirmish_core::{Effect, Priority};
/// let mut registry = Registry::new();
/// registry
///     .register_effect("haste", |_: &Options| {
///         Ok(Effect::new("haste", "Haste", Priority::NORMAL))
///     })
///     .unwrap();
///
/// assert!(registry.has_effect("haste"));
/// assert!(registry.new_effect("haste", &Options::new()).is_ok());
/// assert!(matches!(
///     registry.new_effect("slow", &Options::new()),
///     Err(RegistryError::UnknownArchetype { .. })
/// ));
/// ```
pub struct Registry {
    effects: Catalog<Effect>,
    items: Catalog<Arc<dyn Item>>,
    creatures: Catalog<Actor>,
    actions: Catalog<Arc<dyn Action>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            effects: Catalog::new(ArchetypeKind::Effect),
            items: Catalog::new(ArchetypeKind::Item),
            creatures: Catalog::new(ArchetypeKind::Creature),
            actions: Catalog::new(ArchetypeKind::Action),
        }
    }

    /// A registry preloaded with [`crate::standard`] content.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        crate::standard::install(&mut registry)?;
        Ok(registry)
    }

    pub fn register_effect<F>(
        &mut self,
        archetype: impl Into<String>,
        constructor: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&Options) -> Result<Effect, RegistryError> + Send + Sync + 'static,
    {
        self.effects.register(archetype.into(), Arc::new(constructor))
    }

    pub fn register_item<F>(
        &mut self,
        archetype: impl Into<String>,
        constructor: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&Options) -> Result<Arc<dyn Item>, RegistryError> + Send + Sync + 'static,
    {
        self.items.register(archetype.into(), Arc::new(constructor))
    }

    pub fn register_creature<F>(
        &mut self,
        archetype: impl Into<String>,
        constructor: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&Options) -> Result<Actor, RegistryError> + Send + Sync + 'static,
    {
        self.creatures.register(archetype.into(), Arc::new(constructor))
    }

    pub fn register_action<F>(
        &mut self,
        archetype: impl Into<String>,
        constructor: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&Options) -> Result<Arc<dyn Action>, RegistryError> + Send + Sync + 'static,
    {
        self.actions.register(archetype.into(), Arc::new(constructor))
    }

    pub fn new_effect(&self, archetype: &str, options: &Options) -> Result<Effect, RegistryError> {
        self.effects.build(archetype, options)
    }

    pub fn new_item(
        &self,
        archetype: &str,
        options: &Options,
    ) -> Result<Arc<dyn Item>, RegistryError> {
        self.items.build(archetype, options)
    }

    /// Builds a creature; most constructors require [`Options::id`].
    pub fn new_creature(&self, archetype: &str, options: &Options) -> Result<Actor, RegistryError> {
        self.creatures.build(archetype, options)
    }

    pub fn new_action(
        &self,
        archetype: &str,
        options: &Options,
    ) -> Result<Arc<dyn Action>, RegistryError> {
        self.actions.build(archetype, options)
    }

    pub fn has_effect(&self, archetype: &str) -> bool {
        self.effects.contains(archetype)
    }

    pub fn has_item(&self, archetype: &str) -> bool {
        self.items.contains(archetype)
    }

    pub fn has_creature(&self, archetype: &str) -> bool {
        self.creatures.contains(archetype)
    }

    pub fn has_action(&self, archetype: &str) -> bool {
        self.actions.contains(archetype)
    }

    /// Registered archetypes of one kind, sorted.
    pub fn archetypes(&self, kind: ArchetypeKind) -> Vec<&str> {
        match kind {
            ArchetypeKind::Effect => self.effects.archetypes(),
            ArchetypeKind::Item => self.items.archetypes(),
            ArchetypeKind::Creature => self.creatures.archetypes(),
            ArchetypeKind::Action => self.actions.archetypes(),
        }
    }

    /// Total number of registered archetypes across all kinds.
    pub fn len(&self) -> usize {
        self.effects.constructors.len()
            + self.items.constructors.len()
            + self.creatures.constructors.len()
            + self.actions.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("effects", &self.effects.archetypes())
            .field("items", &self.items.archetypes())
            .field("creatures", &self.creatures.archetypes())
            .field("actions", &self.actions.archetypes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{ActorId, Priority};
    use strum::IntoEnumIterator;

    fn bless(options: &Options) -> Result<Effect, RegistryError> {
        Ok(Effect::new("bless", options.name_or("Bless"), Priority::NORMAL))
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry.register_effect("bless", bless).unwrap();
        assert_eq!(
            registry.register_effect("bless", bless),
            Err(RegistryError::Duplicate {
                kind: ArchetypeKind::Effect,
                archetype: "bless".into(),
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn kinds_have_separate_namespaces() {
        let mut registry = Registry::new();
        registry.register_effect("guard", bless).unwrap();
        registry
            .register_creature("guard", |o: &Options| {
                Ok(Actor::new(o.require_id("guard")?, o.name_or("Guard")))
            })
            .unwrap();

        assert!(registry.has_effect("guard"));
        assert!(registry.has_creature("guard"));
        assert!(!registry.has_item("guard"));
        assert!(!registry.has_action("guard"));

        let guard = registry
            .new_creature("guard", &Options::new().with_id(ActorId(9)))
            .unwrap();
        assert_eq!(guard.id(), ActorId(9));
        assert_eq!(guard.name(), "Guard");
    }

    #[test]
    fn unknown_archetype_names_its_kind() {
        let registry = Registry::new();
        for kind in ArchetypeKind::iter() {
            let err = match kind {
                ArchetypeKind::Effect => registry.new_effect("x", &Options::new()).err(),
                ArchetypeKind::Item => registry.new_item("x", &Options::new()).err(),
                ArchetypeKind::Creature => registry.new_creature("x", &Options::new()).err(),
                ArchetypeKind::Action => registry.new_action("x", &Options::new()).err(),
            };
            assert_eq!(
                err,
                Some(RegistryError::UnknownArchetype {
                    kind,
                    archetype: "x".into()
                })
            );
        }
    }

    #[test]
    fn constructor_errors_propagate() {
        let mut registry = Registry::new();
        registry
            .register_creature("guard", |o: &Options| {
                Ok(Actor::new(o.require_id("guard")?, "Guard"))
            })
            .unwrap();
        assert!(matches!(
            registry.new_creature("guard", &Options::new()),
            Err(RegistryError::InvalidOption { .. })
        ));
    }

    #[test]
    fn options_reach_the_constructor() {
        let mut registry = Registry::new();
        registry.register_effect("bless", bless).unwrap();
        let effect = registry
            .new_effect("bless", &Options::new().named("Greater Bless"))
            .unwrap();
        assert_eq!(effect.name(), "Greater Bless");
        assert_eq!(effect.archetype(), "bless");
    }

    #[test]
    fn archetypes_are_sorted() {
        let mut registry = Registry::new();
        registry.register_effect("b", bless).unwrap();
        registry.register_effect("a", bless).unwrap();
        assert_eq!(registry.archetypes(ArchetypeKind::Effect), ["a", "b"]);
        assert!(registry.archetypes(ArchetypeKind::Item).is_empty());
    }
}
