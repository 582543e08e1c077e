//! End-to-end encounter driven through the standard registry.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use skirmish_content::{Options, Registry, tags};
use skirmish_core::{ActorId, MessageKind};
use skirmish_runtime::{Encounter, EncounterConfig, EncounterError, EncounterLog};

fn registry() -> Registry {
    Registry::standard().unwrap()
}

#[test]
fn spawned_creatures_take_encounter_defaults() {
    let registry = registry();
    let mut encounter = Encounter::new(EncounterConfig {
        proficiency_bonus: 3,
        ..EncounterConfig::default()
    });

    let first = encounter
        .spawn(&registry, "creature.fighter", &Options::new())
        .unwrap();
    let second = encounter
        .spawn(
            &registry,
            "creature.rogue",
            &Options::new().with_value("proficiency_bonus", 5),
        )
        .unwrap();

    assert_eq!(first, ActorId(1));
    assert_eq!(second, ActorId(2));
    assert_eq!(encounter.actor(first).unwrap().proficiencies().bonus(), 3);
    assert_eq!(encounter.actor(second).unwrap().proficiencies().bonus(), 5);

    let err = encounter
        .spawn(&registry, "creature.dragon", &Options::new())
        .unwrap_err();
    assert!(matches!(err, EncounterError::Registry(_)));
    encounter.close().unwrap();
}

#[test]
fn fighter_turn_renders_as_nested_tree() {
    let registry = registry();
    let none = Options::new();
    let mut encounter = Encounter::default();
    let fighter = encounter
        .spawn(&registry, "creature.fighter", &none)
        .unwrap();

    encounter
        .add_effect(
            fighter,
            registry.new_effect("fighting_style.defense", &none).unwrap(),
        )
        .unwrap();
    encounter
        .equip(fighter, registry.new_item("armor.chain_mail", &none).unwrap())
        .unwrap();
    let attack = registry.new_action("attack.longsword", &none).unwrap();
    encounter.perform(fighter, &*attack).unwrap();
    assert_eq!(encounter.resolve(fighter, &tags::armor_class()), Ok(17));

    let log = encounter.close().unwrap();
    assert_eq!(
        log.tree().unwrap().render(),
        "#1 gains Defense\n\
         #1 equips Chain Mail\n\
         \x20 #1 gains Chain Mail\n\
         #1 longsword attack\n\
         \x20 #1 check [weapon.martial.longsword] proficient +2\n\
         \x20 #1 attribute.attack = 5\n\
         #1 attribute.armor_class = 17\n"
    );
}

#[test]
fn observers_see_checks_as_they_happen() {
    let registry = registry();
    let none = Options::new();
    let mut encounter = Encounter::default();
    let rogue = encounter.spawn(&registry, "creature.rogue", &none).unwrap();

    let checks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&checks);
    encounter
        .dispatcher_mut()
        .subscribe(MessageKind::Check, move |event| {
            if !event.is_end {
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });

    let dagger = registry.new_action("attack.dagger", &none).unwrap();
    encounter.perform(rogue, &*dagger).unwrap();
    encounter.perform(rogue, &*dagger).unwrap();
    assert_eq!(checks.load(Ordering::Relaxed), 2);
    encounter.close().unwrap();
}

#[test]
fn exported_log_round_trips_through_json() {
    let registry = registry();
    let mut encounter = Encounter::new(EncounterConfig {
        session_id: Some("export".into()),
        ..EncounterConfig::default()
    });
    let rogue = encounter
        .spawn(&registry, "creature.rogue", &Options::new())
        .unwrap();
    encounter
        .equip(rogue, registry.new_item("armor.leather", &Options::new()).unwrap())
        .unwrap();
    let log = encounter.close().unwrap();

    let json = serde_json::to_string(&log).unwrap();
    let back: EncounterLog = serde_json::from_str(&json).unwrap();
    assert_eq!(back, log);
    assert_eq!(back.tree().unwrap().len(), 2);
}
