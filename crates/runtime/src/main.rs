//! Scripted demo encounter.
//!
//! Spawns a fighter and a rogue from the standard registry, equips them, has
//! each attack once and prints the resulting event log.
//!
//! ```bash
//! RUST_LOG=skirmish=debug cargo run -p skirmish-runtime
//! SKIRMISH_LOG_FORMAT=json cargo run -p skirmish-runtime
//! ```

use anyhow::{Context, Result};
use skirmish_content::{Options, Registry, tags};
use skirmish_runtime::{Encounter, EncounterConfig, EncounterLog, LogFormat, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    logging::init().context("failed to install log subscriber")?;

    let config = EncounterConfig::from_env();
    let format = config.log_format;
    let registry = Registry::standard().context("failed to load standard content")?;
    tracing::debug!(?registry, "registry ready");

    let log = run(&registry, config)?;

    match format {
        LogFormat::Tree => print!("{}", log.tree()?.render()),
        LogFormat::Json => println!("{}", serde_json::to_string_pretty(&log)?),
    }
    Ok(())
}

fn run(registry: &Registry, config: EncounterConfig) -> Result<EncounterLog> {
    let none = Options::new();
    let mut encounter = Encounter::new(config);

    let fighter = encounter.spawn(registry, "creature.fighter", &Options::new().named("Aldric"))?;
    let rogue = encounter.spawn(registry, "creature.rogue", &Options::new().named("Vex"))?;

    encounter.add_effect(fighter, registry.new_effect("fighting_style.defense", &none)?)?;
    encounter.equip(fighter, registry.new_item("armor.chain_mail", &none)?)?;
    encounter.equip(fighter, registry.new_item("armor.shield", &none)?)?;
    encounter.equip(rogue, registry.new_item("armor.leather", &none)?)?;
    encounter.add_effect(rogue, registry.new_effect("bless", &none)?)?;

    let longsword = registry.new_action("attack.longsword", &none)?;
    let dagger = registry.new_action("attack.dagger", &none)?;

    encounter.note("round 1");
    encounter.perform(fighter, &*longsword)?;
    encounter.resolve(rogue, &tags::armor_class())?;
    encounter.perform(rogue, &*dagger)?;
    encounter.resolve(fighter, &tags::armor_class())?;

    Ok(encounter.close()?)
}
