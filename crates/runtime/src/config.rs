//! Encounter configuration structures and loaders.
use std::env;
use std::str::FromStr;

use skirmish_core::CoreConfig;

/// How the demo binary prints the finished event log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Indented span tree.
    #[default]
    Tree,
    /// The flat event list as JSON.
    Json,
}

/// Settings for one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterConfig {
    /// Passed through to the dispatcher; see [`CoreConfig::strict_spans`].
    pub strict_spans: bool,
    /// Proficiency bonus for creatures spawned without an explicit one.
    pub proficiency_bonus: i32,
    /// Label attached to log lines and the exported event log.
    pub session_id: Option<String>,
    pub log_format: LogFormat,
}

impl EncounterConfig {
    pub const fn new() -> Self {
        Self {
            strict_spans: CoreConfig::DEFAULT_STRICT_SPANS,
            proficiency_bonus: CoreConfig::DEFAULT_PROFICIENCY_BONUS,
            session_id: None,
            log_format: LogFormat::Tree,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_STRICT_SPANS` - Treat unbalanced spans as errors (default: false)
    /// - `SKIRMISH_PROFICIENCY_BONUS` - Default proficiency bonus (default: 2)
    /// - `SKIRMISH_SESSION_ID` - Session label (default: none)
    /// - `SKIRMISH_LOG_FORMAT` - `tree` or `json` (default: tree)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(strict) = read::<bool>(&lookup, "SKIRMISH_STRICT_SPANS") {
            config.strict_spans = strict;
        } else if lookup("SKIRMISH_STRICT_SPANS").is_some_and(|v| v.is_empty()) {
            // A bare `SKIRMISH_STRICT_SPANS=` counts as enabled.
            config.strict_spans = true;
        }

        if let Some(bonus) = read::<i32>(&lookup, "SKIRMISH_PROFICIENCY_BONUS") {
            config.proficiency_bonus = bonus.clamp(0, 9);
        }

        config.session_id = lookup("SKIRMISH_SESSION_ID").filter(|id| !id.is_empty());

        if let Some(format) = read::<LogFormat>(&lookup, "SKIRMISH_LOG_FORMAT") {
            config.log_format = format;
        }

        config
    }

    pub fn core(&self) -> CoreConfig {
        CoreConfig {
            strict_spans: self.strict_spans,
        }
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = EncounterConfig::from_lookup(lookup(&[]));
        assert_eq!(config, EncounterConfig::default());
        assert!(!config.core().strict_spans);
    }

    #[test]
    fn reads_every_variable() {
        let config = EncounterConfig::from_lookup(lookup(&[
            ("SKIRMISH_STRICT_SPANS", "true"),
            ("SKIRMISH_PROFICIENCY_BONUS", "3"),
            ("SKIRMISH_SESSION_ID", "duel-1"),
            ("SKIRMISH_LOG_FORMAT", "JSON"),
        ]));
        assert!(config.strict_spans);
        assert_eq!(config.proficiency_bonus, 3);
        assert_eq!(config.session_id.as_deref(), Some("duel-1"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bare_flag_enables_strict_spans() {
        let config = EncounterConfig::from_lookup(lookup(&[("SKIRMISH_STRICT_SPANS", "")]));
        assert!(config.strict_spans);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = EncounterConfig::from_lookup(lookup(&[
            ("SKIRMISH_STRICT_SPANS", "sometimes"),
            ("SKIRMISH_PROFICIENCY_BONUS", "lots"),
            ("SKIRMISH_LOG_FORMAT", "xml"),
            ("SKIRMISH_SESSION_ID", ""),
        ]));
        assert_eq!(config, EncounterConfig::default());
    }

    #[test]
    fn proficiency_bonus_is_clamped() {
        let config =
            EncounterConfig::from_lookup(lookup(&[("SKIRMISH_PROFICIENCY_BONUS", "40")]));
        assert_eq!(config.proficiency_bonus, 9);
    }
}
