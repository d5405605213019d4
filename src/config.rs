//! Configuration module - environment variable parsing

use std::env;
use std::path::PathBuf;

/// Runtime configuration loaded from environment variables
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// JSON file holding the nickname → best score table
    pub scores_path: PathBuf,
    /// File the logger writes to (the terminal itself is owned by the game)
    pub log_path: PathBuf,
    /// Ring the terminal bell on fire/hit cues
    pub sound: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = lookup("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let scores_path = lookup("POP_A_MOLE_SCORES")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".pop_a_mole_scores.json"));

        let log_path = lookup("POP_A_MOLE_LOG")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".pop_a_mole.log"));

        let sound = match lookup("POP_A_MOLE_SOUND") {
            None => true,
            Some(raw) => parse_switch(&raw).ok_or(ConfigError::Invalid {
                key: "POP_A_MOLE_SOUND",
                value: raw,
            })?,
        };

        Ok(Self {
            scores_path,
            log_path,
            sound,
        })
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for environment variable {key}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_live_under_home() {
        let cfg = Config::from_lookup(lookup_from(&[("HOME", "/home/mole")])).unwrap();
        assert_eq!(cfg.scores_path, PathBuf::from("/home/mole/.pop_a_mole_scores.json"));
        assert_eq!(cfg.log_path, PathBuf::from("/home/mole/.pop_a_mole.log"));
        assert!(cfg.sound);
    }

    #[test]
    fn explicit_paths_override_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("HOME", "/home/mole"),
            ("POP_A_MOLE_SCORES", "/tmp/s.json"),
            ("POP_A_MOLE_LOG", "/tmp/m.log"),
        ]))
        .unwrap();
        assert_eq!(cfg.scores_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(cfg.log_path, PathBuf::from("/tmp/m.log"));
    }

    #[test]
    fn sound_switch_parses_on_and_off() {
        let off = Config::from_lookup(lookup_from(&[("POP_A_MOLE_SOUND", "OFF")])).unwrap();
        assert!(!off.sound);
        let on = Config::from_lookup(lookup_from(&[("POP_A_MOLE_SOUND", "yes")])).unwrap();
        assert!(on.sound);
    }

    #[test]
    fn bad_sound_value_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("POP_A_MOLE_SOUND", "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "POP_A_MOLE_SOUND", .. }));
    }

    #[test]
    fn missing_home_falls_back_to_cwd() {
        let cfg = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.scores_path, PathBuf::from("./.pop_a_mole_scores.json"));
    }
}
