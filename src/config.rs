//! Runtime configuration for the terminal runner, read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BLOCKFALL_DATA_DIR` | `$HOME/.blockfall` | Where high scores and settings live |
//! | `BLOCKFALL_SEED` | clock-derived | RNG seed for the piece sequence |
//! | `BLOCKFALL_STARTING_LEVEL` | stored setting | Overrides the saved starting level |
//! | `BLOCKFALL_LOG_PATH` | unset | Write logs to this file (no logging when unset) |
//! | `BLOCKFALL_LOG` | `info` | Log filter directive |
//!
//! Unparseable values fall back to the default.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::{HIGH_SCORES_FILE, SETTINGS_FILE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub seed: u32,
    pub starting_level: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (the process env in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let data_dir = non_empty("BLOCKFALL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(non_empty("HOME")));

        let seed = non_empty("BLOCKFALL_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let starting_level = non_empty("BLOCKFALL_STARTING_LEVEL").and_then(|s| s.parse().ok());

        let log_path = non_empty("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        let log_filter = non_empty("BLOCKFALL_LOG").unwrap_or_else(|| "info".to_string());

        Self {
            data_dir,
            seed,
            starting_level,
            log_path,
            log_filter,
        }
    }

    pub fn high_scores_path(&self) -> PathBuf {
        self.data_dir.join(HIGH_SCORES_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }
}

fn default_data_dir(home: Option<String>) -> PathBuf {
    match home {
        Some(home) => PathBuf::from(home).join(".blockfall"),
        None => PathBuf::from(".blockfall"),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let cfg = config(&[("HOME", "/home/player")]);
        assert_eq!(cfg.data_dir, PathBuf::from("/home/player/.blockfall"));
        assert_eq!(cfg.starting_level, None);
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.log_filter, "info");
        assert_eq!(
            cfg.high_scores_path(),
            PathBuf::from("/home/player/.blockfall/highscores.json")
        );
    }

    #[test]
    fn no_home_uses_current_dir() {
        let cfg = config(&[]);
        assert_eq!(cfg.data_dir, PathBuf::from(".blockfall"));
    }

    #[test]
    fn explicit_values_win() {
        let cfg = config(&[
            ("HOME", "/home/player"),
            ("BLOCKFALL_DATA_DIR", "/tmp/bf"),
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_STARTING_LEVEL", "5"),
            ("BLOCKFALL_LOG_PATH", " /tmp/bf.log "),
            ("BLOCKFALL_LOG", "debug"),
        ]);
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/bf"));
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.starting_level, Some(5));
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/bf.log")));
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.settings_path(), PathBuf::from("/tmp/bf/settings.json"));
    }

    #[test]
    fn garbage_falls_back() {
        let cfg = config(&[
            ("BLOCKFALL_STARTING_LEVEL", "high"),
            ("BLOCKFALL_LOG_PATH", "   "),
        ]);
        assert_eq!(cfg.starting_level, None);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn from_env_does_not_panic() {
        let _config = AppConfig::from_env();
    }
}
