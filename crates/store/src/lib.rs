//! Persistence collaborator - high-score table and settings on disk
//!
//! Both records are small JSON files in a data directory. Reads never fail:
//! a missing, unreadable or corrupt file is logged and treated as "no data",
//! so nothing here can take the game down. Writes return `anyhow::Result`.

pub mod highscores;
pub mod settings;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use blockfall_types as types;

pub use highscores::HighScores;
pub use settings::Settings;

/// File name of the high-score table inside the data directory
pub const HIGH_SCORES_FILE: &str = "highscores.json";

/// File name of the settings record inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Read and decode a JSON file, returning None (and logging) on any fault
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(target: "store", path = %path.display(), "no file yet");
            return None;
        }
        Err(e) => {
            tracing::warn!(target: "store", path = %path.display(), error = %e, "unreadable file");
            return None;
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(target: "store", path = %path.display(), error = %e, "corrupt file");
            None
        }
    }
}

/// Encode `value` as pretty JSON and replace `path` atomically
///
/// Writes to a sibling temp file first, then renames over the target.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(value).context("failed to encode JSON")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;

    tracing::debug!(target: "store", path = %path.display(), "saved");
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    /// Fresh, not-yet-existing directory under the system temp dir
    pub fn temp_dir(tag: &str) -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "blockfall-store-{}-{}-{}",
            tag,
            std::process::id(),
            n
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        a: u32,
    }

    #[test]
    fn write_then_read() {
        let dir = test_util::temp_dir("json");
        let path = dir.join("sample.json");

        write_json(&path, &Sample { a: 7 }).unwrap();
        assert_eq!(read_json::<Sample>(&path), Some(Sample { a: 7 }));
        assert!(!path.with_extension("json.tmp").exists());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = test_util::temp_dir("missing");
        assert_eq!(read_json::<Sample>(&dir.join("nope.json")), None);
    }

    #[test]
    fn corrupt_file_reads_as_none() {
        let dir = test_util::temp_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(read_json::<Sample>(&path), None);
        let _ = fs::remove_dir_all(dir);
    }
}
