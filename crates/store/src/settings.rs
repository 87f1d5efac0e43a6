//! Player settings record

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::types::MAX_STARTING_LEVEL;
use crate::{read_json, write_json};

/// Upper bound for both volume sliders
pub const MAX_VOLUME: u8 = 100;

/// Persisted settings; missing fields take their defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub music_volume: u8,
    pub sfx_volume: u8,
    pub starting_level: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 50,
            sfx_volume: 70,
            starting_level: 1,
        }
    }
}

impl Settings {
    /// Load settings; any fault yields defaults. Values are clamped.
    pub fn load(path: &Path) -> Self {
        read_json::<Settings>(path)
            .unwrap_or_default()
            .clamped()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, &self.clamped())
    }

    /// Volumes limited to `0..=100`, starting level to `1..=10`
    pub fn clamped(self) -> Self {
        Self {
            music_volume: self.music_volume.min(MAX_VOLUME),
            sfx_volume: self.sfx_volume.min(MAX_VOLUME),
            starting_level: self.starting_level.clamp(1, MAX_STARTING_LEVEL),
        }
    }
}
