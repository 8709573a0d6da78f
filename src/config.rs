// Copyright (C) 2026 The drumsim authors
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! The kit configuration: which sample file each slot loads at startup.
//!
//! Every field is optional; a slot with no path simply starts unloaded and
//! waits for the user to load something. Relative paths are resolved against
//! a base directory when the engine loads the kit.
//!
//! ```yaml
//! kick: samples/kick.wav
//! snare: samples/snare.wav
//! hihat: /usr/share/drums/hat_closed.flac
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::kit::DrumSlot;

/// Typed error for kit config load/parse failures so callers can distinguish
/// a missing file from malformed YAML without string matching.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read kit config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse kit config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}

/// A YAML representation of the default sample assignments.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct KitConfig {
    kick: Option<PathBuf>,
    snare: Option<PathBuf>,
    hihat: Option<PathBuf>,
    crash: Option<PathBuf>,
    tom1: Option<PathBuf>,
    tom2: Option<PathBuf>,
    tom3: Option<PathBuf>,
    ride: Option<PathBuf>,
}

impl KitConfig {
    /// Parses a kit config from a YAML file.
    pub fn from_file(path: &Path) -> Result<KitConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// The configured sample path for a slot, if any.
    pub fn path_for(&self, slot: DrumSlot) -> Option<&Path> {
        self.field(slot).as_deref()
    }

    /// Assigns a sample path to a slot.
    pub fn set_path(&mut self, slot: DrumSlot, path: impl Into<PathBuf>) {
        *self.field_mut(slot) = Some(path.into());
    }

    fn field(&self, slot: DrumSlot) -> &Option<PathBuf> {
        match slot {
            DrumSlot::Kick => &self.kick,
            DrumSlot::Snare => &self.snare,
            DrumSlot::HiHat => &self.hihat,
            DrumSlot::Crash => &self.crash,
            DrumSlot::Tom1 => &self.tom1,
            DrumSlot::Tom2 => &self.tom2,
            DrumSlot::Tom3 => &self.tom3,
            DrumSlot::Ride => &self.ride,
        }
    }

    fn field_mut(&mut self, slot: DrumSlot) -> &mut Option<PathBuf> {
        match slot {
            DrumSlot::Kick => &mut self.kick,
            DrumSlot::Snare => &mut self.snare,
            DrumSlot::HiHat => &mut self.hihat,
            DrumSlot::Crash => &mut self.crash,
            DrumSlot::Tom1 => &mut self.tom1,
            DrumSlot::Tom2 => &mut self.tom2,
            DrumSlot::Tom3 => &mut self.tom3,
            DrumSlot::Ride => &mut self.ride,
        }
    }
}
