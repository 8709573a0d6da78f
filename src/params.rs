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

//! Per-drum gain parameters.
//!
//! These are the only values the engine exposes for host persistence and
//! automation. They live outside the render path: the mixer reads each slot's
//! gain once at the top of a render block, so a concurrent write lands on the
//! next block at the latest. Values are stored as f32 bits in atomics, which
//! makes reads and writes race-free without locks.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::kit::{DrumSlot, NUM_SOUNDS};

/// Lower bound of a gain parameter.
pub const GAIN_MIN: f32 = 0.0;

/// Upper bound of a gain parameter.
pub const GAIN_MAX: f32 = 2.0;

/// Default gain for every slot (unity).
pub const GAIN_DEFAULT: f32 = 1.0;

/// The eight persistent gain values, one per drum slot.
///
/// Share this behind an `Arc` between the engine and the host's persistence
/// layer; both sides see writes without synchronization beyond the atomics.
pub struct GainParams {
    gains: [AtomicU32; NUM_SOUNDS],
}

impl Default for GainParams {
    fn default() -> Self {
        Self {
            gains: std::array::from_fn(|_| AtomicU32::new(GAIN_DEFAULT.to_bits())),
        }
    }
}

impl GainParams {
    /// Creates gain parameters with every slot at unity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the gain for a slot.
    pub fn get(&self, slot: DrumSlot) -> f32 {
        f32::from_bits(self.gains[slot.index()].load(Ordering::Relaxed))
    }

    /// Sets the gain for a slot, clamped to `[GAIN_MIN, GAIN_MAX]`.
    pub fn set(&self, slot: DrumSlot, value: f32) {
        let value = value.clamp(GAIN_MIN, GAIN_MAX);
        self.gains[slot.index()].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Returns the gain for a parameter id, or `None` for an unknown id.
    pub fn get_by_id(&self, id: &str) -> Option<f32> {
        DrumSlot::from_param_id(id).map(|slot| self.get(slot))
    }

    /// Sets the gain for a parameter id. Returns false for an unknown id,
    /// which callers restoring host state should treat as stale data to skip.
    pub fn set_by_id(&self, id: &str, value: f32) -> bool {
        match DrumSlot::from_param_id(id) {
            Some(slot) => {
                self.set(slot, value);
                true
            }
            None => false,
        }
    }

    /// Iterates over `(param_id, value)` pairs for host save.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        DrumSlot::ALL.into_iter().map(|slot| (slot.param_id(), self.get(slot)))
    }
}

impl fmt::Debug for GainParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("GainParams");
        for slot in DrumSlot::ALL {
            s.field(slot.param_id(), &self.get(slot));
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_unity() {
        let params = GainParams::new();
        for slot in DrumSlot::ALL {
            assert_eq!(params.get(slot), GAIN_DEFAULT);
        }
    }

    #[test]
    fn test_set_clamps() {
        let params = GainParams::new();

        params.set(DrumSlot::Kick, 1.5);
        assert_eq!(params.get(DrumSlot::Kick), 1.5);

        params.set(DrumSlot::Kick, 3.0);
        assert_eq!(params.get(DrumSlot::Kick), GAIN_MAX);

        params.set(DrumSlot::Kick, -1.0);
        assert_eq!(params.get(DrumSlot::Kick), GAIN_MIN);
    }

    #[test]
    fn test_id_round_trip() {
        let params = GainParams::new();

        assert!(params.set_by_id("snare_gain", 0.25));
        assert_eq!(params.get_by_id("snare_gain"), Some(0.25));
        assert_eq!(params.get(DrumSlot::Snare), 0.25);

        assert!(!params.set_by_id("nonsense", 0.5));
        assert_eq!(params.get_by_id("nonsense"), None);
    }

    #[test]
    fn test_iter_order() {
        let params = GainParams::new();
        params.set(DrumSlot::Ride, 2.0);

        let saved: Vec<(&str, f32)> = params.iter().collect();
        assert_eq!(saved.len(), NUM_SOUNDS);
        assert_eq!(saved[0], ("kick_gain", 1.0));
        assert_eq!(saved[7], ("ride_gain", 2.0));
    }
}
