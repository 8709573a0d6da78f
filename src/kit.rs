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

//! The fixed identity of the eight drum slots.
//!
//! Slots are stable indices, not dynamically allocated: every slot exists for
//! the engine's full lifetime, and its display name, keyboard binding, MIDI
//! note, and parameter id are set here once and never mutated.

use std::fmt;

/// The number of drum slots in a kit.
pub const NUM_SOUNDS: usize = 8;

/// One of the eight fixed drum identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrumSlot {
    Kick,
    Snare,
    HiHat,
    Crash,
    Tom1,
    Tom2,
    Tom3,
    Ride,
}

/// A slot index outside `0..NUM_SOUNDS`.
///
/// This is a programmer error, distinct from "slot has no sample loaded",
/// which is a normal no-op condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid drum slot index {0} (expected 0..8)")]
pub struct InvalidSlot(pub usize);

impl DrumSlot {
    /// All slots, in index order.
    pub const ALL: [DrumSlot; NUM_SOUNDS] = [
        DrumSlot::Kick,
        DrumSlot::Snare,
        DrumSlot::HiHat,
        DrumSlot::Crash,
        DrumSlot::Tom1,
        DrumSlot::Tom2,
        DrumSlot::Tom3,
        DrumSlot::Ride,
    ];

    /// Converts a raw index into a slot, rejecting out-of-range indices.
    pub fn from_index(index: usize) -> Result<DrumSlot, InvalidSlot> {
        DrumSlot::ALL.get(index).copied().ok_or(InvalidSlot(index))
    }

    /// The stable index of this slot.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The human-readable name shown on the pad.
    pub fn display_name(self) -> &'static str {
        match self {
            DrumSlot::Kick => "KICK",
            DrumSlot::Snare => "SNARE",
            DrumSlot::HiHat => "HI-HAT",
            DrumSlot::Crash => "CRASH",
            DrumSlot::Tom1 => "TOM 1",
            DrumSlot::Tom2 => "TOM 2",
            DrumSlot::Tom3 => "TOM 3",
            DrumSlot::Ride => "RIDE",
        }
    }

    /// The stable identifier of this slot's gain parameter, used by the host
    /// for save/restore.
    pub fn param_id(self) -> &'static str {
        match self {
            DrumSlot::Kick => "kick_gain",
            DrumSlot::Snare => "snare_gain",
            DrumSlot::HiHat => "hihat_gain",
            DrumSlot::Crash => "crash_gain",
            DrumSlot::Tom1 => "tom1_gain",
            DrumSlot::Tom2 => "tom2_gain",
            DrumSlot::Tom3 => "tom3_gain",
            DrumSlot::Ride => "ride_gain",
        }
    }

    /// The MIDI note that triggers this slot (General MIDI drum map).
    pub fn midi_note(self) -> u8 {
        match self {
            DrumSlot::Kick => 36,
            DrumSlot::Snare => 38,
            DrumSlot::HiHat => 42,
            DrumSlot::Crash => 49,
            DrumSlot::Tom1 => 45,
            DrumSlot::Tom2 => 47,
            DrumSlot::Tom3 => 48,
            DrumSlot::Ride => 51,
        }
    }

    /// The keyboard shortcut that triggers this slot.
    pub fn key_binding(self) -> char {
        match self {
            DrumSlot::Kick => 'q',
            DrumSlot::Snare => 'w',
            DrumSlot::HiHat => 'e',
            DrumSlot::Crash => 'r',
            DrumSlot::Tom1 => 'a',
            DrumSlot::Tom2 => 's',
            DrumSlot::Tom3 => 'd',
            DrumSlot::Ride => 'f',
        }
    }

    /// Looks up the slot bound to a keyboard key. Case insensitive.
    pub fn from_key(key: char) -> Option<DrumSlot> {
        let key = key.to_ascii_lowercase();
        DrumSlot::ALL.into_iter().find(|slot| slot.key_binding() == key)
    }

    /// Looks up the slot triggered by a MIDI note number.
    pub fn from_midi_note(note: u8) -> Option<DrumSlot> {
        DrumSlot::ALL.into_iter().find(|slot| slot.midi_note() == note)
    }

    /// Looks up the slot that owns a gain parameter id.
    pub fn from_param_id(id: &str) -> Option<DrumSlot> {
        DrumSlot::ALL.into_iter().find(|slot| slot.param_id() == id)
    }
}

impl TryFrom<usize> for DrumSlot {
    type Error = InvalidSlot;

    fn try_from(index: usize) -> Result<DrumSlot, InvalidSlot> {
        DrumSlot::from_index(index)
    }
}

impl fmt::Display for DrumSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
