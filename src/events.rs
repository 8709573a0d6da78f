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

//! Routes external trigger sources to drum slots.
//!
//! Three sources feed the engine: keyboard shortcuts, on-screen pad clicks,
//! and incoming MIDI note-ons. All three resolve through the static tables in
//! [`DrumSlot`] and end in [`DrumEngine::trigger`]; unmatched input produces
//! no effect and is not an error.
//!
//! MIDI ingest may run inside the render domain's per-block event queue, so
//! the routing path stays lock-free and allocation-free: table lookup plus an
//! atomic trigger.

use std::sync::Arc;

use midly::live::LiveEvent;
use midly::MidiMessage;
use tracing::debug;

use crate::engine::DrumEngine;
use crate::kit::DrumSlot;

/// Velocity used for key presses and pad clicks, which carry none of their
/// own.
const FULL_VELOCITY: f32 = 1.0;

pub struct EventRouter {
    engine: Arc<DrumEngine>,
}

impl EventRouter {
    pub fn new(engine: Arc<DrumEngine>) -> Self {
        Self { engine }
    }

    /// Handles a keyboard shortcut. Returns the slot it triggered, or `None`
    /// for an unbound key.
    pub fn key_pressed(&self, key: char) -> Option<DrumSlot> {
        let slot = DrumSlot::from_key(key)?;
        self.engine.trigger(slot, FULL_VELOCITY);
        Some(slot)
    }

    /// Handles a pad click on the given slot.
    pub fn pad_pressed(&self, slot: DrumSlot) {
        self.engine.trigger(slot, FULL_VELOCITY);
    }

    /// Handles a raw incoming MIDI message. Note-ons with velocity > 0 that
    /// match the note table trigger their slot with `velocity / 127`; a
    /// velocity-0 note-on is a note-off equivalent and one-shots ignore
    /// note-off, as does everything else. Returns the slot triggered, if any.
    pub fn midi_event(&self, raw: &[u8]) -> Option<DrumSlot> {
        let event = match LiveEvent::parse(raw) {
            Ok(event) => event,
            Err(e) => {
                debug!(error = ?e, "Failed to parse MIDI event");
                return None;
            }
        };

        let LiveEvent::Midi { message, .. } = event else {
            return None;
        };
        let MidiMessage::NoteOn { key, vel } = message else {
            return None;
        };
        let velocity = u8::from(vel);
        if velocity == 0 {
            return None;
        }

        let slot = DrumSlot::from_midi_note(u8::from(key))?;
        self.engine.trigger(slot, velocity as f32 / 127.0);
        Some(slot)
    }
}
