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

//! An eight-pad drum sampler engine.
//!
//! `drumsim` is the playback core of a drum simulator plugin: it owns decoded
//! sample data for eight fixed drum slots (kick, snare, hi-hat, crash, three
//! toms, ride), plays them back as one-shot voices with velocity and
//! per-drum gain, and mixes overlapping voices into a caller-provided planar
//! buffer in real time. Window layout, widgets, and plugin-ABI hosting live
//! in a thin adapter layer outside this crate; the adapter calls
//! [`DrumEngine::render`] from the host audio callback and routes UI and
//! MIDI input through [`EventRouter`].
//!
//! ```
//! use drumsim::{DrumEngine, DrumSlot, SampleBuffer};
//!
//! let engine = DrumEngine::new(48_000);
//! engine.install(
//!     DrumSlot::Kick,
//!     SampleBuffer::from_planar(vec![vec![1.0, 0.5]], 48_000),
//! );
//! engine.trigger(DrumSlot::Kick, 1.0);
//!
//! let mut output = vec![vec![0.0f32; 2]; 2];
//! engine.render(&mut output, 2);
//! assert_eq!(output[0], vec![1.0, 0.5]);
//! assert_eq!(output[1], vec![1.0, 0.5]);
//! ```

pub mod config;
pub mod engine;
pub mod events;
pub mod kit;
pub mod params;
pub mod sample;

#[cfg(test)]
mod testutil;

pub use config::{ConfigError, KitConfig};
pub use engine::DrumEngine;
pub use events::EventRouter;
pub use kit::{DrumSlot, InvalidSlot, NUM_SOUNDS};
pub use params::{GainParams, GAIN_DEFAULT, GAIN_MAX, GAIN_MIN};
pub use sample::{DecodeError, SampleBuffer};
