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

//! Per-slot playback state.
//!
//! A voice is one playback cursor over one sample buffer: one-shot, no
//! looping, no stacking. Retriggering a playing voice restarts it from
//! frame 0. All scalar state is atomic so the control domain and the render
//! callback can touch it concurrently without tearing; the sample buffer
//! itself is handed off by swapping an `Arc` under a write lock that is held
//! for the pointer swap only.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::kit::DrumSlot;
use crate::sample::SampleBuffer;

pub(crate) struct DrumVoice {
    slot: DrumSlot,
    /// The loaded sample. Replaced wholesale on reload, never mutated.
    sample: RwLock<Option<Arc<SampleBuffer>>>,
    /// Lock-free mirror of `sample.is_some()` for UI indicator polling.
    loaded: AtomicBool,
    playing: AtomicBool,
    /// Next frame index to render. Invariant: `0 <= cursor <= frame_count`
    /// while a sample is installed.
    cursor: AtomicUsize,
    /// Trigger velocity in `[0, 1]`, stored as f32 bits.
    velocity: AtomicU32,
}

impl DrumVoice {
    pub(crate) fn new(slot: DrumSlot) -> Self {
        Self {
            slot,
            sample: RwLock::new(None),
            loaded: AtomicBool::new(false),
            playing: AtomicBool::new(false),
            cursor: AtomicUsize::new(0),
            velocity: AtomicU32::new(1.0f32.to_bits()),
        }
    }

    pub(crate) fn slot(&self) -> DrumSlot {
        self.slot
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    pub(crate) fn velocity(&self) -> f32 {
        f32::from_bits(self.velocity.load(Ordering::Relaxed))
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    pub(crate) fn set_cursor(&self, frame: usize) {
        self.cursor.store(frame, Ordering::Relaxed);
    }

    /// Starts playback from frame 0 with the given velocity, clamped to
    /// `[0, 1]`. Returns false (and does nothing) when no sample is loaded:
    /// triggering an empty slot is a normal condition, not an error.
    pub(crate) fn trigger(&self, velocity: f32) -> bool {
        if !self.is_loaded() {
            return false;
        }
        self.velocity
            .store(velocity.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
        self.cursor.store(0, Ordering::Relaxed);
        self.playing.store(true, Ordering::Release);
        true
    }

    pub(crate) fn stop(&self) {
        self.playing.store(false, Ordering::Release);
        self.cursor.store(0, Ordering::Relaxed);
    }

    /// Publishes a new sample buffer. Any in-flight playback is stopped first
    /// so the render pass never walks a cursor from the old buffer into the
    /// new one.
    pub(crate) fn install(&self, buffer: Arc<SampleBuffer>) {
        self.stop();
        *self.sample.write() = Some(buffer);
        self.loaded.store(true, Ordering::Release);
    }

    /// Clones the current buffer handle for the duration of one render block.
    pub(crate) fn snapshot(&self) -> Option<Arc<SampleBuffer>> {
        self.sample.read().clone()
    }

    pub(crate) fn memory_size(&self) -> usize {
        self.sample
            .read()
            .as_ref()
            .map(|buffer| buffer.memory_size())
            .unwrap_or(0)
    }
}
