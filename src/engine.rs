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

//! The drum engine: a fixed bank of eight one-shot voices and the render
//! step that mixes them.
//!
//! The engine is a plain object with an explicit function-call interface.
//! A thin adapter wires it into whatever plugin ABI the host exposes: the
//! host calls [`DrumEngine::render`] from its audio callback, the UI calls
//! trigger/load/query from its own thread, and the persistence layer shares
//! the [`GainParams`].
//!
//! Two concurrency domains meet here. `render` runs on the real-time domain
//! and must never block, allocate, or decode; it reads atomics and clones
//! per-slot `Arc` handles whose matching write lock is only ever held for a
//! pointer swap. Everything else runs on the control domain and may block
//! and allocate freely.

mod voice;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::KitConfig;
use crate::kit::{DrumSlot, NUM_SOUNDS};
use crate::params::GainParams;
use crate::sample::{decode_file, DecodeError, SampleBuffer};

use self::voice::DrumVoice;

/// An eight-voice fixed-polyphony one-shot sampler.
pub struct DrumEngine {
    voices: [DrumVoice; NUM_SOUNDS],
    params: Arc<GainParams>,
    sample_rate: u32,
}

impl DrumEngine {
    /// Creates an engine rendering at the given sample rate, with fresh gain
    /// parameters at unity.
    pub fn new(sample_rate: u32) -> Self {
        Self::with_params(sample_rate, Arc::new(GainParams::new()))
    }

    /// Creates an engine sharing gain parameters owned by the host's
    /// persistence layer.
    pub fn with_params(sample_rate: u32, params: Arc<GainParams>) -> Self {
        Self {
            voices: std::array::from_fn(|index| DrumVoice::new(DrumSlot::ALL[index])),
            params,
            sample_rate,
        }
    }

    /// The sample rate samples are resampled to on load and rendered at.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The shared gain parameters, for host save/restore and automation.
    pub fn params(&self) -> Arc<GainParams> {
        Arc::clone(&self.params)
    }

    /// Triggers one-shot playback of a slot.
    ///
    /// Velocity is clamped to `[0, 1]` and scales this playback instance
    /// only. Triggering an unloaded slot does nothing; retriggering a playing
    /// slot restarts it from frame 0. Touches only atomics, so this is safe
    /// to call from the MIDI-ingest context inside the audio callback.
    pub fn trigger(&self, slot: DrumSlot, velocity: f32) {
        if self.voices[slot.index()].trigger(velocity) {
            debug!(slot = slot.display_name(), velocity, "Drum triggered");
        } else {
            debug!(slot = slot.display_name(), "Trigger ignored, no sample loaded");
        }
    }

    /// Decodes a sample file and installs it in a slot.
    ///
    /// Control-domain only: decoding blocks and allocates. The swap itself is
    /// transactional; on failure the slot's previous sample (if any) stays
    /// installed and keeps playing back as before.
    pub fn load_sample(&self, slot: DrumSlot, path: &Path) -> Result<(), DecodeError> {
        let buffer = decode_file(path, self.sample_rate)?;
        info!(
            slot = slot.display_name(),
            path = ?path,
            frames = buffer.frame_count(),
            "Sample loaded"
        );
        self.install(slot, buffer);
        Ok(())
    }

    /// Installs an already-decoded buffer in a slot, stopping any in-flight
    /// playback for that slot first. The handoff is a pointer swap: a render
    /// pass sees either the complete old buffer or the complete new one.
    pub fn install(&self, slot: DrumSlot, buffer: SampleBuffer) {
        self.voices[slot.index()].install(Arc::new(buffer));
    }

    /// Loads the default samples named by a kit config, resolving relative
    /// paths against `base_path`. A slot that fails to load is logged and
    /// skipped; the remaining slots still load. Returns the number of slots
    /// loaded.
    pub fn load_kit(&self, config: &KitConfig, base_path: &Path) -> usize {
        let mut loaded = 0;
        for slot in DrumSlot::ALL {
            let Some(path) = config.path_for(slot) else {
                continue;
            };
            let full_path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                base_path.join(path)
            };
            match self.load_sample(slot, &full_path) {
                Ok(()) => loaded += 1,
                Err(e) => warn!(
                    slot = slot.display_name(),
                    path = ?full_path,
                    error = %e,
                    "Failed to load default sample"
                ),
            }
        }
        info!(loaded, "Kit defaults loaded");
        loaded
    }

    /// Whether a slot has a sample installed.
    pub fn is_loaded(&self, slot: DrumSlot) -> bool {
        self.voices[slot.index()].is_loaded()
    }

    /// The display name of a slot.
    pub fn name(&self, slot: DrumSlot) -> &'static str {
        slot.display_name()
    }

    /// Sets a slot's persistent gain, clamped to `[0, 2]`.
    pub fn set_gain(&self, slot: DrumSlot, value: f32) {
        self.params.set(slot, value);
    }

    /// The slot's persistent gain.
    pub fn gain(&self, slot: DrumSlot) -> f32 {
        self.params.get(slot)
    }

    /// Stops all voices immediately.
    pub fn stop_all(&self) {
        for voice in &self.voices {
            voice.stop();
        }
    }

    /// The number of voices currently contributing to the mix.
    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|voice| voice.is_playing()).count()
    }

    /// Total memory held by installed sample buffers, in bytes.
    pub fn memory_usage(&self) -> usize {
        self.voices.iter().map(|voice| voice.memory_size()).sum()
    }

    /// Renders one audio block, summing every playing voice into `output`.
    ///
    /// `output` is a planar grid: one `Vec<f32>` per output channel, each at
    /// least `frames` long. Samples are **added** into the buffer, never
    /// overwritten, so overlapping voices and any prior content mix
    /// additively. No clipping is applied; summed peaks can exceed
    /// `[-1, 1]` and limiting is the host's responsibility.
    ///
    /// A sample with fewer channels than the output has its last channel
    /// duplicated across the extra output channels (mono-to-stereo fanout).
    /// A voice whose cursor reaches the end of its buffer stops and simply
    /// stops contributing; the remaining frames of the block stay untouched.
    ///
    /// This is the real-time hot path: it never fails, never blocks, never
    /// allocates, and its work is bounded by `NUM_SOUNDS x frames x
    /// channels`. Missing or stale state renders as silence, not as an
    /// error.
    pub fn render(&self, output: &mut [Vec<f32>], frames: usize) {
        if output.is_empty() {
            return;
        }

        for voice in &self.voices {
            if !voice.is_playing() {
                continue;
            }
            let Some(buffer) = voice.snapshot() else {
                continue;
            };

            // Gain is read once per block and held fixed, so a concurrent
            // parameter write applies cleanly at the next block boundary.
            let effective_gain = self.params.get(voice.slot()) * voice.velocity();

            let frame_count = buffer.frame_count();
            let last_channel = buffer.channel_count() - 1;
            let mut cursor = voice.cursor();

            for frame in 0..frames {
                if cursor >= frame_count {
                    voice.stop();
                    break;
                }
                for (index, channel) in output.iter_mut().enumerate() {
                    let sample = buffer.channel(index.min(last_channel))[cursor];
                    channel[frame] += sample * effective_gain;
                }
                cursor += 1;
            }

            if voice.is_playing() {
                voice.set_cursor(cursor);
            }
        }
    }
}

impl fmt::Debug for DrumEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrumEngine")
            .field("sample_rate", &self.sample_rate)
            .field(
                "loaded_slots",
                &self.voices.iter().filter(|voice| voice.is_loaded()).count(),
            )
            .field("active_voices", &self.active_voice_count())
            .field("memory_kb", &(self.memory_usage() / 1024))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    const RATE: u32 = 44100;

    fn constant_sample(value: f32, frames: usize) -> SampleBuffer {
        SampleBuffer::from_planar(vec![vec![value; frames]], RATE)
    }

    #[test]
    fn test_trigger_unloaded_slot_is_silent_noop() {
        let engine = DrumEngine::new(RATE);
        engine.trigger(DrumSlot::Snare, 1.0);

        assert_eq!(engine.active_voice_count(), 0);

        let mut output = testutil::silent_output(2, 16);
        engine.render(&mut output, 16);
        assert!(output.iter().flatten().all(|&sample| sample == 0.0));
    }

    #[test]
    fn test_full_playback_then_autostop() {
        let engine = DrumEngine::new(RATE);
        engine.install(DrumSlot::Kick, constant_sample(0.5, 8));
        engine.trigger(DrumSlot::Kick, 1.0);

        // Exactly the sample length: every frame contributes, voice still
        // counts as playing until the next render call observes exhaustion.
        let mut output = testutil::silent_output(1, 8);
        engine.render(&mut output, 8);
        assert!(output[0].iter().all(|&sample| sample == 0.5));
        assert_eq!(engine.active_voice_count(), 1);

        let mut next = testutil::silent_output(1, 4);
        engine.render(&mut next, 4);
        assert_eq!(engine.active_voice_count(), 0);
        assert!(next[0].iter().all(|&sample| sample == 0.0));
    }

    #[test]
    fn test_voice_stops_mid_block() {
        let engine = DrumEngine::new(RATE);
        engine.install(DrumSlot::Kick, constant_sample(1.0, 3));
        engine.trigger(DrumSlot::Kick, 1.0);

        let mut output = testutil::silent_output(1, 6);
        engine.render(&mut output, 6);

        // Three frames of signal, then silence for the rest of the block.
        assert_eq!(output[0], vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(engine.active_voice_count(), 0);
    }

    #[test]
    fn test_retrigger_restarts_from_frame_zero() {
        let engine = DrumEngine::new(RATE);
        engine.install(
            DrumSlot::Tom1,
            SampleBuffer::from_planar(vec![vec![1.0, 2.0, 3.0, 4.0]], RATE),
        );

        engine.trigger(DrumSlot::Tom1, 1.0);
        let mut first = testutil::silent_output(1, 2);
        engine.render(&mut first, 2);
        assert_eq!(first[0], vec![1.0, 2.0]);

        engine.trigger(DrumSlot::Tom1, 1.0);
        let mut second = testutil::silent_output(1, 2);
        engine.render(&mut second, 2);
        assert_eq!(second[0], vec![1.0, 2.0]);
    }

    #[test]
    fn test_gain_is_linear() {
        let engine = DrumEngine::new(RATE);
        engine.install(DrumSlot::HiHat, constant_sample(0.25, 4));

        let render_with_gain = |gain: f32| {
            engine.set_gain(DrumSlot::HiHat, gain);
            engine.trigger(DrumSlot::HiHat, 1.0);
            let mut output = testutil::silent_output(1, 4);
            engine.render(&mut output, 4);
            output[0][0]
        };

        let unity = render_with_gain(1.0);
        let doubled = render_with_gain(2.0);
        assert_eq!(unity, 0.25);
        assert_eq!(doubled, unity * 2.0);
    }

    #[test]
    fn test_effective_gain_is_gain_times_velocity() {
        // 4-frame mono sample, gain 2.0, velocity 0.5: the two scalings cancel.
        let engine = DrumEngine::new(RATE);
        engine.install(
            DrumSlot::Kick,
            SampleBuffer::from_planar(vec![vec![1.0, 0.5, -0.5, -1.0]], RATE),
        );
        engine.set_gain(DrumSlot::Kick, 2.0);
        engine.trigger(DrumSlot::Kick, 0.5);

        let mut output = testutil::silent_output(1, 4);
        engine.render(&mut output, 4);
        assert_eq!(output[0], vec![1.0, 0.5, -0.5, -1.0]);

        let mut next = testutil::silent_output(1, 1);
        engine.render(&mut next, 1);
        assert_eq!(engine.active_voice_count(), 0);
        assert_eq!(next[0], vec![0.0]);
    }

    #[test]
    fn test_mono_fans_out_to_stereo() {
        let engine = DrumEngine::new(RATE);
        engine.install(DrumSlot::Crash, constant_sample(1.0, 4));
        engine.set_gain(DrumSlot::Crash, 0.5);
        engine.trigger(DrumSlot::Crash, 1.0);

        let mut output = testutil::silent_output(2, 4);
        engine.render(&mut output, 4);
        assert_eq!(output[0], output[1]);
        assert!(output[0].iter().all(|&sample| sample == 0.5));
    }

    #[test]
    fn test_overlapping_voices_sum() {
        let engine = DrumEngine::new(RATE);
        engine.install(DrumSlot::Kick, constant_sample(0.5, 4));
        engine.install(DrumSlot::Snare, constant_sample(0.25, 4));
        engine.trigger(DrumSlot::Kick, 1.0);
        engine.trigger(DrumSlot::Snare, 1.0);

        let mut output = testutil::silent_output(1, 4);
        engine.render(&mut output, 4);
        assert!(output[0].iter().all(|&sample| sample == 0.75));
    }

    #[test]
    fn test_render_adds_to_existing_content() {
        let engine = DrumEngine::new(RATE);
        engine.install(DrumSlot::Kick, constant_sample(0.5, 2));
        engine.trigger(DrumSlot::Kick, 1.0);

        let mut output = vec![vec![0.25, 0.25]];
        engine.render(&mut output, 2);
        assert_eq!(output[0], vec![0.75, 0.75]);
    }

    #[test]
    fn test_no_internal_clamp_on_summed_overs() {
        let engine = DrumEngine::new(RATE);
        engine.install(DrumSlot::Kick, constant_sample(1.0, 2));
        engine.set_gain(DrumSlot::Kick, 2.0);
        engine.trigger(DrumSlot::Kick, 1.0);

        let mut output = vec![vec![0.5, 0.5]];
        engine.render(&mut output, 2);
        assert_eq!(output[0], vec![2.5, 2.5]);
    }

    #[test]
    fn test_failed_load_preserves_previous_sample() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.wav");
        testutil::write_wav(&good, &[vec![0.5, 0.5]], RATE).unwrap();
        let bad = dir.path().join("bad.wav");
        std::fs::write(&bad, b"not a wav file at all").unwrap();

        let engine = DrumEngine::new(RATE);
        engine.load_sample(DrumSlot::Ride, &good).unwrap();
        assert!(engine.is_loaded(DrumSlot::Ride));

        assert!(engine.load_sample(DrumSlot::Ride, &bad).is_err());
        assert!(engine.is_loaded(DrumSlot::Ride));

        // The old sample still renders identically.
        engine.trigger(DrumSlot::Ride, 1.0);
        let mut output = testutil::silent_output(1, 2);
        engine.render(&mut output, 2);
        assert_eq!(output[0], vec![0.5, 0.5]);
    }

    #[test]
    fn test_load_kit_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        testutil::write_wav(&dir.path().join("kick.wav"), &[vec![1.0; 4]], RATE).unwrap();

        let mut config = KitConfig::default();
        config.set_path(DrumSlot::Kick, "kick.wav");
        config.set_path(DrumSlot::Snare, "missing.wav");

        let engine = DrumEngine::new(RATE);
        assert_eq!(engine.load_kit(&config, dir.path()), 1);
        assert!(engine.is_loaded(DrumSlot::Kick));
        assert!(!engine.is_loaded(DrumSlot::Snare));
    }

    #[test]
    fn test_load_resamples_to_engine_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("half_rate.wav");
        testutil::write_wav(&path, &[vec![0.0; 100]], RATE / 2).unwrap();

        let engine = DrumEngine::new(RATE);
        engine.load_sample(DrumSlot::Tom2, &path).unwrap();

        engine.trigger(DrumSlot::Tom2, 1.0);
        let mut output = testutil::silent_output(1, 256);
        engine.render(&mut output, 256);
        // 100 frames at half rate play for 200 engine frames.
        assert_eq!(engine.active_voice_count(), 0);
    }

    #[test]
    fn test_stop_all() {
        let engine = DrumEngine::new(RATE);
        engine.install(DrumSlot::Kick, constant_sample(1.0, 64));
        engine.install(DrumSlot::Snare, constant_sample(1.0, 64));
        engine.trigger(DrumSlot::Kick, 1.0);
        engine.trigger(DrumSlot::Snare, 1.0);
        assert_eq!(engine.active_voice_count(), 2);

        engine.stop_all();
        assert_eq!(engine.active_voice_count(), 0);

        let mut output = testutil::silent_output(1, 8);
        engine.render(&mut output, 8);
        assert!(output[0].iter().all(|&sample| sample == 0.0));
    }

    #[test]
    fn test_shared_params() {
        let params = Arc::new(GainParams::new());
        let engine = DrumEngine::with_params(RATE, Arc::clone(&params));

        // A host-side write is visible to the engine without a set_gain call.
        params.set(DrumSlot::Kick, 1.75);
        assert_eq!(engine.gain(DrumSlot::Kick), 1.75);

        engine.set_gain(DrumSlot::Kick, 0.25);
        assert_eq!(params.get(DrumSlot::Kick), 0.25);
    }
}
