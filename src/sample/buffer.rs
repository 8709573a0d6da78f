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

use std::fmt;
use std::time::Duration;

/// Fully decoded multichannel PCM, planar f32.
///
/// Immutable after construction: reloading a slot builds a fresh buffer and
/// swaps the handle, it never mutates an installed buffer in place. A render
/// pass therefore always sees either the complete old data or the complete
/// new data.
pub struct SampleBuffer {
    /// One Vec per channel, all the same length.
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Builds a buffer from planar channel data.
    ///
    /// There must be at least one channel and every channel must have the
    /// same number of frames.
    pub fn from_planar(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        assert!(!channels.is_empty(), "sample buffer needs at least one channel");
        let frames = channels[0].len();
        assert!(
            channels.iter().all(|channel| channel.len() == frames),
            "sample buffer channels must be equal length"
        );
        Self { channels, sample_rate }
    }

    /// The number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// The number of frames (samples per channel).
    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    /// The sample rate of the stored data.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The samples of one channel.
    pub fn channel(&self, channel: usize) -> &[f32] {
        &self.channels[channel]
    }

    /// The memory held by the sample data, in bytes.
    pub fn memory_size(&self) -> usize {
        self.channels.iter().map(|channel| channel.len()).sum::<usize>()
            * std::mem::size_of::<f32>()
    }

    /// The playback duration of the buffer.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate as f64)
    }
}

impl fmt::Debug for SampleBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleBuffer")
            .field("channels", &self.channel_count())
            .field("frames", &self.frame_count())
            .field("sample_rate", &self.sample_rate)
            .field("duration_ms", &self.duration().as_millis())
            .finish()
    }
}
