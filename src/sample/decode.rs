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

//! Decodes audio files into [`SampleBuffer`]s using symphonia.
//!
//! Whatever symphonia can probe is accepted (WAV, AIFF, FLAC, OGG, MP3, ...).
//! Decoding runs on the control domain only; the render callback never calls
//! into this module.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use symphonia::core::audio::{AudioBuffer, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};
use tracing::{debug, info};

use super::buffer::SampleBuffer;
use super::error::DecodeError;

/// Decodes an entire audio file into memory, resampled to
/// `target_sample_rate` when the file rate differs.
pub fn decode_file(path: &Path, target_sample_rate: u32) -> Result<SampleBuffer, DecodeError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DecodeError::FileNotFound(path.to_path_buf()),
        _ => corrupt(path, e),
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Hint the probe with the file extension so common formats resolve fast.
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(extension);
    }

    let probed = get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| match e {
            SymphoniaError::Unsupported(_) => unsupported(path, e),
            other => corrupt(path, other),
        })?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| unsupported(path, "no audio track found"))?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let source_sample_rate = params
        .sample_rate
        .ok_or_else(|| unsupported(path, "sample rate not specified"))?;

    let mut decoder = get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|e| unsupported(path, e))?;

    // Decode every packet into planar f32 channels.
    let mut channels: Vec<Vec<f32>> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(corrupt(path, e)),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).map_err(|e| corrupt(path, e))?;
        let spec = *decoded.spec();
        if channels.is_empty() {
            channels = vec![Vec::new(); spec.channels.count()];
        }

        let mut converted = AudioBuffer::<f32>::new(decoded.capacity() as u64, spec);
        decoded.convert(&mut converted);
        for (index, channel) in channels.iter_mut().enumerate() {
            channel.extend_from_slice(converted.chan(index));
        }
    }

    if channels.is_empty() || channels[0].is_empty() {
        return Err(corrupt(path, "no audio frames decoded"));
    }

    let channels = if source_sample_rate != target_sample_rate {
        debug!(
            path = ?path,
            source_rate = source_sample_rate,
            target_rate = target_sample_rate,
            "Resampling sample"
        );
        resample_planar(&channels, source_sample_rate, target_sample_rate)
    } else {
        channels
    };

    let buffer = SampleBuffer::from_planar(channels, target_sample_rate);
    info!(
        path = ?path,
        channels = buffer.channel_count(),
        frames = buffer.frame_count(),
        sample_rate = buffer.sample_rate(),
        duration_ms = buffer.duration().as_millis(),
        memory_kb = buffer.memory_size() / 1024,
        "Sample decoded"
    );
    Ok(buffer)
}

fn unsupported(path: &Path, reason: impl ToString) -> DecodeError {
    DecodeError::UnsupportedFormat {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn corrupt(path: &Path, reason: impl ToString) -> DecodeError {
    DecodeError::CorruptData {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Resamples planar channels with linear interpolation. Rubato-grade quality
/// is not worth the complexity here: drum one-shots are short and the engine
/// rate rarely differs from the file rate by much.
fn resample_planar(channels: &[Vec<f32>], source_rate: u32, target_rate: u32) -> Vec<Vec<f32>> {
    let ratio = target_rate as f64 / source_rate as f64;
    let source_frames = channels[0].len();
    let target_frames = (source_frames as f64 * ratio).ceil() as usize;

    channels
        .iter()
        .map(|channel| {
            (0..target_frames)
                .map(|frame| {
                    let source_pos = frame as f64 / ratio;
                    let index = source_pos.floor() as usize;
                    let frac = source_pos.fract() as f32;

                    let s0 = channel.get(index).copied().unwrap_or(0.0);
                    let s1 = channel.get(index + 1).copied().unwrap_or(s0);
                    s0 + (s1 - s0) * frac
                })
                .collect()
        })
        .collect()
}
