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

//! Sample loading: file decoding and the in-memory PCM buffer.
//!
//! Drum one-shots are short, so files are decoded fully into memory up front.
//! That trades a little memory for a render path that never touches a decoder,
//! the filesystem, or an allocator.

pub mod buffer;
pub mod decode;
pub mod error;

pub use buffer::SampleBuffer;
pub use decode::decode_file;
pub use error::DecodeError;
