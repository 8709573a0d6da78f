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

use std::path::PathBuf;

/// Typed error for sample decode failures so the UI can distinguish a missing
/// file from a broken one without string matching.
///
/// A failed load is transactional: whatever sample the slot held before the
/// attempt stays installed and keeps rendering.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("sample file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported audio format in {path}: {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("corrupt audio data in {path}: {reason}")]
    CorruptData { path: PathBuf, reason: String },
}
