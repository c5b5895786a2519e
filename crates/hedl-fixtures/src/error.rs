// Dweve HEDL - Hierarchical Entity Data Language
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for fixture loading.
//!
//! Each stage of the load pipeline (read, decompress, decode, parse) has its
//! own variant so tests can tell a missing fixture apart from a corrupt one.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fixture operations
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Errors that can occur while loading a fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The resolved fixture path does not exist
    #[error("Fixture not found: {}", path.display())]
    NotFound {
        /// Resolved path that was looked up
        path: PathBuf,
    },

    /// Any other filesystem failure while reading
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Resolved path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The compressed stream is corrupt or truncated
    #[error("Failed to decompress {}: {source}", path.display())]
    Decompression {
        /// Resolved path of the compressed fixture
        path: PathBuf,
        /// Error reported by the decoder
        #[source]
        source: std::io::Error,
    },

    /// Fixture bytes are not valid UTF-8
    #[error("Fixture '{filename}' is not valid UTF-8: {source}")]
    Encoding {
        /// Fixture filename as supplied by the caller
        filename: String,
        /// Decode error, including the offending bytes
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Fixture text is not well-formed JSON
    #[error("Fixture '{filename}' is not valid JSON: {source}")]
    Parse {
        /// Fixture filename as supplied by the caller
        filename: String,
        /// Parser error with line and column
        #[source]
        source: serde_json::Error,
    },
}

impl FixtureError {
    /// Classifies an I/O error from reading `path`.
    ///
    /// `ErrorKind::NotFound` becomes [`FixtureError::NotFound`]; everything
    /// else is kept as [`FixtureError::Io`].
    pub(crate) fn from_read(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            FixtureError::NotFound { path }
        } else {
            FixtureError::Io { path, source }
        }
    }
}
