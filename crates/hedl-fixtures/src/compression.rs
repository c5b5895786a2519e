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

//! Compressed fixture support.
//!
//! Large fixtures are stored compressed and recognized by file extension.
//! Files with any other extension are returned as-is.

use std::io::{self, Read, Write};
use std::path::Path;

/// Preset used when authoring compressed fixtures.
pub const DEFAULT_XZ_LEVEL: u32 = 6;

/// Compression formats recognized by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    /// xz container (LZMA2), `.xz`
    Xz,
}

/// Extension (without the dot) to format table.
const EXTENSIONS: &[(&str, Compression)] = &[("xz", Compression::Xz)];

impl Compression {
    /// Detects the compression format from the final extension of `path`.
    ///
    /// Matching is exact: `sample.json.xz` is compressed, `sample.XZ` and
    /// `sample.xz.json` are not.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hedl_fixtures::Compression;
    /// use std::path::Path;
    ///
    /// assert_eq!(Compression::from_path(Path::new("twitter.json.xz")), Some(Compression::Xz));
    /// assert_eq!(Compression::from_path(Path::new("twitter.json")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|&(_, format)| format)
    }

    /// File extension for this format, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Compression::Xz => "xz",
        }
    }

    /// Decompresses a complete in-memory stream.
    ///
    /// Concatenated xz streams are decoded back to back.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is corrupt or truncated.
    pub fn decompress(self, input: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Compression::Xz => {
                let mut decoder = xz2::read::XzDecoder::new_multi_decoder(input);
                let mut out = Vec::with_capacity(input.len().saturating_mul(4));
                decoder.read_to_end(&mut out)?;
                Ok(out)
            }
        }
    }

    /// Compresses `input`, producing a stream [`decompress`](Self::decompress)
    /// accepts. Used to author compressed fixtures.
    pub fn compress(self, input: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Compression::Xz => {
                let mut encoder = xz2::write::XzEncoder::new(Vec::new(), DEFAULT_XZ_LEVEL);
                encoder.write_all(input)?;
                encoder.finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            Compression::from_path(Path::new("sample.json.xz")),
            Some(Compression::Xz)
        );
        assert_eq!(
            Compression::from_path(Path::new("sub/dir/sample.xz")),
            Some(Compression::Xz)
        );
        assert_eq!(Compression::from_path(Path::new("sample.json")), None);
        assert_eq!(Compression::from_path(Path::new("sample.xz.json")), None);
        assert_eq!(Compression::from_path(Path::new("sample.XZ")), None);
        assert_eq!(Compression::from_path(Path::new("xz")), None);
    }

    #[test]
    fn test_extension_table_consistent() {
        for &(ext, format) in EXTENSIONS {
            assert_eq!(format.extension(), ext);
        }
    }

    #[test]
    fn test_xz_roundtrip() {
        let payload = br#"{"a":1}"#;
        let compressed = Compression::Xz.compress(payload).unwrap();
        assert_ne!(compressed.as_slice(), payload.as_slice());
        assert_eq!(Compression::Xz.decompress(&compressed).unwrap(), payload);
    }

    #[test]
    fn test_concatenated_streams() {
        let mut joined = Compression::Xz.compress(b"hello ").unwrap();
        joined.extend(Compression::Xz.compress(b"world").unwrap());
        assert_eq!(Compression::Xz.decompress(&joined).unwrap(), b"hello world");
    }

    #[test]
    fn test_corrupt_stream() {
        assert!(Compression::Xz.decompress(b"definitely not xz").is_err());
    }

    #[test]
    fn test_truncated_stream() {
        let compressed = Compression::Xz.compress(&[b'x'; 4096]).unwrap();
        let truncated = &compressed[..compressed.len() / 2];
        assert!(Compression::Xz.decompress(truncated).is_err());
    }
}
