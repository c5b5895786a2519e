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

//! Fixture file loading.
//!
//! Loading is a three step pipeline, each step built on the one before:
//!
//! 1. [`FixtureLoader::read_bytes`] resolves `root[/subdir]/filename` and
//!    decompresses it if the extension is recognized. Never cached.
//! 2. [`FixtureLoader::read_text`] decodes those bytes as UTF-8 and caches the
//!    text by filename.
//! 3. [`FixtureLoader::read_object`] parses the cached text as JSON and caches
//!    the value by filename.
//!
//! # Cache keys
//!
//! Both caches are keyed by the filename alone. A fixture read through one
//! subdirectory will be returned for the same filename requested through a
//! different subdirectory, so filenames must be unique across the
//! subdirectories a test suite uses.

use crate::cache::{CacheStats, MemoCache};
use crate::compression::Compression;
use crate::config::LoaderConfig;
use crate::error::{FixtureError, Result};
use crate::source::{FixtureSource, FsSource};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Loads and caches fixtures from a data root.
///
/// # Example
///
/// ```rust,no_run
/// use hedl_fixtures::FixtureLoader;
///
/// let loader = FixtureLoader::new("data");
/// let text = loader.read_text("twitter.json.xz", None)?;
/// let value = loader.read_object("twitter.json.xz")?;
/// # Ok::<(), hedl_fixtures::FixtureError>(())
/// ```
#[derive(Debug)]
pub struct FixtureLoader<S = FsSource> {
    config: LoaderConfig,
    source: S,
    text: MemoCache<Arc<str>>,
    objects: MemoCache<Arc<Value>>,
}

impl FixtureLoader<FsSource> {
    /// Creates a filesystem loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(LoaderConfig::new(root))
    }

    /// Creates a filesystem loader from `config`.
    pub fn from_config(config: LoaderConfig) -> Self {
        Self::with_source(config, FsSource)
    }
}

impl Default for FixtureLoader<FsSource> {
    /// Loader over the crate's `data/` directory
    fn default() -> Self {
        Self::from_config(LoaderConfig::default())
    }
}

impl<S: FixtureSource> FixtureLoader<S> {
    /// Creates a loader reading through `source`.
    pub fn with_source(config: LoaderConfig, source: S) -> Self {
        Self {
            config,
            source,
            text: MemoCache::new(),
            objects: MemoCache::new(),
        }
    }

    /// The data root fixtures are resolved against.
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// The loader's configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// The underlying fixture source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolves `filename` to `root/filename` or `root/subdir/filename`.
    pub fn path_for(&self, filename: &str, subdir: Option<&str>) -> PathBuf {
        match subdir {
            Some(subdir) => self.config.root.join(subdir).join(filename),
            None => self.config.root.join(filename),
        }
    }

    /// Reads a fixture's bytes, decompressing recognized formats.
    ///
    /// Every call goes to the source; nothing is cached at this level.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::NotFound`] if the path does not exist
    /// - [`FixtureError::Decompression`] if a compressed stream is corrupt
    /// - [`FixtureError::Io`] for any other read failure
    pub fn read_bytes(&self, filename: &str, subdir: Option<&str>) -> Result<Vec<u8>> {
        let path = self.path_for(filename, subdir);
        debug!("Reading fixture: {}", path.display());

        let raw = self
            .source
            .read(&path)
            .map_err(|e| FixtureError::from_read(path.clone(), e))?;

        match Compression::from_path(&path) {
            Some(format) => match format.decompress(&raw) {
                Ok(bytes) => {
                    debug!(
                        "Decompressed {} ({:?}): {} -> {} bytes",
                        filename,
                        format,
                        raw.len(),
                        bytes.len()
                    );
                    Ok(bytes)
                }
                Err(source) => {
                    warn!("Corrupt {:?} stream in {}: {}", format, path.display(), source);
                    Err(FixtureError::Decompression { path, source })
                }
            },
            None => Ok(raw),
        }
    }

    /// Reads a fixture as UTF-8 text, cached by `filename`.
    ///
    /// `subdir` is only consulted when `filename` is not already cached.
    ///
    /// # Errors
    ///
    /// [`FixtureError::Encoding`] if the bytes are not valid UTF-8, plus any
    /// error from [`read_bytes`](Self::read_bytes). Failures are not cached.
    pub fn read_text(&self, filename: &str, subdir: Option<&str>) -> Result<Arc<str>> {
        self.text.get_or_try_insert_with(filename, || {
            let bytes = self.read_bytes(filename, subdir)?;
            let text = String::from_utf8(bytes).map_err(|source| FixtureError::Encoding {
                filename: filename.to_string(),
                source,
            })?;
            debug!("Cached fixture text: {} ({} bytes)", filename, text.len());
            Ok(Arc::from(text))
        })
    }

    /// Parses a root-level fixture as JSON, cached by `filename`.
    ///
    /// Object keys keep their document order.
    ///
    /// # Errors
    ///
    /// [`FixtureError::Parse`] if the text is not valid JSON, plus any error
    /// from [`read_text`](Self::read_text). Failures are not cached.
    pub fn read_object(&self, filename: &str) -> Result<Arc<Value>> {
        self.objects.get_or_try_insert_with(filename, || {
            let text = self.read_text(filename, None)?;
            let value: Value = serde_json::from_str(&text).map_err(|source| {
                FixtureError::Parse {
                    filename: filename.to_string(),
                    source,
                }
            })?;
            debug!("Cached fixture object: {}", filename);
            Ok(Arc::new(value))
        })
    }

    /// Deserializes a root-level fixture into `T`.
    ///
    /// Reuses the cached text; the typed value itself is built fresh on
    /// every call.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use hedl_fixtures::FixtureLoader;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Sample {
    ///     a: i64,
    /// }
    ///
    /// let loader = FixtureLoader::default();
    /// let sample: Sample = loader.read_as("sample.json")?;
    /// assert_eq!(sample.a, 1);
    /// # Ok::<(), hedl_fixtures::FixtureError>(())
    /// ```
    pub fn read_as<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let text = self.read_text(filename, None)?;
        serde_json::from_str(&text).map_err(|source| FixtureError::Parse {
            filename: filename.to_string(),
            source,
        })
    }

    /// Lists fixture filenames in the root or in `subdir`, sorted.
    ///
    /// # Errors
    ///
    /// [`FixtureError::NotFound`] if the directory does not exist.
    pub fn list_fixtures(&self, subdir: Option<&str>) -> Result<Vec<String>> {
        let dir = match subdir {
            Some(subdir) => self.config.root.join(subdir),
            None => self.config.root.clone(),
        };
        let mut names = self
            .source
            .list(&dir)
            .map_err(|e| FixtureError::from_read(dir.clone(), e))?;
        names.sort();
        Ok(names)
    }

    /// Returns true if the data root exists.
    ///
    /// Checked on every call.
    pub fn fixtures_available(&self) -> bool {
        self.source.exists(&self.config.root)
    }

    /// Returns the configured skip reason if fixtures are unavailable.
    pub fn skip_reason(&self) -> Option<&str> {
        if self.fixtures_available() {
            None
        } else {
            Some(self.config.skip_reason.as_str())
        }
    }

    /// Counters for the text cache.
    pub fn text_stats(&self) -> CacheStats {
        self.text.stats()
    }

    /// Counters for the object cache.
    pub fn object_stats(&self) -> CacheStats {
        self.objects.stats()
    }

    /// Drops all cached text and objects.
    pub fn clear(&self) {
        self.objects.clear();
        self.text.clear();
    }
}
