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

//! Loader configuration.
//!
//! The data root is fixed at construction time. The default points at the
//! `data/` directory next to this crate's manifest, so it never depends on
//! the working directory a test binary happens to run from.

use std::path::{Path, PathBuf};

/// Reason reported when a test is skipped because the data root is missing.
pub const DEFAULT_SKIP_REASON: &str = "Test depends on ./data dir that contains fixtures";

/// Name of the data directory under the crate root.
pub const DATA_DIR_NAME: &str = "data";

/// Returns the default data root, `<crate>/data`.
pub fn default_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DATA_DIR_NAME)
}

/// Configuration for a [`FixtureLoader`](crate::FixtureLoader).
///
/// # Example
///
/// ```rust
/// use hedl_fixtures::LoaderConfig;
///
/// let config = LoaderConfig::default()
///     .with_root("tests/data")
///     .with_skip_reason("corpus not checked out");
/// assert!(config.root.ends_with("tests/data"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory fixtures are resolved against.
    pub root: PathBuf,
    /// Message attached to skipped tests when `root` is absent.
    pub skip_reason: String,
}

impl LoaderConfig {
    /// Creates a configuration rooted at `root` with the default skip reason.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            skip_reason: DEFAULT_SKIP_REASON.to_string(),
        }
    }

    /// Sets the data root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the skip reason.
    pub fn with_skip_reason(mut self, reason: impl Into<String>) -> Self {
        self.skip_reason = reason.into();
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}
