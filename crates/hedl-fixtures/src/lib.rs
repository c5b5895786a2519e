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

//! Cached fixture loading for HEDL format test suites.
//!
//! Conversion tests read the same sample documents over and over. This crate
//! reads them once from a data directory, decompresses `.xz` files on the
//! fly, and keeps both the decoded text and the parsed JSON in memory.
//!
//! # Features
//!
//! - **Transparent decompression**: `twitter.json.xz` reads back as JSON text
//! - **Memoized text and values**: each fixture is decoded and parsed once
//! - **Skip gate**: tests return early when the data directory is not present
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hedl_fixtures::{require_fixtures, FixtureLoader};
//!
//! fn parses_sample() {
//!     require_fixtures!();
//!
//!     let value = hedl_fixtures::read_fixture_object("sample.json").unwrap();
//!     assert_eq!(value["a"], 1);
//! }
//!
//! // Or with an explicit loader over another directory
//! let loader = FixtureLoader::new("/path/to/corpus");
//! let bytes = loader.read_bytes("citm_catalog.json.xz", None).unwrap();
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;

/// Memoization used by the loader.
pub mod cache;

/// Recognized compression formats.
pub mod compression;

/// Loader configuration.
pub mod config;

/// Error types.
pub mod error;

/// The fixture loader.
pub mod loader;

/// Storage abstraction.
pub mod source;

pub use cache::{CacheStats, MemoCache};
pub use compression::Compression;
pub use config::{default_data_dir, LoaderConfig, DEFAULT_SKIP_REASON};
pub use error::{FixtureError, Result};
pub use loader::FixtureLoader;
pub use source::{FixtureSource, FsSource};

static SHARED: Lazy<FixtureLoader> = Lazy::new(FixtureLoader::default);

/// Process-wide loader over [`default_data_dir`].
///
/// Its caches live until the process exits.
pub fn shared() -> &'static FixtureLoader {
    &SHARED
}

/// Returns true if the default data directory exists.
pub fn fixtures_available() -> bool {
    shared().fixtures_available()
}

/// [`FixtureLoader::read_bytes`] on the shared loader.
pub fn read_fixture_bytes(filename: &str, subdir: Option<&str>) -> Result<Vec<u8>> {
    shared().read_bytes(filename, subdir)
}

/// [`FixtureLoader::read_text`] on the shared loader.
pub fn read_fixture_text(filename: &str, subdir: Option<&str>) -> Result<Arc<str>> {
    shared().read_text(filename, subdir)
}

/// [`FixtureLoader::read_object`] on the shared loader.
pub fn read_fixture_object(filename: &str) -> Result<Arc<Value>> {
    shared().read_object(filename)
}

/// Returns early from the enclosing test if fixtures are unavailable.
///
/// With no argument the shared loader is checked; otherwise the given
/// loader is. The skip reason is printed so it shows up in test output.
/// Nothing is read when the test is skipped.
///
/// ```rust
/// use hedl_fixtures::{require_fixtures, FixtureLoader};
///
/// fn needs_corpus() -> bool {
///     let loader = FixtureLoader::new("/nonexistent/corpus");
///     require_fixtures!(loader, false);
///     true
/// }
///
/// assert!(!needs_corpus());
/// ```
#[macro_export]
macro_rules! require_fixtures {
    () => {
        $crate::require_fixtures!($crate::shared())
    };
    ($loader:expr) => {
        $crate::require_fixtures!($loader, ())
    };
    ($loader:expr, $ret:expr) => {
        if let Some(reason) = $loader.skip_reason() {
            eprintln!("skipped: {}", reason);
            return $ret;
        }
    };
}
