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

//! Property tests for compressed fixtures and text caching

use hedl_fixtures::{Compression, FixtureLoader};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Bytes stored as `.xz` read back unchanged.
    #[test]
    fn prop_xz_fixture_reads_back(payload in prop::collection::vec(any::<u8>(), 0..4096)) {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("blob.bin.xz"),
            Compression::Xz.compress(&payload).unwrap(),
        )
        .unwrap();

        let loader = FixtureLoader::new(dir.path());
        prop_assert_eq!(loader.read_bytes("blob.bin.xz", None).unwrap(), payload);
    }

    /// Text is served from cache after the first read, whatever is on disk.
    #[test]
    fn prop_text_cached_after_first_read(first in "\\PC{0,64}", second in "\\PC{0,64}") {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("text.txt");
        fs::write(&path, &first).unwrap();

        let loader = FixtureLoader::new(dir.path());
        let cached = loader.read_text("text.txt", None).unwrap();
        fs::write(&path, &second).unwrap();

        let again = loader.read_text("text.txt", None).unwrap();
        prop_assert_eq!(&*cached, first.as_str());
        prop_assert_eq!(&*again, first.as_str());
    }
}
