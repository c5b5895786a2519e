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

//! Where fixture bytes come from.
//!
//! [`FixtureSource`] is the only place the loader touches storage, which lets
//! tests substitute an instrumented source and observe cache behavior.

use std::io;
use std::path::Path;

/// Read-only access to fixture storage.
pub trait FixtureSource: Send + Sync {
    /// Reads the whole file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Returns true if `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists the names of regular files directly inside `dir`.
    fn list(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl FixtureSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Non UTF-8 names cannot be passed back in as fixture filenames
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

impl<S: FixtureSource + ?Sized> FixtureSource for std::sync::Arc<S> {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<String>> {
        (**self).list(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_fs_source_read_and_exists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.json");
        fs::write(&path, b"[]").unwrap();

        assert!(FsSource.exists(&path));
        assert!(!FsSource.exists(&dir.path().join("b.json")));
        assert_eq!(FsSource.read(&path).unwrap(), b"[]");

        let err = FsSource.read(&dir.path().join("b.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_fs_source_list_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.json"), b"1").unwrap();
        fs::write(dir.path().join("two.json.xz"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let mut names = FsSource.list(dir.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["one.json", "two.json.xz"]);
    }
}
