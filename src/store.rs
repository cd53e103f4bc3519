/*
 * MIT License
 *
 * Copyright (c) 2022 Joseph Sacchini
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreErr {
    #[error("storage i/o failure")]
    Io(#[from] io::Error),
    #[error("storage encoding failure")]
    Encode(#[from] serde_json::Error),
}

///
/// A synchronous string key-value store, holding one serialized record per key.
///
/// The game core never reaches for a global storage singleton; whoever embeds it passes one of
/// these in, so tests can swap in MemoryStore and pin every read/write.
///
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreErr>;
    fn remove(&mut self, key: &str) -> Result<(), StoreErr>;
}

/// In-memory store. Nothing survives the process; this is the deterministic test double.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreErr> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreErr> {
        self.entries.remove(key);
        Ok(())
    }
}

///
/// Durable store backed by a single JSON file (a string-to-string map). The whole map is read at
/// open and rewritten on every mutation.
///
/// Writes go through a temp file in the same directory which is then renamed over the target, so
/// a crash mid-write can never leave a half-written file behind.
///
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    ///
    /// Opens the store at the given path, creating an empty one if the file does not exist yet.
    ///
    /// An existing file that cannot be parsed is treated the same as a missing one: the old
    /// contents are abandoned and the store starts empty (the next write replaces the file).
    ///
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreErr> {
        let path = path.into();
        let entries = match File::open(&path) {
            Ok(f) => match serde_json::from_reader(BufReader::new(f)) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!(
                        "discarding unreadable store file {}: {}",
                        path.display(),
                        err
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreErr> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let temp_file = NamedTempFile::new_in(parent)?;
        serde_json::to_writer(BufWriter::new(&temp_file), &self.entries)?;
        temp_file
            .persist(&self.path)
            .map_err(|err| StoreErr::Io(err.error))?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreErr> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreErr> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v1".to_string()).unwrap();
        assert_eq!(store.get("k"), Some("v1".to_string()));

        store.set("k", "v2".to_string()).unwrap();
        assert_eq!(store.get("k"), Some("v2".to_string()));

        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("wordleState", "{\"word\":\"apple\"}".to_string()).unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("wordleState"), Some("{\"word\":\"apple\"}".to_string()));
    }

    #[test]
    fn test_file_store_tolerates_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json at all").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("wordleState"), None);

        // and writing replaces the broken file with a good one
        store.set("wordleState", "{}".to_string()).unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("wordleState"), Some("{}".to_string()));
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v".to_string()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_remove_missing_key_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("state.json")).unwrap();
        store.remove("nope").unwrap();
        assert!(!store.path().exists());
    }
}
