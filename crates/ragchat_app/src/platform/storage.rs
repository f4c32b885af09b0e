//! Key-value storage for persisted chat state.
//!
//! The store is injected into the persistence layer as a trait so state can
//! be persisted and restored without touching the filesystem in tests.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use chat_logging::{chat_error, chat_warn};
use tempfile::NamedTempFile;

/// Environment variable overriding the state directory.
pub(crate) const STATE_DIR_ENV: &str = "RAGCHAT_STATE_DIR";

pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolves the directory holding persisted chat state.
pub(crate) fn state_dir() -> PathBuf {
    std::env::var_os(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".ragchat"))
}

/// One file per key under a state directory, written atomically.
pub(crate) struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub(crate) fn new(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn write_atomic(&self, key: &str, value: &str) -> io::Result<()> {
        let target = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace existing file if present to keep determinism.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|err| err.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                chat_warn!("Failed to read key {}: {}", key, err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(err) = self.write_atomic(key, value) {
            chat_error!("Failed to write key {}: {}", key, err);
        }
    }

    fn remove(&mut self, key: &str) {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => chat_warn!("Failed to remove key {}: {}", key, err),
        }
    }
}
