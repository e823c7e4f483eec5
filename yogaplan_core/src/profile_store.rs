//! Stored profile preferences with file locking.
//!
//! The planner itself never persists anything; this store keeps the CLI's
//! saved profile between runs.

use crate::profile::RawProfile;
use crate::{Error, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name of the stored profile inside the data directory
pub const PROFILE_FILE: &str = "profile.json";

/// JSON-file backed profile store
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located in a data directory
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(PROFILE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the stored profile with shared locking
    ///
    /// Returns an empty profile if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns an empty profile.
    pub fn load(&self) -> Result<RawProfile> {
        if !self.path.exists() {
            tracing::debug!("No stored profile at {:?}", self.path);
            return Ok(RawProfile::default());
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open profile {:?}: {}. Using an empty profile.",
                    self.path,
                    e
                );
                return Ok(RawProfile::default());
            }
        };

        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        // Mistyped fields are dropped one by one; only unreadable JSON or a
        // non-record discards the whole profile
        let parsed = serde_json::from_str::<serde_json::Value>(&contents)
            .map_err(Error::from)
            .and_then(|value| RawProfile::from_value(&value));

        match parsed {
            Ok(profile) => {
                tracing::debug!("Loaded stored profile from {:?}", self.path);
                Ok(profile)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse profile {:?}: {}. Using an empty profile.",
                    self.path,
                    e
                );
                Ok(RawProfile::default())
            }
        }
    }

    /// Save the profile with exclusive locking
    ///
    /// Writes to a temp file in the same directory, syncs it and renames it
    /// over the original.
    pub fn save(&self, profile: &RawProfile) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::Other("profile path missing parent".into()))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(profile)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile to {:?}", self.path);
        Ok(())
    }

    /// Path of the sidecar file locked for the duration of [`update`](Self::update)
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| PROFILE_FILE.into());
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Merge an update into the stored profile and save the result
    ///
    /// The whole load-merge-save runs under an exclusive lock on the sidecar
    /// file, so concurrent updates to different fields are all kept.
    pub fn update(&self, changes: RawProfile) -> Result<RawProfile> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        lock.lock_exclusive()?;

        let result = self.load().and_then(|mut profile| {
            profile.merge(changes);
            self.save(&profile)?;
            Ok(profile)
        });

        lock.unlock()?;
        result
    }
}
