use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::config::project_dirs;

/// Single persisted slot holding the last successfully looked-up city.
pub trait LastCityStore {
    fn get(&self) -> Result<Option<String>>;
    fn set(&mut self, city: &str) -> Result<()>;
}

/// What `FileStore` writes to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastCityRecord {
    pub last_city: String,
    pub saved_at: DateTime<Utc>,
}

/// TOML file in the platform data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Result<Self> {
        let dirs = project_dirs()?;
        Ok(Self::new(dirs.data_dir().join("last_city.toml")))
    }

    /// The full record, including when it was written.
    pub fn record(&self) -> Result<Option<LastCityRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read last city file: {}", self.path.display()))?;

        let record: LastCityRecord = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse last city file: {}", self.path.display()))?;

        Ok(Some(record))
    }
}

impl LastCityStore for FileStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.record()?.map(|r| r.last_city))
    }

    fn set(&mut self, city: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let record = LastCityRecord {
            last_city: city.to_string(),
            saved_at: Utc::now(),
        };
        let toml = toml::to_string(&record).context("Failed to serialize last city")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write last city file: {}", self.path.display()))?;

        Ok(())
    }
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    city: Option<String>,
}

impl MemoryStore {
    pub fn with_city(city: &str) -> Self {
        Self {
            city: Some(city.to_string()),
        }
    }
}

impl LastCityStore for MemoryStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.city.clone())
    }

    fn set(&mut self, city: &str) -> Result<()> {
        self.city = Some(city.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_is_absent_until_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("last_city.toml"));

        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn file_store_overwrites_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("last_city.toml");

        let mut store = FileStore::new(path.clone());
        store.set("Paris").unwrap();
        store.set("Berlin").unwrap();

        let reopened = FileStore::new(path);
        assert_eq!(reopened.get().unwrap().as_deref(), Some("Berlin"));

        let record = reopened.record().unwrap().unwrap();
        assert!(record.saved_at <= Utc::now());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_city.toml");
        fs::write(&path, "not = [valid").unwrap();

        let err = FileStore::new(path).get().unwrap_err();
        assert!(err.to_string().contains("Failed to parse last city file"));
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get().unwrap(), None);

        store.set("Paris").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("Paris"));
    }
}
