use super::types::CheckinSnapshot;
use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

pub const HISTORY_FILE: &str = "wellness_log.json";
pub const TASKS_FILE: &str = "tasks.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    History,
    Tasks,
}

impl Collection {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::History => HISTORY_FILE,
            Self::Tasks => TASKS_FILE,
        }
    }
}

/// One element of a collection array.
///
/// Elements that do not match `T` are carried as raw JSON so a rewrite
/// never drops records this build cannot read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredRecord<T> {
    Valid(T),
    Unrecognized(Value),
}

impl<T> StoredRecord<T> {
    pub fn valid_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Valid(record) => Some(record),
            Self::Unrecognized(_) => None,
        }
    }

    fn into_valid(self) -> Option<T> {
        match self {
            Self::Valid(record) => Some(record),
            Self::Unrecognized(_) => None,
        }
    }
}

/// Flat-file JSON store rooted at one directory.
///
/// Each collection is a single JSON array rewritten in full on every change.
/// Writes go through a sibling `.tmp` file and a rename, so readers see either
/// the old or the new array. There is no locking between writers.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self { root: root.into() };
        fs::create_dir_all(&store.root).map_err(|source| StorageError::Directory {
            path: store.root.clone(),
            source,
        })?;
        store.ensure_collection(Collection::History)?;
        store.ensure_collection(Collection::Tasks)?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    pub fn snapshot_path(&self, checkin_id: Uuid) -> PathBuf {
        self.root.join(format!("checkin_{checkin_id}.json"))
    }

    fn ensure_collection(&self, collection: Collection) -> Result<(), StorageError> {
        let path = self.collection_path(collection);
        if path.exists() {
            return Ok(());
        }
        write_atomic(&path, "[]")
    }

    /// Load the records of a collection that parse as `T`, in file order.
    pub fn read<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let records = self.read_records::<T>(collection);
        let total = records.len();
        let valid: Vec<T> = records
            .into_iter()
            .filter_map(StoredRecord::into_valid)
            .collect();
        if valid.len() < total {
            warn!(
                %collection,
                skipped = total - valid.len(),
                "skipping unrecognized records"
            );
        }
        valid
    }

    /// Load every element of a collection. Missing, empty or malformed files
    /// and non-array content read as `[]`.
    pub fn read_records<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Vec<StoredRecord<T>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            if let Err(error) = self.ensure_collection(collection) {
                warn!(%collection, %error, "could not create collection file");
            }
            return Vec::new();
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(%collection, path = %path.display(), %error, "collection unreadable, treating as empty");
                return Vec::new();
            }
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<StoredRecord<T>>>(&raw) {
            Ok(records) => {
                debug!(%collection, count = records.len(), "collection loaded");
                records
            }
            Err(error) => {
                warn!(%collection, path = %path.display(), %error, "malformed collection, treating as empty");
                Vec::new()
            }
        }
    }

    pub fn replace<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> Result<PathBuf, StorageError> {
        let path = self.collection_path(collection);
        let body = serde_json::to_string_pretty(records)?;
        write_atomic(&path, &body)?;
        debug!(%collection, count = records.len(), "collection replaced");
        Ok(path)
    }

    /// Read-modify-rewrite. The file never grows in place.
    pub fn append<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        record: T,
    ) -> Result<PathBuf, StorageError> {
        self.extend(collection, [record])
    }

    /// Append several records in one rewrite. Existing elements are written
    /// back unchanged, recognized or not.
    pub fn extend<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        new_records: impl IntoIterator<Item = T>,
    ) -> Result<PathBuf, StorageError> {
        let mut records: Vec<StoredRecord<T>> = self.read_records(collection);
        records.extend(new_records.into_iter().map(StoredRecord::Valid));
        self.replace(collection, &records)
    }

    pub fn write_snapshot(&self, snapshot: &CheckinSnapshot) -> Result<PathBuf, StorageError> {
        let path = self.snapshot_path(snapshot.checkin_id);
        let body = serde_json::to_string_pretty(snapshot)?;
        write_atomic(&path, &body)?;
        Ok(path)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::Directory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, content).map_err(|source| StorageError::Write {
        path: temp_path.clone(),
        source,
    })?;

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::Replace {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}
