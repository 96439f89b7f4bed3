// Versioned JSON persistence for per-user record collections.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the serialized shape of Application, PlannerTask,
// InterviewRound, or ResumeVersion require incrementing STORAGE_VERSION
// below to prevent data corruption.
use crate::context::SharedContext;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// Version history:
// - v0: bare JSON array, written by the first migration of the old export
// - v1: {version, records} wrapper
const STORAGE_VERSION: u32 = 1;

/// Wrapper struct for versioned collection files.
#[derive(serde::Serialize, serde::Deserialize)]
struct CollectionData<T> {
    #[serde(default)]
    version: u32,
    records: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Uninitialized,
    Success,
    Failed,
}

/// Disk access for one data root. Holds its context explicitly; there is no
/// global instance and nothing to initialize before first use.
#[derive(Debug)]
pub struct LocalStorage {
    ctx: SharedContext,
    /// Last load outcome per collection. A collection whose load failed
    /// refuses subsequent saves so unreadable data is never overwritten.
    load_state: Mutex<HashMap<String, LoadState>>,
}

impl LocalStorage {
    pub fn new(ctx: SharedContext) -> Self {
        Self {
            ctx,
            load_state: Mutex::new(HashMap::new()),
        }
    }

    pub fn context(&self) -> &SharedContext {
        &self.ctx
    }

    /// `users/<safe-user>/<collection>.json` under the data directory.
    fn collection_path(&self, user: &str, collection: &str) -> Result<PathBuf> {
        let safe_user: String = user
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-')
            .collect();
        if safe_user.is_empty() {
            anyhow::bail!("Invalid user id: {:?}", user);
        }
        let dir = self.ctx.get_users_dir()?.join(safe_user);
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {:?}", dir))?;
        }
        Ok(dir.join(format!("{}.json", collection)))
    }

    fn state_key(user: &str, collection: &str) -> String {
        format!("{}/{}", user, collection)
    }

    fn get_state(&self, key: &str) -> LoadState {
        *self
            .load_state
            .lock()
            .unwrap()
            .get(key)
            .unwrap_or(&LoadState::Uninitialized)
    }

    fn set_state(&self, key: &str, state: LoadState) {
        self.load_state.lock().unwrap().insert(key.to_string(), state);
    }

    /// Helper to get a sidecar lock file path.
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: write to a .tmp file then rename.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Loads a collection, migrating unversioned files in place.
    ///
    /// Errors from this function must never be silently swallowed into an
    /// empty list: a failed load followed by a save would overwrite data
    /// that could not be read. `save_collection` enforces that via the
    /// per-collection load state.
    pub fn load_collection<T>(&self, user: &str, collection: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Serialize,
    {
        let key = Self::state_key(user, collection);
        let path = self.collection_path(user, collection)?;
        if !path.exists() {
            self.set_state(&key, LoadState::Success);
            return Ok(vec![]);
        }

        let result = Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;

            let (records, needs_rewrite) = match serde_json::from_str::<CollectionData<T>>(&json) {
                Ok(data) if data.version == STORAGE_VERSION => (data.records, false),
                Ok(data) if data.version > STORAGE_VERSION => {
                    anyhow::bail!(
                        "Collection {} is version {}, newer than supported version {}. Please upgrade joblog.",
                        collection,
                        data.version,
                        STORAGE_VERSION
                    );
                }
                Ok(data) => (data.records, true),
                // Unversioned legacy file: a bare array of records.
                Err(_) => {
                    log::info!(
                        "Migrating {}/{} from unversioned format to v{}",
                        user,
                        collection,
                        STORAGE_VERSION
                    );
                    let records = serde_json::from_str::<Vec<T>>(&json).with_context(|| {
                        format!("Failed to parse collection file {:?}", path)
                    })?;
                    (records, true)
                }
            };

            if needs_rewrite {
                let data = CollectionData {
                    version: STORAGE_VERSION,
                    records,
                };
                let upgraded = serde_json::to_string_pretty(&data)?;
                Self::atomic_write(&path, upgraded)?;
                return Ok(data.records);
            }

            Ok(records)
        });

        match &result {
            Ok(_) => self.set_state(&key, LoadState::Success),
            Err(_) => self.set_state(&key, LoadState::Failed),
        }
        result
    }

    /// Saves a collection in the current versioned format.
    pub fn save_collection<T>(&self, user: &str, collection: &str, records: &[T]) -> Result<()>
    where
        T: Serialize + Clone,
    {
        let key = Self::state_key(user, collection);
        if self.get_state(&key) == LoadState::Failed {
            anyhow::bail!(
                "Cannot save {}: previous load failed. This prevents overwriting data that couldn't be read.",
                key
            );
        }

        let path = self.collection_path(user, collection)?;
        Self::with_lock(&path, || {
            let data = CollectionData {
                version: STORAGE_VERSION,
                records: records.to_vec(),
            };
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use crate::model::PlannerTask;
    use std::sync::Arc;

    fn storage() -> LocalStorage {
        LocalStorage::new(Arc::new(TestContext::new()))
    }

    #[test]
    fn test_missing_collection_loads_empty() {
        let storage = storage();
        let tasks: Vec<PlannerTask> = storage.load_collection("local", "tasks").unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let storage = storage();
        let tasks = vec![PlannerTask::new("Write cover letter", 42)];
        storage.save_collection("local", "tasks", &tasks).unwrap();

        let loaded: Vec<PlannerTask> = storage.load_collection("local", "tasks").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Write cover letter");
        assert_eq!(loaded[0].created_at_millis, 42);
    }

    #[test]
    fn test_unversioned_file_is_migrated_in_place() {
        let storage = storage();
        let path = storage.collection_path("local", "tasks").unwrap();
        let legacy = serde_json::to_string(&vec![PlannerTask::new("Old record", 0)]).unwrap();
        fs::write(&path, legacy).unwrap();

        let loaded: Vec<PlannerTask> = storage.load_collection("local", "tasks").unwrap();
        assert_eq!(loaded.len(), 1);

        // The file on disk is now in the versioned format.
        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("\"version\""));
        assert!(rewritten.contains("\"records\""));
    }

    #[test]
    fn test_future_version_is_rejected() {
        let storage = storage();
        let path = storage.collection_path("local", "tasks").unwrap();
        fs::write(&path, r#"{"version": 999, "records": []}"#).unwrap();

        let result: Result<Vec<PlannerTask>> = storage.load_collection("local", "tasks");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("newer than supported"));
    }

    #[test]
    fn test_save_blocked_after_failed_load() {
        let storage = storage();
        let path = storage.collection_path("local", "tasks").unwrap();
        fs::write(&path, "{not json").unwrap();

        let load: Result<Vec<PlannerTask>> = storage.load_collection("local", "tasks");
        assert!(load.is_err());

        let save = storage.save_collection::<PlannerTask>("local", "tasks", &[]);
        assert!(save.is_err());
        assert!(save.unwrap_err().to_string().contains("previous load failed"));
    }

    #[test]
    fn test_user_ids_are_isolated_and_sanitized() {
        let storage = storage();
        storage
            .save_collection("alice", "tasks", &[PlannerTask::new("A", 0)])
            .unwrap();
        storage
            .save_collection("bob", "tasks", &[PlannerTask::new("B", 0), PlannerTask::new("C", 0)])
            .unwrap();

        let alice: Vec<PlannerTask> = storage.load_collection("alice", "tasks").unwrap();
        let bob: Vec<PlannerTask> = storage.load_collection("bob", "tasks").unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(bob.len(), 2);

        assert!(storage.collection_path("../evil", "tasks").is_ok());
        assert!(storage.collection_path("/", "tasks").is_err());
    }
}
