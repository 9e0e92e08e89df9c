use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

pub const ENTRIES_KEY: &str = "mood-tracker-entries";
pub const GRATITUDE_KEY: &str = "mood-tracker-gratitude";
pub const SETTINGS_KEY: &str = "mood-tracker-settings";

// Key-value storage holding one JSON document per key.
// Last writer wins. Callers that load, mutate and save must serialize
// among themselves; the HTTP layer holds `AppState::write_lock` for that.
pub trait KvStore: Send + Sync {
    fn load(&self, key: &str) -> io::Result<Option<String>>;
    fn save(&self, key: &str, json: &str) -> io::Result<()>;
    fn clear(&self, key: &str) -> io::Result<()>;
}

// One `<key>.json` file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, key: &str, json: &str) -> io::Result<()> {
        let path = self.path_for(key);
        // unique per save so concurrent writers never share a temp file
        let tmp_path = self
            .dir
            .join(format!("{key}.json.{}.tmp", uuid::Uuid::new_v4()));

        fs::create_dir_all(&self.dir)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn clear(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store lock poisoned"))
    }
}

impl KvStore for MemoryStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save(&self, key: &str, json: &str) -> io::Result<()> {
        self.lock()?.insert(key.to_string(), json.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> io::Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));

        assert_eq!(store.load(ENTRIES_KEY).unwrap(), None);

        store.save(ENTRIES_KEY, "[]").unwrap();
        assert_eq!(store.load(ENTRIES_KEY).unwrap().as_deref(), Some("[]"));
        let leftovers = fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);

        store.clear(ENTRIES_KEY).unwrap();
        assert_eq!(store.load(ENTRIES_KEY).unwrap(), None);
        // clearing a missing key is fine
        store.clear(ENTRIES_KEY).unwrap();
    }

    #[test]
    fn parallel_saves_to_one_key_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FileStore::new(dir.path()));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.save(ENTRIES_KEY, &format!("[{i}]")))
            })
            .collect();
        for h in handles {
            h.join().unwrap().unwrap();
        }

        let text = store.load(ENTRIES_KEY).unwrap().unwrap();
        let value: Vec<i32> = serde_json::from_str(&text).unwrap();
        assert_eq!(value.len(), 1);
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::new();
        store.save(SETTINGS_KEY, "{}").unwrap();
        store.save(SETTINGS_KEY, r#"{"theme":"dusk"}"#).unwrap();
        assert_eq!(
            store.load(SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"theme":"dusk"}"#)
        );
    }
}
