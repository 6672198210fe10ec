use super::IKeyValueStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Key-value store persisted as a single JSON object on disk. The index
/// is small (a handful of entries per user), so the whole map is loaded
/// at open and rewritten on every mutation.
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileKeyValueStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        "Reference index file at {:?} is not valid JSON, starting empty. Err: {:?}",
                        path, e
                    );
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> anyhow::Result<()> {
        let raw = serde_json::to_string(entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IKeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
        self.flush(&entries)
    }

    async fn list_keys(&self) -> anyhow::Result<Vec<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("references.json");

        let store = FileKeyValueStore::open(&path).unwrap();
        store.set("notification_1", "{}").await.unwrap();
        store.set("notification_2", "{}").await.unwrap();
        store.remove("notification_2").await.unwrap();
        drop(store);

        let store = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(
            store.get("notification_1").await.unwrap(),
            Some("{}".into())
        );
        assert_eq!(store.get("notification_2").await.unwrap(), None);
        assert_eq!(store.list_keys().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn starts_empty_when_file_is_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("references.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileKeyValueStore::open(&path).unwrap();
        assert!(store.list_keys().await.unwrap().is_empty());
    }
}
