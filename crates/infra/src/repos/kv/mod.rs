mod file;
mod inmemory;

pub use file::FileKeyValueStore;
pub use inmemory::InMemoryKeyValueStore;

/// Minimal key-value surface backing the notification reference index.
/// Any store that supports lookup by key and enumeration of all keys can
/// stand in for the default implementations.
#[async_trait::async_trait]
pub trait IKeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
    async fn list_keys(&self) -> anyhow::Result<Vec<String>>;
}
