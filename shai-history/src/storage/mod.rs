mod file_store;
mod memory_store;
mod redis_store;

use std::path::Path;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

#[derive(Clone, Debug)]
enum StorageBackend {
    Memory(MemoryStore),
    File(FileStore),
    Redis(RedisStore),
}

/// Namespaced key/value storage the history store persists through.
#[derive(Clone, Debug)]
pub struct StorageService {
    key_prefix: String,
    backend: StorageBackend,
}

impl StorageService {
    pub fn memory(prefix: impl Into<String>) -> Self {
        Self::from_memory(MemoryStore::new(), prefix)
    }

    /// Wrap an existing memory store so the caller keeps a handle to it.
    pub fn from_memory(store: MemoryStore, prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: StorageBackend::Memory(store),
        }
    }

    pub fn file(root: impl AsRef<Path>, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: StorageBackend::File(FileStore::new(root)?),
        })
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: StorageBackend::Redis(RedisStore::from_url(redis_url)?),
        })
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            StorageBackend::Memory(_) => "memory",
            StorageBackend::File(_) => "file",
            StorageBackend::Redis(_) => "redis",
        }
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, StorageBackend::Redis(_))
    }

    /// Round-trip to the backend. Local backends are always reachable.
    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            StorageBackend::Memory(_) | StorageBackend::File(_) => Ok(()),
            StorageBackend::Redis(store) => store.ping().await,
        }
    }

    pub async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        match &self.backend {
            StorageBackend::Memory(store) => store.get(key).await,
            StorageBackend::File(store) => store.get(key).await,
            StorageBackend::Redis(store) => store.get(key).await,
        }
    }

    pub async fn set(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()> {
        match &self.backend {
            StorageBackend::Memory(store) => store.set(key, value).await,
            StorageBackend::File(store) => store.set(key, value).await,
            StorageBackend::Redis(store) => store.set(key, value).await,
        }
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        match &self.backend {
            StorageBackend::Memory(store) => store.del(key).await,
            StorageBackend::File(store) => store.del(key).await,
            StorageBackend::Redis(store) => store.del(key).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed() {
        let storage = StorageService::memory("shai:test");
        assert_eq!(storage.key("history:shared"), "shai:test:history:shared");
        assert_eq!(storage.backend_name(), "memory");
        assert!(!storage.is_redis_enabled());
    }

    #[tokio::test]
    async fn memory_backend_shares_state_with_handle() {
        let handle = MemoryStore::new();
        let storage = StorageService::from_memory(handle.clone(), "shai:test");

        storage.set("k", b"v".to_vec()).await.unwrap();
        assert_eq!(handle.get("k").await.unwrap(), Some(b"v".to_vec()));

        handle.set_available(false);
        assert!(storage.get("k").await.is_err());
        assert!(storage.del("k").await.is_err());

        handle.set_available(true);
        storage.del("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }
}
