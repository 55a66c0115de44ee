use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Process-local key/value store.
///
/// Clones share the same map, so a handle kept by a test observes every write
/// made through the service. `set_available(false)` makes every operation
/// fail the way disabled or over-quota storage does. `set_readable(false)`
/// fails only reads, like a timed-out GET on a store that still accepts writes.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    available: Arc<AtomicBool>,
    readable: Arc<AtomicBool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
            readable: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_readable(&self, readable: bool) {
        self.readable.store(readable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> anyhow::Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(anyhow::anyhow!("memory store is unavailable"))
        }
    }

    pub async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        self.ensure_available()?;
        if !self.readable.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("memory store read timed out"));
        }
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;

        Ok(entries.get(key).cloned())
    }

    pub async fn set(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()> {
        self.ensure_available()?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;

        entries.insert(key.to_owned(), value);
        Ok(())
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        self.ensure_available()?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;

        entries.remove(key);
        Ok(())
    }
}
