// ============================================================================
// MemoryStore - In-process key-value store
// ============================================================================
// Same contract as the redb store without touching disk. Used for tests and
// for running the assistant without a database file.
// ============================================================================

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::sync::RwLock;

use super::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        Ok(entries.keys().cloned().collect())
    }
}
