use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use jiff::Timestamp;
use std::time::Duration;
use urlie_core::store::Result;
use urlie_core::{KvStore, StoreError};

/// In-memory storage entry.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expire_at: Option<Timestamp>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expire_at
            .is_some_and(|expire_at| Timestamp::now() >= expire_at)
    }
}

/// In-memory implementation of [`KvStore`] using DashMap.
///
/// DashMap's entry API holds the shard lock for the whole check-and-insert,
/// which gives `set_if_absent` the per-key atomicity the contract requires.
/// Expiry is lazy: expired entries read as absent and are reclaimable by a
/// later `set_if_absent`.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: DashMap<String, Entry>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<bool> {
        let expire_at = ttl
            .map(|ttl| {
                let ttl = jiff::SignedDuration::try_from(ttl)
                    .map_err(|e| StoreError::InvalidData(format!("ttl out of range: {e}")))?;
                Ok::<_, StoreError>(Timestamp::now() + ttl)
            })
            .transpose()?;

        let entry = Entry {
            value: value.to_owned(),
            expire_at,
        };

        match self.entries.entry(key.to_owned()) {
            MapEntry::Occupied(mut occupied) => {
                if occupied.get().is_expired() {
                    occupied.insert(entry);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(entry);
                Ok(true)
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };

        if entry.is_expired() {
            drop(entry);
            self.entries.remove(key);
            return Ok(None);
        }

        Ok(Some(entry.value.clone()))
    }
}
