use crate::error::StoreError;
use async_trait::async_trait;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, StoreError>;

/// An atomic key-value store used to reserve short codes.
///
/// The conditional write is the only concurrency-control primitive in the
/// system: when two requests race on the same key, the store lets exactly
/// one `set_if_absent` succeed. Implementations must guarantee that a
/// rejected write leaves no trace.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Writes `value` under `key` only if the key does not already exist.
    ///
    /// Returns `true` on a successful reservation and `false` when the key
    /// was already present. With a `ttl`, the entry disappears from the
    /// store once the duration elapses; afterwards the key is reclaimable.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<bool>;

    /// Reads the value under `key`. Expired entries read as absent,
    /// indistinguishable from keys that never existed.
    async fn get(&self, key: &str) -> Result<Option<String>>;
}
