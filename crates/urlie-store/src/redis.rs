use async_trait::async_trait;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, trace};
use urlie_core::store::Result;
use urlie_core::{KvStore, StoreError};

const KEY_PREFIX: &str = "urlie:link:";

/// Redis implementation of [`KvStore`].
///
/// The conditional write maps directly onto `SET key value NX [PX ms]`,
/// which Redis executes atomically per key. TTLs are enforced server-side,
/// so an expired key reads as absent without any client-side bookkeeping.
#[derive(Debug, Clone)]
pub struct RedisKvStore {
    conn: redis::aio::MultiplexedConnection,
}

impl RedisKvStore {
    /// Creates a store from an existing multiplexed connection.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Creates a store by opening a new connection to the given Redis URL.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| StoreError::Unavailable(format!("invalid redis url: {e}")))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;
        Ok(Self::new(conn))
    }

    fn key(code: &str) -> String {
        format!("{KEY_PREFIX}{code}")
    }
}

fn map_redis_error(err: redis::RedisError) -> StoreError {
    let message = err.to_string();
    if err.is_timeout() {
        StoreError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StoreError::Unavailable(message)
    } else {
        StoreError::Operation(message)
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<bool> {
        let full_key = Self::key(key);
        trace!(key = %key, "attempting conditional write");

        let mut cmd = redis::cmd("SET");
        cmd.arg(&full_key).arg(value).arg("NX");
        if let Some(ttl) = ttl {
            // redis rejects PX 0
            cmd.arg("PX").arg((ttl.as_millis() as u64).max(1));
        }

        let mut conn = self.conn.clone();
        let reply: Option<String> = cmd.query_async(&mut conn).await.map_err(map_redis_error)?;

        // Strict boolean contract: OK means written, nil means the key was
        // taken. Any other reply is an adapter fault, not a collision.
        match reply.as_deref() {
            Some("OK") => {
                debug!(key = %key, "reserved key");
                Ok(true)
            }
            None => Ok(false),
            Some(other) => Err(StoreError::InvalidData(format!(
                "unexpected SET reply: {other}"
            ))),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let full_key = Self::key(key);
        trace!(key = %key, "fetching value");

        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(&full_key)
            .await
            .map_err(map_redis_error)
    }
}
