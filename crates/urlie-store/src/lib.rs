//! Key-value store adapters for short code reservation.
//!
//! Two implementations of the [`KvStore`](urlie_core::KvStore) contract:
//! an in-memory map for tests and single-process deployments, and Redis
//! for production (TTL enforced server-side, conditional write via
//! `SET .. NX`).

pub mod memory;
pub mod redis;

pub use memory::MemoryKvStore;
pub use redis::RedisKvStore;
