//! Core types and traits for the urlie link shortener.
//!
//! This crate provides the shared vocabulary used by the allocation
//! engine, the resolver, the storage adapters, and the HTTP gateway.

pub mod error;
pub mod service;
pub mod shortcode;
pub mod store;

pub use error::{ResolveError, ShortenError, StoreError, TokenError};
pub use service::{Allocator, CreateRequest, CreateResult, Resolver};
pub use shortcode::ShortCode;
pub use store::KvStore;
