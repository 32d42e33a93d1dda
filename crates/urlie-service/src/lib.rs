//! Link allocation and resolution services.
//!
//! Two mutually exclusive storage strategies implement the same
//! [`Allocator`]/[`Resolver`] pair: [`PersistentService`] reserves codes in
//! an atomic key-value store, [`StatelessService`] signs the destination
//! into the code itself. [`LinkService`] is the tagged variant the rest of
//! the system holds; the strategy is picked once at startup, not branched
//! on per call site.

pub mod persistent;
pub mod stateless;
mod validate;

pub use persistent::PersistentService;
pub use stateless::StatelessService;

use async_trait::async_trait;
use urlie_core::{Allocator, CreateRequest, CreateResult, ResolveError, Resolver, ShortenError};

/// The storage strategy selected at process configuration time.
pub enum LinkService {
    Persistent(PersistentService),
    Stateless(StatelessService),
}

#[async_trait]
impl Allocator for LinkService {
    async fn allocate(&self, request: CreateRequest) -> Result<CreateResult, ShortenError> {
        match self {
            LinkService::Persistent(service) => service.allocate(request).await,
            LinkService::Stateless(service) => service.allocate(request).await,
        }
    }
}

#[async_trait]
impl Resolver for LinkService {
    async fn resolve(&self, code: &str) -> Result<String, ResolveError> {
        match self {
            LinkService::Persistent(service) => service.resolve(code).await,
            LinkService::Stateless(service) => service.resolve(code).await,
        }
    }
}
