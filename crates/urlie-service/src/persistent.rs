use crate::validate::{check_expiry, validate_url};
use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};
use urlie_core::{
    Allocator, CreateRequest, CreateResult, KvStore, ResolveError, Resolver, ShortCode,
    ShortenError,
};
use urlie_generator::CodeGenerator;

/// Retry bound for generated-code allocation. Each rejected write is a
/// collision; with a 57^6 key space, reaching this bound means the store
/// is saturated or misbehaving.
const MAX_ATTEMPTS: u32 = 6;

/// Short link service backed by an atomic key-value store.
///
/// Allocation reserves codes through the store's conditional write, which
/// resolves races between concurrent requests by letting exactly one
/// succeed. No locks are held across retries; every attempt is a single
/// atomic round trip.
pub struct PersistentService {
    store: Arc<dyn KvStore>,
    generator: Arc<dyn CodeGenerator>,
    base_url: String,
}

impl PersistentService {
    pub fn new(
        store: Arc<dyn KvStore>,
        generator: Arc<dyn CodeGenerator>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            generator,
            base_url: base_url.into(),
        }
    }

    fn ttl_from(expire_at: Option<Timestamp>) -> Option<Duration> {
        // check_expiry already rejected past instants, but the expiry can
        // slip behind `now` between that check and this computation, so
        // clamp instead of letting a negative duration flip positive.
        expire_at.map(|at| {
            at.duration_since(Timestamp::now())
                .max(SignedDuration::ZERO)
                .unsigned_abs()
        })
    }

    fn result(&self, code: ShortCode) -> CreateResult {
        let full_short_url = code.full_url(&self.base_url);
        CreateResult {
            code,
            full_short_url,
        }
    }
}

#[async_trait]
impl Allocator for PersistentService {
    async fn allocate(&self, request: CreateRequest) -> Result<CreateResult, ShortenError> {
        let url = validate_url(&request.url)?;
        let expire_at = check_expiry(request.expires_at)?;
        let ttl = Self::ttl_from(expire_at);

        // Caller-chosen slug: exactly one reservation attempt. The caller
        // asked for this specific identifier, so a collision is final.
        if let Some(slug) = request.custom_slug {
            let code = ShortCode::from_slug(&slug)?;
            if !self.store.set_if_absent(code.as_str(), &url, ttl).await? {
                return Err(ShortenError::SlugTaken(code.as_str().to_owned()));
            }
            debug!(code = %code, "reserved custom slug");
            return Ok(self.result(code));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let code = self.generator.generate();
            trace!(code = %code, attempt, "attempting code reservation");

            if self.store.set_if_absent(code.as_str(), &url, ttl).await? {
                debug!(code = %code, attempt, "allocated code");
                return Ok(self.result(code));
            }
            // Rejected write: a collision. Retry with a fresh draw.
        }

        warn!(
            attempts = MAX_ATTEMPTS,
            "code allocation exhausted; key space saturated or store misbehaving"
        );
        Err(ShortenError::AllocationExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}

#[async_trait]
impl Resolver for PersistentService {
    async fn resolve(&self, code: &str) -> Result<String, ResolveError> {
        trace!(code = %code, "resolving code");

        match self.store.get(code).await? {
            Some(url) => {
                debug!(code = %code, url = %url, "resolved code");
                Ok(url)
            }
            // TTL-expired keys read as absent, so both report NotFound.
            None => Err(ResolveError::NotFound),
        }
    }
}
