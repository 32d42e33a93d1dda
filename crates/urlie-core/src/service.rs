use crate::error::{ResolveError, ShortenError};
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Parameters for creating a short link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    /// The destination URL to shorten.
    pub url: String,
    /// Optional absolute expiry instant. Absent means no expiry for
    /// persistent storage and the default horizon for tokens.
    pub expires_at: Option<Timestamp>,
    /// Optional caller-chosen slug (persistent storage only).
    pub custom_slug: Option<String>,
}

impl CreateRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            expires_at: None,
            custom_slug: None,
        }
    }

    pub fn expires_at(mut self, at: Timestamp) -> Self {
        self.expires_at = Some(at);
        self
    }

    pub fn custom_slug(mut self, slug: impl Into<String>) -> Self {
        self.custom_slug = Some(slug.into());
        self
    }
}

/// The outcome of a successful allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResult {
    /// The code appended after `/r/` to form the short link.
    pub code: ShortCode,
    /// The full shareable URL.
    pub full_short_url: String,
}

#[async_trait]
pub trait Allocator: Send + Sync + 'static {
    /// Creates a short link for the given request.
    async fn allocate(&self, request: CreateRequest) -> Result<CreateResult, ShortenError>;
}

#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    /// Resolves a code back to its destination URL.
    async fn resolve(&self, code: &str) -> Result<String, ResolveError>;
}
