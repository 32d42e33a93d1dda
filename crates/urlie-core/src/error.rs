use thiserror::Error;

/// Errors raised by the key-value store adapters.
///
/// The conditional-write contract is a strict boolean: `false` means the
/// key was already present, nothing else. Any other adapter response
/// (unexpected reply shape, transport failure, timeout) surfaces here and
/// is never treated as a collision.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store returned invalid data: {0}")]
    InvalidData(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Errors raised by the token codec.
///
/// Structural, cryptographic, and issuer failures all collapse into
/// [`TokenError::Invalid`] so a caller probing with forged tokens learns
/// nothing about which check rejected them. Expiry stays distinguishable
/// for the presentation layer.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("token is invalid")]
    Invalid,
    #[error("token has expired")]
    Expired,
}

/// Errors raised while creating a short link.
#[derive(Debug, Clone, Error)]
pub enum ShortenError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid expiry: {0}")]
    InvalidExpiry(String),
    #[error("invalid slug: {0}")]
    InvalidSlug(String),
    #[error("slug is reserved: {0}")]
    SlugReserved(String),
    #[error("slug already taken: {0}")]
    SlugTaken(String),
    #[error("code allocation exhausted after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while resolving a code back to its destination.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("short link not found")]
    NotFound,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
