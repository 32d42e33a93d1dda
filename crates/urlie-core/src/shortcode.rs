use crate::error::ShortenError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 32;

/// Slugs claimed by the HTTP surface itself. A custom slug matching one of
/// these would shadow a route prefix, so reservation rejects them outright.
const RESERVED_SLUGS: &[&str] = &["api", "r", "_next"];

/// A validated short code identifier for a shortened URL.
///
/// Short codes are 3-32 characters long and contain only alphanumeric
/// characters, hyphens, or underscores.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a `ShortCode` from a caller-chosen slug.
    ///
    /// The slug is trimmed and lowercased before validation, so `" Launch "`
    /// and `"launch"` reserve the same key. Fails with
    /// [`ShortenError::InvalidSlug`] on a pattern violation and
    /// [`ShortenError::SlugReserved`] when the slug collides with a route
    /// prefix owned by the gateway.
    pub fn from_slug(slug: impl AsRef<str>) -> Result<Self, ShortenError> {
        let slug = slug.as_ref().trim().to_lowercase();
        Self::validate(&slug)?;
        if RESERVED_SLUGS.contains(&slug.as_str()) {
            return Err(ShortenError::SlugReserved(slug));
        }
        Ok(Self(slug))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. the code generator, which draws from a valid alphabet).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Composes the full shareable URL under the redirect prefix.
    pub fn full_url(&self, base_url: &str) -> String {
        format!("{}/r/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), ShortenError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(ShortenError::InvalidSlug(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ShortenError::InvalidSlug(format!(
                "must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
