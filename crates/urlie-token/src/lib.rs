//! Signed-token codec for stateless mode.
//!
//! Instead of persisting a mapping, the destination URL travels inside the
//! short code itself: a compact HS256-signed token carrying the URL and an
//! expiry. Verification proves the payload is untampered and still live.

use jiff::Timestamp;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use urlie_core::TokenError;

/// Issuer embedded in every token and checked on decode, so tokens minted
/// by a differently-configured deployment do not verify here.
pub const DEFAULT_ISSUER: &str = "urlie";

/// Tokens without a requested expiry still expire: one year from issuance.
const DEFAULT_TTL_SECS: i64 = 60 * 60 * 24 * 365;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Destination URL.
    u: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies self-contained link tokens with a shared secret.
///
/// The secret is process-wide and read-only after construction. The same
/// secret must be configured on every deployment that should accept the
/// token.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        Self::with_issuer(secret, DEFAULT_ISSUER)
    }

    pub fn with_issuer(secret: &str, issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
        }
    }

    /// Signs a token carrying `url`, expiring at `expires_at` or after the
    /// default one-year horizon. The output is base64url and safe to use
    /// directly as a path segment.
    pub fn encode(&self, url: &str, expires_at: Option<Timestamp>) -> Result<String, TokenError> {
        let now = Timestamp::now().as_second();
        let exp = match expires_at {
            Some(at) => at.as_second(),
            None => now + DEFAULT_TTL_SECS,
        };

        let claims = Claims {
            u: url.to_owned(),
            iss: self.issuer.clone(),
            iat: now,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Invalid)
    }

    /// Verifies a token and returns the embedded destination URL.
    ///
    /// Expiry is reported as [`TokenError::Expired`]; every other failure
    /// (bad signature, malformed structure, wrong issuer, missing claims)
    /// collapses into [`TokenError::Invalid`].
    pub fn decode(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Exact expiry: the default 60s leeway would accept just-expired
        // tokens and break the expiry contract.
        validation.leeway = 0;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        Ok(data.claims.u)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys deliberately omitted.
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    const SECRET: &str = "test-secret";
    const URL: &str = "https://example.com/some/long/path?q=1";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET)
    }

    #[test]
    fn round_trip() {
        let token = codec().encode(URL, None).unwrap();
        assert_eq!(codec().decode(&token).unwrap(), URL);
    }

    #[test]
    fn round_trip_with_future_expiry() {
        let expires = Timestamp::now() + SignedDuration::from_hours(2);
        let token = codec().encode(URL, Some(expires)).unwrap();
        assert_eq!(codec().decode(&token).unwrap(), URL);
    }

    #[test]
    fn expired_token_fails_with_expired() {
        let past = Timestamp::now() - SignedDuration::from_secs(1);
        let token = codec().encode(URL, Some(past)).unwrap();
        assert!(matches!(codec().decode(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn no_expiry_defaults_to_one_year() {
        let before = Timestamp::now().as_second();
        let token = codec().encode(URL, None).unwrap();
        let after = Timestamp::now().as_second();

        assert!(codec().decode(&token).is_ok());

        // We cannot shift the clock, so assert on the embedded claim.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(&[]),
            &validation,
        )
        .unwrap()
        .claims;

        assert!(claims.exp >= before + DEFAULT_TTL_SECS);
        assert!(claims.exp <= after + DEFAULT_TTL_SECS);
    }

    #[test]
    fn tampering_any_character_invalidates() {
        let token = codec().encode(URL, None).unwrap();
        let bytes = token.as_bytes();
        for i in 0..bytes.len() {
            let mut tampered = token.clone().into_bytes();
            tampered[i] = if tampered[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(tampered).unwrap();
            if tampered == token {
                continue;
            }
            assert!(
                codec().decode(&tampered).is_err(),
                "tampered position {i} was accepted"
            );
        }
    }

    #[test]
    fn wrong_secret_fails_with_invalid() {
        let token = codec().encode(URL, None).unwrap();
        let other = TokenCodec::new("another-secret");
        assert!(matches!(other.decode(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn wrong_issuer_fails_with_invalid() {
        let token = codec().encode(URL, None).unwrap();
        let other = TokenCodec::with_issuer(SECRET, "someone-else");
        assert!(matches!(other.decode(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn garbage_fails_with_invalid() {
        assert!(matches!(
            codec().decode("not-a-token"),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(codec().decode(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn token_is_url_safe() {
        let token = codec().encode(URL, None).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')));
    }
}
