use crate::validate::{check_expiry, validate_url};
use async_trait::async_trait;
use tracing::{debug, trace};
use urlie_core::{
    Allocator, CreateRequest, CreateResult, ResolveError, Resolver, ShortCode, ShortenError,
};
use urlie_token::TokenCodec;

/// Short link service with no persistence.
///
/// The signed token *is* the record: allocation signs the destination into
/// a token used directly as the code, and resolution verifies it. Nothing
/// is written anywhere, so two calls for the same URL produce different
/// (equally valid) codes.
pub struct StatelessService {
    codec: TokenCodec,
    base_url: String,
}

impl StatelessService {
    pub fn new(codec: TokenCodec, base_url: impl Into<String>) -> Self {
        Self {
            codec,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Allocator for StatelessService {
    async fn allocate(&self, request: CreateRequest) -> Result<CreateResult, ShortenError> {
        let url = validate_url(&request.url)?;
        let expire_at = check_expiry(request.expires_at)?;

        // There is no store to reserve a name in, so a requested slug
        // cannot be honored. Failing beats silently handing back a token.
        if request.custom_slug.is_some() {
            return Err(ShortenError::InvalidSlug(
                "custom slugs are not supported in stateless mode".to_string(),
            ));
        }

        let token = self.codec.encode(&url, expire_at)?;

        debug!(url = %url, "issued stateless token");
        let code = ShortCode::new_unchecked(token);
        let full_short_url = code.full_url(&self.base_url);
        Ok(CreateResult {
            code,
            full_short_url,
        })
    }
}

#[async_trait]
impl Resolver for StatelessService {
    async fn resolve(&self, code: &str) -> Result<String, ResolveError> {
        trace!("verifying stateless token");
        let url = self.codec.decode(code)?;
        debug!(url = %url, "verified stateless token");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use urlie_core::TokenError;

    const BASE: &str = "https://sho.rt";

    fn service() -> StatelessService {
        StatelessService::new(TokenCodec::new("test-secret"), BASE)
    }

    #[tokio::test]
    async fn allocate_and_resolve_round_trip() {
        let service = service();

        let result = service
            .allocate(CreateRequest::new("https://example.com/x"))
            .await
            .unwrap();

        assert!(result.full_short_url.starts_with(&format!("{BASE}/r/")));
        assert_eq!(
            service.resolve(result.code.as_str()).await.unwrap(),
            "https://example.com/x"
        );
    }

    #[tokio::test]
    async fn custom_slug_is_rejected() {
        let err = service()
            .allocate(CreateRequest::new("https://example.com").custom_slug("launch"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenError::InvalidSlug(_)));
    }

    #[tokio::test]
    async fn invalid_url_is_rejected() {
        let err = service()
            .allocate(CreateRequest::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn past_expiry_is_rejected() {
        let past = Timestamp::now() - SignedDuration::from_secs(1);
        let err = service()
            .allocate(CreateRequest::new("https://example.com").expires_at(past))
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenError::InvalidExpiry(_)));
    }

    #[tokio::test]
    async fn tampered_code_is_invalid() {
        let service = service();
        let result = service
            .allocate(CreateRequest::new("https://example.com"))
            .await
            .unwrap();

        let mut tampered = result.code.as_str().to_owned();
        tampered.push('x');
        let err = service.resolve(&tampered).await.unwrap_err();
        assert!(matches!(err, ResolveError::Token(TokenError::Invalid)));
    }

    #[tokio::test]
    async fn token_from_other_deployment_is_invalid() {
        let issuing = service();
        let verifying = StatelessService::new(TokenCodec::new("different-secret"), BASE);

        let result = issuing
            .allocate(CreateRequest::new("https://example.com"))
            .await
            .unwrap();
        let err = verifying.resolve(result.code.as_str()).await.unwrap_err();
        assert!(matches!(err, ResolveError::Token(TokenError::Invalid)));
    }
}
