use jiff::Timestamp;
use urlie_core::ShortenError;

/// Validates and normalizes a destination URL.
///
/// Accepts `http` and `https` URLs with a non-empty host. Normalization is
/// limited to trimming surrounding whitespace; the URL is otherwise stored
/// as the caller sent it.
pub(crate) fn validate_url(url: &str) -> Result<String, ShortenError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ShortenError::InvalidUrl("URL cannot be empty".to_string()));
    }

    let Some((scheme, rest)) = url.split_once("://") else {
        return Err(ShortenError::InvalidUrl(format!(
            "URL must have a scheme and host: {url}"
        )));
    };

    let scheme = scheme.to_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(ShortenError::InvalidUrl(format!(
            "URL scheme must be http or https: {scheme}"
        )));
    }

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() {
        return Err(ShortenError::InvalidUrl(format!(
            "URL must have a host: {url}"
        )));
    }

    Ok(url.to_owned())
}

/// Checks that a requested expiry instant lies in the future.
///
/// A record or token born expired is unusable, so a past instant is a
/// caller error rather than a zero-TTL write.
pub(crate) fn check_expiry(expires_at: Option<Timestamp>) -> Result<Option<Timestamp>, ShortenError> {
    if let Some(at) = expires_at {
        if at <= Timestamp::now() {
            return Err(ShortenError::InvalidExpiry(format!(
                "expiry must be in the future: {at}"
            )));
        }
    }
    Ok(expires_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?q=1").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(
            validate_url("  https://example.com  ").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(matches!(
            validate_url("example.com"),
            Err(ShortenError::InvalidUrl(_))
        ));
        assert!(validate_url("not-a-valid-url").is_err());
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("javascript://alert(1)").is_err());
    }

    #[test]
    fn rejects_empty_host() {
        assert!(validate_url("https://").is_err());
        assert!(validate_url("https:///path").is_err());
        assert!(validate_url("").is_err());
    }

    #[test]
    fn past_expiry_rejected() {
        let past = Timestamp::now() - SignedDuration::from_secs(1);
        assert!(matches!(
            check_expiry(Some(past)),
            Err(ShortenError::InvalidExpiry(_))
        ));
    }

    #[test]
    fn future_expiry_passes_through() {
        let future = Timestamp::now() + SignedDuration::from_hours(1);
        assert_eq!(check_expiry(Some(future)).unwrap(), Some(future));
        assert_eq!(check_expiry(None).unwrap(), None);
    }
}
