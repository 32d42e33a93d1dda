use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::warn;
use urlie_core::{ResolveError, ShortenError, TokenError};

pub type Result<T> = std::result::Result<T, ApiError>;

/// Boundary error: every service failure is recovered here and surfaced as
/// a structured message with a status code, never a process crash.
pub enum ApiError {
    Shorten(ShortenError),
    Resolve(ResolveError),
    BadRequest(String),
}

impl From<ShortenError> for ApiError {
    fn from(err: ShortenError) -> Self {
        Self::Shorten(err)
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Shorten(err) => match err {
                ShortenError::InvalidUrl(_)
                | ShortenError::InvalidExpiry(_)
                | ShortenError::InvalidSlug(_)
                | ShortenError::SlugReserved(_) => StatusCode::BAD_REQUEST,
                ShortenError::SlugTaken(_) => StatusCode::CONFLICT,
                ShortenError::AllocationExhausted { .. } | ShortenError::Store(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                ShortenError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Resolve(err) => match err {
                ResolveError::NotFound => StatusCode::NOT_FOUND,
                ResolveError::Token(TokenError::Expired) => StatusCode::GONE,
                ResolveError::Token(TokenError::Invalid) => StatusCode::BAD_REQUEST,
                ResolveError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(message) => message.clone(),
            ApiError::Shorten(err) => err.to_string(),
            ApiError::Resolve(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(status = %status, error = %self.message(), "request failed");
        }
        let body = Json(ErrorResponse {
            error: self.message(),
        });
        (status, body).into_response()
    }
}
