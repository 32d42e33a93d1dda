use crate::error::{ApiError, Result};
use crate::model::{CreateBody, CreateResponse, HealthResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use jiff::Timestamp;
use urlie_core::{Allocator, CreateRequest, Resolver};

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn create_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<CreateResponse>)> {
    let expires_at = body
        .expires_at
        .map(|millis| {
            Timestamp::from_millisecond(millis)
                .map_err(|e| ApiError::BadRequest(format!("invalid expiresAt: {e}")))
        })
        .transpose()?;

    let request = CreateRequest {
        url: body.url,
        expires_at,
        custom_slug: body.custom_slug,
    };

    let result = state.service.allocate(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            code: result.code.as_str().to_owned(),
            full_short_url: result.full_short_url,
        }),
    ))
}

pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let url = state.service.resolve(&code).await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}
