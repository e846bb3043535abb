//! HTTP surface: a single fetch-and-extract operation plus a health
//! check. Errors map to a structured `{ error: { kind, message } }`
//! body, never a raw stack trace.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::fetcher::Fetcher;
use crate::pipeline::{self, FetchRequest, PipelineError};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
}

pub fn router(state: AppState) -> Router {
    // Layers added later wrap the earlier ones, so the request id is
    // assigned outermost, visible to tracing, and copied to responses.
    Router::new()
        .route("/healthz", get(health_check))
        .route("/v1/fetch", post(fetch_and_extract))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    kind: &'static str,
    message: String,
}

async fn fetch_and_extract(
    State(state): State<AppState>,
    payload: Result<Json<FetchRequest>, JsonRejection>,
) -> Response {
    // A body that fails schema validation gets the same structured
    // error shape as every other failure, never axum's plain-text
    // rejection.
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            warn!(error = %rejection, "rejected request body");
            return error_response(rejection.status(), "validation", rejection.body_text());
        }
    };

    match pipeline::run(&state.fetcher, &request).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "fetch-and-extract failed");
            error_response(status_for(&err), err.kind(), err.to_string())
        }
    }
}

fn error_response(status: StatusCode, kind: &'static str, message: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: ErrorDetail { kind, message },
        }),
    )
        .into_response()
}

fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
        PipelineError::Fetch(f) if f.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        PipelineError::Fetch(_) | PipelineError::Parse(_) => StatusCode::BAD_GATEWAY,
        PipelineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchError;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = PipelineError::Validation("bad".to_string());
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn timeouts_map_to_gateway_timeout() {
        let err = PipelineError::Fetch(FetchError::RequestTimeout);
        assert_eq!(status_for(&err), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn fetch_failures_map_to_bad_gateway() {
        let err = PipelineError::Fetch(FetchError::Http {
            status: StatusCode::NOT_FOUND,
        });
        assert_eq!(status_for(&err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_maps_to_500() {
        let err = PipelineError::Internal("boom".to_string());
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
