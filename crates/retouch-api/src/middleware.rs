//! Response middleware

use crate::error::ErrorResponse;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Strip `details` and `error_type` from JSON error bodies when the configured
/// environment is production.
pub async fn redact_error_details(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(body) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };
    if !state.is_production() {
        return response;
    }

    (response.status(), Json(body.redacted())).into_response()
}
