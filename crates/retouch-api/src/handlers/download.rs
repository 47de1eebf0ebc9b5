use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::run_blocking;
use crate::state::AppState;
use crate::utils::upload::read_upload_form;
use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::Response,
};
use retouch_core::AppError;
use retouch_processing::encoder::{download_filename, JPEG_MIME_TYPE};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/download",
    tag = "editor",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Processed image as a JPEG attachment", content_type = "image/jpeg"),
        (status = 400, description = "Invalid upload or parameters", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn download_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let (upload, params) = read_upload_form(multipart).await?.into_parts()?;

    let jpeg = run_blocking(move || state.editor.render(&upload, &params)).await?;
    let filename = download_filename(&chrono::Local::now());

    tracing::debug!(filename = %filename, size = jpeg.len(), "Sending processed image");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, JPEG_MIME_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(jpeg))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            AppError::Internal(e.to_string())
        })?;

    Ok(response)
}
