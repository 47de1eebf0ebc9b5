use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::run_blocking;
use crate::state::AppState;
use crate::utils::upload::read_upload_form;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use retouch_processing::PreviewImages;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Original and processed images as `data:image/jpeg;base64,...` URIs.
#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewResponse {
    pub original_image: String,
    pub processed_image: String,
}

impl From<PreviewImages> for PreviewResponse {
    fn from(images: PreviewImages) -> Self {
        Self {
            original_image: images.original_image,
            processed_image: images.processed_image,
        }
    }
}

/// Preview handler
///
/// Runs the full transform pipeline on the uploaded image and returns both
/// the original and the processed image inline.
///
/// # Errors
/// - `AppError::MissingFile` / `AppError::EmptyFilename` - no usable file part
/// - `AppError::InvalidInput` - disallowed extension or unparseable parameter
/// - `AppError::PayloadTooLarge` - upload exceeds the size limit
/// - `AppError::ImageProcessing` - bytes are not a decodable image
#[utoipa::path(
    post,
    path = "/preview",
    tag = "editor",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Original and processed images", body = PreviewResponse),
        (status = 400, description = "Invalid upload or parameters", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn preview_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PreviewResponse>, HttpAppError> {
    let (upload, params) = read_upload_form(multipart).await?.into_parts()?;

    let images = run_blocking(move || state.editor.preview(&upload, &params)).await?;

    Ok(Json(images.into()))
}
