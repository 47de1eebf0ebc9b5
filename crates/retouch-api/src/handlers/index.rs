//! The HTML editor page.
//!
//! Errors here render the page again with a banner instead of JSON.

use crate::error::{log_error, status_of};
use crate::handlers::run_blocking;
use crate::state::AppState;
use crate::utils::upload::read_upload_form;
use crate::views::page::{render_page, PageView};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{Html, IntoResponse, Response},
};
use retouch_core::{AppError, ErrorMetadata};
use std::sync::Arc;

pub async fn show_form() -> Html<String> {
    Html(render_page(&PageView::default()).into_string())
}

pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match edit(state, multipart).await {
        Ok(view) => Html(render_page(&view).into_string()).into_response(),
        Err(err) => {
            log_error(&err);
            let view = PageView::with_error(err.client_message());
            (status_of(&err), Html(render_page(&view).into_string())).into_response()
        }
    }
}

async fn edit(
    state: Arc<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<PageView, AppError> {
    let (upload, params) = read_upload_form(multipart).await?.into_parts()?;

    let echoed = params;
    let images = run_blocking(move || state.editor.preview(&upload, &params)).await?;

    Ok(PageView {
        params: echoed,
        original_image: Some(images.original_image),
        processed_image: Some(images.processed_image),
        error: None,
    })
}
