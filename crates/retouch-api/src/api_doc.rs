//! OpenAPI documentation for the JSON and download endpoints.
//! The HTML page at `/` is left out.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Retouch API",
        version = "0.1.0",
        description = "Upload an image, adjust brightness, contrast and blur, convert to grayscale or detect edges, then preview or download the result as JPEG."
    ),
    paths(
        handlers::preview::preview_image,
        handlers::download::download_image,
        handlers::health::health_check,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::preview::PreviewResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "editor", description = "Image editing"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_editor_paths() {
        let spec = ApiDoc::openapi();
        assert!(spec.paths.paths.contains_key("/preview"));
        assert!(spec.paths.paths.contains_key("/download"));
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
