//! Multipart form reading shared by the upload handlers

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::http::StatusCode;
use retouch_core::AppError;
use retouch_processing::{TransformParams, Upload};
use std::collections::HashMap;

pub const FILE_FIELD: &str = "file";

/// A parsed upload form: the file part (if any) plus every text field.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<Upload>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Split into the upload and its transform parameters.
    pub fn into_parts(self) -> Result<(Upload, TransformParams), AppError> {
        let upload = self.file.ok_or(AppError::MissingFile)?;
        let params = TransformParams::from_fields(&self.fields)?;
        Ok((upload, params))
    }
}

fn multipart_error(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Request body exceeds the upload limit: {}", message))
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", message))
    }
}

/// Read every field of the form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn read_upload_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadForm, AppError> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        // Non-multipart bodies carry no file part
        Err(MultipartRejection::InvalidBoundary(_)) => return Err(AppError::MissingFile),
        Err(rejection) => return Err(multipart_error(rejection.status(), rejection.body_text())),
    };

    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e.status(), e.body_text()))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == FILE_FIELD {
            if form.file.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }
            let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
            let content_type = field.content_type().map(|s| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error(e.status(), e.body_text()))?;

            let mut upload = Upload::new(filename, data);
            upload.content_type = content_type;
            form.file = Some(upload);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| multipart_error(e.status(), e.body_text()))?;
            form.fields.insert(field_name, value);
        }
    }

    tracing::debug!(
        has_file = form.file.is_some(),
        fields = form.fields.len(),
        "Upload form read"
    );

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_parts_requires_file() {
        let form = UploadForm::default();
        assert!(matches!(form.into_parts(), Err(AppError::MissingFile)));
    }

    #[test]
    fn into_parts_parses_fields() {
        let mut form = UploadForm {
            file: Some(Upload::new("a.png", vec![1u8, 2, 3])),
            ..UploadForm::default()
        };
        form.fields
            .insert("brightness_value".to_string(), "25".to_string());
        form.fields.insert("grayscale".to_string(), "true".to_string());

        let (upload, params) = form.into_parts().unwrap();
        assert_eq!(upload.filename, "a.png");
        assert_eq!(params.brightness, 25);
        assert!(params.grayscale);
    }

    #[test]
    fn into_parts_rejects_bad_number() {
        let mut form = UploadForm {
            file: Some(Upload::new("a.png", vec![1u8])),
            ..UploadForm::default()
        };
        form.fields
            .insert("blur_value".to_string(), "lots".to_string());
        assert!(matches!(form.into_parts(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn multipart_error_maps_status() {
        assert!(matches!(
            multipart_error(StatusCode::PAYLOAD_TOO_LARGE, "too big".into()),
            AppError::PayloadTooLarge(_)
        ));
        assert!(matches!(
            multipart_error(StatusCode::BAD_REQUEST, "bad".into()),
            AppError::InvalidInput(_)
        ));
    }
}
