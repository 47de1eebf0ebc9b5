use retouch_core::AppError;

/// Failures raised while decoding, transforming or encoding a raster.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Decode(e) => {
                AppError::ImageProcessing(format!("Failed to decode image: {}", e))
            }
            ProcessingError::Encode(e) => AppError::Internal(format!("Failed to encode image: {}", e)),
            invalid @ ProcessingError::InvalidParameter { .. } => {
                AppError::InvalidInput(invalid.to_string())
            }
        }
    }
}
