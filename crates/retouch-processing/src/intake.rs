//! Upload intake: filename and size validation, then decoding into a colour raster.

use crate::error::ProcessingError;
use crate::raster::Raster;
use bytes::Bytes;
use retouch_core::AppError;

/// Common validation errors for uploaded images
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Missing file extension: {0}")]
    MissingExtension(String),

    #[error("No file selected")]
    EmptyFilename,

    #[error("Empty file")]
    EmptyFile,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { size, max } => {
                AppError::PayloadTooLarge(format!("{} bytes exceeds max {} bytes", size, max))
            }
            ValidationError::InvalidExtension { extension, allowed } => AppError::InvalidInput(
                format!(
                    "File type not allowed: '{}' (allowed: {})",
                    extension,
                    allowed.join(", ")
                ),
            ),
            ValidationError::MissingExtension(filename) => AppError::InvalidInput(format!(
                "File type not allowed: missing extension (filename: {})",
                filename
            )),
            ValidationError::EmptyFilename => AppError::EmptyFilename,
            ValidationError::EmptyFile => AppError::InvalidInput("File is empty".to_string()),
        }
    }
}

/// A file received in a request body. Lives only for the duration of the request.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Upload {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }
}

/// Upload validator
///
/// Holds the allow-list and size cap from configuration; shared read-only
/// between requests.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate the filename: it must be non-empty and end in an allowed extension.
    ///
    /// The extension is whatever follows the last `.`, so `.png` counts as a
    /// png upload and `archive.tar.gif` as a gif.
    pub fn validate_filename(&self, filename: &str) -> Result<String, ValidationError> {
        if filename.is_empty() {
            return Err(ValidationError::EmptyFilename);
        }

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(extension)
    }

    /// Validate the upload and decode it into a colour raster.
    pub fn intake(&self, upload: &Upload) -> Result<Raster, AppError> {
        let extension = self.validate_filename(&upload.filename)?;
        self.validate_file_size(upload.data.len())?;

        let raster = decode_color(&upload.data)?;
        let (width, height) = raster.dimensions();
        tracing::debug!(
            filename = %upload.filename,
            extension = %extension,
            size = upload.data.len(),
            width,
            height,
            "Upload decoded"
        );

        Ok(raster)
    }
}

/// Decode bytes as a three-channel raster.
///
/// The container format is sniffed from the bytes. Alpha is dropped and
/// single-channel sources are expanded, so the result is always colour.
pub fn decode_color(data: &[u8]) -> Result<Raster, ProcessingError> {
    let img = image::load_from_memory(data).map_err(ProcessingError::Decode)?;
    Ok(Raster::Color(img.to_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
    use std::io::Cursor;

    fn test_validator() -> UploadValidator {
        UploadValidator::new(
            1024 * 1024, // 1MB
            vec![
                "png".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "gif".to_string(),
            ],
        )
    }

    fn encode(img: image::DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_validate_filename_accepts_allowed_extensions() {
        let validator = test_validator();
        for name in ["a.png", "b.jpg", "c.jpeg", "d.gif", "E.PNG", "photo.final.JPeG", ".png"] {
            assert!(validator.validate_filename(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_validate_filename_rejects_other_extensions() {
        let validator = test_validator();
        for name in ["a.webp", "b.bmp", "c.png.exe", "d.tiff", "e."] {
            assert!(
                matches!(
                    validator.validate_filename(name),
                    Err(ValidationError::InvalidExtension { .. })
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn test_validate_filename_no_extension() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_filename("noextension"),
            Err(ValidationError::MissingExtension(_))
        ));
    }

    #[test]
    fn test_validate_filename_empty() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_filename(""),
            Err(ValidationError::EmptyFilename)
        ));
    }

    #[test]
    fn test_validate_file_size() {
        let validator = test_validator();
        assert!(validator.validate_file_size(512 * 1024).is_ok());
        assert!(validator.validate_file_size(1024 * 1024).is_ok());
        assert!(matches!(
            validator.validate_file_size(1024 * 1024 + 1),
            Err(ValidationError::FileTooLarge { .. })
        ));
        assert!(matches!(
            validator.validate_file_size(0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_validation_errors_map_to_app_errors() {
        use retouch_core::ErrorMetadata;

        let err: AppError = ValidationError::FileTooLarge { size: 10, max: 5 }.into();
        assert_eq!(err.http_status_code(), 413);

        let err: AppError = ValidationError::InvalidExtension {
            extension: "exe".to_string(),
            allowed: vec!["png".to_string()],
        }
        .into();
        assert_eq!(err.http_status_code(), 400);
        assert!(err.client_message().contains("exe"));

        let err: AppError = ValidationError::EmptyFilename.into();
        assert!(matches!(err, AppError::EmptyFilename));
    }

    #[test]
    fn test_decode_forces_three_channels() {
        let gray = GrayImage::from_pixel(5, 4, Luma([120]));
        let data = encode(image::DynamicImage::ImageLuma8(gray), ImageFormat::Png);
        let raster = decode_color(&data).unwrap();
        assert_eq!(raster.channels(), 3);
        assert_eq!(raster.dimensions(), (5, 4));

        let rgba = RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 0]));
        let data = encode(image::DynamicImage::ImageRgba8(rgba), ImageFormat::Png);
        let Raster::Color(img) = decode_color(&data).unwrap() else {
            panic!("expected colour raster");
        };
        assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30]);
    }

    #[test]
    fn test_intake_decodes_valid_upload() {
        let validator = test_validator();
        let rgba = RgbaImage::from_pixel(8, 6, Rgba([200, 10, 10, 255]));
        let data = encode(image::DynamicImage::ImageRgba8(rgba), ImageFormat::Png);
        let raster = validator.intake(&Upload::new("red.png", data)).unwrap();
        assert_eq!(raster.dimensions(), (8, 6));
    }

    #[test]
    fn test_intake_rejects_garbage_bytes() {
        let validator = test_validator();
        let err = validator
            .intake(&Upload::new("fake.png", b"not an image".to_vec()))
            .unwrap_err();
        assert!(matches!(err, AppError::ImageProcessing(_)));
    }

    #[test]
    fn test_intake_checks_extension_before_decoding() {
        let validator = test_validator();
        let err = validator
            .intake(&Upload::new("notes.txt", b"not an image".to_vec()))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
