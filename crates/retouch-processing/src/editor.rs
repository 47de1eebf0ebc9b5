//! Request-level orchestration: intake, pipeline, encoding.

use crate::encoder::ResponseEncoder;
use crate::intake::{Upload, UploadValidator};
use crate::params::TransformParams;
use crate::pipeline::TransformPipeline;
use crate::raster::Raster;
use bytes::Bytes;
use retouch_core::AppError;
use serde::Serialize;

/// Original and processed images as data URIs.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewImages {
    pub original_image: String,
    pub processed_image: String,
}

/// Runs one edit: validate and decode the upload, apply the pipeline, encode.
///
/// Holds no per-request state, so a single instance is shared by all handlers.
#[derive(Debug, Clone)]
pub struct ImageEditor {
    validator: UploadValidator,
    encoder: ResponseEncoder,
}

impl ImageEditor {
    pub fn new(validator: UploadValidator, encoder: ResponseEncoder) -> Self {
        Self { validator, encoder }
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    /// Decode the upload and run the pipeline, returning both rasters.
    pub fn process(
        &self,
        upload: &Upload,
        params: &TransformParams,
    ) -> Result<(Raster, Raster), AppError> {
        let original = self.validator.intake(upload)?;
        let pipeline = TransformPipeline::from_params(params);
        let processed = pipeline.run(&original);

        tracing::info!(
            filename = %upload.filename,
            stages = pipeline.stages().len(),
            channels = processed.channels(),
            "Image processed"
        );

        Ok((original, processed))
    }

    pub fn preview(
        &self,
        upload: &Upload,
        params: &TransformParams,
    ) -> Result<PreviewImages, AppError> {
        let (original, processed) = self.process(upload, params)?;
        Ok(PreviewImages {
            original_image: self.encoder.to_data_uri(&original)?,
            processed_image: self.encoder.to_data_uri(&processed)?,
        })
    }

    /// Processed image as JPEG bytes.
    pub fn render(&self, upload: &Upload, params: &TransformParams) -> Result<Bytes, AppError> {
        let (_, processed) = self.process(upload, params)?;
        Ok(self.encoder.encode_jpeg(&processed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn editor() -> ImageEditor {
        ImageEditor::new(
            UploadValidator::new(
                16 * 1024 * 1024,
                vec!["png".into(), "jpg".into(), "jpeg".into(), "gif".into()],
            ),
            ResponseEncoder::default(),
        )
    }

    fn png_upload() -> Upload {
        let img = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 15) as u8, (y * 15) as u8, 60]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        Upload::new("sample.png", buf.into_inner())
    }

    #[test]
    fn test_preview_returns_two_data_uris() {
        let preview = editor()
            .preview(&png_upload(), &TransformParams::default())
            .unwrap();
        assert!(preview.original_image.starts_with("data:image/jpeg;base64,"));
        assert!(preview.processed_image.starts_with("data:image/jpeg;base64,"));
        assert_ne!(preview.original_image, preview.processed_image);
    }

    #[test]
    fn test_render_grayscale_is_single_channel() {
        let params = TransformParams {
            grayscale: true,
            ..TransformParams::default()
        };
        let jpeg = editor().render(&png_upload(), &params).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.color().channel_count(), 1);
    }

    #[test]
    fn test_process_rejects_disallowed_extension() {
        let mut upload = png_upload();
        upload.filename = "sample.bmp".to_string();
        let err = editor()
            .process(&upload, &TransformParams::default())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
