//! Response encoder: JPEG bytes, data URIs and download filenames.

use crate::error::ProcessingError;
use crate::raster::Raster;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use chrono::{DateTime, TimeZone};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;
pub const JPEG_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, Copy)]
pub struct ResponseEncoder {
    jpeg_quality: u8,
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl ResponseEncoder {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    pub fn encode_jpeg(&self, raster: &Raster) -> Result<Bytes, ProcessingError> {
        let (width, height) = raster.dimensions();
        let color_type = match raster {
            Raster::Gray(_) => ExtendedColorType::L8,
            Raster::Color(_) => ExtendedColorType::Rgb8,
        };

        let estimated_size = (width as usize) * (height as usize) * raster.channels() as usize / 4;
        let mut buffer = Vec::with_capacity(estimated_size);
        JpegEncoder::new_with_quality(&mut buffer, self.jpeg_quality)
            .write_image(raster.as_raw(), width, height, color_type)
            .map_err(ProcessingError::Encode)?;

        Ok(Bytes::from(buffer))
    }

    /// Encode as JPEG and wrap in a `data:` URI for inline display.
    pub fn to_data_uri(&self, raster: &Raster) -> Result<String, ProcessingError> {
        let jpeg = self.encode_jpeg(raster)?;
        Ok(format!(
            "data:{};base64,{}",
            JPEG_MIME_TYPE,
            STANDARD.encode(&jpeg)
        ))
    }
}

/// `processed_<YYYYMMDD_HHMMSS>.jpg` for the given instant.
pub fn download_filename<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("processed_{}.jpg", now.format("%Y%m%d_%H%M%S"))
}
