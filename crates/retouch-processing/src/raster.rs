//! In-memory raster model
//!
//! A raster is either a single-channel intensity image or a three-channel
//! colour image. The channel count decides which algorithm a transform uses.

use image::{GrayImage, RgbImage};

#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    Gray(GrayImage),
    Color(RgbImage),
}

impl Raster {
    pub fn channels(&self) -> u8 {
        match self {
            Raster::Gray(_) => 1,
            Raster::Color(_) => 3,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Raster::Gray(img) => img.dimensions(),
            Raster::Color(img) => img.dimensions(),
        }
    }

    /// Raw interleaved samples, row-major.
    pub fn as_raw(&self) -> &[u8] {
        match self {
            Raster::Gray(img) => img.as_raw(),
            Raster::Color(img) => img.as_raw(),
        }
    }
}

impl From<RgbImage> for Raster {
    fn from(img: RgbImage) -> Self {
        Raster::Color(img)
    }
}

impl From<GrayImage> for Raster {
    fn from(img: GrayImage) -> Self {
        Raster::Gray(img)
    }
}
