//! Pixel transforms
//!
//! Each transform borrows its input raster and returns a new one. Colour and
//! grayscale rasters take different code paths.

use crate::color::{hsv_value, lab8_to_rgb, rgb_to_lab8, with_hsv_value};
use crate::raster::Raster;
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;

/// Canny hysteresis thresholds.
///
/// `imageproc::edges::canny` smooths with a sigma 1.4 Gaussian and uses the L2
/// gradient magnitude before thresholding, so edge maps are sparser than those of
/// detectors that threshold the raw L1 Sobel response at the same values.
pub const EDGE_LOW_THRESHOLD: f32 = 100.0;
pub const EDGE_HIGH_THRESHOLD: f32 = 200.0;

/// Precomputed kernels used for small sizes when no sigma is given.
const SMALL_GAUSSIAN_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.031_25, 0.109_375, 0.218_75, 0.281_25, 0.218_75, 0.109_375, 0.031_25,
    ],
];

pub struct RasterTransforms;

impl RasterTransforms {
    /// Shift brightness by `delta`.
    ///
    /// Colour rasters shift the HSV value channel, saturating at 0 and 255,
    /// and keep hue and saturation. Grayscale rasters get a saturating add.
    pub fn brightness(raster: &Raster, delta: i32) -> Raster {
        if delta == 0 {
            return raster.clone();
        }

        match raster {
            Raster::Gray(img) => Raster::Gray(map_gray(img, |v| saturating_shift(v, delta))),
            Raster::Color(img) => Raster::Color(map_color(img, |rgb| {
                with_hsv_value(rgb, saturating_shift(hsv_value(rgb), delta))
            })),
        }
    }

    /// Scale contrast by `factor`.
    ///
    /// Colour rasters scale Lab lightness and leave the chroma axes alone.
    /// Grayscale rasters scale every sample with zero offset.
    pub fn contrast(raster: &Raster, factor: f32) -> Raster {
        if factor == 1.0 {
            return raster.clone();
        }

        match raster {
            Raster::Gray(img) => Raster::Gray(map_gray(img, |v| {
                (f32::from(v) * factor).abs().round().clamp(0.0, 255.0) as u8
            })),
            Raster::Color(img) => Raster::Color(map_color(img, |rgb| {
                let mut lab = rgb_to_lab8(rgb);
                lab.l = (lab.l * factor).abs().clamp(0.0, 255.0);
                lab8_to_rgb(lab)
            })),
        }
    }

    /// Gaussian blur with a square `size` x `size` kernel.
    ///
    /// `size` is floored to 1 and bumped to the next odd value when even.
    /// Kernels wider than twice the longer image side are capped there.
    pub fn blur(raster: &Raster, size: i32) -> Raster {
        let size = normalize_kernel_size(size).min(max_kernel_size(raster));
        if size == 1 {
            return raster.clone();
        }

        let kernel = gaussian_kernel(size);
        match raster {
            Raster::Gray(img) => Raster::Gray(separable_filter_equal(img, &kernel)),
            Raster::Color(img) => Raster::Color(separable_filter_equal(img, &kernel)),
        }
    }

    /// Reduce to a single luma channel when `enabled`.
    pub fn grayscale(raster: &Raster, enabled: bool) -> Raster {
        if !enabled {
            return raster.clone();
        }
        Raster::Gray(to_gray(raster))
    }

    /// Canny edge map when `enabled`. The result is always single-channel.
    pub fn edges(raster: &Raster, enabled: bool) -> Raster {
        if !enabled {
            return raster.clone();
        }
        let gray = to_gray(raster);
        Raster::Gray(canny(&gray, EDGE_LOW_THRESHOLD, EDGE_HIGH_THRESHOLD))
    }
}

/// Floor to 1, then round even sizes up to the next odd one.
pub fn normalize_kernel_size(size: i32) -> u32 {
    let size = size.max(1) as u32;
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Normalized 1-D Gaussian kernel with exactly `size` taps.
///
/// Sizes up to 7 use fixed binomial-like tables. Larger sizes derive sigma
/// from the size as `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_kernel(size: u32) -> Vec<f32> {
    let size = size.max(1) | 1;
    if size <= 7 {
        return SMALL_GAUSSIAN_KERNELS[(size / 2) as usize].to_vec();
    }

    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let scale = -0.5 / (sigma * sigma);
    let center = (size as f32 - 1.0) * 0.5;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - center;
            (scale * x * x).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// Largest useful kernel for this raster: odd and at least 3.
fn max_kernel_size(raster: &Raster) -> u32 {
    let (width, height) = raster.dimensions();
    width.max(height).min(u32::MAX / 4) * 2 + 1
}

/// BT.601 luma in 14-bit fixed point: `0.299 R + 0.587 G + 0.114 B`, rounded.
fn luma(rgb: [u8; 3]) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    let [r, g, b] = rgb.map(u32::from);
    ((r * R + g * G + b * B + (1 << 13)) >> 14) as u8
}

fn to_gray(raster: &Raster) -> GrayImage {
    match raster {
        Raster::Gray(img) => img.clone(),
        Raster::Color(img) => {
            let (width, height) = img.dimensions();
            GrayImage::from_fn(width, height, |x, y| Luma([luma(img.get_pixel(x, y).0)]))
        }
    }
}

fn saturating_shift(value: u8, delta: i32) -> u8 {
    i32::from(value).saturating_add(delta).clamp(0, 255) as u8
}

fn map_gray(img: &GrayImage, f: impl Fn(u8) -> u8) -> GrayImage {
    let (width, height) = img.dimensions();
    GrayImage::from_fn(width, height, |x, y| Luma([f(img.get_pixel(x, y)[0])]))
}

fn map_color(img: &RgbImage, f: impl Fn([u8; 3]) -> [u8; 3]) -> RgbImage {
    let (width, height) = img.dimensions();
    RgbImage::from_fn(width, height, |x, y| Rgb(f(img.get_pixel(x, y).0)))
}
