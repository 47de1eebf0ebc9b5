//! Test fixtures: small encoded images.

#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("Failed to encode fixture");
    buf.into_inner()
}

/// Solid-colour JPEG.
pub fn solid_jpeg(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode(&RgbImage::from_pixel(width, height, Rgb(color)), ImageFormat::Jpeg)
}

/// PNG with a horizontal grey ramp from 64 to 191, tinted per row.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let v = 64 + (x * 127 / width.max(1)) as u8;
        Rgb([v, v.saturating_sub((y % 8) as u8), v])
    });
    encode(&img, ImageFormat::Png)
}

pub fn gradient_gif(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| Rgb([(x * 8) as u8, 40, 200]));
    encode(&img, ImageFormat::Gif)
}

/// Grey ramp from 10 to 60, dark enough that doubling lightness does not clip.
pub fn dark_gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| {
        let v = 10 + (x * 50 / width.max(1)) as u8;
        Rgb([v, v, v])
    });
    encode(&img, ImageFormat::Png)
}
