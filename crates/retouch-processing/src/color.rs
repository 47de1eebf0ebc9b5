//! Colour-space helpers for the brightness and contrast transforms.
//!
//! Lab conversions assume sRGB primaries with a D65 white point. Lightness is
//! exposed on the 8-bit scale (`L* * 255 / 100`) so scaling saturates at 255
//! the same way an 8-bit lightness plane would.

const D65_WHITE: [f32; 3] = [0.950_456, 1.0, 1.088_754];

const LAB_EPSILON: f32 = 6.0 / 29.0;

/// Lightness on the 8-bit scale plus the two chroma axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab8 {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

/// HSV value channel of an RGB pixel.
#[inline]
pub fn hsv_value(rgb: [u8; 3]) -> u8 {
    rgb[0].max(rgb[1]).max(rgb[2])
}

/// Replace the HSV value of a pixel while keeping hue and saturation.
///
/// Every channel is proportional to V for fixed H and S, so the pixel is
/// scaled by `new_value / V`. Black has no hue and becomes neutral grey.
pub fn with_hsv_value(rgb: [u8; 3], new_value: u8) -> [u8; 3] {
    let value = hsv_value(rgb);
    if value == 0 {
        return [new_value; 3];
    }
    let scale = f32::from(new_value) / f32::from(value);
    rgb.map(|c| (f32::from(c) * scale).round().clamp(0.0, 255.0) as u8)
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = f32::from(c) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let v = if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON.powi(3) {
        t.cbrt()
    } else {
        t / (3.0 * LAB_EPSILON * LAB_EPSILON) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.powi(3)
    } else {
        3.0 * LAB_EPSILON * LAB_EPSILON * (t - 4.0 / 29.0)
    }
}

pub fn rgb_to_lab8(rgb: [u8; 3]) -> Lab8 {
    let [r, g, b] = rgb.map(srgb_to_linear);

    let x = 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b;
    let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175 * b;
    let z = 0.019_333_9 * r + 0.119_192 * g + 0.950_304_1 * b;

    let fx = lab_f(x / D65_WHITE[0]);
    let fy = lab_f(y / D65_WHITE[1]);
    let fz = lab_f(z / D65_WHITE[2]);

    let l = (116.0 * fy - 16.0).max(0.0);
    Lab8 {
        l: l * 255.0 / 100.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

pub fn lab8_to_rgb(lab: Lab8) -> [u8; 3] {
    let l = lab.l * 100.0 / 255.0;
    let fy = (l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;

    let x = D65_WHITE[0] * lab_f_inv(fx);
    let y = D65_WHITE[1] * lab_f_inv(fy);
    let z = D65_WHITE[2] * lab_f_inv(fz);

    let r = 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z;
    let g = -0.969_266 * x + 1.876_010_8 * y + 0.041_556 * z;
    let b = 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z;

    [linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b)]
}
