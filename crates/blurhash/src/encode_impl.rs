//! BlurHash encoding: convert an RGB pixel buffer into a compact BlurHash string.
//!
//! The encoder projects the image onto a small grid of 2D cosine basis
//! functions in linear light, quantizes the resulting components, and
//! serializes them into a base83 string.

use std::borrow::Cow;
use std::f64::consts::PI;

use crate::base83;
use crate::color::{linear_to_srgb, sign_pow, srgb_to_linear};
use crate::error::BlurhashError;

/// Largest accepted image dimension on either axis.
const MAX_DIMENSION: u32 = 10_000;

/// Encode an RGB image into a BlurHash string.
///
/// # Arguments
///
/// * `pixels` - Flat RGB buffer in row-major order, three `f64` samples per
///   pixel. Channels are sRGB-encoded on the 0-255 scale when `linear` is
///   false, or linear light on the 0-1 scale when `linear` is true.
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
/// * `components_x` - Number of horizontal components (1..=9).
/// * `components_y` - Number of vertical components (1..=9).
/// * `linear` - Whether `pixels` is already linear light. No format
///   auto-detection is performed.
///
/// The input buffer is never mutated; gamma-encoded input is converted into
/// an internal linear copy.
///
/// # Errors
///
/// Returns [`BlurhashError::InvalidComponentCount`] if a component count is
/// out of range, or [`BlurhashError::InvalidDimensions`] if the dimensions
/// are zero, oversized, or disagree with the buffer length.
///
/// # Examples
///
/// ```
/// use blurhash::encode;
/// // A 2x2 red image, sRGB channels on the 0-255 scale.
/// let pixels = [
///     255.0, 0.0, 0.0, 255.0, 0.0, 0.0,
///     255.0, 0.0, 0.0, 255.0, 0.0, 0.0,
/// ];
/// let hash = encode(&pixels, 2, 2, 4, 3, false).unwrap();
/// assert_eq!(hash.len(), 4 + 2 * 4 * 3);
/// ```
pub fn encode(
    pixels: &[f64],
    width: u32,
    height: u32,
    components_x: u32,
    components_y: u32,
    linear: bool,
) -> Result<String, BlurhashError> {
    if width == 0 || height == 0 {
        return Err(BlurhashError::InvalidDimensions {
            width,
            height,
            reason: "width and height must be > 0",
        });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(BlurhashError::InvalidDimensions {
            width,
            height,
            reason: "dimensions must be <= 10000",
        });
    }

    if !(1..=9).contains(&components_x) {
        return Err(BlurhashError::InvalidComponentCount {
            axis: "x",
            value: components_x,
        });
    }
    if !(1..=9).contains(&components_y) {
        return Err(BlurhashError::InvalidComponentCount {
            axis: "y",
            value: components_y,
        });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(BlurhashError::InvalidDimensions {
            width,
            height,
            reason: "pixel buffer length does not match width * height * 3",
        });
    }

    let w = width as usize;
    let h = height as usize;
    let wf = width as f64;
    let hf = height as f64;

    // Gamma-encoded input is converted once up front; linear input is
    // borrowed as-is and never copied.
    let linear_pixels: Cow<'_, [f64]> = if linear {
        Cow::Borrowed(pixels)
    } else {
        Cow::Owned(pixels.iter().map(|&c| srgb_to_linear(c)).collect())
    };
    let lin = &linear_pixels[..];

    // Precompute cosine tables.
    // cos_x[i][x] = cos(PI * i * x / width)
    let cos_x: Vec<Vec<f64>> = (0..components_x as usize)
        .map(|i| {
            (0..w)
                .map(|x| (PI * i as f64 * x as f64 / wf).cos())
                .collect()
        })
        .collect();
    // cos_y[j][y] = cos(PI * j * y / height)
    let cos_y: Vec<Vec<f64>> = (0..components_y as usize)
        .map(|j| {
            (0..h)
                .map(|y| (PI * j as f64 * y as f64 / hf).cos())
                .collect()
        })
        .collect();

    let area = wf * hf;

    // One weighted sum over the whole image per component. Pixel traversal
    // is row-major, so results are bit-identical no matter how the component
    // loop itself is scheduled.
    let multiply_basis = |i: usize, j: usize| -> [f64; 3] {
        let norm_factor = if i == 0 && j == 0 { 1.0 } else { 2.0 };
        let cos_x_row = &cos_x[i];
        let mut r_sum = 0.0f64;
        let mut g_sum = 0.0f64;
        let mut b_sum = 0.0f64;

        for (y, &cos_y_val) in cos_y[j].iter().enumerate() {
            let row_offset = y * w;
            for (x, &cos_x_val) in cos_x_row.iter().enumerate() {
                let basis = norm_factor * cos_x_val * cos_y_val;
                let base = (row_offset + x) * 3;
                r_sum += basis * lin[base];
                g_sum += basis * lin[base + 1];
                b_sum += basis * lin[base + 2];
            }
        }

        [r_sum / area, g_sum / area, b_sum / area]
    };

    // Component order is i + j * components_x, matching the wire layout.
    let coords: Vec<(usize, usize)> = (0..components_y as usize)
        .flat_map(|j| (0..components_x as usize).map(move |i| (i, j)))
        .collect();

    #[cfg(feature = "parallel")]
    let components: Vec<[f64; 3]> = {
        use rayon::prelude::*;
        coords
            .par_iter()
            .map(|&(i, j)| multiply_basis(i, j))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let components: Vec<[f64; 3]> = coords.iter().map(|&(i, j)| multiply_basis(i, j)).collect();

    let mut max_ac_component = 0.0f64;
    for component in &components[1..] {
        max_ac_component = max_ac_component
            .max(component[0].abs())
            .max(component[1].abs())
            .max(component[2].abs());
    }

    // The DC term goes through the sRGB transfer and truncates to an
    // 8-bit channel per color, packed into 24 bits.
    let dc = &components[0];
    let dc_value = ((linear_to_srgb(dc[0]) as u64) << 16)
        | ((linear_to_srgb(dc[1]) as u64) << 8)
        | (linear_to_srgb(dc[2]) as u64);

    // Quantize the maximum AC magnitude into a single digit, then use the
    // reconstructed normalization factor for the AC components themselves.
    let quant_max_ac = (max_ac_component * 166.0 - 0.5).floor().clamp(0.0, 82.0) as u64;
    let ac_norm = (quant_max_ac as f64 + 1.0) / 166.0;

    let mut ac_values: Vec<u64> = Vec::with_capacity(components.len() - 1);
    for component in &components[1..] {
        let quant_r = (sign_pow(component[0] / ac_norm, 0.5) * 9.0 + 9.5)
            .floor()
            .clamp(0.0, 18.0) as u64;
        let quant_g = (sign_pow(component[1] / ac_norm, 0.5) * 9.0 + 9.5)
            .floor()
            .clamp(0.0, 18.0) as u64;
        let quant_b = (sign_pow(component[2] / ac_norm, 0.5) * 9.0 + 9.5)
            .floor()
            .clamp(0.0, 18.0) as u64;
        ac_values.push(quant_r * 19 * 19 + quant_g * 19 + quant_b);
    }

    // Build the BlurHash string: size byte, max-AC byte, DC, then AC pairs.
    let size_flag = (components_x - 1) + (components_y - 1) * 9;
    let mut result = String::with_capacity(4 + 2 * components.len());

    result.push_str(&base83::encode(size_flag as u64, 1)?);
    result.push_str(&base83::encode(quant_max_ac, 1)?);
    result.push_str(&base83::encode(dc_value, 4)?);
    for ac_value in &ac_values {
        result.push_str(&base83::encode(*ac_value, 2)?);
    }

    Ok(result)
}
