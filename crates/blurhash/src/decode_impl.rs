//! BlurHash decoding: convert a BlurHash string back into a pixel buffer.
//!
//! The decoder parses the base83 fields, dequantizes the DC and AC
//! components, and reconstructs an image of the requested dimensions by
//! summing the weighted cosine bases.

use std::f64::consts::PI;

use crate::base83;
use crate::color::{linear_to_srgb, sign_pow, srgb_to_linear};
use crate::error::BlurhashError;

/// Extract the component grid dimensions `(size_x, size_y)` from a BlurHash
/// string without decoding the rest of it.
///
/// Only the size byte is examined; the total length is not validated
/// against the component count. Callers that need full validation should
/// call [`decode`].
///
/// # Errors
///
/// Returns [`BlurhashError::TooShort`] if the string is under 6 characters,
/// or [`BlurhashError::InvalidCharacter`] if the size byte is not base83.
///
/// # Examples
///
/// ```
/// use blurhash::components;
/// let (cx, cy) = components("LEHV6nWB2yk8pyo0adR*.7kCMdnj").unwrap();
/// assert_eq!((cx, cy), (4, 3));
/// ```
pub fn components(blurhash: &str) -> Result<(u32, u32), BlurhashError> {
    if blurhash.len() < 6 {
        return Err(BlurhashError::TooShort {
            actual: blurhash.len(),
        });
    }
    let size_info = base83::decode_bytes(&blurhash.as_bytes()[0..1])?;
    // The size byte is y-major: (size_x - 1) + (size_y - 1) * 9.
    let size_y = (size_info / 9) + 1;
    let size_x = (size_info % 9) + 1;
    Ok((size_x as u32, size_y as u32))
}

/// Decode a BlurHash string into a flat RGB pixel buffer.
///
/// # Arguments
///
/// * `blurhash` - The BlurHash string to decode.
/// * `width` - The desired output image width.
/// * `height` - The desired output image height.
/// * `punch` - Contrast multiplier applied to the AC components (1.0 = as
///   encoded).
/// * `linear` - When false, each channel is passed through the sRGB
///   transfer and the output is on the 0-255 scale (still `f64`; truncate
///   to get integer channels). When true, the raw linear-light synthesis
///   values are returned unclamped.
///
/// # Returns
///
/// A `Vec<f64>` of length `width * height * 3` in row-major RGB order.
/// Requesting a zero-area image yields an empty buffer.
///
/// # Errors
///
/// Returns [`BlurhashError::TooShort`] for strings under 6 characters,
/// [`BlurhashError::InvalidLength`] when the length disagrees with the
/// declared component grid, and [`BlurhashError::InvalidCharacter`] for
/// bytes outside the alphabet.
///
/// # Examples
///
/// ```
/// use blurhash::decode;
/// let pixels = decode("LEHV6nWB2yk8pyo0adR*.7kCMdnj", 32, 32, 1.0, false).unwrap();
/// assert_eq!(pixels.len(), 32 * 32 * 3);
/// ```
pub fn decode(
    blurhash: &str,
    width: u32,
    height: u32,
    punch: f64,
    linear: bool,
) -> Result<Vec<f64>, BlurhashError> {
    if blurhash.len() < 6 {
        return Err(BlurhashError::TooShort {
            actual: blurhash.len(),
        });
    }

    let bytes = blurhash.as_bytes();
    let size_info = base83::decode_bytes(&bytes[0..1])?;
    let size_y = ((size_info / 9) + 1) as usize;
    let size_x = ((size_info % 9) + 1) as usize;

    let expected_len = 4 + 2 * size_x * size_y;
    if blurhash.len() != expected_len {
        return Err(BlurhashError::InvalidLength {
            expected: expected_len,
            actual: blurhash.len(),
        });
    }

    let quant_max_value = base83::decode_bytes(&bytes[1..2])?;
    let real_max_value = (quant_max_value as f64 + 1.0) / 166.0 * punch;

    // DC component: 24-bit packed sRGB, one byte per channel.
    let dc_value = base83::decode_bytes(&bytes[2..6])?;
    let num_components = size_x * size_y;
    let mut colours: Vec<[f64; 3]> = Vec::with_capacity(num_components);
    colours.push([
        srgb_to_linear((dc_value >> 16) as f64),
        srgb_to_linear(((dc_value >> 8) & 255) as f64),
        srgb_to_linear((dc_value & 255) as f64),
    ]);

    // AC components: two digits each, unpacked as a base-19 triple.
    for component_idx in 1..num_components {
        let start = 4 + component_idx * 2;
        let ac_value = base83::decode_bytes(&bytes[start..start + 2])?;

        let quant_r = (ac_value / (19 * 19)) as f64;
        let quant_g = ((ac_value / 19) % 19) as f64;
        let quant_b = (ac_value % 19) as f64;

        colours.push([
            sign_pow((quant_r - 9.0) / 9.0, 2.0) * real_max_value,
            sign_pow((quant_g - 9.0) / 9.0, 2.0) * real_max_value,
            sign_pow((quant_b - 9.0) / 9.0, 2.0) * real_max_value,
        ]);
    }

    let w = width as usize;
    let h = height as usize;
    let mut result = vec![0.0f64; w * h * 3];
    if w == 0 || h == 0 {
        return Ok(result);
    }

    let wf = width as f64;
    let hf = height as f64;

    // Precompute cosine tables.
    let cos_x: Vec<Vec<f64>> = (0..size_x)
        .map(|i| {
            (0..w)
                .map(|x| (PI * x as f64 * i as f64 / wf).cos())
                .collect()
        })
        .collect();
    let cos_y: Vec<Vec<f64>> = (0..size_y)
        .map(|j| {
            (0..h)
                .map(|y| (PI * y as f64 * j as f64 / hf).cos())
                .collect()
        })
        .collect();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        result
            .par_chunks_mut(w * 3)
            .enumerate()
            .for_each(|(y, row)| {
                synthesize_row(row, y, w, size_x, size_y, &colours, &cos_x, &cos_y, linear);
            });
    }
    #[cfg(not(feature = "parallel"))]
    for (y, row) in result.chunks_mut(w * 3).enumerate() {
        synthesize_row(row, y, w, size_x, size_y, &colours, &cos_x, &cos_y, linear);
    }

    Ok(result)
}

/// Reconstruct one output row by summing the weighted cosine bases.
///
/// Rows are independent, so this is the unit of work for the `parallel`
/// feature; the component summation order inside a pixel is fixed.
#[allow(clippy::too_many_arguments)]
fn synthesize_row(
    row: &mut [f64],
    y: usize,
    width: usize,
    size_x: usize,
    size_y: usize,
    colours: &[[f64; 3]],
    cos_x: &[Vec<f64>],
    cos_y: &[Vec<f64>],
    linear: bool,
) {
    for x in 0..width {
        let mut pixel_r = 0.0f64;
        let mut pixel_g = 0.0f64;
        let mut pixel_b = 0.0f64;

        for j in 0..size_y {
            let cy = cos_y[j][y];
            for i in 0..size_x {
                let basis = cos_x[i][x] * cy;
                let colour = &colours[i + j * size_x];
                pixel_r += colour[0] * basis;
                pixel_g += colour[1] * basis;
                pixel_b += colour[2] * basis;
            }
        }

        let idx = x * 3;
        if linear {
            row[idx] = pixel_r;
            row[idx + 1] = pixel_g;
            row[idx + 2] = pixel_b;
        } else {
            row[idx] = linear_to_srgb(pixel_r);
            row[idx + 1] = linear_to_srgb(pixel_g);
            row[idx + 2] = linear_to_srgb(pixel_b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_impl::encode;

    #[test]
    fn test_components_extraction() {
        let (cx, cy) = components("LEHV6nWB2yk8pyo0adR*.7kCMdnj").unwrap();
        assert_eq!(cx, 4);
        assert_eq!(cy, 3);
    }

    #[test]
    fn test_components_too_short() {
        assert_eq!(
            components("ABC"),
            Err(BlurhashError::TooShort { actual: 3 })
        );
    }

    #[test]
    fn test_components_skips_length_validation() {
        // 'L' declares a 4x3 grid, which a full decode would reject at this
        // length; the accessor only reads the size byte.
        assert_eq!(components("L00000").unwrap(), (4, 3));
        assert!(decode("L00000", 4, 4, 1.0, false).is_err());
    }

    #[test]
    fn test_decode_output_size() {
        let pixels = decode("LEHV6nWB2yk8pyo0adR*.7kCMdnj", 32, 32, 1.0, false).unwrap();
        assert_eq!(pixels.len(), 32 * 32 * 3);
    }

    #[test]
    fn test_decode_too_short() {
        assert_eq!(
            decode("ABC", 32, 32, 1.0, false),
            Err(BlurhashError::TooShort { actual: 3 })
        );
    }

    #[test]
    fn test_decode_wrong_length() {
        assert_eq!(
            decode("L00000", 32, 32, 1.0, false),
            Err(BlurhashError::InvalidLength {
                expected: 28,
                actual: 6
            })
        );
    }

    #[test]
    fn test_decode_invalid_character() {
        // First byte outside the alphabet.
        assert_eq!(
            decode("!EHV6nWB2yk8pyo0adR*.7kCMdnj", 32, 32, 1.0, false),
            Err(BlurhashError::InvalidCharacter('!'))
        );
    }

    #[test]
    fn test_decode_non_ascii_hash() {
        // Multi-byte characters must surface as invalid input, not panic.
        assert!(decode("Léhv6nWB2yk8pyo0adR*.7kCMdn", 8, 8, 1.0, false).is_err());
    }

    #[test]
    fn test_decode_zero_area() {
        let pixels = decode("LEHV6nWB2yk8pyo0adR*.7kCMdnj", 0, 32, 1.0, false).unwrap();
        assert!(pixels.is_empty());
    }

    #[test]
    fn test_decode_srgb_output_range() {
        let pixels = decode("LEHV6nWB2yk8pyo0adR*.7kCMdnj", 8, 8, 1.0, false).unwrap();
        // sRGB-scale output carries the +0.5 rounding term, so every value
        // sits in [0.5, 255.5].
        for &p in &pixels {
            assert!((0.5..=255.5).contains(&p), "out of range: {p}");
        }
    }

    #[test]
    fn test_decode_dc_only_uniform() {
        let pixels = vec![200.0f64; 2 * 2 * 3];
        let hash = encode(&pixels, 2, 2, 1, 1, false).unwrap();
        let decoded = decode(&hash, 4, 4, 1.0, false).unwrap();
        // With 1x1 components every output pixel is the DC color.
        let first = [decoded[0], decoded[1], decoded[2]];
        for px in decoded.chunks(3) {
            assert_eq!([px[0], px[1], px[2]], first);
        }
        assert!((first[0] - 200.0).abs() < 1.5, "got {}", first[0]);
    }

    #[test]
    fn test_decode_punch_scales_ac() {
        let mut pixels = Vec::with_capacity(4 * 4 * 3);
        for y in 0..4 {
            for x in 0..4 {
                let v = ((x + y) * 30) as f64;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        let hash = encode(&pixels, 4, 4, 4, 4, false).unwrap();
        let normal = decode(&hash, 4, 4, 1.0, true).unwrap();
        let punched = decode(&hash, 4, 4, 2.0, true).unwrap();
        // Punch leaves the DC term alone and doubles every AC term, so the
        // deviation of each pixel from the image mean doubles in linear light.
        let mean = |buf: &[f64]| buf.iter().sum::<f64>() / buf.len() as f64;
        let m_normal = mean(&normal);
        let m_punched = mean(&punched);
        for (a, b) in normal.iter().zip(punched.iter()) {
            assert!(
                ((b - m_punched) - 2.0 * (a - m_normal)).abs() < 1e-9,
                "punch did not double AC deviation: {a} vs {b}"
            );
        }
    }
}
