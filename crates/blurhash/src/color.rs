//! Color transfer utilities for sRGB and linear RGB.
//!
//! BlurHash does its cosine decomposition in linear light, while pixel
//! buffers usually arrive gamma-encoded on the 0-255 scale. These functions
//! implement the standard piecewise sRGB transfer in both directions, plus
//! the sign-preserving power curve used for AC coefficient quantization.
//!
//! The constants `0.04045` and `0.0031308` are the reference values used by
//! every BlurHash implementation and must not be replaced with the
//! higher-precision IEC forms: hashes are compared byte-for-byte across
//! implementations.

/// Convert an sRGB channel value on the 0-255 scale to linear light (0.0..=1.0).
///
/// # Examples
///
/// ```
/// use blurhash::color::srgb_to_linear;
/// assert!(srgb_to_linear(0.0).abs() < 1e-12);
/// assert!((srgb_to_linear(255.0) - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn srgb_to_linear(value: f64) -> f64 {
    let v = value / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a linear light value to an sRGB channel value on the 0-255 scale.
///
/// The input is clamped to `[0.0, 1.0]` before the transfer. The result
/// includes a `+0.5` term, so truncating it to an integer performs
/// round-half-up. The truncation-after-add-0.5 convention is what reference
/// implementations use; rounding any other way produces different hashes.
///
/// # Examples
///
/// ```
/// use blurhash::color::linear_to_srgb;
/// assert!((linear_to_srgb(0.0) - 0.5).abs() < 1e-12);
/// assert_eq!(linear_to_srgb(1.0) as u8, 255);
/// ```
#[inline]
pub fn linear_to_srgb(value: f64) -> f64 {
    let v = value.clamp(0.0, 1.0);
    if v <= 0.0031308 {
        v * 12.92 * 255.0 + 0.5
    } else {
        (1.055 * v.powf(1.0 / 2.4) - 0.055) * 255.0 + 0.5
    }
}

/// Compute `sign(value) * |value|^exp`.
///
/// AC coefficients can be negative; this applies the perceptual curve to
/// the magnitude while carrying the sign through.
///
/// # Examples
///
/// ```
/// use blurhash::color::sign_pow;
/// assert!((sign_pow(4.0, 0.5) - 2.0).abs() < 1e-10);
/// assert!((sign_pow(-4.0, 0.5) + 2.0).abs() < 1e-10);
/// ```
#[inline]
pub fn sign_pow(value: f64, exp: f64) -> f64 {
    value.abs().powf(exp).copysign(value)
}
