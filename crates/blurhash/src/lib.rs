//! # blurhash
//!
//! BlurHash encoding and decoding over floating-point pixel buffers.
//!
//! [BlurHash](https://blurha.sh/) is a compact string representation of a
//! blurred image placeholder. This crate implements the numerical codec:
//! base83 serialization, the forward and inverse 2D cosine decomposition,
//! and the quantization rules in between. Image file loading, color
//! management, and presentation are the caller's business; the only image
//! representation crossing this boundary is a flat `f64` RGB buffer.
//!
//! Buffers are row-major with three samples per pixel and come in two
//! flavors, selected by an explicit flag on every call: sRGB-encoded on
//! the 0-255 scale, or linear light on the 0-1 scale.
//!
//! ## Quick Start
//!
//! ```
//! use blurhash::{components, decode, encode};
//!
//! // Encode: pixel buffer -> BlurHash string.
//! let pixels = vec![128.0f64; 4 * 4 * 3]; // 4x4 gray image, sRGB scale
//! let hash = encode(&pixels, 4, 4, 4, 4, false).unwrap();
//! assert_eq!(hash.len(), 4 + 2 * 4 * 4);
//!
//! // Inspect the component grid without a full decode.
//! assert_eq!(components(&hash).unwrap(), (4, 4));
//!
//! // Decode: BlurHash string -> pixel buffer.
//! let decoded = decode(&hash, 32, 32, 1.0, false).unwrap();
//! assert_eq!(decoded.len(), 32 * 32 * 3);
//! ```
//!
//! Both directions are deterministic: identical inputs produce identical
//! strings and buffers, bit for bit, including under the optional
//! rayon-backed `parallel` feature.

pub mod base83;
pub mod color;
pub mod error;

mod decode_impl;
mod encode_impl;

// Re-export primary functions at crate root.
pub use color::{linear_to_srgb, sign_pow, srgb_to_linear};
pub use decode_impl::{components, decode};
pub use encode_impl::encode;
pub use error::BlurhashError;
