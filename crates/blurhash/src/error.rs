//! Error types for BlurHash encoding and decoding.

use thiserror::Error;

/// Errors that can occur during BlurHash encoding or decoding.
///
/// Every variant is an input-validation failure surfaced on the first
/// violated invariant. None of them are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlurhashError {
    /// A character outside the base83 alphabet was encountered.
    #[error("invalid base83 character: {0:?}")]
    InvalidCharacter(char),

    /// A value does not fit in the requested number of base83 digits.
    #[error("value {value} does not fit in {length} base83 digits")]
    EncodingOverflow {
        /// The value that was to be encoded.
        value: u64,
        /// The requested encoded width in digits.
        length: usize,
    },

    /// The BlurHash string is under the 6-character minimum.
    #[error("BlurHash too short: {actual} characters (minimum 6)")]
    TooShort {
        /// The actual string length.
        actual: usize,
    },

    /// The BlurHash string length does not match its declared component grid.
    #[error("invalid BlurHash length: expected {expected}, got {actual}")]
    InvalidLength {
        /// The length implied by the size byte.
        expected: usize,
        /// The actual string length.
        actual: usize,
    },

    /// The component count is out of the valid range (1..=9).
    #[error("component count out of range: {axis} = {value} (must be 1..=9)")]
    InvalidComponentCount {
        /// Which component axis ("x" or "y").
        axis: &'static str,
        /// The invalid value.
        value: u32,
    },

    /// The image dimensions do not describe the supplied pixel buffer.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// The width value.
        width: u32,
        /// The height value.
        height: u32,
        /// Why the dimensions are invalid.
        reason: &'static str,
    },
}
