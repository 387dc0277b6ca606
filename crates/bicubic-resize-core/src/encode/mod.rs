//! Image encoding for resized output.
//!
//! This module provides functionality for:
//! - Encoding RGB images to JPEG with a quality setting
//! - Encoding RGB or RGBA images to PNG with a compression level
//!
//! Both encoders take their tuning parameter per call; there is no
//! process-wide encoder state, so concurrent encodes with different settings
//! do not interfere.
//!
//! # Examples
//!
//! ```ignore
//! use bicubic_resize_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod png;

use thiserror::Error;

use crate::buffer::AllocationError;

pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use png::{encode_png, DEFAULT_PNG_COMPRESSION};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder itself failed
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed {
        format: crate::decode::ImageFormat,
        reason: String,
    },

    /// The output buffer could not be reserved
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

/// Check dimensions and pixel data length for a packed image.
///
/// Returns the expected byte length on success.
fn validate_input(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<usize, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(channels);
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(expected)
}

/// Empty output vector with room for `capacity` bytes.
fn output_buffer(capacity: usize) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(|_| AllocationError { bytes: capacity })?;
    Ok(buffer)
}
