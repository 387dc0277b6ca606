//! JPEG encoding for resized output.
//!
//! Uses the `image` crate's baseline JPEG encoder. The encoder writes into an
//! owned buffer pre-sized to the raw pixel size; on success the buffer is
//! trimmed and handed to the caller, on failure it is simply dropped.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{output_buffer, validate_input, EncodeError};
use crate::decode::ImageFormat;

/// Quality used when the caller does not choose one.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order, packed)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Errors
///
/// Returns `InvalidDimensions` for a zero width or height,
/// `InvalidPixelData` if `pixels` is not exactly `width * height * 3` bytes,
/// and `EncodingFailed` if the encoder rejects the image.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let expected_len = validate_input(pixels, width, height, 3)?;

    let quality = quality.clamp(1, 100);

    let mut buffer = output_buffer(expected_len)?;
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ImageFormat::Jpeg,
            reason: e.to_string(),
        })?;

    buffer.shrink_to_fit();
    Ok(buffer)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
