//! PNG decoding.
//!
//! PNGs whose color type carries alpha decode to RGBA so transparency
//! survives resampling; everything else (gray, palette without tRNS, RGB)
//! decodes to RGB. 16-bit images are reduced to 8 bits per channel.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, ImageFormat};
use crate::buffer::PixelBuffer;

/// Decode PNG bytes to an RGB or RGBA pixel buffer.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for empty input and
/// `DecodeError::CorruptedFile` if the bytes are not a decodable PNG.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = ImageReader::with_format(Cursor::new(bytes), image::ImageFormat::Png)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile {
            format: ImageFormat::Png,
            reason: e.to_string(),
        })?;

    if img.color().has_alpha() {
        Ok(PixelBuffer::from_rgba_image(img.into_rgba8()))
    } else {
        Ok(PixelBuffer::from_rgb_image(img.into_rgb8()))
    }
}
