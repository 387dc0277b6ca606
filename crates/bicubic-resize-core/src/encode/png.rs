//! PNG encoding for resized output.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{output_buffer, validate_input, EncodeError};
use crate::buffer::ChannelLayout;
use crate::decode::ImageFormat;

/// zlib-style level used when the caller does not choose one.
pub const DEFAULT_PNG_COMPRESSION: u8 = 6;

/// Map a 0-9 compression level onto the encoder's presets.
fn compression_for_level(level: u8) -> CompressionType {
    match level.min(9) {
        0..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encode RGB or RGBA pixel data to PNG bytes.
///
/// `compression_level` is clamped to 0-9 (0 = fastest, 9 = smallest) and
/// applies to this call only.
///
/// # Errors
///
/// Returns `InvalidDimensions` for a zero width or height,
/// `InvalidPixelData` if `pixels` is not exactly `width * height * channels`
/// bytes, and `EncodingFailed` if the encoder rejects the image.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: ChannelLayout,
    compression_level: u8,
) -> Result<Vec<u8>, EncodeError> {
    let expected_len = validate_input(pixels, width, height, layout.channels())?;

    let color = match layout {
        ChannelLayout::Rgb => ExtendedColorType::Rgb8,
        ChannelLayout::Rgba => ExtendedColorType::Rgba8,
    };

    let mut buffer = output_buffer(expected_len)?;
    PngEncoder::new_with_quality(
        &mut buffer,
        compression_for_level(compression_level),
        FilterType::Adaptive,
    )
    .write_image(pixels, width, height, color)
    .map_err(|e| EncodeError::EncodingFailed {
        format: ImageFormat::Png,
        reason: e.to_string(),
    })?;

    buffer.shrink_to_fit();
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_png;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_compression_for_level() {
        assert!(matches!(compression_for_level(0), CompressionType::Fast));
        assert!(matches!(compression_for_level(6), CompressionType::Default));
        assert!(matches!(compression_for_level(9), CompressionType::Best));
        // Out of range clamps to 9
        assert!(matches!(compression_for_level(200), CompressionType::Best));
    }

    #[test]
    fn test_encode_png_rgb_roundtrip() {
        let pixels: Vec<u8> = (0..8 * 4 * 3).map(|i| (i * 7) as u8).collect();
        let png = encode_png(&pixels, 8, 4, ChannelLayout::Rgb, 6).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);

        let decoded = decode_png(&png).unwrap();
        assert_eq!(decoded.layout(), ChannelLayout::Rgb);
        assert_eq!(decoded.pixels(), &pixels[..]);
    }

    #[test]
    fn test_encode_png_rgba_roundtrip() {
        let pixels: Vec<u8> = (0..3 * 3 * 4).map(|i| (i * 5) as u8).collect();
        let png = encode_png(&pixels, 3, 3, ChannelLayout::Rgba, 9).unwrap();

        let decoded = decode_png(&png).unwrap();
        assert_eq!(decoded.layout(), ChannelLayout::Rgba);
        assert_eq!(decoded.pixels(), &pixels[..]);
    }

    #[test]
    fn test_encode_png_every_level() {
        let pixels = vec![42u8; 16 * 16 * 3];
        for level in 0..=12u8 {
            let png = encode_png(&pixels, 16, 16, ChannelLayout::Rgb, level);
            assert!(png.is_ok(), "level {level} should encode");
        }
    }

    #[test]
    fn test_encode_png_wrong_layout_length() {
        // RGB-sized data passed as RGBA
        let result = encode_png(&vec![0u8; 4 * 4 * 3], 4, 4, ChannelLayout::Rgba, 6);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_png_zero_dimensions() {
        let result = encode_png(&[], 0, 0, ChannelLayout::Rgb, 6);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }
}
