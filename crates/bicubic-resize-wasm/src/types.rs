//! WASM-compatible wrapper types for resize requests and results.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! bicubic-resize types, handling the conversion between Rust and JavaScript
//! data representations. Enum-valued options travel as the integer codes the
//! native plugin API uses.

use bicubic_resize_core::{
    AspectMode, ChannelLayout, CropAnchor, CropPolicy, EdgeMode, FilterKind, JpegOptions,
    PixelBuffer, PngOptions, ResizeOptions,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// A resized raw image for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsResizedImage {
    width: u32,
    height: u32,
    channels: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsResizedImage {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel (3 for RGB, 4 for RGBA)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns packed pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {}
}

impl JsResizedImage {
    /// Wrap a core buffer, packing it if it carries row padding.
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        let buffer = buffer.into_packed();
        let channels = match buffer.layout() {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        };
        Self {
            width: buffer.width(),
            height: buffer.height(),
            channels,
            pixels: buffer.into_pixels(),
        }
    }
}

/// Resize request as passed from JavaScript.
///
/// Every field is optional on the JS side:
///
/// ```typescript
/// resize_jpeg(bytes, { width: 256, height: 256, crop: 0.8, cropAnchor: 1, quality: 85 });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsResizeOptions {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// 0 = Catmull-Rom, 1 = cubic B-spline, 2 = Mitchell
    pub filter: i32,
    /// 0 = clamp, 1 = wrap, 2 = reflect, 3 = zero
    pub edge_mode: i32,
    /// Crop fraction (0.01-1.0, 1.0 = no crop)
    pub crop: f32,
    /// 0 = center, 1-8 = top-left through bottom-right
    pub crop_anchor: i32,
    /// 0 = square, 1 = original, 2 = custom
    pub aspect_mode: i32,
    pub aspect_width: f32,
    pub aspect_height: f32,
    /// JPEG quality (1-100, clamped)
    pub quality: i32,
    /// Apply EXIF orientation to JPEG input
    pub apply_exif: bool,
    /// PNG compression level (0-9, clamped)
    pub compression_level: i32,
}

impl Default for JsResizeOptions {
    fn default() -> Self {
        let jpeg = JpegOptions::default();
        let crop = CropPolicy::default();
        Self {
            width: 0,
            height: 0,
            filter: 0,
            edge_mode: 0,
            crop: crop.fraction,
            crop_anchor: 0,
            aspect_mode: 0,
            aspect_width: 1.0,
            aspect_height: 1.0,
            quality: i32::from(jpeg.quality),
            apply_exif: jpeg.apply_exif,
            compression_level: i32::from(PngOptions::default().compression_level),
        }
    }
}

impl JsResizeOptions {
    pub(crate) fn resize_options(&self) -> ResizeOptions {
        ResizeOptions::new(self.width, self.height)
            .with_filter(FilterKind::from_code(self.filter))
            .with_edge_mode(EdgeMode::from_code(self.edge_mode))
            .with_crop(CropPolicy {
                fraction: self.crop,
                anchor: CropAnchor::from_code(self.crop_anchor),
                aspect: AspectMode::from_code(
                    self.aspect_mode,
                    self.aspect_width,
                    self.aspect_height,
                ),
            })
    }

    pub(crate) fn jpeg_options(&self) -> JpegOptions {
        JpegOptions {
            quality: self.quality.clamp(1, 100) as u8,
            apply_exif: self.apply_exif,
        }
    }

    pub(crate) fn png_options(&self) -> PngOptions {
        PngOptions {
            compression_level: self.compression_level.clamp(0, 9) as u8,
        }
    }
}

/// Deserialize a JS options object; `undefined` or `null` means defaults.
pub(crate) fn parse_options(value: JsValue) -> Result<JsResizeOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(JsResizeOptions::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid resize options: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resized_image_from_rgb_buffer() {
        let buffer = PixelBuffer::new(4, 2, ChannelLayout::Rgb, vec![7u8; 24]).unwrap();
        let img = JsResizedImage::from_buffer(buffer);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.channels(), 3);
        assert_eq!(img.byte_length(), 24);
    }

    #[test]
    fn test_resized_image_packs_strided_buffer() {
        let pixels = vec![1, 2, 3, 4, 0, 0, 5, 6, 7, 8, 0, 0];
        let buffer = PixelBuffer::with_stride(1, 2, ChannelLayout::Rgba, 6, pixels).unwrap();
        let img = JsResizedImage::from_buffer(buffer);
        assert_eq!(img.channels(), 4);
        assert_eq!(img.pixels(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_default_options_match_core_defaults() {
        let js = JsResizeOptions::default();
        assert_eq!(js.resize_options(), ResizeOptions::new(0, 0));
        assert_eq!(js.jpeg_options(), JpegOptions::default());
        assert_eq!(js.png_options(), PngOptions::default());
    }

    #[test]
    fn test_codes_map_to_core_enums() {
        let js = JsResizeOptions {
            width: 64,
            height: 32,
            filter: 2,
            edge_mode: 1,
            crop: 0.5,
            crop_anchor: 3,
            aspect_mode: 2,
            aspect_width: 16.0,
            aspect_height: 9.0,
            ..Default::default()
        };
        let options = js.resize_options();

        assert_eq!((options.width, options.height), (64, 32));
        assert_eq!(options.filter, FilterKind::Mitchell);
        assert_eq!(options.edge_mode, EdgeMode::Wrap);
        assert_eq!(options.crop.fraction, 0.5);
        assert_eq!(options.crop.anchor, CropAnchor::TopRight);
        assert_eq!(
            options.crop.aspect,
            AspectMode::Custom {
                width: 16.0,
                height: 9.0
            }
        );
    }

    #[test]
    fn test_out_of_range_encoder_settings_clamp() {
        let high = JsResizeOptions {
            quality: 500,
            compression_level: 42,
            ..Default::default()
        };
        assert_eq!(high.jpeg_options().quality, 100);
        assert_eq!(high.png_options().compression_level, 9);

        let low = JsResizeOptions {
            quality: -5,
            compression_level: -1,
            ..Default::default()
        };
        assert_eq!(low.jpeg_options().quality, 1);
        assert_eq!(low.png_options().compression_level, 0);

        // 256 would wrap to 0 under a plain byte cast
        let wrapping = JsResizeOptions {
            quality: 256,
            ..Default::default()
        };
        assert_eq!(wrapping.jpeg_options().quality, 100);
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        let js = JsResizeOptions {
            filter: 99,
            edge_mode: -1,
            crop_anchor: 12,
            aspect_mode: 7,
            ..Default::default()
        };
        let options = js.resize_options();

        assert_eq!(options.filter, FilterKind::CatmullRom);
        assert_eq!(options.edge_mode, EdgeMode::Clamp);
        assert_eq!(options.crop.anchor, CropAnchor::Center);
        assert_eq!(options.crop.aspect, AspectMode::Square);
    }
}
