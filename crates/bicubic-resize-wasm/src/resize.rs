//! Resize WASM bindings.
//!
//! This module exposes the bicubic-resize-core pipeline to JavaScript.
//!
//! # Functions
//!
//! - [`resize_rgb`] - Resize packed RGB pixels
//! - [`resize_rgba`] - Resize packed RGBA pixels
//! - [`resize_jpeg`] - Decode, orient, crop, resize and re-encode a JPEG
//! - [`resize_png`] - Decode, crop, resize and re-encode a PNG
//! - [`get_orientation`] - Read the EXIF orientation of a JPEG
//!
//! # Example
//!
//! ```typescript
//! import { resize_jpeg, get_orientation } from '@bicubic-resize/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! console.log(`EXIF orientation: ${get_orientation(bytes)}`);
//! const thumb = resize_jpeg(bytes, { width: 256, height: 256, crop: 0.9, quality: 85 });
//! ```

use bicubic_resize_core::{resolve_orientation, Pipeline, ResizeError};
use wasm_bindgen::prelude::*;

use crate::types::{parse_options, JsResizedImage};

fn to_js_error(e: ResizeError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Resize packed RGB pixels of a `width x height` image.
///
/// The output size, filter, edge mode and crop come from `options`.
///
/// # Errors
///
/// Returns an error if the options object is malformed, a dimension is zero,
/// or `pixels` is shorter than `width * height * 3`.
#[wasm_bindgen]
pub fn resize_rgb(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: JsValue,
) -> Result<JsResizedImage, JsValue> {
    let options = parse_options(options)?;
    Pipeline::new()
        .resize_rgb(pixels, width, height, &options.resize_options())
        .map(JsResizedImage::from_buffer)
        .map_err(to_js_error)
}

/// Resize packed RGBA pixels of a `width x height` image.
///
/// # Errors
///
/// As [`resize_rgb`], with 4 bytes per pixel.
#[wasm_bindgen]
pub fn resize_rgba(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: JsValue,
) -> Result<JsResizedImage, JsValue> {
    let options = parse_options(options)?;
    Pipeline::new()
        .resize_rgba(pixels, width, height, &options.resize_options())
        .map(JsResizedImage::from_buffer)
        .map_err(to_js_error)
}

/// Resize a JPEG and return the re-encoded JPEG bytes.
///
/// EXIF orientation is applied unless `applyExif` is false.
///
/// # Errors
///
/// Returns an error if the bytes are not a decodable JPEG or the options are
/// invalid.
#[wasm_bindgen]
pub fn resize_jpeg(bytes: &[u8], options: JsValue) -> Result<Vec<u8>, JsValue> {
    let options = parse_options(options)?;
    Pipeline::new()
        .resize_jpeg(bytes, &options.resize_options(), &options.jpeg_options())
        .map_err(to_js_error)
}

/// Resize a PNG and return the re-encoded PNG bytes. Alpha is preserved.
///
/// # Errors
///
/// Returns an error if the bytes are not a decodable PNG or the options are
/// invalid.
#[wasm_bindgen]
pub fn resize_png(bytes: &[u8], options: JsValue) -> Result<Vec<u8>, JsValue> {
    let options = parse_options(options)?;
    Pipeline::new()
        .resize_png(bytes, &options.resize_options(), &options.png_options())
        .map_err(to_js_error)
}

/// EXIF orientation (1-8) of a JPEG; 1 when absent or unreadable.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    resolve_orientation(bytes).code()
}
