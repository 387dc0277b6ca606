//! Bicubic Resize WASM - WebAssembly bindings for bicubic-resize
//!
//! This crate provides WASM bindings to expose the bicubic-resize-core
//! pipeline to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `resize` - Raw, JPEG and PNG resize bindings plus EXIF orientation lookup
//! - `types` - WASM-compatible wrapper types for options and results
//!
//! # Usage
//!
//! ```typescript
//! import init, { resize_rgba } from '@bicubic-resize/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const { data, width, height } = ctx.getImageData(0, 0, w, h);
//! const thumb = resize_rgba(new Uint8Array(data.buffer), width, height, { width: 128, height: 128 });
//! console.log(`Resized to ${thumb.width}x${thumb.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod resize;
mod types;

// Re-export public types
pub use resize::{get_orientation, resize_jpeg, resize_png, resize_rgb, resize_rgba};
pub use types::{JsResizeOptions, JsResizedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    bicubic_resize_core::VERSION.to_string()
}
