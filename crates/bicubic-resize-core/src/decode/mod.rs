//! Image decoding and orientation discovery.
//!
//! This module provides functionality for:
//! - Decoding JPEG images to RGB
//! - Decoding PNG images to RGB or RGBA (alpha preserved)
//! - Reading the EXIF orientation of a JPEG stream without decoding it
//!
//! # Architecture
//!
//! Decoding is delegated to the `image` crate. The orientation resolver is a
//! standalone byte walker so it can run on the original compressed bytes
//! before (or without) decoding. All operations are synchronous.
//!
//! # Examples
//!
//! ```ignore
//! use bicubic_resize_core::decode::{decode_jpeg, resolve_orientation};
//!
//! let jpeg_bytes = std::fs::read("photo.jpg").unwrap();
//! let orientation = resolve_orientation(&jpeg_bytes);
//! let image = decode_jpeg(&jpeg_bytes).unwrap();
//! println!("Decoded {}x{} image, orientation {}", image.width(), image.height(), orientation.code());
//! ```

mod exif;
mod jpeg;
mod png;
mod types;

pub use exif::resolve_orientation;
pub use jpeg::decode_jpeg;
pub use png::decode_png;
pub use types::{DecodeError, ImageFormat, Orientation};
