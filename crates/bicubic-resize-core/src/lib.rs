//! Bicubic Resize Core - Image resizing library
//!
//! This crate provides the core resizing functionality: JPEG/PNG decoding,
//! EXIF orientation correction, anchored and aspect-aware cropping, bicubic
//! resampling, and re-encoding.

pub mod buffer;
pub mod codec;
pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod resample;
pub mod transform;

pub use buffer::{AllocationError, BufferError, ChannelLayout, PixelBuffer, StridedView};
pub use codec::{Codec, EncodeParams, ImageCodec};
pub use decode::{resolve_orientation, DecodeError, ImageFormat, Orientation};
pub use encode::EncodeError;
pub use pipeline::{JpegOptions, Pipeline, PngOptions, ResizeError, ResizeOptions};
pub use resample::{EdgeMode, FilterKind, FirResampler, ResampleError, Resampler};
pub use transform::{
    apply_orientation, compute_crop_rect, AspectMode, CropAnchor, CropPolicy, CropRect,
};

/// Crate version, as reported to bindings.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
