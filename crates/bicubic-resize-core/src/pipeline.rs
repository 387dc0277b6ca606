//! The resize pipeline: decode, orient, crop, resample, encode.
//!
//! [`Pipeline`] ties the stages together for four payload kinds: raw RGB,
//! raw RGBA, JPEG and PNG. Each call is synchronous and self-contained; the
//! pipeline holds only its (stateless) backends, so one instance can serve
//! concurrent calls when the backends are `Send + Sync`.
//!
//! ```text
//! bytes -> Codec::decode -> apply_orientation (JPEG) -> compute_crop_rect
//!       -> StridedView::sub_view -> Resampler::resample -> Codec::encode
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use bicubic_resize_core::{JpegOptions, Pipeline, ResizeOptions};
//!
//! let jpeg = std::fs::read("photo.jpg").unwrap();
//! let options = ResizeOptions::new(256, 256);
//! let thumbnail = Pipeline::new().resize_jpeg(&jpeg, &options, &JpegOptions::default()).unwrap();
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::buffer::{AllocationError, ChannelLayout, PixelBuffer, StridedView};
use crate::codec::{Codec, EncodeParams, ImageCodec};
use crate::decode::{resolve_orientation, DecodeError, ImageFormat};
use crate::encode::{EncodeError, DEFAULT_JPEG_QUALITY, DEFAULT_PNG_COMPRESSION};
use crate::resample::{EdgeMode, FilterKind, FirResampler, ResampleError, Resampler};
use crate::transform::{apply_orientation, compute_crop_rect, CropPolicy};

/// Errors returned by the resize pipeline.
#[derive(Debug, Error)]
pub enum ResizeError {
    /// A caller-supplied argument was rejected before any work was done
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Resample(#[from] ResampleError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// What to produce: output size, filter, edge handling and crop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeOptions {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    pub filter: FilterKind,
    pub edge_mode: EdgeMode,
    pub crop: CropPolicy,
}

impl ResizeOptions {
    /// Options for a `width x height` output with default filter, edge mode
    /// and no crop.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: FilterKind) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }

    pub fn with_crop(mut self, crop: CropPolicy) -> Self {
        self.crop = crop;
        self
    }
}

/// JPEG output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JpegOptions {
    /// Encoder quality (1-100, clamped)
    pub quality: u8,
    /// Rotate/flip according to the EXIF orientation tag before cropping
    pub apply_exif: bool,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            apply_exif: true,
        }
    }
}

/// PNG output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PngOptions {
    /// zlib-style compression level (0-9, clamped)
    pub compression_level: u8,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_PNG_COMPRESSION,
        }
    }
}

/// Orchestrates decode, orientation, crop, resample and encode.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<C = ImageCodec, R = FirResampler> {
    codec: C,
    resampler: R,
}

impl Pipeline {
    /// Pipeline with the default `image` codec and `fast_image_resize`
    /// resampler.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Codec, R: Resampler> Pipeline<C, R> {
    /// Pipeline with caller-supplied backends.
    pub fn with_backends(codec: C, resampler: R) -> Self {
        Self { codec, resampler }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn resampler(&self) -> &R {
        &self.resampler
    }

    /// Resize packed RGB pixels of a `width x height` image.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for zero input or output dimensions or an input
    /// shorter than `width * height * 3`; otherwise any resampling failure.
    pub fn resize_rgb(
        &self,
        input: &[u8],
        width: u32,
        height: u32,
        options: &ResizeOptions,
    ) -> Result<PixelBuffer, ResizeError> {
        self.resize_raw(input, width, height, ChannelLayout::Rgb, options)
    }

    /// Resize packed RGBA pixels of a `width x height` image.
    ///
    /// # Errors
    ///
    /// As [`Pipeline::resize_rgb`], with 4 bytes per pixel.
    pub fn resize_rgba(
        &self,
        input: &[u8],
        width: u32,
        height: u32,
        options: &ResizeOptions,
    ) -> Result<PixelBuffer, ResizeError> {
        self.resize_raw(input, width, height, ChannelLayout::Rgba, options)
    }

    /// Decode a JPEG, optionally apply its EXIF orientation, crop, resample
    /// and re-encode as JPEG.
    pub fn resize_jpeg(
        &self,
        input: &[u8],
        options: &ResizeOptions,
        jpeg: &JpegOptions,
    ) -> Result<Vec<u8>, ResizeError> {
        validate_request(input, options)?;

        let decoded = self.codec.decode(input, ImageFormat::Jpeg)?;
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            "decoded JPEG"
        );

        let oriented = if jpeg.apply_exif {
            let orientation = resolve_orientation(input);
            debug!(orientation = orientation.code(), "resolved EXIF orientation");
            apply_orientation(decoded, orientation)?
        } else {
            decoded
        };

        let resized = self.crop_and_resample(oriented.as_view(), options)?;
        drop(oriented);

        Ok(self.codec.encode(
            &resized,
            EncodeParams::Jpeg {
                quality: jpeg.quality,
            },
        )?)
    }

    /// Decode a PNG, crop, resample and re-encode as PNG.
    ///
    /// Alpha is preserved when the source has it. PNG orientation metadata
    /// is not consulted.
    pub fn resize_png(
        &self,
        input: &[u8],
        options: &ResizeOptions,
        png: &PngOptions,
    ) -> Result<Vec<u8>, ResizeError> {
        validate_request(input, options)?;

        let decoded = self.codec.decode(input, ImageFormat::Png)?;
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            layout = ?decoded.layout(),
            "decoded PNG"
        );

        let resized = self.crop_and_resample(decoded.as_view(), options)?;
        drop(decoded);

        Ok(self.codec.encode(
            &resized,
            EncodeParams::Png {
                compression_level: png.compression_level,
            },
        )?)
    }

    fn resize_raw(
        &self,
        input: &[u8],
        width: u32,
        height: u32,
        layout: ChannelLayout,
        options: &ResizeOptions,
    ) -> Result<PixelBuffer, ResizeError> {
        validate_request(input, options)?;

        let stride = (width as usize)
            .checked_mul(layout.channels())
            .ok_or_else(|| {
                ResizeError::InvalidArgument(format!("input width {width} overflows row length"))
            })?;
        let view = StridedView::new(input, width, height, stride, layout)
            .map_err(|e| ResizeError::InvalidArgument(e.to_string()))?;

        self.crop_and_resample(view, options)
    }

    fn crop_and_resample(
        &self,
        source: StridedView<'_>,
        options: &ResizeOptions,
    ) -> Result<PixelBuffer, ResizeError> {
        let rect = compute_crop_rect(source.width(), source.height(), &options.crop);
        debug!(
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "computed crop rectangle"
        );

        let cropped = source.sub_view(rect).ok_or_else(|| {
            ResizeError::InvalidArgument(format!(
                "crop {}x{}+{}+{} outside {}x{} source",
                rect.width,
                rect.height,
                rect.x,
                rect.y,
                source.width(),
                source.height()
            ))
        })?;

        let resized = self.resampler.resample(
            &cropped,
            options.width,
            options.height,
            options.edge_mode,
            options.filter,
        )?;
        debug!(
            width = resized.width(),
            height = resized.height(),
            filter = ?options.filter,
            edge_mode = ?options.edge_mode,
            "resampled"
        );

        Ok(resized)
    }
}

/// Reject empty input and zero output dimensions.
fn validate_request(input: &[u8], options: &ResizeOptions) -> Result<(), ResizeError> {
    if input.is_empty() {
        return Err(ResizeError::InvalidArgument("input is empty".to_string()));
    }
    if options.width == 0 || options.height == 0 {
        return Err(ResizeError::InvalidArgument(format!(
            "output dimensions must be non-zero, got {}x{}",
            options.width, options.height
        )));
    }
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
