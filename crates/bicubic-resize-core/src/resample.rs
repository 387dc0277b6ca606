//! Bicubic resampling of strided pixel windows.
//!
//! The [`Resampler`] trait is the seam between the pipeline and the filter
//! math. [`FirResampler`] is the default backend, built on
//! `fast_image_resize`.
//!
//! `fast_image_resize` has no notion of edge modes, so the backend pads the
//! source by the filter's reach with pixels chosen by the [`EdgeMode`], then
//! resizes the unpadded region via the resizer's crop box. Taps that fall
//! outside the source therefore read the padding rather than being dropped.

use fast_image_resize as fir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::buffer::{AllocationError, BufferError, ChannelLayout, PixelBuffer, StridedView};

/// Errors that can occur during resampling.
#[derive(Debug, Error)]
pub enum ResampleError {
    /// Destination width or height is zero
    #[error("Invalid destination: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Padded source geometry does not fit in a u32
    #[error("Padded source dimensions overflow for {width}x{height}")]
    Overflow { width: u32, height: u32 },

    /// A working buffer could not be allocated
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// The resized pixels did not form a valid buffer
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// The resampling backend rejected the request
    #[error("Resampling backend failed: {0}")]
    Backend(String),
}

/// Cubic interpolation filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Catmull-Rom spline (sharp, interpolating; the usual "bicubic").
    #[default]
    CatmullRom,
    /// Cubic B-spline (smooth, slightly blurry).
    CubicBSpline,
    /// Mitchell-Netravali (balanced).
    Mitchell,
}

impl FilterKind {
    /// Map an integer code (0 = Catmull-Rom, 1 = cubic B-spline,
    /// 2 = Mitchell). Unknown codes are treated as Catmull-Rom.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => FilterKind::CubicBSpline,
            2 => FilterKind::Mitchell,
            _ => FilterKind::CatmullRom,
        }
    }

    /// Convert to the `fast_image_resize` filter.
    ///
    /// None of the backend's built-in filters is a cubic B-spline. Its
    /// Gaussian (sigma 0.5) is used instead: like the B-spline it is
    /// approximating, so it blurs rather than rings.
    pub fn to_fir_filter(self) -> fir::FilterType {
        match self {
            FilterKind::CatmullRom => fir::FilterType::CatmullRom,
            FilterKind::CubicBSpline => fir::FilterType::Gaussian,
            FilterKind::Mitchell => fir::FilterType::Mitchell,
        }
    }

    /// Kernel radius in source pixels at unit scale.
    fn support(self) -> f64 {
        match self {
            FilterKind::CatmullRom | FilterKind::Mitchell => 2.0,
            FilterKind::CubicBSpline => 3.0,
        }
    }
}

/// How samples outside the source are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Repeat the nearest edge pixel.
    #[default]
    Clamp,
    /// Tile the image.
    Wrap,
    /// Mirror about the edge pixel.
    Reflect,
    /// Transparent black.
    Zero,
}

impl EdgeMode {
    /// Map an integer code (0 = clamp, 1 = wrap, 2 = reflect, 3 = zero).
    /// Unknown codes are treated as clamp.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => EdgeMode::Wrap,
            2 => EdgeMode::Reflect,
            3 => EdgeMode::Zero,
            _ => EdgeMode::Clamp,
        }
    }

    /// Source index for a possibly out-of-range index along an axis of
    /// `len` pixels. `None` means a zero sample.
    pub fn source_index(self, index: i64, len: i64) -> Option<i64> {
        if len <= 0 {
            return None;
        }
        if (0..len).contains(&index) {
            return Some(index);
        }
        match self {
            EdgeMode::Clamp => Some(index.clamp(0, len - 1)),
            EdgeMode::Wrap => Some(index.rem_euclid(len)),
            EdgeMode::Reflect => {
                if len == 1 {
                    return Some(0);
                }
                let period = 2 * (len - 1);
                let m = index.rem_euclid(period);
                Some(if m < len { m } else { period - m })
            }
            EdgeMode::Zero => None,
        }
    }
}

/// Resamples a pixel window to new dimensions.
pub trait Resampler {
    /// Produce a packed `dst_width x dst_height` buffer with the same
    /// channel layout as `src`.
    fn resample(
        &self,
        src: &StridedView<'_>,
        dst_width: u32,
        dst_height: u32,
        edge_mode: EdgeMode,
        filter: FilterKind,
    ) -> Result<PixelBuffer, ResampleError>;
}

/// Default resampler backed by `fast_image_resize`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirResampler;

impl FirResampler {
    pub fn new() -> Self {
        Self
    }
}

fn pixel_type(layout: ChannelLayout) -> fir::PixelType {
    match layout {
        ChannelLayout::Rgb => fir::PixelType::U8x3,
        ChannelLayout::Rgba => fir::PixelType::U8x4,
    }
}

/// Padding needed on each side of an axis so every filter tap lands inside
/// the padded source. Capped at the source length.
fn padding(src_len: u32, dst_len: u32, filter: FilterKind) -> u32 {
    let scale = (src_len as f64 / dst_len as f64).max(1.0);
    let reach = (filter.support() * scale).ceil() as u32 + 1;
    reach.min(src_len)
}

/// Copy `src` into a larger packed buffer, filling the `pad_x`/`pad_y`
/// margins according to `edge_mode`.
fn pad_source(
    src: &StridedView<'_>,
    pad_x: u32,
    pad_y: u32,
    edge_mode: EdgeMode,
) -> Result<(Vec<u8>, u32, u32), ResampleError> {
    let overflow = ResampleError::Overflow {
        width: src.width(),
        height: src.height(),
    };
    let padded_w = pad_x
        .checked_mul(2)
        .and_then(|p| p.checked_add(src.width()))
        .ok_or(overflow)?;
    let padded_h = pad_y
        .checked_mul(2)
        .and_then(|p| p.checked_add(src.height()))
        .ok_or(ResampleError::Overflow {
            width: src.width(),
            height: src.height(),
        })?;

    let channels = src.layout().channels();
    let total = (padded_w as usize)
        .checked_mul(padded_h as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(ResampleError::Overflow {
            width: src.width(),
            height: src.height(),
        })?;

    let mut padded = Vec::new();
    padded
        .try_reserve_exact(total)
        .map_err(|_| AllocationError { bytes: total })?;

    let columns: Vec<Option<usize>> = (0..padded_w)
        .map(|x| {
            edge_mode
                .source_index(x as i64 - pad_x as i64, src.width() as i64)
                .map(|sx| sx as usize * channels)
        })
        .collect();
    let zero = [0u8; 4];

    for y in 0..padded_h {
        match edge_mode.source_index(y as i64 - pad_y as i64, src.height() as i64) {
            Some(sy) => {
                let row = src.row(sy as u32);
                for column in &columns {
                    match column {
                        Some(offset) => padded.extend_from_slice(&row[*offset..*offset + channels]),
                        None => padded.extend_from_slice(&zero[..channels]),
                    }
                }
            }
            None => padded.resize(padded.len() + padded_w as usize * channels, 0),
        }
    }

    Ok((padded, padded_w, padded_h))
}

impl Resampler for FirResampler {
    fn resample(
        &self,
        src: &StridedView<'_>,
        dst_width: u32,
        dst_height: u32,
        edge_mode: EdgeMode,
        filter: FilterKind,
    ) -> Result<PixelBuffer, ResampleError> {
        if dst_width == 0 || dst_height == 0 {
            return Err(ResampleError::InvalidDimensions {
                width: dst_width,
                height: dst_height,
            });
        }

        let layout = src.layout();
        let pixel_type = pixel_type(layout);
        let pad_x = padding(src.width(), dst_width, filter);
        let pad_y = padding(src.height(), dst_height, filter);
        let (padded, padded_w, padded_h) = pad_source(src, pad_x, pad_y, edge_mode)?;

        trace!(
            src_width = src.width(),
            src_height = src.height(),
            padded_w,
            padded_h,
            ?edge_mode,
            ?filter,
            "padded source for resampling"
        );

        let src_image = fir::images::ImageRef::new(padded_w, padded_h, &padded, pixel_type)
            .map_err(|e| ResampleError::Backend(e.to_string()))?;

        let dst_pixels = PixelBuffer::try_zeroed(dst_width, dst_height, layout)?.into_pixels();
        let mut dst_image =
            fir::images::Image::from_vec_u8(dst_width, dst_height, dst_pixels, pixel_type)
                .map_err(|e| ResampleError::Backend(e.to_string()))?;

        let options = fir::ResizeOptions::new()
            .resize_alg(fir::ResizeAlg::Convolution(filter.to_fir_filter()))
            .crop(
                pad_x as f64,
                pad_y as f64,
                src.width() as f64,
                src.height() as f64,
            );

        let mut resizer = fir::Resizer::new();
        resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| ResampleError::Backend(e.to_string()))?;

        Ok(PixelBuffer::new(
            dst_width,
            dst_height,
            layout,
            dst_image.into_vec(),
        )?)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
