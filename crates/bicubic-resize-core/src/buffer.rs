//! Owned pixel buffers and borrowed strided windows into them.
//!
//! A [`PixelBuffer`] owns interleaved 8-bit RGB or RGBA pixels. A
//! [`StridedView`] borrows a rectangular window of pixel memory without
//! copying it: the view keeps the parent's row stride, so cropping before
//! resampling is just pointer arithmetic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::CropRect;

/// A pixel buffer could not be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to allocate {bytes} bytes for pixel buffer")]
pub struct AllocationError {
    /// Number of bytes that were requested.
    pub bytes: usize,
}

/// Invalid pixel buffer geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Stride is shorter than one packed row.
    #[error("Invalid stride: {stride} is smaller than row length {row_bytes}")]
    InvalidStride { stride: usize, row_bytes: usize },

    /// Pixel data is shorter than the geometry requires.
    #[error("Pixel data too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    /// The geometry does not fit in addressable memory.
    #[error("Image dimensions overflow: {width}x{height}")]
    Overflow { width: u32, height: u32 },
}

/// Interleaved channel layout of 8-bit pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChannelLayout {
    /// Red, green, blue (3 bytes per pixel).
    #[default]
    Rgb = 3,
    /// Red, green, blue, alpha (4 bytes per pixel).
    Rgba = 4,
}

impl ChannelLayout {
    /// Bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        self as usize
    }
}

/// Compute `width * channels` and `stride * height`, rejecting zero sizes
/// and overflow.
fn checked_geometry(
    width: u32,
    height: u32,
    layout: ChannelLayout,
) -> Result<(usize, usize), BufferError> {
    if width == 0 || height == 0 {
        return Err(BufferError::InvalidDimensions { width, height });
    }
    let row_bytes = (width as usize)
        .checked_mul(layout.channels())
        .ok_or(BufferError::Overflow { width, height })?;
    let total = row_bytes
        .checked_mul(height as usize)
        .ok_or(BufferError::Overflow { width, height })?;
    Ok((row_bytes, total))
}

/// An owned image with interleaved 8-bit pixels.
///
/// Invariants: `stride >= width * channels` and
/// `pixels.len() >= stride * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    stride: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap packed pixel data (`stride == width * channels`).
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or `pixels` is too short.
    pub fn new(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        pixels: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let (row_bytes, _) = checked_geometry(width, height, layout)?;
        Self::with_stride(width, height, layout, row_bytes, pixels)
    }

    /// Wrap pixel data whose rows are `stride` bytes apart.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, the stride is shorter than a
    /// row, or `pixels` is shorter than `stride * height`.
    pub fn with_stride(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        stride: usize,
        pixels: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let (row_bytes, _) = checked_geometry(width, height, layout)?;
        if stride < row_bytes {
            return Err(BufferError::InvalidStride { stride, row_bytes });
        }
        let expected = stride
            .checked_mul(height as usize)
            .ok_or(BufferError::Overflow { width, height })?;
        if pixels.len() < expected {
            return Err(BufferError::TooShort {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            stride,
            pixels,
        })
    }

    /// Allocate a zero-filled packed buffer, reporting allocation failure
    /// instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] if the allocator refuses the request or
    /// the size overflows.
    pub fn try_zeroed(
        width: u32,
        height: u32,
        layout: ChannelLayout,
    ) -> Result<Self, AllocationError> {
        let bytes = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(layout.channels());
        let (row_bytes, total) =
            checked_geometry(width, height, layout).map_err(|_| AllocationError { bytes })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(total)
            .map_err(|_| AllocationError { bytes: total })?;
        pixels.resize(total, 0);

        Ok(Self {
            width,
            height,
            layout,
            stride: row_bytes,
            pixels,
        })
    }

    /// Build from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: ChannelLayout::Rgb,
            stride: width as usize * 3,
            pixels: img.into_raw(),
        }
    }

    /// Build from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: ChannelLayout::Rgba,
            stride: width as usize * 4,
            pixels: img.into_raw(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Bytes between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw pixel bytes, including any row padding.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the raw pixel bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Length of one packed row in bytes.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.layout.channels()
    }

    /// True when rows carry no padding.
    #[inline]
    pub fn is_packed(&self) -> bool {
        self.stride == self.row_bytes()
    }

    /// Pixel bytes of row `y`, without padding.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.pixels[start..start + self.row_bytes()]
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Borrow the whole buffer as a strided view.
    pub fn as_view(&self) -> StridedView<'_> {
        StridedView {
            data: &self.pixels,
            width: self.width,
            height: self.height,
            stride: self.stride,
            layout: self.layout,
        }
    }

    /// Copy the pixels into a packed buffer, dropping any row padding.
    pub fn into_packed(self) -> Self {
        if self.is_packed() {
            return self;
        }
        let view = self.as_view();
        let pixels = view.to_packed_vec();
        Self {
            width: self.width,
            height: self.height,
            layout: self.layout,
            stride: self.row_bytes(),
            pixels,
        }
    }
}

/// A borrowed rectangular window of pixel memory.
///
/// `data` starts at the window's first pixel; row `y` of the window begins
/// at `y * stride`. The stride is the parent image's, so a view over a crop
/// skips the uncropped remainder of each parent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StridedView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
    layout: ChannelLayout,
}

impl<'a> StridedView<'a> {
    /// Create a view over caller-owned pixel memory.
    ///
    /// The last row only needs `width * channels` bytes, so a view may end
    /// exactly at the final pixel of a larger image.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, the stride is shorter than a
    /// row, or `data` cannot hold the described window.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        layout: ChannelLayout,
    ) -> Result<Self, BufferError> {
        let (row_bytes, _) = checked_geometry(width, height, layout)?;
        if stride < row_bytes {
            return Err(BufferError::InvalidStride { stride, row_bytes });
        }
        let expected = stride
            .checked_mul(height as usize - 1)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or(BufferError::Overflow { width, height })?;
        if data.len() < expected {
            return Err(BufferError::TooShort {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            layout,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Bytes starting at the window's first pixel.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Length of one window row in bytes.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.layout.channels()
    }

    /// Pixel bytes of window row `y`.
    #[inline]
    pub fn row(&self, y: u32) -> &'a [u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Narrow the view to `rect`, keeping the parent stride.
    ///
    /// The byte offset of the sub-window is `rect.y * stride + rect.x *
    /// channels`. Returns `None` if `rect` does not fit inside this view.
    pub fn sub_view(&self, rect: CropRect) -> Option<StridedView<'a>> {
        if rect.width == 0 || rect.height == 0 {
            return None;
        }
        if rect.x.checked_add(rect.width)? > self.width
            || rect.y.checked_add(rect.height)? > self.height
        {
            return None;
        }
        let offset = rect.y as usize * self.stride + rect.x as usize * self.layout.channels();
        Some(StridedView {
            data: &self.data[offset..],
            width: rect.width,
            height: rect.height,
            stride: self.stride,
            layout: self.layout,
        })
    }

    /// Copy the window into a freshly allocated packed vector.
    pub fn to_packed_vec(&self) -> Vec<u8> {
        let row_bytes = self.row_bytes();
        let mut out = Vec::with_capacity(row_bytes * self.height as usize);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }
}
