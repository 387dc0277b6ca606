//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compressed container formats understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Jpeg => f.write_str("JPEG"),
            ImageFormat::Png => f.write_str("PNG"),
        }
    }
}

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is empty or obviously not an image.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete {format} file: {reason}")]
    CorruptedFile { format: ImageFormat, reason: String },
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (reflect over the main diagonal).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (reflect over the anti-diagonal).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// All orientations in EXIF order.
    pub const ALL: [Orientation; 8] = [
        Orientation::Normal,
        Orientation::FlipHorizontal,
        Orientation::Rotate180,
        Orientation::FlipVertical,
        Orientation::Transpose,
        Orientation::Rotate90CW,
        Orientation::Transverse,
        Orientation::Rotate270CW,
    ];

    /// Map an EXIF tag value to an orientation. Values outside 1-8 are Normal.
    #[inline]
    pub fn from_exif(value: u16) -> Self {
        match value {
            1..=8 => Self::ALL[(value - 1) as usize],
            _ => Orientation::Normal,
        }
    }

    /// The EXIF tag value (1-8).
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns true if this orientation swaps width and height dimensions.
    ///
    /// Rotations of 90° and 270° (and their flip variants Transpose/Transverse)
    /// swap the image dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// The orientation that undoes this one.
    ///
    /// Flips, 180° rotation, transpose and transverse are involutions; the
    /// two quarter turns undo each other.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Orientation::Rotate90CW => Orientation::Rotate270CW,
            Orientation::Rotate270CW => Orientation::Rotate90CW,
            other => other,
        }
    }

    /// Dimensions of an image of size `(width, height)` after this
    /// orientation is applied.
    #[inline]
    pub fn oriented_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        u16::try_from(value)
            .map(Orientation::from_exif)
            .unwrap_or_default()
    }
}
