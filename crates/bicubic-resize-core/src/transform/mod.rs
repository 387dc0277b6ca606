//! Geometric transforms applied before resampling: orientation and cropping.
//!
//! # Transform Order
//!
//! When resizing an image, transforms are applied in this order:
//! 1. EXIF orientation (JPEG only, physically remaps pixels)
//! 2. Crop (a borrowed window into the oriented pixels, no copy)
//! 3. Resample to the target dimensions
//!
//! # Coordinate System
//!
//! - Crop rectangles are in pixel coordinates of the oriented image
//! - Origin is top-left corner

mod crop;
mod orientation;

pub use crop::{
    compute_crop_rect, AspectMode, CropAnchor, CropPolicy, CropRect, MAX_CROP_FRACTION,
    MIN_CROP_FRACTION,
};
pub use orientation::{apply_orientation, remap_for, Remap};
