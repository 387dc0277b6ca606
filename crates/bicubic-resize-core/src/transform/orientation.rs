//! EXIF orientation correction by full pixel remap.
//!
//! Each orientation is a fixed coordinate mapping from a source pixel
//! `(x, y)` in a `w x h` image to its destination. Quarter-turn variants
//! (5-8) swap the output dimensions, so the remap always writes into a new
//! buffer rather than permuting in place.
//!
//! ```text
//! 1 identity      (x, y)
//! 2 flip H        (w-1-x, y)
//! 3 rotate 180    (w-1-x, h-1-y)
//! 4 flip V        (x, h-1-y)
//! 5 transpose     (y, x)
//! 6 rotate 90 CW  (h-1-y, x)
//! 7 transverse    (h-1-y, w-1-x)
//! 8 rotate 90 CCW (y, w-1-x)
//! ```

use crate::buffer::{AllocationError, PixelBuffer};
use crate::decode::Orientation;

/// Maps a source pixel `(x, y, w, h)` to its destination `(x, y)`.
pub type Remap = fn(usize, usize, usize, usize) -> (usize, usize);

fn identity(x: usize, y: usize, _w: usize, _h: usize) -> (usize, usize) {
    (x, y)
}

fn flip_horizontal(x: usize, y: usize, w: usize, _h: usize) -> (usize, usize) {
    (w - 1 - x, y)
}

fn rotate_180(x: usize, y: usize, w: usize, h: usize) -> (usize, usize) {
    (w - 1 - x, h - 1 - y)
}

fn flip_vertical(x: usize, y: usize, _w: usize, h: usize) -> (usize, usize) {
    (x, h - 1 - y)
}

fn transpose(x: usize, y: usize, _w: usize, _h: usize) -> (usize, usize) {
    (y, x)
}

fn rotate_90_cw(x: usize, y: usize, _w: usize, h: usize) -> (usize, usize) {
    (h - 1 - y, x)
}

fn transverse(x: usize, y: usize, w: usize, h: usize) -> (usize, usize) {
    (h - 1 - y, w - 1 - x)
}

fn rotate_90_ccw(x: usize, y: usize, w: usize, _h: usize) -> (usize, usize) {
    (y, w - 1 - x)
}

/// Destination mapping per orientation, indexed by EXIF code - 1.
const REMAP: [Remap; 8] = [
    identity,
    flip_horizontal,
    rotate_180,
    flip_vertical,
    transpose,
    rotate_90_cw,
    transverse,
    rotate_90_ccw,
];

/// The coordinate mapping for `orientation`.
#[inline]
pub fn remap_for(orientation: Orientation) -> Remap {
    REMAP[orientation.code() as usize - 1]
}

/// Re-lay pixel memory so the image displays upright.
///
/// `Orientation::Normal` returns `buffer` untouched, without allocating.
/// Every other orientation allocates a packed output buffer (dimensions
/// swapped for 5-8), copies each source pixel to its mapped position, and
/// drops the source buffer.
///
/// # Errors
///
/// Returns [`AllocationError`] if the output buffer cannot be allocated.
/// The source buffer is dropped in that case as well.
pub fn apply_orientation(
    buffer: PixelBuffer,
    orientation: Orientation,
) -> Result<PixelBuffer, AllocationError> {
    if orientation == Orientation::Normal {
        return Ok(buffer);
    }

    let (src_w, src_h) = (buffer.width(), buffer.height());
    let (dst_w, dst_h) = orientation.oriented_dimensions(src_w, src_h);
    let channels = buffer.layout().channels();

    let mut output = PixelBuffer::try_zeroed(dst_w, dst_h, buffer.layout())?;
    let dst_stride = output.stride();
    let dst = output.pixels_mut();
    let remap = remap_for(orientation);

    for y in 0..src_h {
        for (x, pixel) in buffer.row(y).chunks_exact(channels).enumerate() {
            let (dst_x, dst_y) = remap(x, y as usize, src_w as usize, src_h as usize);
            let dst_idx = dst_y * dst_stride + dst_x * channels;
            dst[dst_idx..dst_idx + channels].copy_from_slice(pixel);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ChannelLayout;

    /// RGB image whose pixel at (x, y) has all channels set to `y * width + x`.
    fn labeled(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::new();
        for i in 0..width * height {
            pixels.extend_from_slice(&[i as u8; 3]);
        }
        PixelBuffer::new(width, height, ChannelLayout::Rgb, pixels).unwrap()
    }

    /// One label per pixel, row-major.
    fn labels(buffer: &PixelBuffer) -> Vec<u8> {
        buffer.pixels().chunks_exact(3).map(|p| p[0]).collect()
    }

    // Source 3x2:
    //   0 1 2
    //   3 4 5

    #[test]
    fn test_normal_is_same_allocation() {
        let img = labeled(3, 2);
        let ptr = img.pixels().as_ptr();
        let result = apply_orientation(img, Orientation::Normal).unwrap();
        assert_eq!(result.pixels().as_ptr(), ptr);
        assert_eq!(labels(&result), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_flip_horizontal() {
        let result = apply_orientation(labeled(3, 2), Orientation::FlipHorizontal).unwrap();
        assert_eq!((result.width(), result.height()), (3, 2));
        assert_eq!(labels(&result), vec![2, 1, 0, 5, 4, 3]);
    }

    #[test]
    fn test_rotate_180() {
        let result = apply_orientation(labeled(3, 2), Orientation::Rotate180).unwrap();
        assert_eq!(labels(&result), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_flip_vertical() {
        let result = apply_orientation(labeled(3, 2), Orientation::FlipVertical).unwrap();
        assert_eq!(labels(&result), vec![3, 4, 5, 0, 1, 2]);
    }

    #[test]
    fn test_transpose() {
        let result = apply_orientation(labeled(3, 2), Orientation::Transpose).unwrap();
        assert_eq!((result.width(), result.height()), (2, 3));
        assert_eq!(labels(&result), vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_rotate_90_cw() {
        let result = apply_orientation(labeled(3, 2), Orientation::Rotate90CW).unwrap();
        assert_eq!((result.width(), result.height()), (2, 3));
        assert_eq!(labels(&result), vec![3, 0, 4, 1, 5, 2]);
    }

    #[test]
    fn test_transverse() {
        let result = apply_orientation(labeled(3, 2), Orientation::Transverse).unwrap();
        assert_eq!((result.width(), result.height()), (2, 3));
        assert_eq!(labels(&result), vec![5, 2, 4, 1, 3, 0]);
    }

    #[test]
    fn test_rotate_90_ccw() {
        let result = apply_orientation(labeled(3, 2), Orientation::Rotate270CW).unwrap();
        assert_eq!((result.width(), result.height()), (2, 3));
        assert_eq!(labels(&result), vec![2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn test_rgba_channels_move_together() {
        let pixels = vec![
            1, 2, 3, 4, // (0, 0)
            5, 6, 7, 8, // (1, 0)
        ];
        let img = PixelBuffer::new(2, 1, ChannelLayout::Rgba, pixels).unwrap();
        let result = apply_orientation(img, Orientation::Rotate90CW).unwrap();

        assert_eq!((result.width(), result.height()), (1, 2));
        assert_eq!(result.layout(), ChannelLayout::Rgba);
        assert_eq!(result.pixels(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_strided_source_is_packed_after_remap() {
        // 2x2 RGB with 2 bytes of row padding
        let pixels = vec![
            0, 0, 0, 1, 1, 1, 99, 99, //
            2, 2, 2, 3, 3, 3, 99, 99,
        ];
        let img = PixelBuffer::with_stride(2, 2, ChannelLayout::Rgb, 8, pixels).unwrap();
        let result = apply_orientation(img, Orientation::FlipHorizontal).unwrap();

        assert!(result.is_packed());
        assert_eq!(labels(&result), vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_matches_image_crate_operations() {
        use image::imageops;

        let img = labeled(5, 3);
        let rgb = image::RgbImage::from_raw(5, 3, img.pixels().to_vec()).unwrap();

        let expected = [
            (Orientation::FlipHorizontal, imageops::flip_horizontal(&rgb)),
            (Orientation::Rotate180, imageops::rotate180(&rgb)),
            (Orientation::FlipVertical, imageops::flip_vertical(&rgb)),
            (
                Orientation::Transpose,
                imageops::flip_horizontal(&imageops::rotate90(&rgb)),
            ),
            (Orientation::Rotate90CW, imageops::rotate90(&rgb)),
            (
                Orientation::Transverse,
                imageops::flip_horizontal(&imageops::rotate270(&rgb)),
            ),
            (Orientation::Rotate270CW, imageops::rotate270(&rgb)),
        ];

        for (orientation, reference) in expected {
            let result = apply_orientation(img.clone(), orientation).unwrap();
            assert_eq!(
                (result.width(), result.height()),
                reference.dimensions(),
                "{orientation:?}"
            );
            assert_eq!(result.pixels(), reference.as_raw().as_slice(), "{orientation:?}");
        }
    }

    #[test]
    fn test_single_pixel_every_orientation() {
        for orientation in Orientation::ALL {
            let img = PixelBuffer::new(1, 1, ChannelLayout::Rgb, vec![9, 8, 7]).unwrap();
            let result = apply_orientation(img, orientation).unwrap();
            assert_eq!(result.pixels(), &[9, 8, 7]);
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
