//! Compressed image codecs.
//!
//! The [`Codec`] trait lets the pipeline decode and encode without knowing
//! which library does the work. [`ImageCodec`] is the default backend and
//! delegates to the `decode` and `encode` modules (the `image` crate).

use serde::{Deserialize, Serialize};

use crate::buffer::{ChannelLayout, PixelBuffer};
use crate::decode::{decode_jpeg, decode_png, DecodeError, ImageFormat};
use crate::encode::{encode_jpeg, encode_png, EncodeError, DEFAULT_JPEG_QUALITY};

/// Per-call encoder parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodeParams {
    /// Baseline JPEG at `quality` (1-100).
    Jpeg { quality: u8 },
    /// PNG at zlib-style `compression_level` (0-9).
    Png { compression_level: u8 },
}

impl EncodeParams {
    /// The container format these parameters produce.
    pub fn format(&self) -> ImageFormat {
        match self {
            EncodeParams::Jpeg { .. } => ImageFormat::Jpeg,
            EncodeParams::Png { .. } => ImageFormat::Png,
        }
    }
}

impl Default for EncodeParams {
    fn default() -> Self {
        EncodeParams::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Decodes compressed bytes to pixels and encodes pixels back.
pub trait Codec {
    /// Decode `bytes` as `format`.
    ///
    /// JPEG yields RGB. PNG yields RGBA if the stream carries alpha,
    /// otherwise RGB.
    fn decode(&self, bytes: &[u8], format: ImageFormat) -> Result<PixelBuffer, DecodeError>;

    /// Encode a buffer with the given parameters.
    fn encode(&self, image: &PixelBuffer, params: EncodeParams) -> Result<Vec<u8>, EncodeError>;
}

/// Default codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8], format: ImageFormat) -> Result<PixelBuffer, DecodeError> {
        match format {
            ImageFormat::Jpeg => decode_jpeg(bytes),
            ImageFormat::Png => decode_png(bytes),
        }
    }

    fn encode(&self, image: &PixelBuffer, params: EncodeParams) -> Result<Vec<u8>, EncodeError> {
        // Encoders want packed rows
        let packed;
        let pixels = if image.is_packed() {
            image.pixels()
        } else {
            packed = image.as_view().to_packed_vec();
            &packed[..]
        };
        let pixels = &pixels[..image.row_bytes() * image.height() as usize];

        match params {
            EncodeParams::Jpeg { quality } => match image.layout() {
                ChannelLayout::Rgb => encode_jpeg(pixels, image.width(), image.height(), quality),
                ChannelLayout::Rgba => {
                    // JPEG has no alpha channel
                    let rgb: Vec<u8> = pixels
                        .chunks_exact(4)
                        .flat_map(|px| [px[0], px[1], px[2]])
                        .collect();
                    encode_jpeg(&rgb, image.width(), image.height(), quality)
                }
            },
            EncodeParams::Png { compression_level } => encode_png(
                pixels,
                image.width(),
                image.height(),
                image.layout(),
                compression_level,
            ),
        }
    }
}
