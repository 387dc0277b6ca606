//! EXIF orientation lookup for JPEG streams.
//!
//! Walks the JPEG marker segments up to the first APP1 "Exif" segment and
//! reads the Orientation tag (0x0112) from the TIFF IFD0 inside it. The walk
//! is allocation-free and every read is bounds-checked: anything malformed,
//! truncated or missing resolves to [`Orientation::Normal`] instead of an
//! error, since photos without orientation metadata are common.
//!
//! ```text
//! FF D8 | FF E1 len "Exif\0\0" | "II"/"MM" 00 2A ifd0_offset | count entry*12 ...
//!        ^ marker  ^ length      ^ TIFF header start (offsets are relative to it)
//! ```

use tracing::trace;

use super::Orientation;

const SOI: [u8; 2] = [0xFF, 0xD8];
const MARKER_PREFIX: u8 = 0xFF;
const MARKER_APP1: u8 = 0xE1;
const MARKER_SOS: u8 = 0xDA;
const EXIF_IDENTIFIER: &[u8; 6] = b"Exif\0\0";
const TAG_ORIENTATION: u16 = 0x0112;
const IFD_ENTRY_SIZE: usize = 12;
/// Shortest stream that could hold SOI plus an APP1 header.
const MIN_STREAM_LEN: usize = 12;

/// Byte order of the TIFF structure embedded in an EXIF segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    fn from_marker(marker: &[u8]) -> Option<Self> {
        match marker {
            b"II" => Some(ByteOrder::LittleEndian),
            b"MM" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Read a u16 at `offset`, or `None` if it would run past the end.
    #[inline]
    fn read_u16(self, bytes: &[u8], offset: usize) -> Option<u16> {
        let raw: [u8; 2] = bytes.get(offset..offset.checked_add(2)?)?.try_into().ok()?;
        Some(match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(raw),
            ByteOrder::BigEndian => u16::from_be_bytes(raw),
        })
    }

    /// Read a u32 at `offset`, or `None` if it would run past the end.
    #[inline]
    fn read_u32(self, bytes: &[u8], offset: usize) -> Option<u32> {
        let raw: [u8; 4] = bytes.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
        Some(match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(raw),
            ByteOrder::BigEndian => u32::from_be_bytes(raw),
        })
    }
}

/// Resolve the EXIF orientation of a JPEG stream.
///
/// Never fails: returns [`Orientation::Normal`] for non-JPEG input, streams
/// without an EXIF segment, truncated or corrupt EXIF data, a missing
/// Orientation tag, or a tag value outside 1-8. Only IFD0 is searched.
pub fn resolve_orientation(bytes: &[u8]) -> Orientation {
    match find_orientation_value(bytes) {
        Some(value) => Orientation::from_exif(value),
        None => {
            trace!(len = bytes.len(), "no usable EXIF orientation, assuming normal");
            Orientation::Normal
        }
    }
}

/// Scan marker segments for the APP1 segment and read its orientation.
fn find_orientation_value(bytes: &[u8]) -> Option<u16> {
    if bytes.len() < MIN_STREAM_LEN || bytes[..2] != SOI {
        return None;
    }

    let mut offset = 2usize;
    while offset + 4 < bytes.len() {
        if bytes[offset] != MARKER_PREFIX {
            return None;
        }

        match bytes[offset + 1] {
            // Fill bytes before a marker
            MARKER_PREFIX => offset += 1,
            MARKER_APP1 => return read_exif_segment(bytes, offset + 4),
            MARKER_SOS => return None,
            _ => {
                // Segment length counts its own two bytes
                let length = ByteOrder::BigEndian.read_u16(bytes, offset + 2)? as usize;
                offset = offset.checked_add(2 + length)?;
            }
        }
    }

    None
}

/// Read the orientation from an APP1 payload starting at `start`.
fn read_exif_segment(bytes: &[u8], start: usize) -> Option<u16> {
    let identifier = bytes.get(start..start.checked_add(EXIF_IDENTIFIER.len())?)?;
    if identifier != EXIF_IDENTIFIER {
        return None;
    }

    let tiff_start = start + EXIF_IDENTIFIER.len();
    let order = ByteOrder::from_marker(bytes.get(tiff_start..tiff_start.checked_add(2)?)?)?;
    let ifd0_offset = order.read_u32(bytes, tiff_start.checked_add(4)?)?;
    let ifd0 = tiff_start.checked_add(usize::try_from(ifd0_offset).ok()?)?;

    let entry_count = order.read_u16(bytes, ifd0)? as usize;
    let entries_start = ifd0.checked_add(2)?;

    for index in 0..entry_count {
        let entry_start = entries_start.checked_add(index.checked_mul(IFD_ENTRY_SIZE)?)?;
        let entry = bytes.get(entry_start..entry_start.checked_add(IFD_ENTRY_SIZE)?)?;

        if order.read_u16(entry, 0)? == TAG_ORIENTATION {
            // SHORT value stored inline in the first two bytes of the value field
            return order.read_u16(entry, 8);
        }
    }

    None
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Arbitrary bytes never panic and resolve to a valid orientation.
        #[test]
        fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let orientation = resolve_orientation(&bytes);
            prop_assert!((1..=8).contains(&orientation.code()));
        }

        /// Property: Streams that start like a JPEG with an APP1 header never panic.
        #[test]
        fn prop_corrupt_exif_never_panics(tail in prop::collection::vec(any::<u8>(), 0..128)) {
            let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x40];
            bytes.extend_from_slice(EXIF_IDENTIFIER);
            bytes.extend_from_slice(&tail);
            let orientation = resolve_orientation(&bytes);
            prop_assert!((1..=8).contains(&orientation.code()));
        }
    }
}
