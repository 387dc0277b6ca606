//! Crop rectangle computation.
//!
//! A crop is described by a [`CropPolicy`]: how much of the source to keep
//! (`fraction`), what shape to keep (`aspect`), and where to place the kept
//! region (`anchor`). [`compute_crop_rect`] turns a policy into a pixel
//! rectangle that always lies inside the source, whatever the inputs.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner
//! - `x + width <= source width`, `y + height <= source height`
//!
//! # Example
//!
//! ```ignore
//! // Square crop of half the short edge, centered
//! let policy = CropPolicy { fraction: 0.5, ..Default::default() };
//! let rect = compute_crop_rect(100, 50, &policy);
//! assert_eq!((rect.x, rect.y, rect.width, rect.height), (37, 12, 25, 25));
//! ```

use serde::{Deserialize, Serialize};

/// Smallest crop fraction; smaller requests are raised to this.
pub const MIN_CROP_FRACTION: f32 = 0.01;
/// Largest crop fraction (keep the whole limiting dimension).
pub const MAX_CROP_FRACTION: f32 = 1.0;

/// Where the crop rectangle sits inside the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropAnchor {
    #[default]
    Center,
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Placement along one axis.
#[derive(Debug, Clone, Copy)]
enum Align {
    Start,
    Middle,
    End,
}

impl Align {
    #[inline]
    fn offset(self, slack: u32) -> u32 {
        match self {
            Align::Start => 0,
            Align::Middle => slack / 2,
            Align::End => slack,
        }
    }
}

impl CropAnchor {
    /// All anchors, in integer-code order.
    pub const ALL: [CropAnchor; 9] = [
        CropAnchor::Center,
        CropAnchor::TopLeft,
        CropAnchor::TopCenter,
        CropAnchor::TopRight,
        CropAnchor::CenterLeft,
        CropAnchor::CenterRight,
        CropAnchor::BottomLeft,
        CropAnchor::BottomCenter,
        CropAnchor::BottomRight,
    ];

    /// Map an integer code (0 = center, 1-8 = top-left through bottom-right,
    /// row by row). Unknown codes are treated as center.
    pub fn from_code(code: i32) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or_default()
    }

    /// Horizontal and vertical alignment.
    fn alignment(self) -> (Align, Align) {
        match self {
            CropAnchor::Center => (Align::Middle, Align::Middle),
            CropAnchor::TopLeft => (Align::Start, Align::Start),
            CropAnchor::TopCenter => (Align::Middle, Align::Start),
            CropAnchor::TopRight => (Align::End, Align::Start),
            CropAnchor::CenterLeft => (Align::Start, Align::Middle),
            CropAnchor::CenterRight => (Align::End, Align::Middle),
            CropAnchor::BottomLeft => (Align::Start, Align::End),
            CropAnchor::BottomCenter => (Align::Middle, Align::End),
            CropAnchor::BottomRight => (Align::End, Align::End),
        }
    }

    /// Top-left corner of the crop given the leftover space on each axis.
    #[inline]
    pub fn position(self, slack_x: u32, slack_y: u32) -> (u32, u32) {
        let (h, v) = self.alignment();
        (h.offset(slack_x), v.offset(slack_y))
    }
}

/// Shape of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectMode {
    /// 1:1, sized from the shorter source edge.
    #[default]
    Square,
    /// Same aspect ratio as the source; each axis scaled independently.
    Original,
    /// `width:height` ratio. Both must be finite and positive, otherwise
    /// the crop is square.
    Custom { width: f32, height: f32 },
}

impl AspectMode {
    /// Map an integer mode (0 = square, 1 = original, 2 = custom) plus the
    /// custom ratio terms. Unknown modes are treated as square.
    pub fn from_code(mode: i32, width: f32, height: f32) -> Self {
        match mode {
            1 => AspectMode::Original,
            2 => AspectMode::Custom { width, height },
            _ => AspectMode::Square,
        }
    }

    /// The custom `width / height` ratio, if it is usable.
    fn custom_ratio(self) -> Option<f32> {
        match self {
            AspectMode::Custom { width, height }
                if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 =>
            {
                Some(width / height)
            }
            _ => None,
        }
    }
}

/// How to crop the source before resampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropPolicy {
    /// Portion of the limiting source dimension to keep (0.01 to 1.0).
    pub fraction: f32,
    /// Placement of the crop inside the source.
    pub anchor: CropAnchor,
    /// Shape of the crop.
    pub aspect: AspectMode,
}

impl Default for CropPolicy {
    fn default() -> Self {
        Self {
            fraction: MAX_CROP_FRACTION,
            anchor: CropAnchor::Center,
            aspect: AspectMode::Square,
        }
    }
}

impl CropPolicy {
    /// The fraction clamped to `[0.01, 1.0]`; NaN counts as no crop.
    pub fn clamped_fraction(&self) -> f32 {
        if self.fraction.is_nan() {
            MAX_CROP_FRACTION
        } else {
            self.fraction.clamp(MIN_CROP_FRACTION, MAX_CROP_FRACTION)
        }
    }
}

/// An axis-aligned rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// The rectangle covering a whole `width x height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// True if the rectangle lies inside a `width x height` image and is
    /// at least one pixel in each direction.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width >= 1
            && self.height >= 1
            && self.x.checked_add(self.width).is_some_and(|r| r <= width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= height)
    }
}

/// Raw (unclamped) crop size for a policy.
fn crop_size(src_w: u32, src_h: u32, fraction: f32, aspect: AspectMode) -> (u32, u32) {
    let (w, h) = (src_w as f32, src_h as f32);

    match aspect {
        AspectMode::Original => ((w * fraction) as u32, (h * fraction) as u32),
        _ => match aspect.custom_ratio() {
            Some(target) => {
                if w / h > target {
                    // Source is wider than the target: height limits
                    let crop_h = (h * fraction) as u32;
                    ((crop_h as f32 * target) as u32, crop_h)
                } else {
                    // Source is taller (or equal): width limits
                    let crop_w = (w * fraction) as u32;
                    (crop_w, (crop_w as f32 / target) as u32)
                }
            }
            None => {
                let side = (src_w.min(src_h) as f32 * fraction) as u32;
                (side, side)
            }
        },
    }
}

/// Compute the crop rectangle for a `src_w x src_h` source.
///
/// Total over its inputs: the fraction is clamped, each dimension is clamped
/// to `[1, source dimension]`, and the anchor only distributes the leftover
/// space, so the rectangle never leaves the source. A zero-sized source
/// yields an empty rectangle at the origin.
pub fn compute_crop_rect(src_w: u32, src_h: u32, policy: &CropPolicy) -> CropRect {
    if src_w == 0 || src_h == 0 {
        return CropRect::default();
    }

    let (raw_w, raw_h) = crop_size(src_w, src_h, policy.clamped_fraction(), policy.aspect);
    let width = raw_w.clamp(1, src_w);
    let height = raw_h.clamp(1, src_h);

    let (x, y) = policy.anchor.position(src_w - width, src_h - height);

    CropRect {
        x,
        y,
        width,
        height,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
