pub use kurbo::{Affine, Point, Rect, Vec2};

/// A frame-relative, axis-aligned bounding box in pixels.
///
/// `x`/`y` are the node origin relative to the exported frame's origin; `w`/`h`
/// are the node's own width and height. All item coordinates in the export
/// payload use this space, regardless of nesting depth.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Horizontal offset from the frame origin.
    pub x: f64,
    /// Vertical offset from the frame origin.
    pub y: f64,
    /// Width in pixels.
    pub w: f64,
    /// Height in pixels.
    pub h: f64,
}

impl Bounds {
    /// Build a bounds value.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// `true` when the box has no drawable area.
    pub fn is_degenerate(self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    /// Convert to a [`kurbo::Rect`] for intersection math.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

/// Pixel dimensions of a frame or the shared batch canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// An RGB color with normalized channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Build a color from normalized channels.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Encode as an uppercase `RRGGBB` hex string.
    ///
    /// Channels are clamped to `[0, 1]`, scaled to `[0, 255]` and rounded.
    /// Alpha is carried separately as item opacity.
    pub fn to_hex(self) -> String {
        fn byte(c: f64) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        format!("{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }
}
