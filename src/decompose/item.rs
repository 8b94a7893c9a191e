use crate::foundation::core::Bounds;
use crate::scene::node::TextAlign;

/// Editable text overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextItem {
    /// Paint-order index.
    pub z: u32,
    /// Frame-relative placement in pixels.
    pub bounds: Bounds,
    /// Character content.
    pub text: String,
    /// Font family sampled from the first character.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Pixel line height, or `None` for host-automatic.
    pub line_height_px: Option<f64>,
    /// Uppercase `RRGGBB` text color.
    pub color: String,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Node opacity in `[0, 1]`.
    pub opacity: f64,
    /// Bold weight flag.
    pub bold: bool,
    /// Italic slant flag.
    pub italic: bool,
}

/// Native shape kind of a [`ShapeItem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    /// Axis-aligned rectangle (optionally rounded).
    Rect,
    /// Ellipse.
    Ellipse,
    /// Straight line.
    Line,
}

/// Stroke styling of a shape item.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeStroke {
    /// Uppercase `RRGGBB` stroke color.
    pub color: String,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Editable vector shape overlay.
///
/// Invariant: a rect/ellipse carries at least one of fill or stroke, a line
/// always carries a stroke. Use [`ShapeItem::new`] to uphold it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeItem {
    /// Paint-order index.
    pub z: u32,
    /// Frame-relative placement in pixels.
    pub bounds: Bounds,
    /// Shape kind.
    pub shape: ShapeKind,
    /// Uppercase `RRGGBB` fill color, if any.
    pub fill: Option<String>,
    /// Stroke styling, if any.
    pub stroke: Option<ShapeStroke>,
    /// Corner radius in pixels (rectangles only, 0 otherwise).
    pub corner_radius: f64,
    /// Node opacity in `[0, 1]`.
    pub opacity: f64,
}

impl ShapeItem {
    /// Build a shape item, or `None` when it would be invisible: a rect or
    /// ellipse with neither fill nor stroke, or a line without a stroke,
    /// carries no information and is dropped.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        z: u32,
        bounds: Bounds,
        shape: ShapeKind,
        fill: Option<String>,
        stroke: Option<ShapeStroke>,
        corner_radius: f64,
        opacity: f64,
    ) -> Option<Self> {
        match shape {
            ShapeKind::Line if stroke.is_none() => return None,
            ShapeKind::Rect | ShapeKind::Ellipse if fill.is_none() && stroke.is_none() => {
                return None;
            }
            _ => {}
        }
        Some(Self {
            z,
            bounds,
            shape,
            fill: if shape == ShapeKind::Line { None } else { fill },
            stroke,
            corner_radius: if shape == ShapeKind::Rect {
                corner_radius
            } else {
                0.0
            },
            opacity,
        })
    }
}

/// Bitmap overlay captured from a single node at the fixed export scale.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RasterItem {
    /// Paint-order index.
    pub z: u32,
    /// Frame-relative placement in pixels.
    pub bounds: Bounds,
    /// PNG byte payload.
    pub png: Vec<u8>,
}

/// Crop window in normalized `[0, 1]` image space.
///
/// Invariant: `0 <= x, y` and `x + w <= 1`, `y + h <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

/// Image overlay clipped by a rectangular mask, expressed as a crop of the
/// source image rather than a flattened composite.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaskedImageItem {
    /// Paint-order index.
    pub z: u32,
    /// Frame-relative placement (the mask box) in pixels.
    pub bounds: Bounds,
    /// PNG byte payload of the underlying image node.
    pub png: Vec<u8>,
    /// Crop window into the image.
    pub crop: CropRect,
}

/// One decomposed overlay, tagged by how the serializer should re-create it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ExportItem {
    /// Editable text.
    Text(TextItem),
    /// Editable vector shape.
    Shape(ShapeItem),
    /// Bitmap overlay.
    Raster(RasterItem),
    /// Cropped image overlay.
    MaskedImage(MaskedImageItem),
}

impl ExportItem {
    /// Paint-order index; ascending z paints later (on top).
    pub fn z(&self) -> u32 {
        match self {
            Self::Text(i) => i.z,
            Self::Shape(i) => i.z,
            Self::Raster(i) => i.z,
            Self::MaskedImage(i) => i.z,
        }
    }

    /// Frame-relative placement.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Text(i) => i.bounds,
            Self::Shape(i) => i.bounds,
            Self::Raster(i) => i.bounds,
            Self::MaskedImage(i) => i.bounds,
        }
    }
}

/// Slide background. Solid and image backgrounds are mutually exclusive by
/// construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SlideBackground {
    /// Flat color derived analytically from the frame's single solid fill
    /// ("smart background"); no bitmap capture involved.
    Solid {
        /// Uppercase `RRGGBB` color.
        hex: String,
        /// Combined fill and frame opacity in `[0, 1]`.
        opacity: f64,
    },
    /// Clean background capture with all overlay content hidden.
    Image {
        /// PNG byte payload.
        png: Vec<u8>,
    },
}

/// One frame's complete decomposition output.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExportSlide {
    /// Frame name.
    pub name: String,
    /// Frame width in pixels.
    pub width: f64,
    /// Frame height in pixels.
    pub height: f64,
    /// Fixed capture scale used for every raster payload.
    pub scale: f64,
    /// Slide background.
    pub background: SlideBackground,
    /// Overlay items, ordered by insertion (not necessarily by z).
    pub items: Vec<ExportItem>,
}
