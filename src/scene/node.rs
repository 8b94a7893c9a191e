use crate::foundation::core::{Affine, Color};

/// Opaque identifier of a live document node.
///
/// Identifiers are stable only within one export pass; they are never
/// interpreted beyond equality and map keys.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u64);

/// Explicit node kind tag. The engine never probes for field presence; each
/// kind states up front which capabilities (fills, strokes, children, text)
/// are meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NodeKind {
    /// Top-level exportable canvas; also nestable as a container.
    Frame,
    /// Plain grouping container.
    Group,
    /// Reusable component definition container.
    Component,
    /// Component instance container.
    Instance,
    /// Boolean operation result (union/subtract/...); always rasterized.
    BooleanOp,
    /// Arbitrary vector network; always rasterized.
    Vector,
    /// Star primitive; always rasterized.
    Star,
    /// Polygon primitive; always rasterized.
    Polygon,
    /// Axis-aligned rectangle.
    Rectangle,
    /// Ellipse.
    Ellipse,
    /// Straight line.
    Line,
    /// Text block.
    Text,
    /// Anything the host exposes that the engine has no special handling for.
    Other,
}

impl NodeKind {
    /// `true` for kinds that carry an ordered child list.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Frame | Self::Group | Self::Component | Self::Instance
        )
    }

    /// `true` for kinds that are always captured as bitmaps.
    pub fn is_always_raster(self) -> bool {
        matches!(
            self,
            Self::BooleanOp | Self::Vector | Self::Star | Self::Polygon
        )
    }
}

/// A single paint entry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Paint {
    /// Flat color paint.
    Solid {
        /// Paint color.
        color: Color,
        /// Paint opacity in `[0, 1]`.
        opacity: f64,
    },
    /// Bitmap fill.
    Image,
    /// Any gradient variant. Multi-stop data is irrelevant: gradients are never
    /// re-created natively, only rasterized.
    Gradient,
}

impl Paint {
    /// Convenience constructor for a fully opaque solid paint.
    pub fn solid(color: Color) -> Self {
        Self::Solid {
            color,
            opacity: 1.0,
        }
    }
}

/// A node's fill or stroke paint list as reported by the host.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PaintList {
    /// The host reports no paint attribute for this node.
    #[default]
    Unset,
    /// Paints vary across the node (mixed-across-selection sentinel).
    Mixed,
    /// A concrete, possibly empty, ordered paint list.
    Paints(Vec<Paint>),
}

impl PaintList {
    /// `true` when every entry is a solid paint and the list is concrete and
    /// non-empty.
    pub fn all_solid(&self) -> bool {
        match self {
            Self::Paints(paints) if !paints.is_empty() => paints
                .iter()
                .all(|p| matches!(p, Paint::Solid { .. })),
            _ => false,
        }
    }

    /// `true` when the list is concrete and empty.
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Self::Paints(paints) if paints.is_empty())
    }

    /// First solid paint, if the list is concrete.
    pub fn first_solid(&self) -> Option<(Color, f64)> {
        match self {
            Self::Paints(paints) => paints.iter().find_map(|p| match p {
                Paint::Solid { color, opacity } => Some((*color, *opacity)),
                _ => None,
            }),
            _ => None,
        }
    }

    /// `true` when any concrete entry is an image paint.
    pub fn has_image(&self) -> bool {
        matches!(self, Self::Paints(paints) if paints.iter().any(|p| matches!(p, Paint::Image)))
    }

    /// `true` when any concrete entry is a gradient paint.
    pub fn has_gradient(&self) -> bool {
        matches!(self, Self::Paints(paints) if paints.iter().any(|p| matches!(p, Paint::Gradient)))
    }

    /// `true` for the mixed-across-selection sentinel.
    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixed)
    }
}

/// A single visual effect. Only presence matters for classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Effect {
    /// Outer drop shadow.
    DropShadow,
    /// Inner shadow.
    InnerShadow,
    /// Gaussian layer blur.
    LayerBlur,
    /// Backdrop blur.
    BackgroundBlur,
}

/// A node's effect list as reported by the host.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EffectList {
    /// Effects vary across the node; treated as "has effects".
    Mixed,
    /// Concrete effect list (empty means effect-free).
    Effects(Vec<Effect>),
}

impl Default for EffectList {
    fn default() -> Self {
        Self::Effects(Vec::new())
    }
}

impl EffectList {
    /// `true` when the node must be treated as carrying effects: any concrete
    /// entry, or the indeterminate mixed sentinel.
    pub fn has_any(&self) -> bool {
        match self {
            Self::Mixed => true,
            Self::Effects(effects) => !effects.is_empty(),
        }
    }
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextAlign {
    /// Left-aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
    /// Justified.
    Justify,
}

/// Line height as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum LineHeight {
    /// Host-managed automatic line height; exported as "unspecified".
    #[default]
    Auto,
    /// Absolute pixel value.
    Px(f64),
    /// Percent of the font size (100.0 == 1em).
    Percent(f64),
}

/// One styled character range of a text node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextRun {
    /// Inclusive start character index.
    pub start: usize,
    /// Exclusive end character index.
    pub end: usize,
    /// Font family name.
    pub font_family: String,
    /// Font style name ("Regular", "Bold Italic", ...).
    pub font_style: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Fill paints for this range.
    pub fills: PaintList,
}

/// Text payload of a text node.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextBlock {
    /// Character content.
    pub characters: String,
    /// Horizontal alignment.
    #[serde(default)]
    pub align: TextAlign,
    /// Line height.
    #[serde(default)]
    pub line_height: LineHeight,
    /// Styled ranges covering the characters.
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

/// Read view of one live document node.
///
/// Everything here is read-only to the engine except `visible`, which is only
/// ever flipped through [`crate::scene::host::DocumentHost::set_visible`]
/// inside a scoped hide/restore transaction.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneNode {
    /// Node kind tag.
    pub kind: NodeKind,
    /// Authoring name (used for slide names and filenames).
    #[serde(default)]
    pub name: String,
    /// Current visibility.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Rotation in the host's native unit; treated as zero below a small epsilon.
    #[serde(default)]
    pub rotation: f64,
    /// Node opacity in `[0, 1]`.
    #[serde(default = "default_one")]
    pub opacity: f64,
    /// Absolute affine transform; only the translation component is consumed.
    #[serde(default)]
    pub transform: Affine,
    /// Width in pixels.
    #[serde(default)]
    pub width: f64,
    /// Height in pixels.
    #[serde(default)]
    pub height: f64,
    /// Fill paints.
    #[serde(default)]
    pub fills: PaintList,
    /// Stroke paints.
    #[serde(default)]
    pub strokes: PaintList,
    /// Stroke weight in pixels.
    #[serde(default = "default_one")]
    pub stroke_weight: f64,
    /// Uniform corner radius in pixels (rectangles).
    #[serde(default)]
    pub corner_radius: f64,
    /// Visual effects.
    #[serde(default)]
    pub effects: EffectList,
    /// `true` when this node clips its following siblings (mask flag).
    #[serde(default)]
    pub is_mask: bool,
    /// Ordered children (containers only).
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// Text payload (text nodes only).
    #[serde(default)]
    pub text: Option<TextBlock>,
}

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

impl SceneNode {
    /// Build a node of the given kind with neutral defaults: visible, opaque,
    /// unrotated, identity transform, no paints, no effects.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            name: String::new(),
            visible: true,
            rotation: 0.0,
            opacity: 1.0,
            transform: Affine::IDENTITY,
            width: 0.0,
            height: 0.0,
            fills: PaintList::Unset,
            strokes: PaintList::Unset,
            stroke_weight: 1.0,
            corner_radius: 0.0,
            effects: EffectList::default(),
            is_mask: false,
            children: Vec::new(),
            text: None,
        }
    }
}
