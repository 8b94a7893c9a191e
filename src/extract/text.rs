use crate::scene::node::{LineHeight, TextBlock, TextRun};

/// Fallback font family when sampling fails.
pub const FALLBACK_FONT_FAMILY: &str = "Arial";
/// Fallback font size in pixels when sampling fails.
pub const FALLBACK_FONT_SIZE: f64 = 14.0;
/// Fallback text color when sampling fails.
pub const FALLBACK_TEXT_COLOR: &str = "000000";

const BOLD_STYLE_MARKERS: [&str; 5] = ["bold", "semibold", "demibold", "heavy", "black"];
const ITALIC_STYLE_MARKERS: [&str; 2] = ["italic", "oblique"];

/// Styling sampled from a text node's first character.
///
/// Multi-style runs within one text node are not supported: the whole node
/// takes the first run's styling. Empty text or a missing first run falls back
/// to Arial 14 black.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSample {
    /// Font family name.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Bold weight, derived from the style name.
    pub bold: bool,
    /// Italic slant, derived from the style name.
    pub italic: bool,
    /// Uppercase `RRGGBB` text color.
    pub color: String,
}

impl Default for TextSample {
    fn default() -> Self {
        Self {
            font_family: FALLBACK_FONT_FAMILY.to_owned(),
            font_size: FALLBACK_FONT_SIZE,
            bold: false,
            italic: false,
            color: FALLBACK_TEXT_COLOR.to_owned(),
        }
    }
}

/// Sample family, size, weight, slant, and color from the run covering the
/// first character (index 0).
pub fn sample_first_run(block: &TextBlock) -> TextSample {
    if block.characters.is_empty() {
        return TextSample::default();
    }
    let Some(run) = first_char_run(block) else {
        return TextSample::default();
    };

    let style = run.font_style.to_lowercase();
    let color = run
        .fills
        .first_solid()
        .map(|(c, _)| c.to_hex())
        .unwrap_or_else(|| FALLBACK_TEXT_COLOR.to_owned());

    TextSample {
        font_family: if run.font_family.is_empty() {
            FALLBACK_FONT_FAMILY.to_owned()
        } else {
            run.font_family.clone()
        },
        font_size: if run.font_size.is_finite() && run.font_size > 0.0 {
            run.font_size
        } else {
            FALLBACK_FONT_SIZE
        },
        bold: BOLD_STYLE_MARKERS.iter().any(|m| style.contains(m)),
        italic: ITALIC_STYLE_MARKERS.iter().any(|m| style.contains(m)),
        color,
    }
}

/// Resolve the exported pixel line height given the sampled font size.
///
/// Pixel values pass through, percent values scale the font size, automatic
/// line height yields `None` ("unspecified").
pub fn line_height_px(block: &TextBlock, font_size: f64) -> Option<f64> {
    match block.line_height {
        LineHeight::Px(px) => Some(px),
        LineHeight::Percent(pct) => Some(font_size * pct / 100.0),
        LineHeight::Auto => None,
    }
}

fn first_char_run(block: &TextBlock) -> Option<&TextRun> {
    block.runs.iter().find(|r| r.start == 0 && r.end > 0)
}

#[cfg(test)]
#[path = "../../tests/unit/extract/text.rs"]
mod tests;
