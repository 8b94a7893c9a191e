use super::*;

use crate::foundation::core::Color;
use crate::scene::node::{Paint, PaintList, TextAlign};

fn run(style: &str, size: f64) -> TextRun {
    TextRun {
        start: 0,
        end: 5,
        font_family: "Inter".to_owned(),
        font_style: style.to_owned(),
        font_size: size,
        fills: PaintList::Paints(vec![Paint::solid(Color::new(1.0, 0.0, 0.0))]),
    }
}

fn block_with_run(run: TextRun) -> TextBlock {
    TextBlock {
        characters: "Hello".to_owned(),
        align: TextAlign::Left,
        line_height: LineHeight::Auto,
        runs: vec![run],
    }
}

#[test]
fn samples_family_size_and_color_from_first_run() {
    let sample = sample_first_run(&block_with_run(run("Regular", 24.0)));

    assert_eq!(sample.font_family, "Inter");
    assert_eq!(sample.font_size, 24.0);
    assert_eq!(sample.color, "FF0000");
    assert!(!sample.bold);
    assert!(!sample.italic);
}

#[test]
fn style_markers_set_weight_and_slant() {
    assert!(sample_first_run(&block_with_run(run("Bold", 14.0))).bold);
    assert!(sample_first_run(&block_with_run(run("SemiBold", 14.0))).bold);
    assert!(sample_first_run(&block_with_run(run("Black", 14.0))).bold);
    assert!(sample_first_run(&block_with_run(run("Italic", 14.0))).italic);
    assert!(sample_first_run(&block_with_run(run("Oblique", 14.0))).italic);

    let both = sample_first_run(&block_with_run(run("Bold Italic", 14.0)));
    assert!(both.bold && both.italic);
}

#[test]
fn empty_text_falls_back() {
    let block = TextBlock::default();
    assert_eq!(sample_first_run(&block), TextSample::default());
}

#[test]
fn missing_first_char_run_falls_back() {
    let mut block = block_with_run(run("Bold", 24.0));
    // Run starts at character 2: nothing covers index 0.
    block.runs[0].start = 2;

    let sample = sample_first_run(&block);
    assert_eq!(sample.font_family, FALLBACK_FONT_FAMILY);
    assert_eq!(sample.font_size, FALLBACK_FONT_SIZE);
    assert!(!sample.bold);
}

#[test]
fn degenerate_run_fields_fall_back_individually() {
    let mut bad = run("Regular", f64::NAN);
    bad.font_family = String::new();
    bad.fills = PaintList::Paints(vec![Paint::Gradient]);

    let sample = sample_first_run(&block_with_run(bad));
    assert_eq!(sample.font_family, FALLBACK_FONT_FAMILY);
    assert_eq!(sample.font_size, FALLBACK_FONT_SIZE);
    assert_eq!(sample.color, FALLBACK_TEXT_COLOR);
}

#[test]
fn line_height_resolution() {
    let mut block = block_with_run(run("Regular", 20.0));

    block.line_height = LineHeight::Px(30.0);
    assert_eq!(line_height_px(&block, 20.0), Some(30.0));

    block.line_height = LineHeight::Percent(150.0);
    assert_eq!(line_height_px(&block, 20.0), Some(30.0));

    block.line_height = LineHeight::Auto;
    assert_eq!(line_height_px(&block, 20.0), None);
}
