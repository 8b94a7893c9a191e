use super::*;

use crate::foundation::core::Color;
use crate::scene::memory::MemoryDocument;
use crate::scene::node::{Effect, EffectList, Paint, PaintList};

fn solid_rect(w: f64, h: f64) -> SceneNode {
    let mut node = SceneNode::new(NodeKind::Rectangle);
    node.width = w;
    node.height = h;
    node.fills = PaintList::Paints(vec![Paint::solid(Color::new(0.2, 0.4, 0.6))]);
    node
}

fn frame(w: f64, h: f64) -> SceneNode {
    let mut node = SceneNode::new(NodeKind::Frame);
    node.width = w;
    node.height = h;
    node
}

#[test]
fn rotation_below_epsilon_counts_as_unrotated() {
    let mut node = solid_rect(10.0, 10.0);
    assert!(is_effectively_unrotated(&node));

    node.rotation = 0.009;
    assert!(is_effectively_unrotated(&node));

    node.rotation = -0.02;
    assert!(!is_effectively_unrotated(&node));
}

#[test]
fn safe_editable_shape_basics() {
    assert!(is_safe_editable_shape(&solid_rect(10.0, 10.0)));

    let mut rotated = solid_rect(10.0, 10.0);
    rotated.rotation = 5.0;
    assert!(!is_safe_editable_shape(&rotated));

    let mut shadowed = solid_rect(10.0, 10.0);
    shadowed.effects = EffectList::Effects(vec![Effect::DropShadow]);
    assert!(!is_safe_editable_shape(&shadowed));

    let mut gradient = solid_rect(10.0, 10.0);
    gradient.fills = PaintList::Paints(vec![Paint::Gradient]);
    assert!(!is_safe_editable_shape(&gradient));

    let mut mixed = solid_rect(10.0, 10.0);
    mixed.fills = PaintList::Mixed;
    assert!(!is_safe_editable_shape(&mixed));
}

#[test]
fn stroke_only_shape_is_still_safe() {
    let mut node = SceneNode::new(NodeKind::Ellipse);
    node.width = 10.0;
    node.height = 10.0;
    node.strokes = PaintList::Paints(vec![Paint::solid(Color::default())]);
    assert!(is_safe_editable_shape(&node));

    node.strokes = PaintList::Unset;
    assert!(!is_safe_editable_shape(&node));
}

#[test]
fn safe_line_needs_a_solid_stroke() {
    let mut line = SceneNode::new(NodeKind::Line);
    line.width = 100.0;
    assert!(!is_safe_line(&line));

    line.strokes = PaintList::Paints(vec![Paint::solid(Color::default())]);
    assert!(is_safe_line(&line));

    line.rotation = 30.0;
    assert!(!is_safe_line(&line));
}

#[test]
fn container_background_requires_container_kind() {
    let mut group = solid_rect(800.0, 600.0);
    group.kind = NodeKind::Group;
    assert!(is_safe_container_background(&group));

    assert!(!is_safe_container_background(&solid_rect(800.0, 600.0)));

    group.strokes = PaintList::Mixed;
    assert!(!is_safe_container_background(&group));
}

#[test]
fn near_full_frame_thresholds() {
    let frame = frame(1000.0, 500.0);

    assert!(is_near_full_frame(Bounds::new(0.0, 0.0, 1000.0, 500.0), &frame));
    assert!(is_near_full_frame(Bounds::new(20.0, 10.0, 960.0, 480.0), &frame));

    // 94% coverage misses the 95% bar.
    assert!(!is_near_full_frame(Bounds::new(0.0, 0.0, 940.0, 500.0), &frame));
    // Origin drifted beyond 3% of the frame width.
    assert!(!is_near_full_frame(Bounds::new(40.0, 0.0, 960.0, 500.0), &frame));
}

#[test]
fn gradient_container_candidate_bounds() {
    let mut node = frame(1800.0, 1000.0);
    node.fills = PaintList::Paints(vec![Paint::Gradient]);
    assert!(is_gradient_container_candidate(&node));

    node.width = 1801.0;
    assert!(!is_gradient_container_candidate(&node));

    node.width = 1800.0;
    node.fills = PaintList::Paints(vec![Paint::Gradient, Paint::Image]);
    assert!(!is_gradient_container_candidate(&node));

    node.fills = PaintList::Paints(vec![Paint::Gradient]);
    node.kind = NodeKind::Rectangle;
    assert!(!is_gradient_container_candidate(&node));
}

#[test]
fn gradient_rect_candidate_bounds() {
    let mut node = SceneNode::new(NodeKind::Rectangle);
    node.width = 2200.0;
    node.height = 1400.0;
    node.fills = PaintList::Paints(vec![Paint::Gradient]);
    assert!(is_gradient_rect_candidate(&node));

    node.height = 1401.0;
    assert!(!is_gradient_rect_candidate(&node));

    node.height = 1400.0;
    node.rotation = 10.0;
    assert!(!is_gradient_rect_candidate(&node));
}

#[test]
fn text_descendants_ignore_hidden_subtrees() {
    let mut doc = MemoryDocument::new();
    let root = doc.insert(frame(1000.0, 1000.0));
    let group = doc
        .insert_child(root, SceneNode::new(NodeKind::Group))
        .unwrap();
    let text = doc
        .insert_child(group, SceneNode::new(NodeKind::Text))
        .unwrap();

    let root_node = doc.node(root).unwrap();
    assert!(has_text_descendant(&doc, root_node));

    doc.set_visible(text, false);
    let root_node = doc.node(root).unwrap();
    assert!(!has_text_descendant(&doc, root_node));
}

#[test]
fn text_is_never_a_raster_overlay() {
    let doc = MemoryDocument::new();
    let frame = frame(1920.0, 1080.0);
    let mut text = SceneNode::new(NodeKind::Text);
    text.width = 100.0;
    text.height = 40.0;

    assert!(!is_raster_overlay_candidate(&doc, &text, &frame));
}

#[test]
fn image_fill_rasterizes_unless_near_full_frame() {
    let doc = MemoryDocument::new();
    let frame = frame(1920.0, 1080.0);

    let mut photo = SceneNode::new(NodeKind::Rectangle);
    photo.fills = PaintList::Paints(vec![Paint::Image]);
    photo.width = 600.0;
    photo.height = 400.0;
    assert!(is_raster_overlay_candidate(&doc, &photo, &frame));

    photo.width = 1920.0;
    photo.height = 1080.0;
    assert!(!is_raster_overlay_candidate(&doc, &photo, &frame));
}

#[test]
fn vector_kinds_always_rasterize() {
    let doc = MemoryDocument::new();
    let frame = frame(1920.0, 1080.0);

    for kind in [
        NodeKind::Vector,
        NodeKind::BooleanOp,
        NodeKind::Star,
        NodeKind::Polygon,
    ] {
        let mut node = SceneNode::new(kind);
        node.width = 900.0;
        node.height = 900.0;
        assert!(is_raster_overlay_candidate(&doc, &node, &frame));
    }
}

#[test]
fn small_container_rasterizes_only_without_text() {
    let mut doc = MemoryDocument::new();
    let frame_id = doc.insert(frame(1920.0, 1080.0));

    let mut badge = SceneNode::new(NodeKind::Group);
    badge.width = 120.0;
    badge.height = 48.0;
    let badge_id = doc.insert_child(frame_id, badge).unwrap();

    let frame_node = doc.node(frame_id).unwrap().clone();
    let badge_node = doc.node(badge_id).unwrap().clone();
    assert!(is_raster_overlay_candidate(&doc, &badge_node, &frame_node));

    doc.insert_child(badge_id, SceneNode::new(NodeKind::Text));
    let badge_node = doc.node(badge_id).unwrap().clone();
    assert!(!is_raster_overlay_candidate(&doc, &badge_node, &frame_node));
}

#[test]
fn small_unsafe_rect_rasterizes_large_one_does_not() {
    let doc = MemoryDocument::new();
    let frame = frame(1920.0, 1080.0);

    // Unsafe: rotated, so vector re-creation is off the table.
    let mut small = solid_rect(100.0, 100.0);
    small.rotation = 45.0;
    assert!(is_raster_overlay_candidate(&doc, &small, &frame));

    let mut large = solid_rect(500.0, 500.0);
    large.rotation = 45.0;
    assert!(!is_raster_overlay_candidate(&doc, &large, &frame));
}
