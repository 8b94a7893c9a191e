use super::*;

use crate::foundation::core::Affine;
use crate::scene::memory::MemoryDocument;
use crate::scene::node::{Paint, PaintList};

fn frame(w: f64, h: f64) -> SceneNode {
    let mut node = SceneNode::new(NodeKind::Frame);
    node.width = w;
    node.height = h;
    node
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> SceneNode {
    let mut node = SceneNode::new(NodeKind::Rectangle);
    node.transform = Affine::translate((x, y));
    node.width = w;
    node.height = h;
    node
}

/// Frame holding a group whose first two children form a mask + image pair.
fn pair_fixture(
    mask: SceneNode,
    image: SceneNode,
) -> (MemoryDocument, NodeId, NodeId) {
    let mut doc = MemoryDocument::new();
    let frame_id = doc.insert(frame(1920.0, 1080.0));
    let group_id = doc
        .insert_child(frame_id, SceneNode::new(NodeKind::Group))
        .unwrap();
    doc.insert_child(group_id, mask).unwrap();
    doc.insert_child(group_id, image).unwrap();
    (doc, frame_id, group_id)
}

fn masked(mut node: SceneNode) -> SceneNode {
    node.is_mask = true;
    node
}

fn image_filled(mut node: SceneNode) -> SceneNode {
    node.fills = PaintList::Paints(vec![Paint::Image]);
    node
}

#[test]
fn detects_rectangular_crop_pair() {
    let (doc, frame_id, group_id) = pair_fixture(
        masked(rect(100.0, 100.0, 200.0, 150.0)),
        image_filled(rect(50.0, 50.0, 400.0, 300.0)),
    );
    let frame = doc.node(frame_id).unwrap();
    let group = doc.node(group_id).unwrap();

    let pair = detect_mask_pair(&doc, group, frame).unwrap();
    assert_eq!(pair.mask_bounds, Bounds::new(100.0, 100.0, 200.0, 150.0));

    let MaskPairKind::RectangularCrop(crop) = pair.kind else {
        panic!("expected rectangular crop");
    };
    assert_eq!(crop.x, 0.125);
    assert_eq!(crop.w, 0.5);
    assert_eq!(crop.h, 0.5);
}

#[test]
fn rounded_mask_becomes_flatten() {
    let mut mask = masked(rect(0.0, 0.0, 100.0, 100.0));
    mask.corner_radius = 12.0;
    let (doc, frame_id, group_id) =
        pair_fixture(mask, image_filled(rect(0.0, 0.0, 100.0, 100.0)));
    let frame = doc.node(frame_id).unwrap();
    let group = doc.node(group_id).unwrap();

    let pair = detect_mask_pair(&doc, group, frame).unwrap();
    assert_eq!(pair.kind, MaskPairKind::RoundedFlatten);
}

#[test]
fn radius_at_epsilon_still_counts_as_rectangular() {
    let mut mask = masked(rect(0.0, 0.0, 100.0, 100.0));
    mask.corner_radius = MASK_RADIUS_EPS;
    let (doc, frame_id, group_id) =
        pair_fixture(mask, image_filled(rect(0.0, 0.0, 100.0, 100.0)));
    let frame = doc.node(frame_id).unwrap();
    let group = doc.node(group_id).unwrap();

    let pair = detect_mask_pair(&doc, group, frame).unwrap();
    assert!(matches!(pair.kind, MaskPairKind::RectangularCrop(_)));
}

#[test]
fn pattern_requires_mask_flag_and_image_fill() {
    // First child not flagged as mask.
    let (doc, frame_id, group_id) = pair_fixture(
        rect(0.0, 0.0, 100.0, 100.0),
        image_filled(rect(0.0, 0.0, 100.0, 100.0)),
    );
    let frame = doc.node(frame_id).unwrap();
    let group = doc.node(group_id).unwrap();
    assert!(detect_mask_pair(&doc, group, frame).is_none());

    // Second child without an image fill.
    let (doc, frame_id, group_id) = pair_fixture(
        masked(rect(0.0, 0.0, 100.0, 100.0)),
        rect(0.0, 0.0, 100.0, 100.0),
    );
    let frame = doc.node(frame_id).unwrap();
    let group = doc.node(group_id).unwrap();
    assert!(detect_mask_pair(&doc, group, frame).is_none());
}

#[test]
fn hidden_children_do_not_participate() {
    let (mut doc, frame_id, group_id) = pair_fixture(
        masked(rect(0.0, 0.0, 100.0, 100.0)),
        image_filled(rect(0.0, 0.0, 100.0, 100.0)),
    );
    let mask_id = doc.node(group_id).unwrap().children[0];
    doc.set_visible(mask_id, false);

    let frame = doc.node(frame_id).unwrap();
    let group = doc.node(group_id).unwrap();
    // With the mask hidden the image slides into first position and the
    // pattern no longer matches.
    assert!(detect_mask_pair(&doc, group, frame).is_none());
}

#[test]
fn rotation_or_effects_disqualify() {
    let mut rotated = masked(rect(0.0, 0.0, 100.0, 100.0));
    rotated.rotation = 15.0;
    let (doc, frame_id, group_id) =
        pair_fixture(rotated, image_filled(rect(0.0, 0.0, 100.0, 100.0)));
    let frame = doc.node(frame_id).unwrap();
    let group = doc.node(group_id).unwrap();
    assert!(detect_mask_pair(&doc, group, frame).is_none());
}

#[test]
fn degenerate_bounds_disqualify() {
    let (doc, frame_id, group_id) = pair_fixture(
        masked(rect(0.0, 0.0, 100.0, 0.0)),
        image_filled(rect(0.0, 0.0, 100.0, 100.0)),
    );
    let frame = doc.node(frame_id).unwrap();
    let group = doc.node(group_id).unwrap();
    assert!(detect_mask_pair(&doc, group, frame).is_none());
}

#[test]
fn crop_rect_is_clamped_to_the_image() {
    // Mask hangs off the bottom-right of the image: the window shrinks so it
    // never samples outside the source.
    let crop = crop_rect(
        Bounds::new(50.0, 50.0, 100.0, 100.0),
        Bounds::new(0.0, 0.0, 100.0, 100.0),
    );
    assert_eq!(crop, CropRect { x: 0.5, y: 0.5, w: 0.5, h: 0.5 });

    // Mask starts left of and above the image.
    let crop = crop_rect(
        Bounds::new(-20.0, -20.0, 60.0, 60.0),
        Bounds::new(0.0, 0.0, 100.0, 100.0),
    );
    assert_eq!(crop.x, 0.0);
    assert_eq!(crop.y, 0.0);

    // Mask fully inside: plain normalized window.
    let crop = crop_rect(
        Bounds::new(25.0, 25.0, 50.0, 50.0),
        Bounds::new(0.0, 0.0, 100.0, 100.0),
    );
    assert_eq!(crop, CropRect { x: 0.25, y: 0.25, w: 0.5, h: 0.5 });
}
