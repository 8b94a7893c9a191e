use super::*;

use crate::foundation::core::Affine;
use crate::scene::node::NodeKind;

fn node_at(x: f64, y: f64, w: f64, h: f64) -> SceneNode {
    let mut node = SceneNode::new(NodeKind::Rectangle);
    node.transform = Affine::translate((x, y));
    node.width = w;
    node.height = h;
    node
}

#[test]
fn subtracts_frame_origin() {
    let frame = node_at(100.0, 200.0, 1920.0, 1080.0);
    let node = node_at(150.0, 260.0, 40.0, 30.0);

    let bounds = bounds_relative_to(&node, &frame);
    assert_eq!(bounds, Bounds::new(50.0, 60.0, 40.0, 30.0));
}

#[test]
fn invariant_under_common_translation() {
    let frame = node_at(0.0, 0.0, 1920.0, 1080.0);
    let node = node_at(10.0, 20.0, 5.0, 5.0);

    let moved_frame = node_at(7000.0, -300.0, 1920.0, 1080.0);
    let moved_node = node_at(7010.0, -280.0, 5.0, 5.0);

    assert_eq!(
        bounds_relative_to(&node, &frame),
        bounds_relative_to(&moved_node, &moved_frame)
    );
}

#[test]
fn node_above_or_left_of_frame_goes_negative() {
    let frame = node_at(500.0, 500.0, 800.0, 600.0);
    let node = node_at(480.0, 490.0, 10.0, 10.0);

    let bounds = bounds_relative_to(&node, &frame);
    assert_eq!(bounds.x, -20.0);
    assert_eq!(bounds.y, -10.0);
}
