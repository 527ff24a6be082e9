//! Absolute bounds resolution and its inverse
//!
//! A node's absolute top-left is
//! `parent_absolute + anchor_start(anchor, container) + anchor_offset(anchor, size) + position`,
//! where the container is the parent's size, or the canvas for roots.

use crate::model::{ElementTree, Node, NodeId, Vec2};

use super::anchor::{anchor_offset, anchor_start};
use super::config::CanvasConfig;
use super::types::{NodeBounds, Point, Rect};

/// Absolute top-left of `id`, or `None` if the id is not in the tree
pub fn absolute_position(tree: &ElementTree, id: NodeId, canvas: &CanvasConfig) -> Option<Point> {
    let node = tree.get(id)?;
    let (origin, container) = container_of(tree, node, canvas)?;
    Some(place(node, origin, container))
}

/// Absolute rectangle of `id`
pub fn absolute_rect(tree: &ElementTree, id: NodeId, canvas: &CanvasConfig) -> Option<Rect> {
    let node = tree.get(id)?;
    let p = absolute_position(tree, id, canvas)?;
    Some(Rect::new(p.x, p.y, node.size.x, node.size.y))
}

/// Every node's absolute rectangle in one pre-order pass
pub fn compute_all_bounds(tree: &ElementTree, canvas: &CanvasConfig) -> Vec<NodeBounds> {
    let mut out = Vec::with_capacity(tree.len());
    for root in tree.roots() {
        visit(tree, *root, None, Point::zero(), canvas.size(), &mut out);
    }
    out
}

/// Anchor-relative position that places `id` at the absolute point
/// `(absolute_x, absolute_y)`; the inverse of [`absolute_position`].
pub fn local_from_absolute(
    absolute_x: f64,
    absolute_y: f64,
    tree: &ElementTree,
    id: NodeId,
    canvas: &CanvasConfig,
) -> Option<Vec2> {
    let node = tree.get(id)?;
    let (origin, container) = container_of(tree, node, canvas)?;
    let start = anchor_start(node.anchor, container.x, container.y);
    let offset = anchor_offset(node.anchor, node.size);
    Some(Vec2::new(
        absolute_x - origin.x - start.x - offset.x,
        absolute_y - origin.y - start.y - offset.y,
    ))
}

/// Find the bounds entry of `id`
pub fn bounds_of(bounds: &[NodeBounds], id: NodeId) -> Option<&NodeBounds> {
    bounds.iter().find(|b| b.id == id)
}

fn visit(
    tree: &ElementTree,
    id: NodeId,
    parent: Option<NodeId>,
    origin: Point,
    container: Vec2,
    out: &mut Vec<NodeBounds>,
) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let p = place(node, origin, container);
    out.push(NodeBounds {
        id,
        parent,
        rect: Rect::new(p.x, p.y, node.size.x, node.size.y),
    });
    for child in node.children() {
        visit(tree, *child, Some(id), p, node.size, out);
    }
}

/// Absolute origin and size of the box `node` is anchored in
fn container_of(tree: &ElementTree, node: &Node, canvas: &CanvasConfig) -> Option<(Point, Vec2)> {
    match node.parent() {
        Some(parent_id) => {
            let parent = tree.get(parent_id)?;
            let origin = absolute_position(tree, parent_id, canvas)?;
            Some((origin, parent.size))
        }
        None => Some((Point::zero(), canvas.size())),
    }
}

fn place(node: &Node, origin: Point, container: Vec2) -> Point {
    let start = anchor_start(node.anchor, container.x, container.y);
    let offset = anchor_offset(node.anchor, node.size);
    Point::new(
        origin.x + start.x + offset.x + node.position.x,
        origin.y + start.y + offset.y + node.position.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Anchor, ElementKind};

    fn set(tree: &mut ElementTree, id: NodeId, anchor: Anchor, pos: (f64, f64), size: (f64, f64)) {
        let node = tree.get_mut(id).unwrap();
        node.anchor = anchor;
        node.position = Vec2::new(pos.0, pos.1);
        node.size = Vec2::new(size.0, size.1);
    }

    #[test]
    fn test_root_anchored_to_canvas() {
        let mut tree = ElementTree::new();
        let root = tree.create(ElementKind::Container, None).unwrap();
        set(&mut tree, root, Anchor::BottomRight, (-10.0, -20.0), (100.0, 50.0));
        let canvas = CanvasConfig::default();
        assert_eq!(
            absolute_position(&tree, root, &canvas),
            Some(Point::new(1920.0 - 100.0 - 10.0, 1080.0 - 50.0 - 20.0))
        );
    }

    #[test]
    fn test_nested_center_anchor() {
        let mut tree = ElementTree::new();
        let panel = tree.create(ElementKind::Container, None).unwrap();
        set(&mut tree, panel, Anchor::TopLeft, (100.0, 100.0), (400.0, 200.0));
        let label = tree.create(ElementKind::Text, Some(panel)).unwrap();
        set(&mut tree, label, Anchor::MiddleCenter, (0.0, 10.0), (100.0, 40.0));

        let canvas = CanvasConfig::default();
        let p = absolute_position(&tree, label, &canvas).unwrap();
        assert_eq!(p, Point::new(100.0 + 200.0 - 50.0, 100.0 + 100.0 - 20.0 + 10.0));
    }

    #[test]
    fn test_bulk_bounds_match_single_queries() {
        let mut tree = ElementTree::new();
        let a = tree.create(ElementKind::Container, None).unwrap();
        set(&mut tree, a, Anchor::MiddleCenter, (0.0, 0.0), (600.0, 400.0));
        let b = tree.create(ElementKind::Container, Some(a)).unwrap();
        set(&mut tree, b, Anchor::BottomLeft, (12.0, -8.0), (200.0, 100.0));
        let c = tree.create(ElementKind::Button, Some(b)).unwrap();
        set(&mut tree, c, Anchor::TopRight, (-4.0, 4.0), (50.0, 20.0));
        let d = tree.create(ElementKind::Image, None).unwrap();

        let canvas = CanvasConfig::default();
        let bounds = compute_all_bounds(&tree, &canvas);
        assert_eq!(
            bounds.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![a, b, c, d]
        );
        for entry in &bounds {
            assert_eq!(Some(entry.rect), absolute_rect(&tree, entry.id, &canvas));
            assert_eq!(entry.parent, tree.parent(entry.id));
        }
    }

    #[test]
    fn test_local_from_absolute_inverts() {
        let mut tree = ElementTree::new();
        let panel = tree.create(ElementKind::Container, None).unwrap();
        set(&mut tree, panel, Anchor::MiddleRight, (-32.0, 16.0), (300.0, 300.0));
        let child = tree.create(ElementKind::Text, Some(panel)).unwrap();
        set(&mut tree, child, Anchor::BottomCenter, (8.0, -24.0), (120.0, 30.0));

        let canvas = CanvasConfig::default();
        let abs = absolute_position(&tree, child, &canvas).unwrap();
        let local = local_from_absolute(abs.x, abs.y, &tree, child, &canvas).unwrap();
        assert_eq!(local, Vec2::new(8.0, -24.0));

        let moved = local_from_absolute(abs.x + 50.0, abs.y + 25.0, &tree, child, &canvas).unwrap();
        assert_eq!(moved, Vec2::new(58.0, 1.0));
    }

    #[test]
    fn test_unknown_id() {
        let tree = ElementTree::new();
        assert_eq!(absolute_position(&tree, NodeId(1), &CanvasConfig::default()), None);
    }
}
