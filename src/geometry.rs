use crate::graph::Node;
use crate::palette::{FALLBACK_NODE_HEIGHT, FALLBACK_NODE_WIDTH};

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Center-anchored bounding box of a node.
#[derive(Debug, Clone, Copy)]
pub struct BBox {
    pub center: Point,
    pub width: f32,
    pub height: f32,
}

impl BBox {
    /// Box for a node: position is the top-left corner; the measured
    /// size applies once known, the fixed default size before that.
    pub fn of_node(node: &Node) -> Self {
        let width = node.width.unwrap_or(FALLBACK_NODE_WIDTH);
        let height = node.height.unwrap_or(FALLBACK_NODE_HEIGHT);
        Self {
            center: Point::new(node.x + width / 2.0, node.y + height / 2.0),
            width,
            height,
        }
    }

    /// Where the ray from this box's center toward `target` exits the
    /// box boundary. Coincident points yield the center itself.
    pub fn boundary_toward(&self, target: Point) -> Point {
        let dx = target.x - self.center.x;
        let dy = target.y - self.center.y;

        if dx == 0.0 && dy == 0.0 {
            return self.center;
        }

        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let scale = 1.0 / (dx.abs() / half_w).max(dy.abs() / half_h);

        Point::new(self.center.x + dx * scale, self.center.y + dy * scale)
    }
}

/// Endpoints of a floating edge: each end sits on its node's silhouette,
/// aimed at the other node's center. Recomputed on every use, never
/// stored.
pub fn edge_endpoints(source: &Node, target: &Node) -> (Point, Point) {
    let source_box = BBox::of_node(source);
    let target_box = BBox::of_node(target);

    (
        source_box.boundary_toward(target_box.center),
        target_box.boundary_toward(source_box.center),
    )
}
