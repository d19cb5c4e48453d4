use crate::geometry::{Point, edge_endpoints};
use crate::graph::{Diagram, Edge, Node};
use crate::selection::Selection;

/// Stroke and arrowhead color of rendered edges.
pub const EDGE_STROKE: &str = "#2563eb";
pub const EDGE_STROKE_WIDTH: f32 = 2.0;

/// A node's part in the current selection, used only for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    None,
    Source,
    Target,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Source => "source",
            Role::Target => "target",
        }
    }
}

/// A node paired with its per-frame visual role.
#[derive(Debug)]
pub struct NodeView<'a> {
    pub node: &'a Node,
    pub role: Role,
}

/// An edge with its floating endpoints resolved against the current
/// node positions and sizes.
#[derive(Debug)]
pub struct EdgeView<'a> {
    pub edge: &'a Edge,
    pub start: Point,
    pub end: Point,
}

pub fn node_role(selection: &Selection, id: &str) -> Role {
    if selection.source() == Some(id) {
        Role::Source
    } else if selection.is_target(id) {
        Role::Target
    } else {
        Role::None
    }
}

/// Derive the frame's visuals from a store snapshot and the selection.
/// Purely a read; stored node and edge data never gains selection
/// state.
pub fn decorate<'a>(
    diagram: &'a Diagram,
    selection: &Selection,
) -> (Vec<NodeView<'a>>, Vec<EdgeView<'a>>) {
    let nodes = diagram
        .nodes()
        .iter()
        .map(|node| NodeView {
            node,
            role: node_role(selection, &node.id),
        })
        .collect();

    // An edge with a missing endpoint is skipped, not drawn. The store
    // removes such edges itself, so this only covers torn snapshots a
    // host assembles by hand.
    let edges = diagram
        .edges()
        .iter()
        .filter_map(|edge| {
            let source = diagram.node(&edge.source)?;
            let target = diagram.node(&edge.target)?;
            let (start, end) = edge_endpoints(source, target);
            Some(EdgeView { edge, start, end })
        })
        .collect();

    (nodes, edges)
}
