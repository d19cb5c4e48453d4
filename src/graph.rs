use crate::error::DiagramError;
use crate::palette::palette_entry;

/// A placed node. `x`/`y` is the top-left corner; `width`/`height` stay
/// empty until the host reports the painted size.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub kind: &'static str,
    pub label: String,
    pub color: String,
    pub icon: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

/// A directed connection between two nodes.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

fn edge_id(source: &str, target: &str) -> String {
    format!("edge-{}-{}", source, target)
}

fn kind_slug(kind: &str) -> String {
    kind.to_ascii_lowercase().replace(' ', "-")
}

/// In-memory diagram: the single owner of all nodes and edges.
///
/// Every mutation is synchronous and applies fully or not at all. Node
/// ids come from a monotonic serial and are never reused, even after
/// removal.
#[derive(Debug, Default)]
pub struct Diagram {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_serial: u64,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target)
    }

    /// Instantiate a palette kind at the given position, copying the
    /// catalog's default label, color and icon.
    pub fn add_node(&mut self, kind: &str, x: f32, y: f32) -> Result<&Node, DiagramError> {
        let entry = palette_entry(kind)
            .ok_or_else(|| DiagramError::UnknownPaletteKind(kind.to_string()))?;

        self.next_serial += 1;
        self.nodes.push(Node {
            id: format!("{}-{}", kind_slug(entry.key), self.next_serial),
            kind: entry.key,
            label: entry.label.to_string(),
            color: entry.color.to_string(),
            icon: entry.icon,
            x,
            y,
            width: None,
            height: None,
        });

        Ok(self.nodes.last().unwrap())
    }

    /// Replace a node's label. Returns whether anything changed; a
    /// missing node or an identical value is suppressed so callers can
    /// skip downstream recomputes.
    pub fn update_node_label(&mut self, id: &str, label: &str) -> bool {
        match self.nodes.iter_mut().find(|node| node.id == id) {
            Some(node) if node.label != label => {
                node.label = label.to_string();
                true
            }
            _ => false,
        }
    }

    /// Replace a node's fill color, with the same change-suppression as
    /// [`update_node_label`](Self::update_node_label).
    pub fn update_node_color(&mut self, id: &str, color: &str) -> bool {
        match self.nodes.iter_mut().find(|node| node.id == id) {
            Some(node) if node.color != color => {
                node.color = color.to_string();
                true
            }
            _ => false,
        }
    }

    /// Record the painted size of a node.
    pub fn set_node_size(&mut self, id: &str, width: f32, height: f32) {
        if let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) {
            node.width = Some(width);
            node.height = Some(height);
        }
    }

    pub fn set_node_position(&mut self, id: &str, x: f32, y: f32) {
        if let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) {
            node.x = x;
            node.y = y;
        }
    }

    /// Remove the named nodes together with every edge touching them.
    pub fn remove_nodes(&mut self, ids: &[String]) {
        self.nodes.retain(|node| !ids.contains(&node.id));
        self.edges
            .retain(|edge| !ids.contains(&edge.source) && !ids.contains(&edge.target));
    }

    /// Add an edge from `source` to each target. Existing pairs and
    /// self-loops are skipped, so repeating a call is idempotent.
    pub fn connect(&mut self, source: &str, targets: &[String]) {
        for target in targets {
            if target == source || self.has_edge(source, target) {
                continue;
            }
            self.edges.push(Edge {
                id: edge_id(source, target),
                source: source.to_string(),
                target: target.clone(),
            });
        }
    }

    /// Remove exactly the `source -> target` edges for the given
    /// targets; all other edges are untouched.
    pub fn disconnect(&mut self, source: &str, targets: &[String]) {
        self.edges
            .retain(|edge| !(edge.source == source && targets.contains(&edge.target)));
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_nodes() -> (Diagram, String, String) {
        let mut diagram = Diagram::new();
        let a = diagram.add_node("Database", 0.0, 0.0).unwrap().id.clone();
        let b = diagram.add_node("Server", 200.0, 0.0).unwrap().id.clone();
        (diagram, a, b)
    }

    #[test]
    fn add_node_copies_palette_defaults() {
        let mut diagram = Diagram::new();
        let node = diagram.add_node("Database", 10.0, 20.0).unwrap();

        assert_eq!(node.id, "database-1");
        assert_eq!(node.kind, "Database");
        assert_eq!(node.label, "Database");
        assert_eq!(node.color, "#0ea5e9");
        assert_eq!((node.x, node.y), (10.0, 20.0));
        assert_eq!(node.width, None);
        assert_eq!(node.height, None);
        assert_eq!(diagram.nodes().len(), 1);
    }

    #[test]
    fn add_node_rejects_unknown_kind() {
        let mut diagram = Diagram::new();
        let err = diagram.add_node("Mainframe", 0.0, 0.0).unwrap_err();
        assert_eq!(err, DiagramError::UnknownPaletteKind("Mainframe".into()));
        assert!(diagram.nodes().is_empty());
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        let mut diagram = Diagram::new();
        let a = diagram.add_node("Server", 0.0, 0.0).unwrap().id.clone();
        diagram.remove_nodes(&[a.clone()]);
        let b = diagram.add_node("Server", 0.0, 0.0).unwrap().id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn update_label_suppresses_redundant_change() {
        let (mut diagram, a, _) = two_nodes();
        assert!(diagram.update_node_label(&a, "Primary DB"));
        assert!(!diagram.update_node_label(&a, "Primary DB"));
        assert!(!diagram.update_node_label("missing", "x"));
        assert_eq!(diagram.node(&a).unwrap().label, "Primary DB");
        // Other attributes survive the update.
        assert_eq!(diagram.node(&a).unwrap().color, "#0ea5e9");
    }

    #[test]
    fn update_color_suppresses_redundant_change() {
        let (mut diagram, a, _) = two_nodes();
        assert!(diagram.update_node_color(&a, "#111111"));
        assert!(!diagram.update_node_color(&a, "#111111"));
        assert_eq!(diagram.node(&a).unwrap().color, "#111111");
    }

    #[test]
    fn connect_is_idempotent() {
        let (mut diagram, a, b) = two_nodes();
        diagram.connect(&a, &[b.clone()]);
        diagram.connect(&a, &[b.clone()]);
        assert_eq!(diagram.edges().len(), 1);
        assert_eq!(diagram.edges()[0].id, format!("edge-{a}-{b}"));
    }

    #[test]
    fn connect_skips_self_loops() {
        let (mut diagram, a, _) = two_nodes();
        diagram.connect(&a, &[a.clone()]);
        assert!(diagram.edges().is_empty());
    }

    #[test]
    fn disconnect_removes_exactly_the_selected_pairs() {
        let (mut diagram, a, b) = two_nodes();
        let c = diagram.add_node("Cache", 400.0, 0.0).unwrap().id.clone();
        diagram.connect(&a, &[b.clone(), c.clone()]);
        diagram.connect(&b, &[c.clone()]);

        diagram.disconnect(&a, &[b.clone()]);

        assert!(!diagram.has_edge(&a, &b));
        assert!(diagram.has_edge(&a, &c));
        assert!(diagram.has_edge(&b, &c));
    }

    #[test]
    fn remove_nodes_cascades_to_edges() {
        let (mut diagram, a, b) = two_nodes();
        let c = diagram.add_node("Cache", 400.0, 0.0).unwrap().id.clone();
        diagram.connect(&a, &[b.clone()]);
        diagram.connect(&b, &[c.clone()]);

        diagram.remove_nodes(&[b.clone()]);

        assert!(!diagram.has_node(&b));
        assert!(diagram.edges().is_empty());
        assert_eq!(diagram.nodes().len(), 2);
    }

    #[test]
    fn clear_empties_both_collections() {
        let (mut diagram, a, b) = two_nodes();
        diagram.connect(&a, &[b]);
        diagram.clear();
        assert!(diagram.nodes().is_empty());
        assert!(diagram.edges().is_empty());
    }
}
