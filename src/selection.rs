use crate::error::DiagramError;
use crate::graph::{Diagram, Node};

/// Click-driven connection selection: at most one source node plus the
/// target nodes toggled after it.
///
/// Holds node ids only; the owning [`Editor`] keeps it consistent with
/// the graph store when nodes are deleted.
#[derive(Debug, Default)]
pub struct Selection {
    source: Option<String>,
    targets: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Target ids in the order they were toggled on.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn is_idle(&self) -> bool {
        self.source.is_none()
    }

    pub fn is_target(&self, id: &str) -> bool {
        self.targets.iter().any(|target| target == id)
    }

    /// All selected ids: the source (if any) followed by the targets.
    pub fn active_ids(&self) -> Vec<String> {
        self.source
            .iter()
            .cloned()
            .chain(self.targets.iter().cloned())
            .collect()
    }

    /// Handle a click on node `id`:
    /// - idle: the node becomes the source;
    /// - click on the current source: the whole selection clears;
    /// - any other node: toggles its target membership.
    pub fn click(&mut self, id: &str) {
        match self.source.as_deref() {
            None => {
                self.source = Some(id.to_string());
                self.targets.clear();
            }
            Some(source) if source == id => self.clear(),
            Some(_) => {
                if self.is_target(id) {
                    self.targets.retain(|target| target != id);
                } else {
                    self.targets.push(id.to_string());
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.source = None;
        self.targets.clear();
    }

    /// Drop any reference to the given ids, e.g. after the nodes were
    /// removed from the store.
    pub fn prune(&mut self, removed: &[String]) {
        if self
            .source
            .as_ref()
            .is_some_and(|source| removed.contains(source))
        {
            self.source = None;
        }
        self.targets.retain(|target| !removed.contains(target));
    }
}

/// The editing surface a host wires its events into: owns the graph
/// store and the selection, and keeps the two consistent.
///
/// The store is reachable only through the editor, so node removal
/// always prunes the selection and no dangling id can survive.
#[derive(Debug, Default)]
pub struct Editor {
    diagram: Diagram,
    selection: Selection,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn add_node(&mut self, kind: &str, x: f32, y: f32) -> Result<&Node, DiagramError> {
        self.diagram.add_node(kind, x, y)
    }

    pub fn update_node_label(&mut self, id: &str, label: &str) -> bool {
        self.diagram.update_node_label(id, label)
    }

    pub fn update_node_color(&mut self, id: &str, color: &str) -> bool {
        self.diagram.update_node_color(id, color)
    }

    pub fn set_node_size(&mut self, id: &str, width: f32, height: f32) {
        self.diagram.set_node_size(id, width, height);
    }

    pub fn set_node_position(&mut self, id: &str, x: f32, y: f32) {
        self.diagram.set_node_position(id, x, y);
    }

    /// Direct connect, bypassing the selection (e.g. when replaying a
    /// stored description). Same duplicate/self-loop rules as the
    /// store.
    pub fn connect(&mut self, source: &str, targets: &[String]) {
        self.diagram.connect(source, targets);
    }

    pub fn disconnect(&mut self, source: &str, targets: &[String]) {
        self.diagram.disconnect(source, targets);
    }

    pub fn click_node(&mut self, id: &str) {
        self.selection.click(id);
    }

    /// Whether the connect command applies: a source with at least one
    /// target.
    pub fn can_connect(&self) -> bool {
        self.selection.source().is_some() && !self.selection.targets().is_empty()
    }

    /// Whether the disconnect command applies: some selected target is
    /// currently connected from the source.
    pub fn can_disconnect(&self) -> bool {
        let Some(source) = self.selection.source() else {
            return false;
        };
        self.selection
            .targets()
            .iter()
            .any(|target| self.diagram.has_edge(source, target))
    }

    /// Connect the source to every selected target, then reset to idle.
    pub fn connect_selected(&mut self) {
        let Some(source) = self.selection.source() else {
            return;
        };
        if self.selection.targets().is_empty() {
            return;
        }
        let source = source.to_string();
        self.diagram.connect(&source, self.selection.targets());
        self.selection.clear();
    }

    /// Remove the edges from the source to the selected targets, then
    /// reset to idle.
    pub fn disconnect_selected(&mut self) {
        let Some(source) = self.selection.source() else {
            return;
        };
        if self.selection.targets().is_empty() {
            return;
        }
        let source = source.to_string();
        self.diagram.disconnect(&source, self.selection.targets());
        self.selection.clear();
    }

    /// Delete every selected node (source and targets) from the store.
    pub fn delete_selected(&mut self) {
        let active = self.selection.active_ids();
        if active.is_empty() {
            return;
        }
        self.diagram.remove_nodes(&active);
        self.selection.clear();
    }

    /// Store removal that also drops the removed ids from the
    /// selection, so no dangling reference survives.
    pub fn remove_nodes(&mut self, ids: &[String]) {
        self.diagram.remove_nodes(ids);
        self.selection.prune(ids);
    }

    /// Empty the whole diagram and reset the selection.
    pub fn clear_all(&mut self) {
        self.diagram.clear();
        self.selection.clear();
    }

    /// Relabel the source node. No-op while idle.
    pub fn set_selected_label(&mut self, label: &str) -> bool {
        match self.selection.source() {
            Some(source) => {
                let source = source.to_string();
                self.diagram.update_node_label(&source, label)
            }
            None => false,
        }
    }

    /// Recolor the source node. No-op while idle.
    pub fn set_selected_color(&mut self, color: &str) -> bool {
        match self.selection.source() {
            Some(source) => {
                let source = source.to_string();
                self.diagram.update_node_color(&source, color)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_sequence_walks_the_state_machine() {
        let mut selection = Selection::new();
        assert!(selection.is_idle());

        selection.click("A");
        assert_eq!(selection.source(), Some("A"));
        assert!(selection.targets().is_empty());

        selection.click("B");
        assert_eq!(selection.source(), Some("A"));
        assert_eq!(selection.targets(), ["B".to_string()]);

        selection.click("B");
        assert_eq!(selection.source(), Some("A"));
        assert!(selection.targets().is_empty());

        selection.click("A");
        assert!(selection.is_idle());
        assert!(selection.targets().is_empty());
    }

    #[test]
    fn source_never_joins_targets() {
        let mut selection = Selection::new();
        selection.click("A");
        selection.click("B");
        selection.click("C");
        assert!(!selection.is_target("A"));
        assert_eq!(selection.active_ids(), ["A", "B", "C"]);
    }

    #[test]
    fn targets_keep_insertion_order() {
        let mut selection = Selection::new();
        selection.click("A");
        for id in ["C", "B", "D"] {
            selection.click(id);
        }
        selection.click("B");
        assert_eq!(selection.targets(), ["C".to_string(), "D".to_string()]);
    }

    fn editor_with_pair() -> (Editor, String, String) {
        let mut editor = Editor::new();
        let a = editor
            .add_node("Database", 0.0, 0.0)
            .unwrap()
            .id
            .clone();
        let b = editor
            .add_node("Server", 200.0, 0.0)
            .unwrap()
            .id
            .clone();
        (editor, a, b)
    }

    #[test]
    fn connect_then_disconnect_end_to_end() {
        let (mut editor, a, b) = editor_with_pair();

        editor.click_node(&a);
        editor.click_node(&b);
        assert!(editor.can_connect());
        assert!(!editor.can_disconnect());

        editor.connect_selected();
        assert_eq!(editor.diagram().edges().len(), 1);
        assert!(editor.diagram().has_edge(&a, &b));
        assert!(editor.selection().is_idle());

        editor.click_node(&a);
        editor.click_node(&b);
        assert!(editor.can_disconnect());

        editor.disconnect_selected();
        assert!(editor.diagram().edges().is_empty());
        assert!(editor.selection().is_idle());
    }

    #[test]
    fn commands_without_targets_are_noops() {
        let (mut editor, a, b) = editor_with_pair();
        editor.click_node(&a);

        editor.connect_selected();
        assert!(editor.diagram().edges().is_empty());
        // A no-op command leaves the selection in place.
        assert_eq!(editor.selection().source(), Some(a.as_str()));

        editor.disconnect_selected();
        assert_eq!(editor.selection().source(), Some(a.as_str()));
        let _ = b;
    }

    #[test]
    fn delete_selected_removes_source_and_targets() {
        let (mut editor, a, b) = editor_with_pair();
        let c = editor
            .add_node("Cache", 400.0, 0.0)
            .unwrap()
            .id
            .clone();
        editor.connect(&a, &[b.clone(), c.clone()]);

        editor.click_node(&a);
        editor.click_node(&b);
        editor.delete_selected();

        assert!(!editor.diagram().has_node(&a));
        assert!(!editor.diagram().has_node(&b));
        assert!(editor.diagram().has_node(&c));
        assert!(editor.diagram().edges().is_empty());
        assert!(editor.selection().is_idle());
    }

    #[test]
    fn remove_nodes_prunes_the_selection() {
        let (mut editor, a, b) = editor_with_pair();
        editor.click_node(&a);
        editor.click_node(&b);

        editor.remove_nodes(&[b.clone()]);
        assert_eq!(editor.selection().source(), Some(a.as_str()));
        assert!(editor.selection().targets().is_empty());

        editor.remove_nodes(&[a.clone()]);
        assert!(editor.selection().is_idle());
    }

    #[test]
    fn store_mutations_route_through_the_editor() {
        let (mut editor, a, b) = editor_with_pair();

        assert!(editor.update_node_label(&a, "Primary DB"));
        assert!(editor.update_node_color(&a, "#111111"));
        editor.set_node_size(&a, 120.0, 90.0);
        editor.set_node_position(&a, 40.0, 60.0);
        editor.connect(&a, &[b.clone()]);

        let node = editor.diagram().node(&a).unwrap();
        assert_eq!(node.label, "Primary DB");
        assert_eq!(node.width, Some(120.0));
        assert_eq!((node.x, node.y), (40.0, 60.0));
        assert!(editor.diagram().has_edge(&a, &b));

        editor.disconnect(&a, &[b.clone()]);
        assert!(editor.diagram().edges().is_empty());

        // Removal via the editor is the only removal path, so the
        // selection can never keep an id the store no longer has.
        editor.click_node(&b);
        editor.remove_nodes(&[b.clone()]);
        assert!(editor.selection().is_idle());
    }

    #[test]
    fn clear_all_resets_everything() {
        let (mut editor, a, b) = editor_with_pair();
        editor.click_node(&a);
        editor.click_node(&b);
        editor.clear_all();
        assert!(editor.diagram().nodes().is_empty());
        assert!(editor.diagram().edges().is_empty());
        assert!(editor.selection().is_idle());
    }

    #[test]
    fn selected_label_and_color_apply_to_source() {
        let (mut editor, a, b) = editor_with_pair();
        editor.click_node(&a);
        editor.click_node(&b);

        assert!(editor.set_selected_label("Primary"));
        assert!(editor.set_selected_color("#111111"));
        assert_eq!(editor.diagram().node(&a).unwrap().label, "Primary");
        // Target nodes are untouched.
        assert_eq!(editor.diagram().node(&b).unwrap().label, "Server");
    }
}
