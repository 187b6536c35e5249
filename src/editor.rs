//! Structural editing over one element forest.
//!
//! All operations take the forest plus explicit parent/target context; there
//! is no implicit cursor. Every operation either fully applies or fully
//! fails: invariant checks (identity uniqueness, cycle prevention) run before
//! any mutation, so callers never observe a partially-applied edit.
//!
//! Failure policy for positional inserts: a missing anchor or parent never
//! silently drops the node. The documented fallback appends at the end of
//! the target scope (or the forest root when the parent itself is missing)
//! and logs a warning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    document::Node,
    error::UispecError,
    ident::{IdAllocator, NodeId},
    store::NodeStore,
};

/// Placement of a node relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
    Inside,
}

/// The parent context of an insert: either the top-level children list of
/// the section being edited, or a node within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Root,
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderDirection {
    Up,
    Down,
}

/// Mutable editing session over one element forest.
pub struct TreeEditor<'a> {
    forest: &'a mut Vec<Node>,
}

impl<'a> TreeEditor<'a> {
    pub fn new(forest: &'a mut Vec<Node>) -> Self {
        TreeEditor { forest }
    }

    /// Read-only view of the forest being edited.
    pub fn store(&self) -> NodeStore<'_> {
        NodeStore::new(self.forest)
    }

    /// Insert `node` at the requested location.
    ///
    /// `Inside` appends as the last child of the anchor (or of the scope
    /// parent when no anchor is given); the target must accept children.
    /// `Before`/`After` insert adjacent to the anchor within the scope's
    /// children. A node whose subtree would collide with an existing
    /// identity is rejected with [`UispecError::Structural`] and the forest
    /// is left unchanged.
    pub fn insert(
        &mut self,
        node: Node,
        scope: Scope,
        anchor: Option<NodeId>,
        position: Position,
    ) -> Result<(), UispecError> {
        let store = NodeStore::new(self.forest);
        let incoming = NodeStore::new(std::slice::from_ref(&node))
            .depth_first()
            .map(|(n, _)| n.id)
            .collect::<Vec<_>>();
        if let Some(dup) = incoming.iter().find(|id| store.contains(**id)) {
            return Err(UispecError::Structural(format!(
                "insert would duplicate identity {dup}"
            )));
        }
        if position == Position::Inside {
            let target = anchor.or(match scope {
                Scope::Node(id) => Some(id),
                Scope::Root => None,
            });
            if let Some(tid) = target {
                if let Some(t) = store.find(tid) {
                    if !t.kind.accepts_children() {
                        return Err(UispecError::Structural(format!(
                            "{} node {tid} cannot hold children",
                            t.kind.as_tag()
                        )));
                    }
                }
            }
        }
        self.place(node, scope, anchor, position);
        Ok(())
    }

    /// Detach the node and its entire subtree, returning it so callers can
    /// implement undo. `None` when `id` is not in the forest.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        detach(self.forest, id)
    }

    /// Move a subtree to a new location. Returns `Ok(false)` for the no-op
    /// cases: source absent, target absent, or target inside the source's
    /// own subtree (cycle prevention; checked before any mutation). The
    /// detach-and-reinsert transition is not observable by the caller.
    pub fn move_node(
        &mut self,
        source: NodeId,
        target: NodeId,
        position: Position,
    ) -> Result<bool, UispecError> {
        let store = NodeStore::new(self.forest);
        let descendants = store.descendant_ids(source);
        if descendants.is_empty() {
            return Ok(false);
        }
        if descendants.contains(&target) {
            tracing::debug!("move of {source} into its own subtree ignored");
            return Ok(false);
        }
        // Validate the destination before detaching so the operation can no
        // longer fail once the source leaves the forest.
        let (scope, anchor) = match position {
            Position::Inside => match store.find(target) {
                None => return Ok(false),
                Some(t) if !t.kind.accepts_children() => {
                    return Err(UispecError::Structural(format!(
                        "{} node {target} cannot hold children",
                        t.kind.as_tag()
                    )));
                }
                Some(_) => (Scope::Node(target), None),
            },
            Position::Before | Position::After => {
                if !store.contains(target) {
                    return Ok(false);
                }
                let scope = match store.parent_of(target) {
                    Some(parent) => Scope::Node(parent.id),
                    None => Scope::Root,
                };
                (scope, Some(target))
            }
        };
        let node = match detach(self.forest, source) {
            Some(node) => node,
            None => return Ok(false),
        };
        self.place(node, scope, anchor, position);
        Ok(true)
    }

    /// Merge `patch` into the node's properties. Identity, kind and children
    /// are untouched. Returns whether the node was found.
    pub fn update(&mut self, id: NodeId, patch: BTreeMap<String, String>) -> bool {
        match find_mut(self.forest, id) {
            Some(node) => {
                node.properties.extend(patch);
                true
            }
            None => false,
        }
    }

    /// Deep-clone the subtree rooted at `id` with fresh identities on every
    /// node and insert the clone immediately after the original under the
    /// same parent. Returns the clone's root identity.
    pub fn duplicate(&mut self, id: NodeId, ids: &mut IdAllocator) -> Option<NodeId> {
        let siblings = siblings_of(self.forest, id)?;
        let index = siblings.iter().position(|n| n.id == id)?;
        let clone = siblings[index].clone_with_ids(ids);
        let clone_id = clone.id;
        siblings.insert(index + 1, clone);
        Some(clone_id)
    }

    /// Swap the node with its adjacent sibling within its current parent.
    /// A boundary (already first/last) is a no-op. Returns whether a swap
    /// happened.
    pub fn reorder_sibling(&mut self, id: NodeId, direction: ReorderDirection) -> bool {
        let siblings = match siblings_of(self.forest, id) {
            Some(siblings) => siblings,
            None => return false,
        };
        let index = match siblings.iter().position(|n| n.id == id) {
            Some(index) => index,
            None => return false,
        };
        match direction {
            ReorderDirection::Up if index > 0 => {
                siblings.swap(index, index - 1);
                true
            }
            ReorderDirection::Down if index + 1 < siblings.len() => {
                siblings.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Infallible placement; all validation has already run.
    fn place(&mut self, node: Node, scope: Scope, anchor: Option<NodeId>, position: Position) {
        match position {
            Position::Inside => {
                let target = anchor.or(match scope {
                    Scope::Node(id) => Some(id),
                    Scope::Root => None,
                });
                match target {
                    None => self.forest.push(node),
                    Some(tid) => {
                        if let Some(t) = find_mut(self.forest, tid) {
                            t.children.push(node);
                        } else {
                            tracing::warn!(
                                "insert target {tid} not found; appending at forest root"
                            );
                            self.forest.push(node);
                        }
                    }
                }
            }
            Position::Before | Position::After => {
                let list: &mut Vec<Node> = match scope {
                    Scope::Root => self.forest,
                    Scope::Node(pid) => match find_mut(self.forest, pid) {
                        Some(parent) => &mut parent.children,
                        None => {
                            tracing::warn!(
                                "insert parent {pid} not found; appending at forest root"
                            );
                            self.forest.push(node);
                            return;
                        }
                    },
                };
                match anchor.and_then(|aid| list.iter().position(|n| n.id == aid)) {
                    Some(index) => {
                        let at = if position == Position::After {
                            index + 1
                        } else {
                            index
                        };
                        list.insert(at, node);
                    }
                    None => {
                        tracing::warn!("insert anchor not found in scope; appending at end");
                        list.push(node);
                    }
                }
            }
        }
    }
}

fn find_mut(nodes: &mut [Node], id: NodeId) -> Option<&mut Node> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

fn detach(nodes: &mut Vec<Node>, id: NodeId) -> Option<Node> {
    if let Some(index) = nodes.iter().position(|n| n.id == id) {
        return Some(nodes.remove(index));
    }
    for node in nodes.iter_mut() {
        if let Some(found) = detach(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

/// The children list (forest root or some node's children) containing `id`.
fn siblings_of(nodes: &mut Vec<Node>, id: NodeId) -> Option<&mut Vec<Node>> {
    if nodes.iter().any(|n| n.id == id) {
        return Some(nodes);
    }
    for node in nodes.iter_mut() {
        if let Some(found) = siblings_of(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeKind;

    fn node(kind: NodeKind, ids: &mut IdAllocator) -> Node {
        Node::new(kind, ids)
    }

    /// Parent row with children [X, S, Y] plus a standalone divider root.
    fn fixture(ids: &mut IdAllocator) -> (Vec<Node>, NodeId, [NodeId; 3]) {
        let mut row = node(NodeKind::Row, ids);
        let x = node(NodeKind::Text, ids);
        let s = node(NodeKind::Button, ids);
        let y = node(NodeKind::Input, ids);
        let child_ids = [x.id, s.id, y.id];
        row.children.extend([x, s, y]);
        let row_id = row.id;
        (vec![row, node(NodeKind::Divider, ids)], row_id, child_ids)
    }

    fn child_ids(forest: &[Node], parent: NodeId) -> Vec<NodeId> {
        NodeStore::new(forest)
            .find(parent)
            .map(|p| p.children.iter().map(|c| c.id).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_insert_before_and_after_anchor() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, row, [x, s, y]) = fixture(&mut ids);
        let mut editor = TreeEditor::new(&mut forest);

        let n1 = node(NodeKind::Badge, &mut ids);
        let n1_id = n1.id;
        editor
            .insert(n1, Scope::Node(row), Some(s), Position::After)
            .unwrap();
        assert_eq!(child_ids(&forest, row), vec![x, s, n1_id, y]);

        let mut editor = TreeEditor::new(&mut forest);
        let n2 = node(NodeKind::Badge, &mut ids);
        let n2_id = n2.id;
        editor
            .insert(n2, Scope::Node(row), Some(s), Position::Before)
            .unwrap();
        assert_eq!(child_ids(&forest, row), vec![x, n2_id, s, n1_id, y]);
    }

    #[test]
    fn test_insert_inside_appends_as_last_child() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, row, _) = fixture(&mut ids);
        let mut editor = TreeEditor::new(&mut forest);

        let n = node(NodeKind::Icon, &mut ids);
        let n_id = n.id;
        editor
            .insert(n, Scope::Root, Some(row), Position::Inside)
            .unwrap();
        let children = child_ids(&forest, row);
        assert_eq!(children.last(), Some(&n_id));
        assert_eq!(children.len(), 4);
    }

    #[test]
    fn test_insert_inside_non_container_is_rejected() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, _, [_, s, _]) = fixture(&mut ids);
        let before = forest.clone();
        let mut editor = TreeEditor::new(&mut forest);

        let err = editor
            .insert(
                node(NodeKind::Icon, &mut ids),
                Scope::Root,
                Some(s),
                Position::Inside,
            )
            .unwrap_err();
        assert!(matches!(err, UispecError::Structural(_)));
        assert_eq!(forest, before);
    }

    #[test]
    fn test_insert_duplicate_identity_is_rejected() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, row, [x, _, _]) = fixture(&mut ids);
        let before = forest.clone();
        let mut editor = TreeEditor::new(&mut forest);

        let mut colliding = node(NodeKind::Badge, &mut ids);
        colliding.id = x;
        let err = editor
            .insert(colliding, Scope::Node(row), None, Position::Inside)
            .unwrap_err();
        assert!(matches!(err, UispecError::Structural(_)));
        assert_eq!(forest, before);
    }

    #[test]
    fn test_insert_missing_anchor_appends_at_scope_end() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, row, _) = fixture(&mut ids);
        let mut editor = TreeEditor::new(&mut forest);

        let n = node(NodeKind::Badge, &mut ids);
        let n_id = n.id;
        let ghost = ids.next_id();
        editor
            .insert(n, Scope::Node(row), Some(ghost), Position::After)
            .unwrap();
        assert_eq!(child_ids(&forest, row).last(), Some(&n_id));
    }

    #[test]
    fn test_remove_returns_detached_subtree() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, row, [x, s, y]) = fixture(&mut ids);
        let mut editor = TreeEditor::new(&mut forest);

        let detached = editor.remove(s).unwrap();
        assert_eq!(detached.id, s);
        // Removing again finds nothing.
        assert!(editor.remove(s).is_none());
        assert_eq!(child_ids(&forest, row), vec![x, y]);
    }

    #[test]
    fn test_move_into_own_subtree_is_a_no_op() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, row, [_, s, _]) = fixture(&mut ids);
        let before = forest.clone();
        let mut editor = TreeEditor::new(&mut forest);

        assert!(!editor.move_node(row, s, Position::Inside).unwrap());
        assert!(!editor.move_node(row, row, Position::Inside).unwrap());
        assert_eq!(forest, before);
    }

    #[test]
    fn test_move_after_sibling_in_another_parent() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, row, [x, s, y]) = fixture(&mut ids);
        let divider = forest[1].id;
        let mut editor = TreeEditor::new(&mut forest);

        assert!(editor.move_node(s, divider, Position::After).unwrap());
        assert_eq!(child_ids(&forest, row), vec![x, y]);
        let roots: Vec<NodeId> = forest.iter().map(|n| n.id).collect();
        assert_eq!(roots, vec![row, divider, s]);
    }

    #[test]
    fn test_move_inside_container() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, row, _) = fixture(&mut ids);
        let divider = forest[1].id;
        let mut editor = TreeEditor::new(&mut forest);

        assert!(editor.move_node(divider, row, Position::Inside).unwrap());
        assert_eq!(forest.len(), 1);
        assert_eq!(child_ids(&forest, row).last(), Some(&divider));
    }

    #[test]
    fn test_update_merges_properties_only() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, _, [x, _, _]) = fixture(&mut ids);
        let mut editor = TreeEditor::new(&mut forest);

        let mut patch = BTreeMap::new();
        patch.insert("label".to_string(), "Save".to_string());
        assert!(editor.update(x, patch));
        let store = NodeStore::new(&forest);
        let updated = store.find(x).unwrap();
        assert_eq!(updated.property("label"), Some("Save"));
        assert_eq!(updated.kind, NodeKind::Text);
        assert!(!TreeEditor::new(&mut forest).update(ids.next_id(), BTreeMap::new()));
    }

    #[test]
    fn test_duplicate_inserts_clone_after_original_with_fresh_ids() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, row, [x, s, y]) = fixture(&mut ids);
        let existing = NodeStore::new(&forest).descendant_ids(row);
        let mut editor = TreeEditor::new(&mut forest);

        let clone_id = editor.duplicate(s, &mut ids).unwrap();
        assert_eq!(child_ids(&forest, row), vec![x, s, clone_id, y]);
        // Every identity in the clone is disjoint from the pre-existing set.
        let clone_ids = NodeStore::new(&forest).descendant_ids(clone_id);
        assert!(clone_ids.is_disjoint(&existing));
    }

    #[test]
    fn test_reorder_sibling_swaps_and_respects_boundaries() {
        let mut ids = IdAllocator::seeded("editor");
        let (mut forest, row, [x, s, y]) = fixture(&mut ids);
        let mut editor = TreeEditor::new(&mut forest);

        assert!(editor.reorder_sibling(s, ReorderDirection::Up));
        assert_eq!(child_ids(&forest, row), vec![s, x, y]);

        let mut editor = TreeEditor::new(&mut forest);
        assert!(!editor.reorder_sibling(s, ReorderDirection::Up));
        assert_eq!(child_ids(&forest, row), vec![s, x, y]);

        let mut editor = TreeEditor::new(&mut forest);
        assert!(!editor.reorder_sibling(y, ReorderDirection::Down));
        assert_eq!(child_ids(&forest, row), vec![s, x, y]);
    }
}
