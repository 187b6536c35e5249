//! Identity-indexed lookup and structural traversal over a node forest.
//!
//! [`NodeStore`] is a read-only view. Lookup is a linear search; documents
//! are small (hundreds of nodes) and no auxiliary index is needed for
//! correctness.

use std::collections::HashSet;

use crate::{document::Node, ident::NodeId};

/// Read-only view over one element forest.
#[derive(Debug, Clone, Copy)]
pub struct NodeStore<'a> {
    roots: &'a [Node],
}

impl<'a> NodeStore<'a> {
    pub fn new(roots: &'a [Node]) -> Self {
        NodeStore { roots }
    }

    /// Find a node by identity anywhere in the forest.
    pub fn find(&self, id: NodeId) -> Option<&'a Node> {
        self.depth_first().map(|(node, _)| node).find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// The parent of `id`, or `None` when `id` is a root (or absent).
    pub fn parent_of(&self, id: NodeId) -> Option<&'a Node> {
        self.depth_first()
            .map(|(node, _)| node)
            .find(|n| n.children.iter().any(|c| c.id == id))
    }

    /// Lazy pre-order traversal yielding each node with its depth. Finite and
    /// restartable: each call starts a fresh pass.
    pub fn depth_first(&self) -> DepthFirst<'a> {
        DepthFirst {
            stack: self.roots.iter().rev().map(|n| (n, 0)).collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.depth_first().count()
    }

    /// The identity set of the subtree rooted at `id`, including `id` itself.
    /// Empty when `id` is not in the forest.
    pub fn descendant_ids(&self, id: NodeId) -> HashSet<NodeId> {
        match self.find(id) {
            Some(root) => NodeStore::new(std::slice::from_ref(root))
                .depth_first()
                .map(|(n, _)| n.id)
                .collect(),
            None => HashSet::new(),
        }
    }
}

pub struct DepthFirst<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        Some((node, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        document::{Node, NodeKind},
        ident::IdAllocator,
    };

    fn sample_forest(ids: &mut IdAllocator) -> Vec<Node> {
        // card > (row > button, text), divider
        let mut card = Node::new(NodeKind::Card, ids);
        let mut row = Node::new(NodeKind::Row, ids);
        row.children.push(Node::new(NodeKind::Button, ids));
        card.children.push(row);
        card.children.push(Node::new(NodeKind::Text, ids));
        vec![card, Node::new(NodeKind::Divider, ids)]
    }

    #[test]
    fn test_depth_first_order_and_depth() {
        let mut ids = IdAllocator::seeded("store");
        let forest = sample_forest(&mut ids);
        let store = NodeStore::new(&forest);

        let visited: Vec<(NodeKind, usize)> = store
            .depth_first()
            .map(|(n, d)| (n.kind.clone(), d))
            .collect();
        assert_eq!(
            visited,
            vec![
                (NodeKind::Card, 0),
                (NodeKind::Row, 1),
                (NodeKind::Button, 2),
                (NodeKind::Text, 1),
                (NodeKind::Divider, 0),
            ]
        );
        // Restartable: a second pass yields the same sequence.
        assert_eq!(store.depth_first().count(), 5);
        assert_eq!(store.count(), 5);
    }

    #[test]
    fn test_find_and_parent_of() {
        let mut ids = IdAllocator::seeded("store");
        let forest = sample_forest(&mut ids);
        let store = NodeStore::new(&forest);

        let button_id = forest[0].children[0].children[0].id;
        assert_eq!(store.find(button_id).unwrap().kind, NodeKind::Button);
        assert_eq!(store.parent_of(button_id).unwrap().kind, NodeKind::Row);
        // Roots have no parent.
        assert!(store.parent_of(forest[0].id).is_none());
        assert!(store.find(NodeId::nil()).is_none());
    }

    #[test]
    fn test_descendant_ids_cover_subtree() {
        let mut ids = IdAllocator::seeded("store");
        let forest = sample_forest(&mut ids);
        let store = NodeStore::new(&forest);

        let card_id = forest[0].id;
        let set = store.descendant_ids(card_id);
        assert_eq!(set.len(), 4);
        assert!(set.contains(&card_id));
        assert!(!set.contains(&forest[1].id));
        assert!(store.descendant_ids(NodeId::nil()).is_empty());
    }
}
