//! Traversal strategies and the pre-order node iterator
//!
//! A strategy decides what counts as first child, next sibling and parent.
//! [`AllNodes`] follows the tree as-is; [`ContainerNodes`] only sees
//! container nodes and walks past everything else.
//!
//! The iterator holds no borrow between steps. If its current node is
//! destroyed or moved out of the root's subtree, the iterator is exhausted.

use std::marker::PhantomData;

use crate::tree::NodeTree;
use crate::NodeId;

/// Navigation policy for [`NodeIterator`]
pub trait TraverseStrategy {
    fn first_child(tree: &NodeTree, node: NodeId) -> Option<NodeId>;
    fn next_sibling(tree: &NodeTree, node: NodeId) -> Option<NodeId>;
    fn parent(tree: &NodeTree, node: NodeId) -> Option<NodeId>;
}

/// Every node
#[derive(Debug, Clone, Copy, Default)]
pub struct AllNodes;

impl TraverseStrategy for AllNodes {
    fn first_child(tree: &NodeTree, node: NodeId) -> Option<NodeId> {
        tree.first_child(node)
    }

    fn next_sibling(tree: &NodeTree, node: NodeId) -> Option<NodeId> {
        tree.next_sibling(node)
    }

    fn parent(tree: &NodeTree, node: NodeId) -> Option<NodeId> {
        tree.parent(node)
    }
}

/// Container nodes only (subforms, fields, areas, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerNodes;

fn is_container(tree: &NodeTree, node: NodeId) -> bool {
    tree.get(node).is_some_and(|n| n.is_container())
}

impl TraverseStrategy for ContainerNodes {
    fn first_child(tree: &NodeTree, node: NodeId) -> Option<NodeId> {
        tree.children(node).iter().copied().find(|&c| is_container(tree, c))
    }

    fn next_sibling(tree: &NodeTree, node: NodeId) -> Option<NodeId> {
        let parent = tree.parent(node)?;
        let index = tree.child_index(node)?;
        tree.children(parent)[index + 1..]
            .iter()
            .copied()
            .find(|&c| is_container(tree, c))
    }

    fn parent(tree: &NodeTree, node: NodeId) -> Option<NodeId> {
        let mut current = tree.parent(node);
        while let Some(id) = current {
            if is_container(tree, id) {
                return Some(id);
            }
            current = tree.parent(id);
        }
        None
    }
}

/// Restartable pre-order iterator over the subtree of `root`
#[derive(Debug, Clone)]
pub struct NodeIterator<S: TraverseStrategy> {
    root: NodeId,
    current: Option<NodeId>,
    _strategy: PhantomData<S>,
}

pub type ContainerIterator = NodeIterator<ContainerNodes>;
pub type XfaNodeIterator = NodeIterator<AllNodes>;

impl<S: TraverseStrategy> NodeIterator<S> {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            current: Some(root),
            _strategy: PhantomData,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current position; `None` once exhausted
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Return to the root
    pub fn reset(&mut self) -> NodeId {
        self.current = Some(self.root);
        self.root
    }

    /// Reposition on `node` if it lies in the root's subtree
    pub fn set_current(&mut self, tree: &NodeTree, node: NodeId) -> bool {
        if tree.contains(node) && tree.is_ancestor(self.root, node) {
            self.current = Some(node);
            true
        } else {
            false
        }
    }

    fn checked_current(&mut self, tree: &NodeTree) -> Option<NodeId> {
        let current = self.current?;
        if tree.contains(current) && tree.is_ancestor(self.root, current) {
            Some(current)
        } else {
            self.current = None;
            None
        }
    }

    /// Advance in pre-order
    pub fn move_to_next(&mut self, tree: &NodeTree) -> Option<NodeId> {
        let current = self.checked_current(tree)?;
        if let Some(child) = S::first_child(tree, current) {
            self.current = Some(child);
            return self.current;
        }
        self.advance_past(tree, current)
    }

    /// Advance to the next node that is not a descendant of the current one
    pub fn skip_children_and_move_to_next(&mut self, tree: &NodeTree) -> Option<NodeId> {
        let current = self.checked_current(tree)?;
        self.advance_past(tree, current)
    }

    fn advance_past(&mut self, tree: &NodeTree, mut node: NodeId) -> Option<NodeId> {
        self.current = loop {
            if node == self.root || !tree.is_ancestor(self.root, node) {
                break None;
            }
            if let Some(sibling) = S::next_sibling(tree, node) {
                break Some(sibling);
            }
            match S::parent(tree, node) {
                Some(parent) => node = parent,
                None => break None,
            }
        };
        self.current
    }

    /// Borrowing adapter yielding the current node and then advancing
    pub fn iter<'a>(&'a mut self, tree: &'a NodeTree) -> Nodes<'a, S> {
        Nodes { iter: self, tree }
    }
}

/// Iterator adapter returned by [`NodeIterator::iter`]
pub struct Nodes<'a, S: TraverseStrategy> {
    iter: &'a mut NodeIterator<S>,
    tree: &'a NodeTree,
}

impl<S: TraverseStrategy> Iterator for Nodes<'_, S> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.iter.checked_current(self.tree)?;
        self.iter.move_to_next(self.tree);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::element::{ElementKind, PacketType};

    // root(subform) > [occur, a(field), b(subform) > [value, c(field)]]
    fn sample() -> (Document, [NodeId; 6]) {
        let mut doc = Document::new();
        let root = doc.create_node(ElementKind::Subform, PacketType::Form);
        let occur = doc.create_node(ElementKind::Occur, PacketType::Form);
        let a = doc.create_node(ElementKind::Field, PacketType::Form);
        let b = doc.create_node(ElementKind::Subform, PacketType::Form);
        let value = doc.create_node(ElementKind::Value, PacketType::Form);
        let c = doc.create_node(ElementKind::Field, PacketType::Form);
        doc.append_child(root, occur).unwrap();
        doc.append_child(root, a).unwrap();
        doc.append_child(root, b).unwrap();
        doc.append_child(b, value).unwrap();
        doc.append_child(b, c).unwrap();
        (doc, [root, occur, a, b, value, c])
    }

    #[test]
    fn test_all_nodes_preorder() {
        let (doc, [root, occur, a, b, value, c]) = sample();
        let mut it = XfaNodeIterator::new(root);
        let order: Vec<_> = it.iter(doc.tree()).collect();
        assert_eq!(order, vec![root, occur, a, b, value, c]);
        assert_eq!(it.current(), None);
    }

    #[test]
    fn test_containers_only() {
        let (doc, [root, _, a, b, _, c]) = sample();
        let mut it = ContainerIterator::new(root);
        let order: Vec<_> = it.iter(doc.tree()).collect();
        assert_eq!(order, vec![root, a, b, c]);
    }

    #[test]
    fn test_skip_children() {
        let (doc, [root, _, a, b, _, _]) = sample();
        let mut it = ContainerIterator::new(root);
        assert!(it.set_current(doc.tree(), b));
        assert_eq!(it.skip_children_and_move_to_next(doc.tree()), None);

        it.reset();
        assert_eq!(it.move_to_next(doc.tree()), Some(a));
        assert_eq!(it.skip_children_and_move_to_next(doc.tree()), Some(b));
    }

    #[test]
    fn test_subtree_root_bounds_iteration() {
        let (doc, [_, _, _, b, value, c]) = sample();
        let mut it = XfaNodeIterator::new(b);
        let order: Vec<_> = it.iter(doc.tree()).collect();
        assert_eq!(order, vec![b, value, c]);
    }

    #[test]
    fn test_exhausted_after_current_destroyed() {
        let (mut doc, [root, _, a, _, _, _]) = sample();
        let mut it = XfaNodeIterator::new(root);
        assert!(it.set_current(doc.tree(), a));
        doc.destroy_node(a).unwrap();

        assert_eq!(it.move_to_next(doc.tree()), None);
        assert_eq!(it.current(), None);
        assert_eq!(it.reset(), root);
        assert_eq!(it.iter(doc.tree()).count(), 5);
    }

    #[test]
    fn test_exhausted_after_current_moved_out() {
        let (mut doc, [root, _, _, b, _, c]) = sample();
        let mut it = XfaNodeIterator::new(b);
        assert!(it.set_current(doc.tree(), c));
        doc.remove_child(b, c, false).unwrap();
        doc.append_child(root, c).unwrap();

        assert_eq!(it.move_to_next(doc.tree()), None);
        assert!(!it.set_current(doc.tree(), c));
    }
}
