//! Node arena
//!
//! Nodes live in generational slots. Destroyed slots go on a free list and
//! are reused with a bumped generation, so a [`NodeId`] kept past its node's
//! destruction resolves to nothing instead of to the slot's new occupant.
//!
//! Children are an ordered `Vec<NodeId>` on the parent and the parent is a
//! plain handle on the child. Sibling positions are always computed from the
//! parent's child vector, so they are correct immediately after any move.

use crate::node::Node;
use crate::NodeId;

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Generational arena of nodes with tree linkage
#[derive(Debug, Default)]
pub struct NodeTree {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    live: usize,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId { index, generation: slot.generation }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot { generation: 0, node: Some(node) });
            NodeId { index, generation: 0 }
        }
    }

    /// Release a slot; the node must already be unlinked
    pub(crate) fn free(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.live -= 1;
        Some(node)
    }

    /// Get a node by handle
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Whether the handle refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live nodes in slot order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    NodeId { index: index as u32, generation: slot.generation },
                    node,
                )
            })
        })
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Position of `id` in its parent's child list
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(id)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(id)?;
        index.checked_sub(1).and_then(|i| self.children(parent).get(i).copied())
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Root of the subtree containing `id`
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Link `child` under `parent` at `index`; callers validate first
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId, index: usize) {
        if let Some(node) = self.get_mut(parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
    }

    /// Unlink `child` from its parent, returning its former position
    pub(crate) fn unlink(&mut self, child: NodeId) -> Option<usize> {
        let parent = self.parent(child)?;
        let index = self.child_index(child)?;
        if let Some(node) = self.get_mut(parent) {
            node.children.remove(index);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
        Some(index)
    }

    /// Pre-order handles of the subtree rooted at `id` (including `id`)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, PacketType};
    use crate::object::{ObjectFlags, ObjectType};

    fn node() -> Node {
        Node::new(
            ObjectType::ContainerNode,
            ElementKind::Subform,
            PacketType::Form,
            ObjectFlags::INITIALIZED,
        )
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut tree = NodeTree::new();
        let a = tree.alloc(node());
        assert!(tree.free(a).is_some());
        let b = tree.alloc(node());

        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(tree.get(a).is_none());
        assert!(tree.get(b).is_some());
        assert!(tree.free(a).is_none());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_link_and_siblings() {
        let mut tree = NodeTree::new();
        let parent = tree.alloc(node());
        let x = tree.alloc(node());
        let y = tree.alloc(node());
        let z = tree.alloc(node());
        tree.link(parent, x, 0);
        tree.link(parent, z, 1);
        tree.link(parent, y, 1);

        assert_eq!(tree.children(parent), &[x, y, z]);
        assert_eq!(tree.next_sibling(x), Some(y));
        assert_eq!(tree.prev_sibling(x), None);
        assert_eq!(tree.last_child(parent), Some(z));

        assert_eq!(tree.unlink(y), Some(1));
        assert_eq!(tree.parent(y), None);
        assert_eq!(tree.next_sibling(x), Some(z));
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = NodeTree::new();
        let root = tree.alloc(node());
        let a = tree.alloc(node());
        let a1 = tree.alloc(node());
        let b = tree.alloc(node());
        tree.link(root, a, 0);
        tree.link(root, b, 1);
        tree.link(a, a1, 0);

        assert_eq!(tree.descendants(root), vec![root, a, a1, b]);
        assert!(tree.is_ancestor(root, a1));
        assert!(!tree.is_ancestor(b, a1));
        assert_eq!(tree.root_of(a1), root);
    }
}
