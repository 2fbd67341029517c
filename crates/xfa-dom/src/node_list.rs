//! Node lists
//!
//! Two collections share one contract: [`ArrayNodeList`] keeps its own
//! ordered handles (the tree still owns the nodes), while
//! [`AttachNodeList`] is a live view over an attach node's children that
//! re-reads the tree on every access and mutates it on writes.

use crate::document::Document;
use crate::error::{DomError, DomResult};
use crate::hash::name_hash;
use crate::NodeId;

/// Operations shared by every node list
pub trait NodeListOps {
    fn len(&self, doc: &Document) -> usize;

    fn item(&self, doc: &Document, index: usize) -> Option<NodeId>;

    fn append(&mut self, doc: &mut Document, node: NodeId) -> DomResult<()>;

    /// Insert before `before`, or at the end when `before` is `None`
    fn insert(&mut self, doc: &mut Document, node: NodeId, before: Option<NodeId>) -> DomResult<()>;

    fn remove(&mut self, doc: &mut Document, node: NodeId) -> DomResult<()>;

    fn is_empty(&self, doc: &Document) -> bool {
        self.len(doc) == 0
    }

    /// First member whose name matches
    fn named_item(&self, doc: &Document, name: &str) -> Option<NodeId> {
        let hash = name_hash(name);
        (0..self.len(doc))
            .filter_map(|index| self.item(doc, index))
            .find(|&node| doc.name_hash(node) == hash)
    }

    /// Snapshot of the members
    fn to_vec(&self, doc: &Document) -> Vec<NodeId> {
        (0..self.len(doc)).filter_map(|index| self.item(doc, index)).collect()
    }
}

/// Owned, ordered list of node handles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayNodeList {
    nodes: Vec<NodeId>,
}

impl ArrayNodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

impl NodeListOps for ArrayNodeList {
    fn len(&self, _doc: &Document) -> usize {
        self.nodes.len()
    }

    fn item(&self, _doc: &Document, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    fn append(&mut self, doc: &mut Document, node: NodeId) -> DomResult<()> {
        doc.live(node)?;
        self.nodes.push(node);
        Ok(())
    }

    fn insert(&mut self, doc: &mut Document, node: NodeId, before: Option<NodeId>) -> DomResult<()> {
        doc.live(node)?;
        let index = match before {
            None => self.nodes.len(),
            Some(before) => self
                .nodes
                .iter()
                .position(|&n| n == before)
                .ok_or(DomError::NotInList(before))?,
        };
        self.nodes.insert(index, node);
        Ok(())
    }

    fn remove(&mut self, _doc: &mut Document, node: NodeId) -> DomResult<()> {
        let index = self
            .nodes
            .iter()
            .position(|&n| n == node)
            .ok_or(DomError::NotInList(node))?;
        self.nodes.remove(index);
        Ok(())
    }
}

/// Live view over the children of an attach node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachNodeList {
    attach: NodeId,
    containers_only: bool,
}

impl AttachNodeList {
    /// View over every child of `attach`
    pub fn new(attach: NodeId) -> Self {
        Self { attach, containers_only: false }
    }

    /// View over the container children of `attach`
    pub fn containers(attach: NodeId) -> Self {
        Self { attach, containers_only: true }
    }

    pub fn attach_node(&self) -> NodeId {
        self.attach
    }

    fn members<'a>(&self, doc: &'a Document) -> impl Iterator<Item = NodeId> + 'a {
        let containers_only = self.containers_only;
        doc.children(self.attach).iter().copied().filter(move |&child| {
            !containers_only || doc.node(child).is_some_and(|node| node.is_container())
        })
    }

    /// Everything that would make the attach fail, checked while `node` is
    /// still in place so a rejected move leaves the tree untouched.
    fn check_movable(&self, doc: &Document, node: NodeId) -> DomResult<()> {
        doc.live(self.attach)?;
        doc.live(node)?;
        if doc.is_ancestor(node, self.attach) {
            return Err(DomError::HierarchyRequest { parent: self.attach, child: node });
        }
        Ok(())
    }
}

impl NodeListOps for AttachNodeList {
    fn len(&self, doc: &Document) -> usize {
        self.members(doc).count()
    }

    fn item(&self, doc: &Document, index: usize) -> Option<NodeId> {
        self.members(doc).nth(index)
    }

    fn append(&mut self, doc: &mut Document, node: NodeId) -> DomResult<()> {
        self.check_movable(doc, node)?;
        doc.detach(node)?;
        doc.append_child(self.attach, node)
    }

    fn insert(&mut self, doc: &mut Document, node: NodeId, before: Option<NodeId>) -> DomResult<()> {
        if before == Some(node) {
            return Ok(());
        }
        if let Some(before) = before {
            if doc.parent(before) != Some(self.attach) {
                return Err(DomError::NotAChild { parent: self.attach, child: before });
            }
        }
        self.check_movable(doc, node)?;
        doc.detach(node)?;
        doc.insert_child(self.attach, node, before)
    }

    fn remove(&mut self, doc: &mut Document, node: NodeId) -> DomResult<()> {
        doc.remove_child(self.attach, node, true)
    }
}

/// Either kind of node list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeList {
    Array(ArrayNodeList),
    Attach(AttachNodeList),
}

impl NodeListOps for NodeList {
    fn len(&self, doc: &Document) -> usize {
        match self {
            NodeList::Array(list) => list.len(doc),
            NodeList::Attach(list) => list.len(doc),
        }
    }

    fn item(&self, doc: &Document, index: usize) -> Option<NodeId> {
        match self {
            NodeList::Array(list) => list.item(doc, index),
            NodeList::Attach(list) => list.item(doc, index),
        }
    }

    fn append(&mut self, doc: &mut Document, node: NodeId) -> DomResult<()> {
        match self {
            NodeList::Array(list) => list.append(doc, node),
            NodeList::Attach(list) => list.append(doc, node),
        }
    }

    fn insert(&mut self, doc: &mut Document, node: NodeId, before: Option<NodeId>) -> DomResult<()> {
        match self {
            NodeList::Array(list) => list.insert(doc, node, before),
            NodeList::Attach(list) => list.insert(doc, node, before),
        }
    }

    fn remove(&mut self, doc: &mut Document, node: NodeId) -> DomResult<()> {
        match self {
            NodeList::Array(list) => list.remove(doc, node),
            NodeList::Attach(list) => list.remove(doc, node),
        }
    }
}

impl From<ArrayNodeList> for NodeList {
    fn from(list: ArrayNodeList) -> Self {
        NodeList::Array(list)
    }
}

impl From<AttachNodeList> for NodeList {
    fn from(list: AttachNodeList) -> Self {
        NodeList::Attach(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, PacketType};
    use crate::object::ObjectFlags;

    #[test]
    fn test_array_keeps_insertion_order_and_duplicates() {
        let mut doc = Document::new();
        let a = doc.create_named_node(ElementKind::Field, PacketType::Form, "a");
        let b = doc.create_named_node(ElementKind::Field, PacketType::Form, "b");

        let mut list = ArrayNodeList::new();
        list.append(&mut doc, a).unwrap();
        list.insert(&mut doc, b, Some(a)).unwrap();
        list.append(&mut doc, a).unwrap();
        assert_eq!(list.nodes(), &[b, a, a]);

        list.remove(&mut doc, a).unwrap();
        assert_eq!(list.nodes(), &[b, a]);
        assert_eq!(list.named_item(&doc, "a"), Some(a));
        list.remove(&mut doc, b).unwrap();
        assert_eq!(list.remove(&mut doc, b), Err(DomError::NotInList(b)));
    }

    #[test]
    fn test_attach_list_is_live() {
        let mut doc = Document::new();
        let parent = doc.create_node(ElementKind::Subform, PacketType::Form);
        let field = doc.create_named_node(ElementKind::Field, PacketType::Form, "f");
        let occur = doc.create_node(ElementKind::Occur, PacketType::Form);

        let all = AttachNodeList::new(parent);
        let containers = AttachNodeList::containers(parent);
        assert!(all.is_empty(&doc));

        doc.append_child(parent, occur).unwrap();
        doc.append_child(parent, field).unwrap();
        assert_eq!(all.len(&doc), 2);
        assert_eq!(containers.len(&doc), 1);
        assert_eq!(containers.item(&doc, 0), Some(field));
        assert_eq!(containers.named_item(&doc, "f"), Some(field));
    }

    #[test]
    fn test_attach_append_reparents() {
        let mut doc = Document::new();
        let old_parent = doc.create_node(ElementKind::Subform, PacketType::Form);
        let new_parent = doc.create_node(ElementKind::Subform, PacketType::Form);
        let field = doc.create_node(ElementKind::Field, PacketType::Form);
        doc.append_child(old_parent, field).unwrap();

        let mut list = NodeList::from(AttachNodeList::new(new_parent));
        list.append(&mut doc, field).unwrap();
        assert_eq!(doc.parent(field), Some(new_parent));
        assert!(doc.children(old_parent).is_empty());

        list.remove(&mut doc, field).unwrap();
        assert_eq!(doc.parent(field), None);
    }

    #[test]
    fn test_attach_insert_before_stranger_leaves_tree_alone() {
        let mut doc = Document::new();
        let parent = doc.create_node(ElementKind::Subform, PacketType::Form);
        let other = doc.create_node(ElementKind::Subform, PacketType::Form);
        let stranger = doc.create_node(ElementKind::Field, PacketType::Form);
        let field = doc.create_node(ElementKind::Field, PacketType::Form);
        doc.append_child(other, field).unwrap();

        let mut list = AttachNodeList::new(parent);
        assert!(list.insert(&mut doc, field, Some(stranger)).is_err());
        assert_eq!(doc.parent(field), Some(other));
    }

    #[test]
    fn test_attach_under_own_descendant_leaves_tree_alone() {
        let mut doc = Document::new();
        let root = doc.create_node(ElementKind::Subform, PacketType::Form);
        let outer = doc.create_node(ElementKind::Subform, PacketType::Form);
        let inner = doc.create_node(ElementKind::Subform, PacketType::Form);
        doc.append_child(root, outer).unwrap();
        doc.append_child(outer, inner).unwrap();

        let mut list = AttachNodeList::new(inner);
        assert!(matches!(list.append(&mut doc, outer), Err(DomError::HierarchyRequest { .. })));
        assert!(matches!(list.insert(&mut doc, outer, None), Err(DomError::HierarchyRequest { .. })));
        assert!(matches!(list.append(&mut doc, inner), Err(DomError::HierarchyRequest { .. })));

        assert_eq!(doc.parent(outer), Some(root));
        assert_eq!(doc.children(root), &[outer]);
        assert_eq!(doc.parent(inner), Some(outer));
        assert!(!doc.has_flag(outer, ObjectFlags::HAS_REMOVED));
        assert!(!doc.has_flag(inner, ObjectFlags::HAS_REMOVED));
    }
}
