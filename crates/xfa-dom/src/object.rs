//! Object kinds
//!
//! Every script-visible object has a fixed [`ObjectType`] chosen at
//! construction. Nodes additionally carry mutable [`ObjectFlags`] that change
//! over their lifecycle. Capability queries are pattern matches on the type.

use serde::Serialize;

use crate::document::Document;
use crate::element::ElementKind;
use crate::hash::name_hash;
use crate::node_list::NodeList;
use crate::NodeId;

/// Object category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectType {
    OrdinaryObject,
    OrdinaryList,
    NodeList,
    /// Plain node
    Node,
    /// Node with character content
    NodeC,
    /// Node with a typed value
    NodeV,
    ModelNode,
    TextNode,
    ContainerNode,
    ContentNode,
    /// Proxy for `this` inside a variables script
    VariablesThis,
}

impl ObjectType {
    /// Any node category (not lists, ordinary objects, or the `this` proxy)
    #[inline]
    pub const fn is_node(self) -> bool {
        matches!(
            self,
            Self::Node
                | Self::NodeC
                | Self::NodeV
                | Self::ModelNode
                | Self::TextNode
                | Self::ContainerNode
                | Self::ContentNode
        )
    }

    #[inline]
    pub const fn is_ordinary_object(self) -> bool {
        matches!(self, Self::OrdinaryObject)
    }

    #[inline]
    pub const fn is_node_list(self) -> bool {
        matches!(self, Self::NodeList)
    }

    #[inline]
    pub const fn is_ordinary_list(self) -> bool {
        matches!(self, Self::OrdinaryList)
    }

    #[inline]
    pub const fn is_content_node(self) -> bool {
        matches!(self, Self::ContentNode)
    }

    #[inline]
    pub const fn is_container_node(self) -> bool {
        matches!(self, Self::ContainerNode)
    }

    #[inline]
    pub const fn is_model_node(self) -> bool {
        matches!(self, Self::ModelNode)
    }

    #[inline]
    pub const fn is_text_node(self) -> bool {
        matches!(self, Self::TextNode)
    }

    /// Whether nodes of this category store character content
    #[inline]
    pub const fn has_content(self) -> bool {
        matches!(self, Self::NodeC | Self::NodeV | Self::TextNode | Self::ContentNode)
    }
}

/// Mutable lifecycle flags of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObjectFlags(u32);

impl ObjectFlags {
    pub const EMPTY: ObjectFlags = ObjectFlags(0);
    pub const INITIALIZED: ObjectFlags = ObjectFlags(0x00020);
    pub const HAS_REMOVED: ObjectFlags = ObjectFlags(0x00200);
    pub const NEEDS_INIT_APP: ObjectFlags = ObjectFlags(0x00400);
    pub const BIND_FORM_ITEMS: ObjectFlags = ObjectFlags(0x00800);
    pub const USER_INTERACTIVE: ObjectFlags = ObjectFlags(0x01000);
    pub const SKIP_DATA_BINDING: ObjectFlags = ObjectFlags(0x02000);
    pub const OWN_XML_NODE: ObjectFlags = ObjectFlags(0x04000);
    pub const UNUSED_NODE: ObjectFlags = ObjectFlags(0x08000);
    pub const LAYOUT_GENERATED_NODE: ObjectFlags = ObjectFlags(0x10000);

    /// Raw bit pattern
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check whether every bit of `other` is set
    #[inline]
    pub const fn contains(self, other: ObjectFlags) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union of two flag sets
    #[inline]
    pub const fn or(self, other: ObjectFlags) -> ObjectFlags {
        ObjectFlags(self.0 | other.0)
    }

    /// `self` with the bits of `other` cleared
    #[inline]
    pub const fn without(self, other: ObjectFlags) -> ObjectFlags {
        ObjectFlags(self.0 & !other.0)
    }

    pub fn insert(&mut self, other: ObjectFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: ObjectFlags) {
        self.0 &= !other.0;
    }
}

/// Scripting object that is not part of the node tree (e.g. `$host`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinaryObject {
    element: ElementKind,
    script_hash: u32,
}

impl OrdinaryObject {
    pub fn new(element: ElementKind) -> Self {
        Self {
            element,
            script_hash: name_hash(element.name()),
        }
    }

    pub fn element(&self) -> ElementKind {
        self.element
    }

    pub fn script_hash(&self) -> u32 {
        self.script_hash
    }
}

/// `this` as seen from a script declared in a `<variables>` block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThisProxy {
    this_node: NodeId,
    script_node: NodeId,
}

impl ThisProxy {
    pub fn new(this_node: NodeId, script_node: NodeId) -> Self {
        Self { this_node, script_node }
    }

    pub fn this_node(&self) -> NodeId {
        self.this_node
    }

    pub fn script_node(&self) -> NodeId {
        self.script_node
    }
}

/// Script-visible object
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Ordinary(OrdinaryObject),
    OrdinaryList(Vec<OrdinaryObject>),
    NodeList(NodeList),
    Node { id: NodeId, object_type: ObjectType },
    ThisProxy(ThisProxy),
}

impl Object {
    /// Script object for a live node
    pub fn from_node(doc: &Document, id: NodeId) -> Option<Object> {
        let object_type = doc.node(id)?.object_type();
        Some(Object::Node { id, object_type })
    }

    /// Fixed category of this object
    pub fn category(&self) -> ObjectType {
        match self {
            Object::Ordinary(_) => ObjectType::OrdinaryObject,
            Object::OrdinaryList(_) => ObjectType::OrdinaryList,
            Object::NodeList(_) => ObjectType::NodeList,
            Object::Node { object_type, .. } => *object_type,
            Object::ThisProxy(_) => ObjectType::VariablesThis,
        }
    }

    pub fn is_node(&self) -> bool {
        self.category().is_node()
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Object::Node { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn as_node_list(&self) -> Option<&NodeList> {
        match self {
            Object::NodeList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_node_list_mut(&mut self) -> Option<&mut NodeList> {
        match self {
            Object::NodeList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_ordinary_object(&self) -> Option<&OrdinaryObject> {
        match self {
            Object::Ordinary(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_this_proxy(&self) -> Option<&ThisProxy> {
        match self {
            Object::ThisProxy(proxy) => Some(proxy),
            _ => None,
        }
    }

    /// Script class name (`subform`, `nodeList`, ...)
    ///
    /// Nodes report their element's class; a stale node handle reports
    /// an empty name.
    pub fn class_name(&self, doc: &Document) -> &'static str {
        match self {
            Object::Ordinary(obj) => obj.element().name(),
            Object::OrdinaryList(_) => "list",
            Object::NodeList(_) => "nodeList",
            Object::Node { id, .. } => doc.node(*id).map_or("", |node| node.element().name()),
            Object::ThisProxy(proxy) => doc
                .node(proxy.this_node())
                .map_or("", |node| node.element().name()),
        }
    }
}

impl From<NodeList> for Object {
    fn from(list: NodeList) -> Self {
        Object::NodeList(list)
    }
}
