//! Form node

use crate::element::{ElementKind, PacketType};
use crate::map_module::MapModule;
use crate::object::{ObjectFlags, ObjectType};
use crate::NodeId;

/// Opaque handle to the markup node a form node was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XmlHandle(pub u64);

/// Data binding state of a node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum Binding {
    #[default]
    None,
    /// Form node bound to one data node
    Data(NodeId),
    /// Data node backing one or more form nodes
    FormItems(Vec<NodeId>),
}

/// One element of a form document
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) object_type: ObjectType,
    pub(crate) flags: ObjectFlags,
    pub(crate) element: ElementKind,
    pub(crate) packet: PacketType,
    pub(crate) name_hash: u32,
    pub(crate) xml: Option<XmlHandle>,
    pub(crate) map: Option<Box<MapModule>>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Template node (form packet) or schema node (data description)
    pub(crate) aux: Option<NodeId>,
    pub(crate) binding: Binding,
}

impl Node {
    pub(crate) fn new(
        object_type: ObjectType,
        element: ElementKind,
        packet: PacketType,
        flags: ObjectFlags,
    ) -> Self {
        Self {
            object_type,
            flags,
            element,
            packet,
            name_hash: 0,
            xml: None,
            map: None,
            parent: None,
            children: Vec::new(),
            aux: None,
            binding: Binding::None,
        }
    }

    #[inline]
    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    #[inline]
    pub fn flags(&self) -> ObjectFlags {
        self.flags
    }

    #[inline]
    pub fn element(&self) -> ElementKind {
        self.element
    }

    #[inline]
    pub fn packet(&self) -> PacketType {
        self.packet
    }

    /// Hash of the node's name; 0 for an anonymous node
    #[inline]
    pub fn name_hash(&self) -> u32 {
        self.name_hash
    }

    pub fn xml(&self) -> Option<XmlHandle> {
        self.xml
    }

    pub fn owns_xml(&self) -> bool {
        self.flags.contains(ObjectFlags::OWN_XML_NODE)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attribute store, if anything was ever written
    pub fn map(&self) -> Option<&MapModule> {
        self.map.as_deref()
    }

    pub fn is_container(&self) -> bool {
        self.object_type.is_container_node()
    }

    pub(crate) fn map_mut(&mut self) -> &mut MapModule {
        self.map.get_or_insert_with(Box::default)
    }

    pub(crate) fn bound_data(&self) -> Option<NodeId> {
        match self.binding {
            Binding::Data(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn bound_forms(&self) -> &[NodeId] {
        match &self.binding {
            Binding::FormItems(forms) => forms,
            _ => &[],
        }
    }
}
