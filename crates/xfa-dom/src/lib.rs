//! XFA DOM - Forms Document Object Model
//!
//! Arena-backed tree of form nodes (template, form, data, config packets).
//! Every node carries a sparse attribute store, an optional link to the
//! template node it was instantiated from, and data bindings.
//!
//! # Example
//! ```rust
//! use xfa_dom::{Document, ElementKind, PacketType, Attribute};
//!
//! let mut doc = Document::new();
//! let subform = doc.create_node(ElementKind::Subform, PacketType::Template);
//! let field = doc.create_node(ElementKind::Field, PacketType::Template);
//! doc.set_cdata(field, Attribute::Name, "total", false).unwrap();
//! doc.append_child(subform, field).unwrap();
//!
//! assert_eq!(doc.first_child_by_name_str(subform, "total"), Some(field));
//! ```

mod attribute;
mod attributes;
mod binding;
mod config;
mod document;
mod element;
mod error;
mod hash;
mod instance;
mod map_module;
mod node;
mod node_list;
mod object;
mod observer;
mod snapshot;
mod som;
mod traverse;
mod tree;

use std::fmt;

pub use attribute::{AttrDefault, AttrEnum, Attribute, AttributeData, AttributeType, MeasureUnit, Measurement};
pub use config::DocumentConfig;
pub use document::{Document, NodeItem};
pub use element::{ElementKind, PacketType};
pub use error::{DomError, DomResult};
pub use hash::{name_hash, name_hash_ignore_case};
pub use instance::OccurBounds;
pub use map_module::{Blob, CloneBlob, MapKey, MapModule, MapValue, Scalar, UserKey};
pub use node::{Node, XmlHandle};
pub use node_list::{ArrayNodeList, AttachNodeList, NodeList, NodeListOps};
pub use object::{Object, ObjectFlags, ObjectType, OrdinaryObject, ThisProxy};
pub use observer::{DocumentObserver, MutationRecord, NoopObserver, RecordingObserver};
pub use snapshot::NodeSnapshot;
pub use traverse::{AllNodes, ContainerIterator, ContainerNodes, NodeIterator, Nodes, TraverseStrategy, XfaNodeIterator};
pub use tree::NodeTree;

/// Handle to a node in a [`Document`].
///
/// Carries the slot index and a generation counter so that a handle kept
/// after its node was destroyed never resolves to whatever reuses the slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Raw slot index (diagnostics only)
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation counter of the slot when this handle was issued
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.index, self.generation)
    }
}
