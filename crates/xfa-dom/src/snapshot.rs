//! Serializable structural snapshots
//!
//! A snapshot captures a subtree's shape and textual attributes without
//! node handles, so two subtrees can be compared for isomorphism or dumped
//! as JSON for debugging.

use serde::Serialize;

use crate::document::Document;
use crate::element::{ElementKind, PacketType};
use crate::object::ObjectType;
use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub element: ElementKind,
    pub packet: PacketType,
    pub object_type: ObjectType,
    pub name_hash: u32,
    /// Textual entries of the attribute store, sorted by key. Blobs are omitted.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<NodeSnapshot>,
}

impl Document {
    /// Snapshot the subtree rooted at `id`
    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        let node = self.node(id)?;
        let mut attributes: Vec<(String, String)> = node
            .map()
            .into_iter()
            .flat_map(|map| map.iter())
            .filter_map(|(key, value)| Some((key.to_string(), value.to_text()?)))
            .collect();
        attributes.sort();

        Some(NodeSnapshot {
            element: node.element(),
            packet: node.packet(),
            object_type: node.object_type(),
            name_hash: node.name_hash(),
            attributes,
            children: node.children().iter().filter_map(|&child| self.snapshot(child)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;

    #[test]
    fn test_snapshot_to_json() {
        let mut doc = Document::new();
        let subform = doc.create_named_node(ElementKind::Subform, PacketType::Form, "order");
        let field = doc.create_named_node(ElementKind::Field, PacketType::Form, "qty");
        doc.set_integer(field, Attribute::MaxChars, 4, false).unwrap();
        doc.append_child(subform, field).unwrap();

        let snapshot = doc.snapshot(subform).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["element"], "Subform");
        assert_eq!(json["object_type"], "ContainerNode");
        assert_eq!(json["children"][0]["attributes"][0], serde_json::json!(["maxChars", "4"]));
        assert_eq!(json["children"][0]["attributes"][1], serde_json::json!(["name", "qty"]));
    }

    #[test]
    fn test_stale_node_has_no_snapshot() {
        let mut doc = Document::new();
        let node = doc.create_node(ElementKind::Field, PacketType::Form);
        doc.destroy_node(node).unwrap();
        assert_eq!(doc.snapshot(node), None);
    }
}
