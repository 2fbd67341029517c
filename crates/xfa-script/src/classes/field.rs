//! `field` and `draw`

use xfa_dom::{Document, ElementKind, NodeId};

use super::element;
use super::node::NODE;
use crate::error::ScriptResult;
use crate::slots::{ClassTable, PropertyKind, PropertySlot};
use crate::value::ScriptValue;

pub(crate) static FIELD: ClassTable = ClassTable {
    name: "field",
    parent: Some(&NODE),
    properties: &[
        PropertySlot::read_write("rawValue", PropertyKind::String, raw_value, set_raw_value),
        PropertySlot::read_only("defaultValue", PropertyKind::String, default_value),
        PropertySlot::read_only("parentSubform", PropertyKind::Object, parent_subform),
    ],
    methods: &[],
};

/// `null` until a value is present
fn raw_value(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    element(doc, id)?;
    Ok(doc.try_content(id, true).map_or(ScriptValue::Null, ScriptValue::from))
}

/// Writes the field's value and the value of the data node it is bound to
fn set_raw_value(doc: &mut Document, id: NodeId, value: &ScriptValue) -> ScriptResult<()> {
    let text = value.to_text();
    doc.set_content(id, &text, true)?;
    if let Some(data) = doc.bind_data(id) {
        doc.set_content(data, &text, true)?;
    }
    Ok(())
}

/// Value declared on the template node
fn default_value(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    element(doc, id)?;
    let source = doc.template_node(id).unwrap_or(id);
    Ok(doc.try_content(source, true).map_or(ScriptValue::Null, ScriptValue::from))
}

fn parent_subform(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    let mut current = doc.parent(id);
    while let Some(node) = current {
        if doc.element_of(node) == Some(ElementKind::Subform) {
            return Ok(ScriptValue::node(doc, node));
        }
        current = doc.parent(node);
    }
    Ok(ScriptValue::Null)
}
