//! `dataValue`

use xfa_dom::{Document, NodeId};

use super::element;
use super::node::NODE;
use crate::error::ScriptResult;
use crate::slots::{ClassTable, PropertyKind, PropertySlot};
use crate::value::ScriptValue;

pub(crate) static DATA_VALUE: ClassTable = ClassTable {
    name: "dataValue",
    parent: Some(&NODE),
    properties: &[
        PropertySlot::read_write("value", PropertyKind::String, value, set_value),
        PropertySlot::read_only("isNull", PropertyKind::Scalar, super::node::is_null),
    ],
    methods: &[],
};

fn value(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    element(doc, id)?;
    Ok(doc.content(id).into())
}

fn set_value(doc: &mut Document, id: NodeId, value: &ScriptValue) -> ScriptResult<()> {
    doc.set_content(id, &value.to_text(), true)?;
    Ok(())
}
