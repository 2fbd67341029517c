//! `occur`

use xfa_dom::{Attribute, Document, NodeId};

use super::node::NODE;
use crate::error::ScriptResult;
use crate::slots::{value_i32, ClassTable, PropertyKind, PropertySlot};
use crate::value::ScriptValue;

pub(crate) static OCCUR: ClassTable = ClassTable {
    name: "occur",
    parent: Some(&NODE),
    properties: &[
        PropertySlot::read_write("max", PropertyKind::Scalar, max, set_max),
        PropertySlot::read_write("min", PropertyKind::Scalar, min, set_min),
    ],
    methods: &[],
};

fn max(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::Integer(doc.integer(id, Attribute::Max)))
}

fn set_max(doc: &mut Document, id: NodeId, value: &ScriptValue) -> ScriptResult<()> {
    let max = value_i32("max", value)?;
    doc.set_integer(id, Attribute::Max, max.max(-1), true)?;
    Ok(())
}

fn min(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::Integer(doc.integer(id, Attribute::Min)))
}

fn set_min(doc: &mut Document, id: NodeId, value: &ScriptValue) -> ScriptResult<()> {
    let min = value_i32("min", value)?;
    doc.set_integer(id, Attribute::Min, min.max(0), true)?;
    Ok(())
}
