//! `object`: root of every class chain

use xfa_dom::{Document, NodeId};

use super::element;
use crate::error::ScriptResult;
use crate::slots::{ClassTable, PropertyKind, PropertySlot};
use crate::value::ScriptValue;

pub(crate) static OBJECT: ClassTable = ClassTable {
    name: "object",
    parent: None,
    properties: &[PropertySlot::read_only("className", PropertyKind::String, class_name)],
    methods: &[],
};

fn class_name(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(element(doc, id)?.name().into())
}
