//! `packet`: an opaque XDP packet with free-form attributes

use xfa_dom::{Document, NodeId};

use super::element;
use super::node::NODE;
use crate::error::ScriptResult;
use crate::slots::{arg_str, Arity, ClassTable, MethodSlot, PropertyKind, PropertySlot};
use crate::value::ScriptValue;

pub(crate) static PACKET: ClassTable = ClassTable {
    name: "packet",
    parent: Some(&NODE),
    properties: &[PropertySlot::read_write("content", PropertyKind::String, content, set_content)],
    methods: &[
        MethodSlot { name: "getAttribute", arity: Arity::exactly(1), call: get_attribute },
        MethodSlot { name: "setAttribute", arity: Arity::exactly(2), call: set_attribute },
        MethodSlot { name: "removeAttribute", arity: Arity::exactly(1), call: remove_attribute },
    ],
};

fn content(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    element(doc, id)?;
    Ok(doc.content(id).into())
}

fn set_content(doc: &mut Document, id: NodeId, value: &ScriptValue) -> ScriptResult<()> {
    doc.set_content(id, &value.to_text(), true)?;
    Ok(())
}

fn get_attribute(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let name = arg_str("getAttribute", args, 0)?;
    element(doc, id)?;
    Ok(doc.attribute(id, name, false).unwrap_or_default().into())
}

/// `setAttribute(name, value)`; note the argument order differs from `node`
fn set_attribute(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let name = arg_str("setAttribute", args, 0)?;
    let value = args.get(1).map(ScriptValue::to_text).unwrap_or_default();
    doc.set_attribute(id, name, &value, true)?;
    Ok(ScriptValue::Undefined)
}

fn remove_attribute(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let name = arg_str("removeAttribute", args, 0)?;
    doc.remove_attribute(id, name)?;
    Ok(ScriptValue::Undefined)
}
