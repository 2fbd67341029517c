//! `instanceManager`

use tracing::debug;
use xfa_dom::{Document, NodeId};

use super::node::NODE;
use crate::error::{ScriptError, ScriptResult};
use crate::slots::{arg_index, value_i32, Arity, ClassTable, MethodSlot, PropertyKind, PropertySlot};
use crate::value::ScriptValue;

pub(crate) static INSTANCE_MANAGER: ClassTable = ClassTable {
    name: "instanceManager",
    parent: Some(&NODE),
    properties: &[
        PropertySlot::read_write("count", PropertyKind::Scalar, count, set_count),
        PropertySlot::read_only("max", PropertyKind::Scalar, max),
        PropertySlot::read_only("min", PropertyKind::Scalar, min),
    ],
    methods: &[
        MethodSlot { name: "moveInstance", arity: Arity::exactly(2), call: move_instance },
        MethodSlot { name: "removeInstance", arity: Arity::exactly(1), call: remove_instance },
        MethodSlot { name: "setInstances", arity: Arity::exactly(1), call: set_instances },
        MethodSlot { name: "addInstance", arity: Arity::between(0, 1), call: add_instance },
        MethodSlot { name: "insertInstance", arity: Arity::between(1, 2), call: insert_instance },
    ],
};

fn count(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::Integer(doc.instance_count(id) as i32))
}

fn set_count(doc: &mut Document, id: NodeId, value: &ScriptValue) -> ScriptResult<()> {
    let requested = value_i32("count", value)?;
    let count = usize::try_from(requested)
        .map_err(|_| ScriptError::ValueType { property: "count", expected: "a non-negative number" })?;
    doc.set_instances(id, count)?;
    Ok(())
}

/// `-1` when unbounded
fn max(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    let bounds = doc.occur_bounds(id);
    Ok(ScriptValue::Integer(bounds.max.map_or(-1, |max| max as i32)))
}

fn min(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::Integer(doc.occur_bounds(id).min as i32))
}

/// `moveInstance(from, to)`
fn move_instance(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let from = arg_index("moveInstance", args, 0)?;
    let to = arg_index("moveInstance", args, 1)?;
    doc.move_instance(id, to, from)?;
    debug!(manager = ?id, from, to, "script moved instance");
    Ok(ScriptValue::Undefined)
}

fn remove_instance(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let index = arg_index("removeInstance", args, 0)?;
    doc.remove_instance(id, index)?;
    Ok(ScriptValue::Undefined)
}

fn set_instances(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let count = arg_index("setInstances", args, 0)?;
    doc.set_instances(id, count)?;
    Ok(ScriptValue::Undefined)
}

/// `addInstance(merge)`; the merge flag is accepted and ignored
fn add_instance(doc: &mut Document, id: NodeId, _args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let instance = doc.add_instance(id)?;
    Ok(ScriptValue::node(doc, instance))
}

/// `insertInstance(index, merge)`
fn insert_instance(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let index = arg_index("insertInstance", args, 0)?;
    let instance = doc.insert_instance(id, index)?;
    Ok(ScriptValue::node(doc, instance))
}
