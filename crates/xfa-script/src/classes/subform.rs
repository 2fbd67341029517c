//! `subform` and `subformSet`

use xfa_dom::{Attribute, Document, NodeId};

use super::node::NODE;
use crate::error::{ScriptError, ScriptResult};
use crate::slots::{value_i32, ClassTable, PropertyKind, PropertySlot};
use crate::value::ScriptValue;

pub(crate) static SUBFORM: ClassTable = ClassTable {
    name: "subform",
    parent: Some(&NODE),
    properties: &[
        PropertySlot::read_only("instanceManager", PropertyKind::Object, instance_manager),
        PropertySlot::read_write("instanceIndex", PropertyKind::Scalar, instance_index, set_instance_index),
        PropertySlot::read_write("locale", PropertyKind::String, locale, set_locale),
    ],
    methods: &[],
};

fn instance_manager(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::opt_node(doc, doc.instance_manager_of(id)))
}

pub(super) fn instance_index(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::Integer(doc.instance_index(id).unwrap_or(0) as i32))
}

/// Writing the index moves the instance
pub(super) fn set_instance_index(doc: &mut Document, id: NodeId, value: &ScriptValue) -> ScriptResult<()> {
    let manager = doc.instance_manager_of(id).ok_or(ScriptError::NoInstanceManager(id))?;
    let from = doc.instance_index(id).ok_or(ScriptError::NoInstanceManager(id))?;
    let requested = value_i32("instanceIndex", value)?;
    let count = doc.instance_count(manager);
    let to = usize::try_from(requested)
        .ok()
        .filter(|&to| to < count)
        .ok_or(ScriptError::IndexOutOfRange { index: i64::from(requested), len: count })?;
    doc.move_instance(manager, to, from)?;
    Ok(())
}

/// Locale of the nearest node (this one or an ancestor) that declares one
fn locale(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    let mut current = Some(id);
    while let Some(node) = current {
        if let Some(locale) = doc.try_cdata(node, Attribute::Locale, false, true) {
            if !locale.is_empty() {
                return Ok(locale.into());
            }
        }
        current = doc.parent(node);
    }
    Ok("".into())
}

fn set_locale(doc: &mut Document, id: NodeId, value: &ScriptValue) -> ScriptResult<()> {
    doc.set_cdata(id, Attribute::Locale, &value.to_text(), true)?;
    Ok(())
}
