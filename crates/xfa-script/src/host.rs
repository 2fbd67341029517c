//! Property and method dispatch
//!
//! The interpreter calls these three entry points with a script object
//! and a member name. Node objects go through their class chain, then
//! through the element's attribute table, then to a child of that name.
//! `this` proxies forward to the node they stand for.

use tracing::{debug, trace, warn};
use xfa_dom::{Document, ElementKind, NodeId, NodeListOps, Object};

use crate::classes::{class_table, element, get_projected, projected_attribute, set_projected, LIST_METHODS, LIST_PROPERTIES};
use crate::error::{ScriptError, ScriptResult};
use crate::value::ScriptValue;

/// Node a script object stands for
fn target_node(object: &Object) -> Option<NodeId> {
    match object {
        Object::ThisProxy(proxy) => Some(proxy.this_node()),
        other => other.as_node(),
    }
}

fn unknown_property(doc: &Document, object: &Object, name: &str) -> ScriptError {
    warn!(class = object.class_name(doc), name, "unknown property");
    ScriptError::UnknownProperty { class: object.class_name(doc).to_string(), name: name.to_string() }
}

fn unknown_method(doc: &Document, object: &Object, name: &str) -> ScriptError {
    warn!(class = object.class_name(doc), name, "unknown method");
    ScriptError::UnknownMethod { class: object.class_name(doc).to_string(), name: name.to_string() }
}

/// Read `object.name`
pub fn get_property(doc: &Document, object: &Object, name: &str) -> ScriptResult<ScriptValue> {
    if let Some(id) = target_node(object) {
        return get_node_property(doc, object, id, name);
    }
    match (object, name) {
        (_, "className") => Ok(object.class_name(doc).into()),
        (Object::NodeList(list), _) => match LIST_PROPERTIES.iter().find(|slot| slot.name == name) {
            Some(slot) => (slot.get)(doc, list),
            None => Err(unknown_property(doc, object, name)),
        },
        (Object::OrdinaryList(items), "length") => Ok(ScriptValue::Integer(items.len() as i32)),
        _ => Err(unknown_property(doc, object, name)),
    }
}

fn get_node_property(doc: &Document, object: &Object, id: NodeId, name: &str) -> ScriptResult<ScriptValue> {
    let kind = element(doc, id)?;
    let table = class_table(kind);
    if let Some(slot) = table.find_property(name) {
        trace!(class = table.name, name, "property read");
        return (slot.get)(doc, id);
    }
    if let Some(data) = projected_attribute(kind, name) {
        return Ok(get_projected(doc, id, data.attribute));
    }
    let child = doc
        .first_child_by_name_str(id, name)
        .or_else(|| ElementKind::from_name(name).and_then(|class| doc.first_child_by_class(id, class)));
    match child {
        Some(child) => Ok(ScriptValue::node(doc, child)),
        None => Err(unknown_property(doc, object, name)),
    }
}

/// Write `object.name = value`
pub fn set_property(doc: &mut Document, object: &Object, name: &str, value: &ScriptValue) -> ScriptResult<()> {
    let Some(id) = target_node(object) else {
        let list_property = object.as_node_list().is_some() && LIST_PROPERTIES.iter().any(|slot| slot.name == name);
        if list_property || name == "className" {
            return Err(ScriptError::ReadOnly { class: object.class_name(doc).to_string(), name: name.to_string() });
        }
        return Err(unknown_property(doc, object, name));
    };

    let kind = element(doc, id)?;
    let table = class_table(kind);
    if let Some(slot) = table.find_property(name) {
        let Some(set) = slot.set else {
            warn!(class = table.name, name, "write to read-only property");
            return Err(ScriptError::ReadOnly { class: table.name.to_string(), name: name.to_string() });
        };
        debug!(class = table.name, name, ?value, "property write");
        return set(doc, id, value);
    }
    match projected_attribute(kind, name) {
        Some(data) => {
            debug!(element = kind.name(), name, ?value, "attribute write");
            set_projected(doc, id, data.attribute, value)
        }
        None => Err(unknown_property(doc, object, name)),
    }
}

/// Call `object.name(args)`
///
/// Takes the object mutably so that list methods can update an array list
/// held by the caller.
pub fn call_method(doc: &mut Document, object: &mut Object, name: &str, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    if let Some(id) = target_node(object) {
        let table = class_table(element(doc, id)?);
        let Some(slot) = table.find_method(name) else {
            return Err(unknown_method(doc, object, name));
        };
        slot.arity.check(slot.name, args.len())?;
        debug!(class = table.name, name, args = args.len(), "method call");
        return (slot.call)(doc, id, args);
    }

    let slot = LIST_METHODS.iter().find(|slot| slot.name == name);
    let (Some(slot), Some(_)) = (slot, object.as_node_list()) else {
        return Err(unknown_method(doc, object, name));
    };
    let Some(list) = object.as_node_list_mut() else {
        return Err(ScriptError::NotAList);
    };
    slot.arity.check(slot.name, args.len())?;
    debug!(name, args = args.len(), "list method call");
    (slot.call)(doc, list, args)
}

/// Length of a node list object
pub fn list_length(doc: &Document, object: &Object) -> ScriptResult<usize> {
    object.as_node_list().map(|list| list.len(doc)).ok_or(ScriptError::NotAList)
}

/// Node a script object refers to
pub fn object_node(object: &Object) -> ScriptResult<NodeId> {
    target_node(object).ok_or(ScriptError::NotANode)
}
