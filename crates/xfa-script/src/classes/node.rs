//! `node`: generic element operations

use xfa_dom::{Attribute, Document, ElementKind, NodeId};

use super::element;
use super::tree::TREE;
use crate::error::{ScriptError, ScriptResult};
use crate::slots::{arg_bool_or, arg_index, arg_str, Arity, ClassTable, MethodSlot, PropertyKind, PropertySlot};
use crate::value::ScriptValue;

pub(crate) static NODE: ClassTable = ClassTable {
    name: "node",
    parent: Some(&TREE),
    properties: &[
        PropertySlot::read_only("isContainer", PropertyKind::Scalar, is_container),
        PropertySlot::read_only("isNull", PropertyKind::Scalar, is_null),
        PropertySlot::read_only("model", PropertyKind::Object, model),
        PropertySlot::read_only("ns", PropertyKind::String, ns),
    ],
    methods: &[
        MethodSlot { name: "clone", arity: Arity::exactly(1), call: clone },
        MethodSlot { name: "getAttribute", arity: Arity::exactly(1), call: get_attribute },
        MethodSlot { name: "setAttribute", arity: Arity::exactly(2), call: set_attribute },
        MethodSlot { name: "getElement", arity: Arity::between(1, 2), call: get_element },
        MethodSlot { name: "isPropertySpecified", arity: Arity::between(1, 3), call: is_property_specified },
    ],
};

fn is_container(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(doc.node(id).is_some_and(|node| node.is_container()).into())
}

pub(super) fn is_null(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    element(doc, id)?;
    Ok(doc.try_content(id, true).is_none().into())
}

fn model(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::opt_node(doc, doc.model_node(id)))
}

fn ns(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    let packet = doc.node(id).map(|node| node.packet()).ok_or(xfa_dom::DomError::StaleNode(id))?;
    let declared = doc.try_cdata(id, Attribute::Ns, false, false);
    Ok(declared.unwrap_or(packet.namespace()).into())
}

fn clone(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let deep = arg_bool_or(args, 0, false);
    let copy = doc.clone_node(id, deep)?;
    Ok(ScriptValue::node(doc, copy))
}

fn get_attribute(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let name = arg_str("getAttribute", args, 0)?;
    element(doc, id)?;
    Ok(doc.attribute(id, name, true).unwrap_or_default().into())
}

/// `setAttribute(value, name)`
fn set_attribute(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let name = arg_str("setAttribute", args, 1)?;
    let value = args.first().map(ScriptValue::to_text).unwrap_or_default();
    doc.set_attribute(id, name, &value, true)?;
    Ok(ScriptValue::Undefined)
}

fn element_arg(method: &'static str, args: &[ScriptValue]) -> ScriptResult<ElementKind> {
    ElementKind::from_name(arg_str(method, args, 0)?)
        .ok_or(ScriptError::ArgumentType { method, index: 0, expected: "an element name" })
}

/// `getElement(name, index)`: the index-th child of that class; a missing
/// first occurrence is created
fn get_element(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let kind = element_arg("getElement", args)?;
    let index = if args.len() > 1 { arg_index("getElement", args, 1)? } else { 0 };
    if let Some(child) = doc.child(id, index, Some(kind)) {
        return Ok(ScriptValue::node(doc, child));
    }
    if index != 0 {
        return Ok(ScriptValue::Null);
    }
    let child = doc.create_same_packet_node(id, kind)?;
    doc.append_child(id, child)?;
    Ok(ScriptValue::node(doc, child))
}

/// `isPropertySpecified(name, inherit, index)`
fn is_property_specified(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let name = arg_str("isPropertySpecified", args, 0)?;
    let inherit = arg_bool_or(args, 1, true);
    let index = if args.len() > 2 { arg_index("isPropertySpecified", args, 2)? } else { 0 };
    element(doc, id)?;

    if let Some(attr) = Attribute::from_name(name) {
        return Ok(doc.has_attribute(id, attr, inherit).into());
    }
    let Some(kind) = ElementKind::from_name(name) else {
        return Ok(false.into());
    };
    let local = doc.child(id, index, Some(kind)).is_some();
    let inherited = inherit
        && doc
            .template_node(id)
            .is_some_and(|template| doc.child(template, index, Some(kind)).is_some());
    Ok((local || inherited).into())
}
