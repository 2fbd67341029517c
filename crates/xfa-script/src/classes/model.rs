//! Model nodes (`xfa`, `form`, `datasets`, `template`, ...)

use xfa_dom::{ArrayNodeList, Attribute, Document, DomError, ElementKind, NodeId};

use super::node::NODE;
use crate::error::{ScriptError, ScriptResult};
use crate::slots::{arg_node, arg_str, Arity, ClassTable, MethodSlot};
use crate::value::ScriptValue;

pub(crate) static MODEL: ClassTable = ClassTable {
    name: "model",
    parent: Some(&NODE),
    properties: &[],
    methods: &[MethodSlot { name: "createNode", arity: Arity::between(1, 3), call: create_node }],
};

pub(crate) static TEMPLATE_MODEL: ClassTable = ClassTable {
    name: "templateModel",
    parent: Some(&MODEL),
    properties: &[],
    methods: &[MethodSlot { name: "formNodes", arity: Arity::exactly(1), call: form_nodes }],
};

/// `createNode(className, name, namespace)`: a detached node in this
/// model's packet; the namespace argument is ignored
fn create_node(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let class = arg_str("createNode", args, 0)?;
    let element = ElementKind::from_name(class)
        .ok_or(ScriptError::ArgumentType { method: "createNode", index: 0, expected: "an element name" })?;
    let packet = doc.node(id).map(|node| node.packet()).ok_or(DomError::StaleNode(id))?;
    let node = doc.create_node(element, packet);
    if let Some(name) = args.get(1).filter(|value| !value.is_nullish()) {
        doc.set_cdata(node, Attribute::Name, &name.to_text(), false)?;
    }
    Ok(ScriptValue::node(doc, node))
}

/// Form nodes instantiated from a template node
fn form_nodes(doc: &mut Document, _id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let template = arg_node("formNodes", args, 0)?;
    Ok(ScriptValue::list(ArrayNodeList::from_nodes(doc.form_nodes_of(template))))
}
