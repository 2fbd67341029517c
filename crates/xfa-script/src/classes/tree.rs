//! `tree`: naming, position and SOM resolution shared by all nodes

use xfa_dom::{ArrayNodeList, AttachNodeList, Attribute, Document, NodeId};

use super::object::OBJECT;
use crate::error::ScriptResult;
use crate::slots::{arg_str, Arity, ClassTable, MethodSlot, PropertyKind, PropertySlot};
use crate::value::ScriptValue;

pub(crate) static TREE: ClassTable = ClassTable {
    name: "tree",
    parent: Some(&OBJECT),
    properties: &[
        PropertySlot::read_write("name", PropertyKind::String, name, set_name),
        PropertySlot::read_only("parent", PropertyKind::Object, parent),
        PropertySlot::read_only("index", PropertyKind::Scalar, index),
        PropertySlot::read_only("classIndex", PropertyKind::Scalar, class_index),
        PropertySlot::read_only("somExpression", PropertyKind::String, som_expression),
        PropertySlot::read_only("nodes", PropertyKind::Object, nodes),
        PropertySlot::read_only("all", PropertyKind::Object, all),
        PropertySlot::read_only("classAll", PropertyKind::Object, class_all),
    ],
    methods: &[
        MethodSlot { name: "resolveNode", arity: Arity::exactly(1), call: resolve_node },
        MethodSlot { name: "resolveNodes", arity: Arity::exactly(1), call: resolve_nodes },
    ],
};

fn name(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(doc.name(id).into())
}

fn set_name(doc: &mut Document, id: NodeId, value: &ScriptValue) -> ScriptResult<()> {
    doc.set_cdata(id, Attribute::Name, &value.to_text(), true)?;
    Ok(())
}

fn parent(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::opt_node(doc, doc.parent(id)))
}

fn index(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::Integer(doc.same_name_index(id) as i32))
}

fn class_index(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::Integer(doc.same_class_index(id) as i32))
}

fn som_expression(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(doc.som_expression(id).into())
}

fn nodes(_doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::list(AttachNodeList::new(id)))
}

/// Siblings (including `id`) accepted by `keep`; just `id` for a root
fn siblings_where(doc: &Document, id: NodeId, keep: impl Fn(NodeId) -> bool) -> Vec<NodeId> {
    match doc.parent(id) {
        Some(parent) => doc.children(parent).iter().copied().filter(|&n| keep(n)).collect(),
        None => vec![id],
    }
}

fn all(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    let hash = doc.name_hash(id);
    let element = doc.element_of(id);
    let members = siblings_where(doc, id, |sibling| {
        if hash == 0 {
            sibling == id
        } else {
            doc.name_hash(sibling) == hash && doc.element_of(sibling) == element
        }
    });
    Ok(ScriptValue::list(ArrayNodeList::from_nodes(members)))
}

fn class_all(doc: &Document, id: NodeId) -> ScriptResult<ScriptValue> {
    let element = doc.element_of(id);
    let members = siblings_where(doc, id, |sibling| doc.element_of(sibling) == element);
    Ok(ScriptValue::list(ArrayNodeList::from_nodes(members)))
}

fn resolve_node(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let expr = arg_str("resolveNode", args, 0)?;
    Ok(ScriptValue::opt_node(doc, doc.resolve_node(id, expr)))
}

fn resolve_nodes(doc: &mut Document, id: NodeId, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let expr = arg_str("resolveNodes", args, 0)?;
    Ok(ScriptValue::list(ArrayNodeList::from_nodes(doc.resolve_nodes(id, expr))))
}
