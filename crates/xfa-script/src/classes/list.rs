//! `nodeList`: shared surface of array and live lists

use xfa_dom::{Document, NodeList, NodeListOps};

use crate::error::{ScriptError, ScriptResult};
use crate::slots::{arg_i32, arg_node, arg_str, Arity, ListMethodSlot, ListPropertySlot};
use crate::value::ScriptValue;

pub static LIST_PROPERTIES: &[ListPropertySlot] = &[ListPropertySlot { name: "length", get: length }];

pub static LIST_METHODS: &[ListMethodSlot] = &[
    ListMethodSlot { name: "append", arity: Arity::exactly(1), call: append },
    ListMethodSlot { name: "insert", arity: Arity::exactly(2), call: insert },
    ListMethodSlot { name: "remove", arity: Arity::exactly(1), call: remove },
    ListMethodSlot { name: "item", arity: Arity::exactly(1), call: item },
    ListMethodSlot { name: "namedItem", arity: Arity::exactly(1), call: named_item },
];

fn length(doc: &Document, list: &NodeList) -> ScriptResult<ScriptValue> {
    Ok(ScriptValue::Integer(list.len(doc) as i32))
}

fn append(doc: &mut Document, list: &mut NodeList, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let node = arg_node("append", args, 0)?;
    list.append(doc, node)?;
    Ok(ScriptValue::Undefined)
}

/// `insert(node, before)`; a null `before` appends
fn insert(doc: &mut Document, list: &mut NodeList, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let node = arg_node("insert", args, 0)?;
    let before = match args.get(1) {
        Some(value) if value.is_nullish() => None,
        _ => Some(arg_node("insert", args, 1)?),
    };
    list.insert(doc, node, before)?;
    Ok(ScriptValue::Undefined)
}

fn remove(doc: &mut Document, list: &mut NodeList, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let node = arg_node("remove", args, 0)?;
    list.remove(doc, node)?;
    Ok(ScriptValue::Undefined)
}

fn item(doc: &mut Document, list: &mut NodeList, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let index = arg_i32("item", args, 0)?;
    let len = list.len(doc);
    let node = usize::try_from(index)
        .ok()
        .and_then(|index| list.item(doc, index))
        .ok_or(ScriptError::IndexOutOfRange { index: i64::from(index), len })?;
    Ok(ScriptValue::node(doc, node))
}

fn named_item(doc: &mut Document, list: &mut NodeList, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
    let name = arg_str("namedItem", args, 0)?;
    Ok(ScriptValue::opt_node(doc, list.named_item(doc, name)))
}
