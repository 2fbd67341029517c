//! Script class tables
//!
//! One static table per script class. Element kinds map onto the most
//! specific class; anything a class does not list falls back to its
//! parent and finally to the element's attribute table.

mod data;
mod field;
mod instance_manager;
mod list;
mod model;
mod node;
mod object;
mod occur;
mod packet;
mod subform;
mod tree;

use xfa_dom::{Attribute, AttributeData, AttributeType, Document, DomError, ElementKind, NodeId};

use crate::error::ScriptResult;
use crate::slots::ClassTable;
use crate::value::ScriptValue;

pub use list::{LIST_METHODS, LIST_PROPERTIES};

/// Most specific class table for nodes of `element`
pub fn class_table(element: ElementKind) -> &'static ClassTable {
    match element {
        ElementKind::Subform | ElementKind::SubformSet => &subform::SUBFORM,
        ElementKind::InstanceManager => &instance_manager::INSTANCE_MANAGER,
        ElementKind::Occur => &occur::OCCUR,
        ElementKind::Field | ElementKind::Draw => &field::FIELD,
        ElementKind::DataValue => &data::DATA_VALUE,
        ElementKind::Template => &model::TEMPLATE_MODEL,
        ElementKind::Xfa | ElementKind::Config | ElementKind::Form | ElementKind::Datasets => &model::MODEL,
        ElementKind::Packet => &packet::PACKET,
        _ => &node::NODE,
    }
}

/// Element of a live node
pub(crate) fn element(doc: &Document, id: NodeId) -> ScriptResult<ElementKind> {
    Ok(doc.element_of(id).ok_or(DomError::StaleNode(id))?)
}

/// Attribute of `element` reachable as a plain script property
pub(crate) fn projected_attribute(element: ElementKind, name: &str) -> Option<&'static AttributeData> {
    element.attribute_data().iter().find(|data| data.attribute.name() == name)
}

pub(crate) fn get_projected(doc: &Document, id: NodeId, attr: Attribute) -> ScriptValue {
    match attr.attr_type() {
        AttributeType::CData => doc.cdata(id, attr).into(),
        AttributeType::Boolean => doc.boolean(id, attr).into(),
        AttributeType::Integer => doc.integer(id, attr).into(),
        AttributeType::Enum => doc
            .enum_value(id, attr)
            .map_or(ScriptValue::Null, |value| value.name().into()),
        AttributeType::Measure => doc.measure(id, attr).to_string().into(),
    }
}

pub(crate) fn set_projected(doc: &mut Document, id: NodeId, attr: Attribute, value: &ScriptValue) -> ScriptResult<()> {
    let text = match value {
        ScriptValue::Bool(true) => "1".to_string(),
        ScriptValue::Bool(false) => "0".to_string(),
        other => other.to_text(),
    };
    doc.set_attribute(id, attr.name(), &text, true)?;
    Ok(())
}
