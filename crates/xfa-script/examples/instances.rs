//! Example: repeating a subform from script
//!
//! Run with `RUST_LOG=debug` to see the DOM and dispatch logs.

use tracing_subscriber::EnvFilter;
use xfa_dom::{Attribute, Document, DocumentConfig, ElementKind, Object, PacketType};
use xfa_script::{call_method, get_property, set_property, ScriptValue};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::with_config(DocumentConfig::default());
    let xfa = doc.create_node(ElementKind::Xfa, PacketType::Xdp);
    doc.set_root(xfa)?;
    let template = doc.create_node(ElementKind::Template, PacketType::Template);
    let form = doc.create_node(ElementKind::Form, PacketType::Form);
    let datasets = doc.create_node(ElementKind::Datasets, PacketType::Datasets);
    let data = doc.create_node(ElementKind::Data, PacketType::Datasets);
    doc.append_child(xfa, template)?;
    doc.append_child(xfa, form)?;
    doc.append_child(xfa, datasets)?;
    doc.append_child(datasets, data)?;

    let order = doc.create_named_node(ElementKind::Subform, PacketType::Template, "order");
    let item = doc.create_named_node(ElementKind::Subform, PacketType::Template, "item");
    let occur = doc.create_node(ElementKind::Occur, PacketType::Template);
    doc.set_integer(occur, Attribute::Min, 0, false)?;
    doc.set_integer(occur, Attribute::Max, -1, false)?;
    let price = doc.create_named_node(ElementKind::Field, PacketType::Template, "price");
    doc.append_child(template, order)?;
    doc.append_child(order, item)?;
    doc.append_child(item, occur)?;
    doc.append_child(item, price)?;

    let form_order = doc.clone_template_to_form(order, false)?;
    doc.append_child(form, form_order)?;
    let manager = doc.create_instance_manager(form_order, item)?;

    let mut manager_object = Object::from_node(&doc, manager).ok_or("manager vanished")?;
    set_property(&mut doc, &manager_object, "count", &3.into())?;

    for (index, row) in doc.instances(manager).into_iter().enumerate() {
        let Some(field) = doc.first_child_by_name_str(row, "price") else {
            continue;
        };
        let field_object = Object::from_node(&doc, field).ok_or("field vanished")?;
        set_property(&mut doc, &field_object, "rawValue", &format!("{}.99", index + 1).into())?;
    }

    call_method(&mut doc, &mut manager_object, "moveInstance", &[2.into(), 0.into()])?;

    for row in doc.instances(manager) {
        let row_object = Object::from_node(&doc, row).ok_or("row vanished")?;
        let som = get_property(&doc, &row_object, "somExpression")?;
        let price = get_property(&doc, &row_object, "price")?;
        let value = match price.as_object() {
            Some(object) => get_property(&doc, object, "rawValue")?,
            None => ScriptValue::Null,
        };
        println!("{} = {}", som.to_text(), value.to_text());
    }

    if let Some(data_root) = doc.data_root() {
        if let Some(snapshot) = doc.snapshot(data_root) {
            println!("data: {} groups", snapshot.children.len());
        }
    }
    Ok(())
}
