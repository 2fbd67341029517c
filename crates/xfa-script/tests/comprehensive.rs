//! Comprehensive tests for xfa-script
//!
//! Drives the class tables through the host entry points over a
//! template/form/data document with one repeated subform.

use xfa_dom::{
    AttrEnum, Attribute, Document, DomError, ElementKind, NodeId, Object, OrdinaryObject, PacketType, ThisProxy,
};
use xfa_script::{call_method, class_table, get_property, list_length, object_node, set_property, ScriptError, ScriptValue};

/// xfa > [template > root > row > [occur, amount], form > root > _row, datasets > data > root]
struct Fixture {
    doc: Document,
    template: NodeId,
    form: NodeId,
    template_row: NodeId,
    template_amount: NodeId,
    form_root: NodeId,
    manager: NodeId,
}

fn fixture(min: i32, max: i32) -> Fixture {
    let mut doc = Document::new();
    let xfa = doc.create_node(ElementKind::Xfa, PacketType::Xdp);
    doc.set_root(xfa).unwrap();
    let template = doc.create_node(ElementKind::Template, PacketType::Template);
    let form = doc.create_node(ElementKind::Form, PacketType::Form);
    let datasets = doc.create_node(ElementKind::Datasets, PacketType::Datasets);
    let data = doc.create_node(ElementKind::Data, PacketType::Datasets);
    doc.append_child(xfa, template).unwrap();
    doc.append_child(xfa, form).unwrap();
    doc.append_child(xfa, datasets).unwrap();
    doc.append_child(datasets, data).unwrap();

    let template_root = doc.create_named_node(ElementKind::Subform, PacketType::Template, "root");
    let template_row = doc.create_named_node(ElementKind::Subform, PacketType::Template, "row");
    let occur = doc.create_node(ElementKind::Occur, PacketType::Template);
    doc.set_integer(occur, Attribute::Min, min, false).unwrap();
    doc.set_integer(occur, Attribute::Max, max, false).unwrap();
    let template_amount = doc.create_named_node(ElementKind::Field, PacketType::Template, "amount");
    doc.append_child(template, template_root).unwrap();
    doc.append_child(template_root, template_row).unwrap();
    doc.append_child(template_row, occur).unwrap();
    doc.append_child(template_row, template_amount).unwrap();

    let form_root = doc.clone_template_to_form(template_root, false).unwrap();
    doc.append_child(form, form_root).unwrap();
    let data_root_group = doc.create_named_node(ElementKind::DataGroup, PacketType::Datasets, "root");
    doc.append_child(data, data_root_group).unwrap();
    doc.add_bind_item(data_root_group, form_root).unwrap();

    let manager = doc.create_instance_manager(form_root, template_row).unwrap();
    Fixture { doc, template, form, template_row, template_amount, form_root, manager }
}

fn obj(doc: &Document, id: NodeId) -> Object {
    Object::from_node(doc, id).unwrap()
}

fn get(doc: &Document, id: NodeId, name: &str) -> ScriptValue {
    get_property(doc, &obj(doc, id), name).unwrap()
}

fn set(doc: &mut Document, id: NodeId, name: &str, value: impl Into<ScriptValue>) -> Result<(), ScriptError> {
    let object = obj(doc, id);
    set_property(doc, &object, name, &value.into())
}

fn call(doc: &mut Document, id: NodeId, name: &str, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let mut object = obj(doc, id);
    call_method(doc, &mut object, name, args)
}

fn node_of(value: &ScriptValue) -> NodeId {
    value.as_node().expect("node value")
}

fn packet_for(kind: ElementKind) -> PacketType {
    match kind {
        ElementKind::Xfa => PacketType::Xdp,
        ElementKind::Template => PacketType::Template,
        ElementKind::Data | ElementKind::DataGroup | ElementKind::DataValue | ElementKind::Datasets => {
            PacketType::Datasets
        }
        ElementKind::Config | ElementKind::Present | ElementKind::PickTrayByPdfSize => PacketType::Config,
        _ => PacketType::Form,
    }
}

// ============================================================================
// CLASS TABLES
// ============================================================================

#[test]
fn test_every_class_chains_to_object() {
    for kind in ElementKind::ALL {
        let table = class_table(kind);
        assert_eq!(table.chain().last().map(|t| t.name), Some("object"), "{kind:?}");
        assert!(table.find_property("className").is_some());
    }
    assert_eq!(class_table(ElementKind::Draw).name, "field");
    assert_eq!(class_table(ElementKind::SubformSet).name, "subform");
    assert_eq!(class_table(ElementKind::Bind).name, "node");
}

#[test]
fn test_every_property_readable_on_fresh_node() {
    let mut doc = Document::new();
    for kind in ElementKind::ALL {
        let id = doc.create_node(kind, packet_for(kind));
        let object = obj(&doc, id);
        for table in class_table(kind).chain() {
            for slot in table.properties {
                let result = get_property(&doc, &object, slot.name);
                assert!(result.is_ok(), "{kind:?}.{} failed: {result:?}", slot.name);
            }
        }
    }
}

#[test]
fn test_class_name_reports_element() {
    let fx = fixture(0, -1);
    assert_eq!(get(&fx.doc, fx.manager, "className"), ScriptValue::from("instanceManager"));
    assert_eq!(get(&fx.doc, fx.template, "className"), ScriptValue::from("template"));
    assert_eq!(get(&fx.doc, fx.form_root, "className"), ScriptValue::from("subform"));
}

// ============================================================================
// INSTANCE MANAGER
// ============================================================================

#[test]
fn test_instance_manager_count_and_bounds() {
    let mut fx = fixture(0, -1);
    set(&mut fx.doc, fx.manager, "count", 3).unwrap();
    assert_eq!(fx.doc.instance_count(fx.manager), 3);
    assert_eq!(get(&fx.doc, fx.manager, "count"), ScriptValue::Integer(3));
    assert_eq!(get(&fx.doc, fx.manager, "max"), ScriptValue::Integer(-1));
    assert_eq!(get(&fx.doc, fx.manager, "min"), ScriptValue::Integer(0));

    set(&mut fx.doc, fx.manager, "count", ScriptValue::from("1")).unwrap();
    assert_eq!(fx.doc.instance_count(fx.manager), 1);
}

#[test]
fn test_instance_manager_methods() {
    let mut fx = fixture(0, -1);
    let added = call(&mut fx.doc, fx.manager, "addInstance", &[]).unwrap();
    assert_eq!(fx.doc.instance(fx.manager, 0), Some(node_of(&added)));

    let inserted = call(&mut fx.doc, fx.manager, "insertInstance", &[0.into()]).unwrap();
    assert_eq!(fx.doc.instances(fx.manager), vec![node_of(&inserted), node_of(&added)]);

    call(&mut fx.doc, fx.manager, "setInstances", &[4.into()]).unwrap();
    assert_eq!(fx.doc.instance_count(fx.manager), 4);

    call(&mut fx.doc, fx.manager, "removeInstance", &[1.into()]).unwrap();
    let instances = fx.doc.instances(fx.manager);
    assert_eq!(instances.len(), 3);
    assert_eq!(instances[0], node_of(&inserted));
    assert!(!fx.doc.contains(node_of(&added)));
}

#[test]
fn test_move_instance_takes_from_then_to() {
    let mut fx = fixture(0, -1);
    fx.doc.set_instances(fx.manager, 3).unwrap();
    let [a, b, c] = <[NodeId; 3]>::try_from(fx.doc.instances(fx.manager)).unwrap();

    call(&mut fx.doc, fx.manager, "moveInstance", &[0.into(), 2.into()]).unwrap();
    assert_eq!(fx.doc.instances(fx.manager), vec![b, c, a]);
}

#[test]
fn test_instance_index_write_moves_instance() {
    let mut fx = fixture(0, -1);
    fx.doc.set_instances(fx.manager, 3).unwrap();
    let [a, b, c] = <[NodeId; 3]>::try_from(fx.doc.instances(fx.manager)).unwrap();

    assert_eq!(get(&fx.doc, c, "instanceIndex"), ScriptValue::Integer(2));
    set(&mut fx.doc, c, "instanceIndex", 0).unwrap();
    assert_eq!(fx.doc.instances(fx.manager), vec![c, a, b]);
    assert_eq!(get(&fx.doc, a, "instanceIndex"), ScriptValue::Integer(1));
    assert_eq!(node_of(&get(&fx.doc, a, "instanceManager")), fx.manager);
}

#[test]
fn test_instance_count_limited_by_occur() {
    let mut fx = fixture(1, 2);
    fx.doc.set_instances(fx.manager, 1).unwrap();
    let err = set(&mut fx.doc, fx.manager, "count", 3).unwrap_err();
    assert!(matches!(err, ScriptError::Dom(DomError::OccurrenceViolation { requested: 3, .. })));
    assert_eq!(fx.doc.instance_count(fx.manager), 1);
}

#[test]
fn test_occur_properties_drive_bounds() {
    let mut fx = fixture(0, 2);
    let occur = fx.doc.occur_node(fx.manager).unwrap();
    assert_eq!(get(&fx.doc, occur, "max"), ScriptValue::Integer(2));

    set(&mut fx.doc, occur, "max", 5).unwrap();
    set(&mut fx.doc, occur, "min", 1).unwrap();
    assert_eq!(get(&fx.doc, fx.manager, "max"), ScriptValue::Integer(5));
    assert_eq!(get(&fx.doc, fx.manager, "min"), ScriptValue::Integer(1));

    set(&mut fx.doc, occur, "max", -7).unwrap();
    assert_eq!(get(&fx.doc, fx.manager, "max"), ScriptValue::Integer(-1));
}

// ============================================================================
// FIELDS AND DATA
// ============================================================================

#[test]
fn test_raw_value_mirrors_into_bound_data() {
    let mut fx = fixture(0, -1);
    let row = fx.doc.add_instance(fx.manager).unwrap();
    let amount = fx.doc.first_child_by_name_str(row, "amount").unwrap();
    let data = fx.doc.bind_data(amount).unwrap();

    assert_eq!(get(&fx.doc, amount, "rawValue"), ScriptValue::Null);
    assert_eq!(get(&fx.doc, data, "isNull"), ScriptValue::Bool(true));

    set(&mut fx.doc, amount, "rawValue", "12.50").unwrap();
    assert_eq!(get(&fx.doc, amount, "rawValue"), ScriptValue::from("12.50"));
    assert_eq!(get(&fx.doc, data, "value"), ScriptValue::from("12.50"));
    assert_eq!(get(&fx.doc, data, "isNull"), ScriptValue::Bool(false));
}

#[test]
fn test_data_value_write() {
    let mut doc = Document::new();
    let value = doc.create_named_node(ElementKind::DataValue, PacketType::Datasets, "qty");
    set(&mut doc, value, "value", 3).unwrap();
    assert_eq!(doc.content(value), "3");
}

#[test]
fn test_default_value_comes_from_template() {
    let mut fx = fixture(0, -1);
    fx.doc.set_content(fx.template_amount, "5", false).unwrap();
    let row = fx.doc.add_instance(fx.manager).unwrap();
    let amount = fx.doc.first_child_by_name_str(row, "amount").unwrap();
    assert_eq!(get(&fx.doc, amount, "defaultValue"), ScriptValue::from("5"));
}

#[test]
fn test_parent_subform() {
    let mut fx = fixture(0, -1);
    let row = fx.doc.add_instance(fx.manager).unwrap();
    let amount = fx.doc.first_child_by_name_str(row, "amount").unwrap();
    assert_eq!(node_of(&get(&fx.doc, amount, "parentSubform")), row);
    assert_eq!(get(&fx.doc, fx.template_amount, "parentSubform").as_node(), Some(fx.template_row));
}

// ============================================================================
// ATTRIBUTE PROJECTION
// ============================================================================

#[test]
fn test_projected_attributes() {
    let mut doc = Document::new();
    let field = doc.create_named_node(ElementKind::Field, PacketType::Form, "total");
    assert_eq!(get(&doc, field, "presence"), ScriptValue::from("visible"));
    assert_eq!(get(&doc, field, "w"), ScriptValue::from("0in"));
    assert_eq!(get(&doc, field, "allowMacro"), ScriptValue::Bool(false));

    set(&mut doc, field, "presence", "hidden").unwrap();
    set(&mut doc, field, "allowMacro", true).unwrap();
    set(&mut doc, field, "w", "2cm").unwrap();
    assert_eq!(doc.enum_value(field, Attribute::Presence), Some(AttrEnum::Hidden));
    assert!(doc.boolean(field, Attribute::AllowMacro));
    assert_eq!(get(&doc, field, "w"), ScriptValue::from("2cm"));
}

#[test]
fn test_child_reachable_by_name_or_class() {
    let mut fx = fixture(0, -1);
    let row = fx.doc.add_instance(fx.manager).unwrap();
    let amount = fx.doc.first_child_by_name_str(row, "amount").unwrap();
    assert_eq!(node_of(&get(&fx.doc, row, "amount")), amount);
    let occur = fx.doc.occur_node(fx.manager).unwrap();
    assert_eq!(node_of(&get(&fx.doc, fx.manager, "occur")), occur);
}

// ============================================================================
// TREE AND SOM
// ============================================================================

#[test]
fn test_name_index_and_som_expression() {
    let mut fx = fixture(0, -1);
    fx.doc.set_instances(fx.manager, 2).unwrap();
    let second = fx.doc.instance(fx.manager, 1).unwrap();
    assert_eq!(get(&fx.doc, second, "name"), ScriptValue::from("row"));
    assert_eq!(get(&fx.doc, second, "index"), ScriptValue::Integer(1));
    assert_eq!(get(&fx.doc, second, "classIndex"), ScriptValue::Integer(1));
    assert_eq!(get(&fx.doc, second, "somExpression"), ScriptValue::from("xfa.form.root[0].row[1]"));
    assert_eq!(node_of(&get(&fx.doc, second, "parent")), fx.form_root);
    assert_eq!(node_of(&get(&fx.doc, second, "model")), fx.form);
}

#[test]
fn test_rename_through_script() {
    let mut doc = Document::new();
    let field = doc.create_named_node(ElementKind::Field, PacketType::Form, "a");
    set(&mut doc, field, "name", "b").unwrap();
    assert_eq!(doc.name(field), "b");
    assert_eq!(doc.name_hash(field), xfa_dom::name_hash("b"));
}

#[test]
fn test_resolve_node_methods() {
    let mut fx = fixture(0, -1);
    fx.doc.set_instances(fx.manager, 3).unwrap();
    let second = fx.doc.instance(fx.manager, 1).unwrap();
    let amount = fx.doc.first_child_by_name_str(second, "amount").unwrap();

    let found = call(&mut fx.doc, fx.form_root, "resolveNode", &["row[1].amount".into()]).unwrap();
    assert_eq!(node_of(&found), amount);

    let missing = call(&mut fx.doc, fx.form_root, "resolveNode", &["row[9]".into()]).unwrap();
    assert_eq!(missing, ScriptValue::Null);

    let all = call(&mut fx.doc, fx.form_root, "resolveNodes", &["row[*]".into()]).unwrap();
    assert_eq!(list_length(&fx.doc, all.as_object().unwrap()), Ok(3));
}

#[test]
fn test_all_and_class_all() {
    let mut fx = fixture(0, -1);
    fx.doc.set_instances(fx.manager, 3).unwrap();
    let first = fx.doc.instance(fx.manager, 0).unwrap();
    let extra = fx.doc.create_named_node(ElementKind::Subform, PacketType::Form, "footer");
    fx.doc.append_child(fx.form_root, extra).unwrap();

    let all = get(&fx.doc, first, "all");
    assert_eq!(list_length(&fx.doc, all.as_object().unwrap()), Ok(3));
    let class_all = get(&fx.doc, first, "classAll");
    assert_eq!(list_length(&fx.doc, class_all.as_object().unwrap()), Ok(4));
}

// ============================================================================
// NODE METHODS
// ============================================================================

#[test]
fn test_clone_method() {
    let mut fx = fixture(0, -1);
    let row = fx.doc.add_instance(fx.manager).unwrap();
    let copy = node_of(&call(&mut fx.doc, row, "clone", &[true.into()]).unwrap());
    assert_ne!(copy, row);
    assert_eq!(fx.doc.parent(copy), None);
    assert_eq!(fx.doc.children(copy).len(), fx.doc.children(row).len());
    // the copy drops the template link the inherited name came through
    assert_eq!(get(&fx.doc, copy, "name"), ScriptValue::from(""));

    set(&mut fx.doc, row, "name", "line").unwrap();
    let named = node_of(&call(&mut fx.doc, row, "clone", &[false.into()]).unwrap());
    assert_eq!(get(&fx.doc, named, "name"), ScriptValue::from("line"));
    assert_eq!(fx.doc.name_hash(named), xfa_dom::name_hash("line"));

    let shallow = node_of(&call(&mut fx.doc, row, "clone", &[false.into()]).unwrap());
    assert!(fx.doc.children(shallow).is_empty());
}

#[test]
fn test_get_and_set_attribute() {
    let mut doc = Document::new();
    let outer = doc.create_named_node(ElementKind::Subform, PacketType::Form, "outer");
    let inner = doc.create_named_node(ElementKind::Subform, PacketType::Form, "inner");
    doc.append_child(outer, inner).unwrap();

    call(&mut doc, outer, "setAttribute", &["fr_FR".into(), "locale".into()]).unwrap();
    assert_eq!(call(&mut doc, outer, "getAttribute", &["locale".into()]), Ok(ScriptValue::from("fr_FR")));
    assert_eq!(call(&mut doc, outer, "getAttribute", &["layout".into()]), Ok(ScriptValue::from("position")));
    assert_eq!(get(&doc, inner, "locale"), ScriptValue::from("fr_FR"));

    set(&mut doc, inner, "locale", "de_DE").unwrap();
    assert_eq!(get(&doc, inner, "locale"), ScriptValue::from("de_DE"));
    assert_eq!(get(&doc, outer, "locale"), ScriptValue::from("fr_FR"));
}

#[test]
fn test_get_element_creates_first_occurrence() {
    let mut doc = Document::new();
    let field = doc.create_named_node(ElementKind::Field, PacketType::Form, "total");
    let caption = node_of(&call(&mut doc, field, "getElement", &["caption".into()]).unwrap());
    assert_eq!(doc.parent(caption), Some(field));
    assert_eq!(doc.node(caption).map(|n| n.packet()), Some(PacketType::Form));

    let again = node_of(&call(&mut doc, field, "getElement", &["caption".into(), 0.into()]).unwrap());
    assert_eq!(again, caption);
    assert_eq!(call(&mut doc, field, "getElement", &["caption".into(), 1.into()]), Ok(ScriptValue::Null));
    assert_eq!(doc.count_children(field, Some(ElementKind::Caption)), 1);
}

#[test]
fn test_is_property_specified_with_inheritance() {
    let mut fx = fixture(0, -1);
    fx.doc.set_enum(fx.template_amount, Attribute::Access, AttrEnum::ReadOnly, false).unwrap();
    let row = fx.doc.add_instance(fx.manager).unwrap();
    let amount = fx.doc.first_child_by_name_str(row, "amount").unwrap();

    let specified = |doc: &mut Document, args: &[ScriptValue]| call(doc, amount, "isPropertySpecified", args).unwrap();
    assert_eq!(specified(&mut fx.doc, &["access".into()]), ScriptValue::Bool(true));
    assert_eq!(specified(&mut fx.doc, &["access".into(), false.into()]), ScriptValue::Bool(false));
    assert_eq!(specified(&mut fx.doc, &["presence".into()]), ScriptValue::Bool(false));
    assert_eq!(specified(&mut fx.doc, &["caption".into()]), ScriptValue::Bool(false));

    call(&mut fx.doc, amount, "getElement", &["caption".into()]).unwrap();
    assert_eq!(specified(&mut fx.doc, &["caption".into(), false.into()]), ScriptValue::Bool(true));
}

// ============================================================================
// MODELS AND PACKETS
// ============================================================================

#[test]
fn test_create_node_in_model_packet() {
    let mut fx = fixture(0, -1);
    let created = node_of(&call(&mut fx.doc, fx.form, "createNode", &["subform".into(), "extra".into()]).unwrap());
    assert_eq!(fx.doc.parent(created), None);
    assert_eq!(fx.doc.name(created), "extra");
    assert_eq!(fx.doc.node(created).map(|n| n.packet()), Some(PacketType::Form));
}

#[test]
fn test_template_model_form_nodes() {
    let mut fx = fixture(0, -1);
    fx.doc.set_instances(fx.manager, 2).unwrap();
    let row_arg = ScriptValue::node(&fx.doc, fx.template_row);
    let nodes = call(&mut fx.doc, fx.template, "formNodes", &[row_arg]).unwrap();
    let mut list = nodes.as_object().unwrap().clone();
    // the manager and both instances point back at the row template
    assert_eq!(list_length(&fx.doc, &list), Ok(3));
    let first_row = call_method(&mut fx.doc, &mut list, "namedItem", &["row".into()]).unwrap();
    assert_eq!(first_row.as_node(), fx.doc.instance(fx.manager, 0));
    let manager = call_method(&mut fx.doc, &mut list, "namedItem", &["_row".into()]).unwrap();
    assert_eq!(manager.as_node(), Some(fx.manager));
    assert!(matches!(
        call(&mut fx.doc, fx.form, "formNodes", &[ScriptValue::Null]),
        Err(ScriptError::UnknownMethod { .. })
    ));
}

#[test]
fn test_packet_attributes_and_content() {
    let mut doc = Document::new();
    let packet = doc.create_named_node(ElementKind::Packet, PacketType::Xdp, "sourceSet");
    call(&mut doc, packet, "setAttribute", &["contentType".into(), "text/xml".into()]).unwrap();
    call(&mut doc, packet, "setAttribute", &["xmlns:x".into(), "urn:x".into()]).unwrap();
    assert_eq!(call(&mut doc, packet, "getAttribute", &["xmlns:x".into()]), Ok(ScriptValue::from("urn:x")));

    call(&mut doc, packet, "removeAttribute", &["xmlns:x".into()]).unwrap();
    assert_eq!(call(&mut doc, packet, "getAttribute", &["xmlns:x".into()]), Ok(ScriptValue::from("")));

    set(&mut doc, packet, "content", "<a/>").unwrap();
    assert_eq!(get(&doc, packet, "content"), ScriptValue::from("<a/>"));
}

// ============================================================================
// NODE LISTS
// ============================================================================

#[test]
fn test_nodes_list_is_live() {
    let mut fx = fixture(0, -1);
    let nodes = get(&fx.doc, fx.form_root, "nodes");
    let mut list = nodes.as_object().unwrap().clone();
    assert_eq!(list_length(&fx.doc, &list), Ok(1));

    let extra = fx.doc.create_named_node(ElementKind::Draw, PacketType::Form, "label");
    let arg = ScriptValue::node(&fx.doc, extra);
    call_method(&mut fx.doc, &mut list, "append", &[arg]).unwrap();
    assert_eq!(fx.doc.parent(extra), Some(fx.form_root));
    assert_eq!(get_property(&fx.doc, &list, "length"), Ok(ScriptValue::Integer(2)));

    let named = call_method(&mut fx.doc, &mut list, "namedItem", &["label".into()]).unwrap();
    assert_eq!(named.as_node(), Some(extra));
}

#[test]
fn test_array_list_methods() {
    let mut fx = fixture(0, -1);
    fx.doc.set_instances(fx.manager, 2).unwrap();
    let [a, b] = <[NodeId; 2]>::try_from(fx.doc.instances(fx.manager)).unwrap();
    let mut list = call(&mut fx.doc, fx.form_root, "resolveNodes", &["row[*]".into()])
        .unwrap()
        .as_object()
        .unwrap()
        .clone();

    let first = call_method(&mut fx.doc, &mut list, "item", &[0.into()]).unwrap();
    assert_eq!(first.as_node(), Some(a));

    let arg_b = ScriptValue::node(&fx.doc, b);
    call_method(&mut fx.doc, &mut list, "remove", &[arg_b.clone()]).unwrap();
    assert_eq!(list_length(&fx.doc, &list), Ok(1));
    // array lists never touch the tree
    assert_eq!(fx.doc.parent(b), Some(fx.form_root));

    let arg_a = ScriptValue::node(&fx.doc, a);
    call_method(&mut fx.doc, &mut list, "insert", &[arg_b, arg_a]).unwrap();
    let head = call_method(&mut fx.doc, &mut list, "item", &[0.into()]).unwrap();
    assert_eq!(head.as_node(), Some(b));
    assert_eq!(get_property(&fx.doc, &list, "className"), Ok(ScriptValue::from("nodeList")));
}

// ============================================================================
// THIS PROXY AND ORDINARY OBJECTS
// ============================================================================

#[test]
fn test_this_proxy_forwards_to_node() {
    let mut doc = Document::new();
    let field = doc.create_named_node(ElementKind::Field, PacketType::Form, "total");
    let script = doc.create_node(ElementKind::Script, PacketType::Form);
    let mut proxy = Object::ThisProxy(ThisProxy::new(field, script));

    assert_eq!(get_property(&doc, &proxy, "name"), Ok(ScriptValue::from("total")));
    set_property(&mut doc, &proxy, "rawValue", &"9".into()).unwrap();
    assert_eq!(doc.content(field), "9");
    let clone = call_method(&mut doc, &mut proxy, "clone", &[false.into()]).unwrap();
    assert_eq!(clone.as_node().map(|n| doc.name(n).to_string()), Some("total".to_string()));
    assert_eq!(object_node(&proxy), Ok(field));
    assert_eq!(ScriptValue::Object(proxy).as_node(), Some(field));
}

#[test]
fn test_ordinary_objects() {
    let doc = Document::new();
    let host = Object::Ordinary(OrdinaryObject::new(ElementKind::Variables));
    assert_eq!(get_property(&doc, &host, "className"), Ok(ScriptValue::from("variables")));

    let list = Object::OrdinaryList(vec![OrdinaryObject::new(ElementKind::Script); 2]);
    assert_eq!(get_property(&doc, &list, "length"), Ok(ScriptValue::Integer(2)));
    assert_eq!(get_property(&doc, &list, "className"), Ok(ScriptValue::from("list")));
}
