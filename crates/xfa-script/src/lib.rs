//! XFA Script - scripting surface of the forms DOM
//!
//! Exposes document nodes to a script interpreter through static class
//! tables. Each element kind maps to a class (`subform`, `field`,
//! `instanceManager`, ...) whose properties and methods are plain function
//! pointers over [`xfa_dom::Document`]. The interpreter itself lives
//! elsewhere; values cross the boundary as [`ScriptValue`].
//!
//! # Example
//! ```rust
//! use xfa_dom::{Document, ElementKind, Object, PacketType};
//! use xfa_script::{get_property, set_property, ScriptValue};
//!
//! let mut doc = Document::new();
//! let field = doc.create_named_node(ElementKind::Field, PacketType::Form, "total");
//! let object = Object::from_node(&doc, field).unwrap();
//!
//! set_property(&mut doc, &object, "rawValue", &ScriptValue::from("42")).unwrap();
//! assert_eq!(get_property(&doc, &object, "rawValue").unwrap(), ScriptValue::from("42"));
//! assert_eq!(get_property(&doc, &object, "name").unwrap(), ScriptValue::from("total"));
//! ```

mod classes;
mod error;
mod host;
mod slots;
mod value;

pub use classes::{class_table, LIST_METHODS, LIST_PROPERTIES};
pub use error::{ScriptError, ScriptResult};
pub use host::{call_method, get_property, list_length, object_node, set_property};
pub use slots::{
    Arity, ClassTable, Getter, ListGetter, ListMethodFn, ListMethodSlot, ListPropertySlot, MethodFn, MethodSlot,
    PropertyKind, PropertySlot, Setter,
};
pub use value::ScriptValue;
