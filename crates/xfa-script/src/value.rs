//! Boundary value type
//!
//! The interpreter converts its own values to and from [`ScriptValue`];
//! nothing else crosses the boundary.

use xfa_dom::{Document, NodeId, NodeList, Object};

/// Value exchanged with the scripting engine
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScriptValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Integer(i32),
    Number(f64),
    String(String),
    Object(Object),
}

impl ScriptValue {
    /// Object value for `id`, or `Null` when the handle is stale
    pub fn node(doc: &Document, id: NodeId) -> Self {
        Object::from_node(doc, id).map_or(ScriptValue::Null, ScriptValue::Object)
    }

    /// Object value for an optional node
    pub fn opt_node(doc: &Document, id: Option<NodeId>) -> Self {
        id.map_or(ScriptValue::Null, |id| Self::node(doc, id))
    }

    pub fn list(list: impl Into<NodeList>) -> Self {
        ScriptValue::Object(Object::NodeList(list.into()))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ScriptValue::Undefined)
    }

    /// `undefined` or `null`
    pub fn is_nullish(&self) -> bool {
        matches!(self, ScriptValue::Undefined | ScriptValue::Null)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            ScriptValue::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            ScriptValue::Object(Object::ThisProxy(proxy)) => Some(proxy.this_node()),
            ScriptValue::Object(object) => object.as_node(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::String(text) => Some(text),
            _ => None,
        }
    }

    /// Truthiness
    pub fn to_bool(&self) -> bool {
        match self {
            ScriptValue::Undefined | ScriptValue::Null => false,
            ScriptValue::Bool(value) => *value,
            ScriptValue::Integer(value) => *value != 0,
            ScriptValue::Number(value) => *value != 0.0 && !value.is_nan(),
            ScriptValue::String(text) => !text.is_empty(),
            ScriptValue::Object(_) => true,
        }
    }

    /// Integer conversion; `None` when the value is not numeric
    pub fn to_i32(&self) -> Option<i32> {
        match self {
            ScriptValue::Bool(value) => Some(i32::from(*value)),
            ScriptValue::Integer(value) => Some(*value),
            ScriptValue::Number(value) if value.is_finite() => Some(value.trunc() as i32),
            ScriptValue::String(text) => {
                let text = text.trim();
                text.parse::<i32>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i32))
            }
            _ => None,
        }
    }

    /// Text form used when a value is written into an attribute
    pub fn to_text(&self) -> String {
        match self {
            ScriptValue::Undefined | ScriptValue::Null => String::new(),
            ScriptValue::Bool(value) => value.to_string(),
            ScriptValue::Integer(value) => value.to_string(),
            ScriptValue::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                format!("{}", *value as i64)
            }
            ScriptValue::Number(value) => value.to_string(),
            ScriptValue::String(text) => text.clone(),
            ScriptValue::Object(_) => "[object XFAObject]".to_string(),
        }
    }
}

impl From<bool> for ScriptValue {
    fn from(value: bool) -> Self {
        ScriptValue::Bool(value)
    }
}

impl From<i32> for ScriptValue {
    fn from(value: i32) -> Self {
        ScriptValue::Integer(value)
    }
}

impl From<f64> for ScriptValue {
    fn from(value: f64) -> Self {
        ScriptValue::Number(value)
    }
}

impl From<&str> for ScriptValue {
    fn from(value: &str) -> Self {
        ScriptValue::String(value.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(value: String) -> Self {
        ScriptValue::String(value)
    }
}

impl From<Object> for ScriptValue {
    fn from(value: Object) -> Self {
        ScriptValue::Object(value)
    }
}
