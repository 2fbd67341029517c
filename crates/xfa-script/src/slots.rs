//! Property and method slots
//!
//! Each script class is a static [`ClassTable`] listing its own slots and
//! pointing at its parent class. Lookups walk the chain most-specific first.

use std::fmt;

use xfa_dom::{Document, NodeId, NodeList};

use crate::error::{ScriptError, ScriptResult};
use crate::value::ScriptValue;

pub type Getter = fn(&Document, NodeId) -> ScriptResult<ScriptValue>;
pub type Setter = fn(&mut Document, NodeId, &ScriptValue) -> ScriptResult<()>;
pub type MethodFn = fn(&mut Document, NodeId, &[ScriptValue]) -> ScriptResult<ScriptValue>;

pub type ListGetter = fn(&Document, &NodeList) -> ScriptResult<ScriptValue>;
pub type ListMethodFn = fn(&mut Document, &mut NodeList, &[ScriptValue]) -> ScriptResult<ScriptValue>;

/// Kind of value a property yields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Scalar,
    String,
    Enum,
    Object,
}

/// Accepted argument count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub const fn exactly(count: usize) -> Self {
        Self { min: count, max: count }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn check(self, method: &'static str, got: usize) -> ScriptResult<()> {
        if got < self.min || got > self.max {
            return Err(ScriptError::ArgumentCount { method, min: self.min, max: self.max, got });
        }
        Ok(())
    }
}

pub struct PropertySlot {
    pub name: &'static str,
    pub kind: PropertyKind,
    pub get: Getter,
    pub set: Option<Setter>,
}

impl PropertySlot {
    pub const fn read_only(name: &'static str, kind: PropertyKind, get: Getter) -> Self {
        Self { name, kind, get, set: None }
    }

    pub const fn read_write(name: &'static str, kind: PropertyKind, get: Getter, set: Setter) -> Self {
        Self { name, kind, get, set: Some(set) }
    }

    pub fn is_settable(&self) -> bool {
        self.set.is_some()
    }
}

impl fmt::Debug for PropertySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySlot")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("settable", &self.is_settable())
            .finish()
    }
}

pub struct MethodSlot {
    pub name: &'static str,
    pub arity: Arity,
    pub call: MethodFn,
}

impl fmt::Debug for MethodSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSlot")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Static description of one script class
pub struct ClassTable {
    pub name: &'static str,
    pub parent: Option<&'static ClassTable>,
    pub properties: &'static [PropertySlot],
    pub methods: &'static [MethodSlot],
}

impl ClassTable {
    /// This class followed by its ancestors
    pub fn chain(&'static self) -> impl Iterator<Item = &'static ClassTable> {
        std::iter::successors(Some(self), |table| table.parent)
    }

    pub fn find_property(&'static self, name: &str) -> Option<&'static PropertySlot> {
        self.chain()
            .find_map(|table| table.properties.iter().find(|slot| slot.name == name))
    }

    pub fn find_method(&'static self, name: &str) -> Option<&'static MethodSlot> {
        self.chain()
            .find_map(|table| table.methods.iter().find(|slot| slot.name == name))
    }
}

impl fmt::Debug for ClassTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassTable")
            .field("name", &self.name)
            .field("parent", &self.parent.map(|parent| parent.name))
            .field("properties", &self.properties)
            .field("methods", &self.methods)
            .finish()
    }
}

pub struct ListPropertySlot {
    pub name: &'static str,
    pub get: ListGetter,
}

impl fmt::Debug for ListPropertySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPropertySlot").field("name", &self.name).finish()
    }
}

pub struct ListMethodSlot {
    pub name: &'static str,
    pub arity: Arity,
    pub call: ListMethodFn,
}

impl fmt::Debug for ListMethodSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListMethodSlot")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

// ============================================================================
// Argument helpers
// ============================================================================

pub(crate) fn arg_i32(method: &'static str, args: &[ScriptValue], index: usize) -> ScriptResult<i32> {
    args.get(index)
        .and_then(ScriptValue::to_i32)
        .ok_or(ScriptError::ArgumentType { method, index, expected: "a number" })
}

/// Non-negative index argument
pub(crate) fn arg_index(method: &'static str, args: &[ScriptValue], index: usize) -> ScriptResult<usize> {
    let value = arg_i32(method, args, index)?;
    usize::try_from(value).map_err(|_| ScriptError::ArgumentType { method, index, expected: "a non-negative number" })
}

pub(crate) fn arg_str<'a>(method: &'static str, args: &'a [ScriptValue], index: usize) -> ScriptResult<&'a str> {
    args.get(index)
        .and_then(ScriptValue::as_str)
        .ok_or(ScriptError::ArgumentType { method, index, expected: "a string" })
}

pub(crate) fn arg_node(method: &'static str, args: &[ScriptValue], index: usize) -> ScriptResult<NodeId> {
    args.get(index)
        .and_then(ScriptValue::as_node)
        .ok_or(ScriptError::ArgumentType { method, index, expected: "a node" })
}

pub(crate) fn arg_bool_or(args: &[ScriptValue], index: usize, default: bool) -> bool {
    args.get(index).filter(|v| !v.is_undefined()).map_or(default, ScriptValue::to_bool)
}

pub(crate) fn value_i32(property: &'static str, value: &ScriptValue) -> ScriptResult<i32> {
    value.to_i32().ok_or(ScriptError::ValueType { property, expected: "a number" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_nothing(_: &Document, _: NodeId) -> ScriptResult<ScriptValue> {
        Ok(ScriptValue::Undefined)
    }

    static BASE: ClassTable = ClassTable {
        name: "base",
        parent: None,
        properties: &[PropertySlot::read_only("shared", PropertyKind::Scalar, get_nothing)],
        methods: &[],
    };

    static DERIVED: ClassTable = ClassTable {
        name: "derived",
        parent: Some(&BASE),
        properties: &[PropertySlot::read_only("own", PropertyKind::String, get_nothing)],
        methods: &[],
    };

    #[test]
    fn test_chain_lookup() {
        let names: Vec<_> = DERIVED.chain().map(|t| t.name).collect();
        assert_eq!(names, vec!["derived", "base"]);
        assert_eq!(DERIVED.find_property("shared").map(|s| s.name), Some("shared"));
        assert!(BASE.find_property("own").is_none());
        assert!(DERIVED.find_method("shared").is_none());
    }

    #[test]
    fn test_arity() {
        assert!(Arity::between(1, 2).check("m", 0).is_err());
        assert!(Arity::between(1, 2).check("m", 2).is_ok());
        assert!(Arity::exactly(0).check("m", 1).is_err());
    }

    #[test]
    fn test_argument_helpers() {
        let args = [ScriptValue::from("x"), ScriptValue::Integer(-1)];
        assert_eq!(arg_str("m", &args, 0), Ok("x"));
        assert!(matches!(arg_index("m", &args, 1), Err(ScriptError::ArgumentType { index: 1, .. })));
        assert!(arg_node("m", &args, 0).is_err());
        assert!(arg_bool_or(&args, 5, true));
    }
}
