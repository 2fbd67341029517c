//! Scripting errors
//!
//! Everything a script can get wrong is reported as a [`ScriptError`] value
//! for the interpreter to raise. None of these leave the document changed.

use xfa_dom::{DomError, NodeId};

/// Result type for scripting calls
pub type ScriptResult<T> = Result<T, ScriptError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("'{class}' has no property '{name}'")]
    UnknownProperty { class: String, name: String },

    #[error("'{class}' has no method '{name}'")]
    UnknownMethod { class: String, name: String },

    #[error("property '{name}' of '{class}' is read-only")]
    ReadOnly { class: String, name: String },

    #[error("{method}() takes {min} to {max} arguments, got {got}")]
    ArgumentCount {
        method: &'static str,
        min: usize,
        max: usize,
        got: usize,
    },

    #[error("argument {index} of {method}() must be {expected}")]
    ArgumentType {
        method: &'static str,
        index: usize,
        expected: &'static str,
    },

    #[error("property '{property}' expects {expected}")]
    ValueType {
        property: &'static str,
        expected: &'static str,
    },

    #[error("index {index} out of range (length {len})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("{0:?} has no instance manager")]
    NoInstanceManager(NodeId),

    #[error("object is not a node")]
    NotANode,

    #[error("object is not a node list")]
    NotAList,

    #[error(transparent)]
    Dom(#[from] DomError),
}
