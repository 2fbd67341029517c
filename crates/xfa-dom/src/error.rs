//! DOM errors
//!
//! Structural and attribute failures reported to the immediate caller.
//! A failed operation never leaves the tree partially modified.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("stale or unknown node handle {0:?}")]
    StaleNode(NodeId),

    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("{0:?} already has a parent")]
    AlreadyAttached(NodeId),

    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("{form:?} is already bound to {data:?}")]
    DuplicateBinding { data: NodeId, form: NodeId },

    #[error("{form:?} is not bound to {data:?}")]
    NotBound { data: NodeId, form: NodeId },

    #[error("{0:?} is not an instance manager")]
    NotInstanceManager(NodeId),

    #[error("instance index {index} out of range (count {count})")]
    InstanceOutOfRange { index: usize, count: usize },

    #[error("instance count {requested} outside occurrence bounds [{min}, {}]", .max.map_or_else(|| "unbounded".to_string(), |m| m.to_string()))]
    OccurrenceViolation {
        requested: usize,
        min: usize,
        max: Option<usize>,
    },

    #[error("no template available to create instances for {0:?}")]
    MissingInstanceTemplate(NodeId),

    #[error("invalid value {value:?} for attribute '{attribute}'")]
    InvalidAttributeValue { attribute: String, value: String },

    #[error("{0:?} is not in the list")]
    NotInList(NodeId),
}
