//! Document observers
//!
//! Layout and binding layers subscribe to structural and attribute changes
//! through an observer injected when the document is built. Hooks run
//! synchronously inside the mutating call, after the change is applied.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::map_module::MapKey;
use crate::node::XmlHandle;
use crate::object::ObjectFlags;
use crate::NodeId;

/// Receiver of document change notifications
pub trait DocumentObserver: Send {
    fn child_added(&mut self, _parent: NodeId, _child: NodeId) {}

    fn child_removed(&mut self, _parent: NodeId, _child: NodeId) {}

    fn attribute_changed(&mut self, _node: NodeId, _key: &MapKey) {}

    fn flag_changed(&mut self, _node: NodeId, _old: ObjectFlags, _new: ObjectFlags) {}

    /// An owned markup node must be released by the markup layer
    fn markup_released(&mut self, _node: NodeId, _handle: XmlHandle) {}

    fn node_destroyed(&mut self, _node: NodeId) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DocumentObserver for NoopObserver {}

/// Mutation record
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRecord {
    ChildAdded { parent: NodeId, child: NodeId },
    ChildRemoved { parent: NodeId, child: NodeId },
    AttributeChanged { node: NodeId, key: MapKey },
    FlagChanged { node: NodeId, old: ObjectFlags, new: ObjectFlags },
    MarkupReleased { node: NodeId, handle: XmlHandle },
    NodeDestroyed { node: NodeId },
}

/// Observer that appends every notification to a shared log.
///
/// Clones share the log, so a test keeps one clone and hands the other to
/// the document.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    records: Arc<Mutex<Vec<MutationRecord>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<MutationRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the records so far
    pub fn records(&self) -> Vec<MutationRecord> {
        self.log().clone()
    }

    pub fn take_records(&self) -> Vec<MutationRecord> {
        std::mem::take(&mut *self.log())
    }

    pub fn len(&self) -> usize {
        self.log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log().is_empty()
    }

    fn push(&self, record: MutationRecord) {
        self.log().push(record);
    }
}

impl DocumentObserver for RecordingObserver {
    fn child_added(&mut self, parent: NodeId, child: NodeId) {
        self.push(MutationRecord::ChildAdded { parent, child });
    }

    fn child_removed(&mut self, parent: NodeId, child: NodeId) {
        self.push(MutationRecord::ChildRemoved { parent, child });
    }

    fn attribute_changed(&mut self, node: NodeId, key: &MapKey) {
        self.push(MutationRecord::AttributeChanged { node, key: key.clone() });
    }

    fn flag_changed(&mut self, node: NodeId, old: ObjectFlags, new: ObjectFlags) {
        self.push(MutationRecord::FlagChanged { node, old, new });
    }

    fn markup_released(&mut self, node: NodeId, handle: XmlHandle) {
        self.push(MutationRecord::MarkupReleased { node, handle });
    }

    fn node_destroyed(&mut self, node: NodeId) {
        self.push(MutationRecord::NodeDestroyed { node });
    }
}
