//! Structural observation of the document tree
//!
//! Observers register interest in a target node. Tree operations queue
//! [`MutationRecord`]s on every interested observer; the records are handed to
//! the observer's callback in one batch when the host calls
//! [`Document::deliver_mutations`](super::Document::deliver_mutations).

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::{Document, NodeId};

/// Callback invoked with a batch of records. Receives the document so it can
/// mutate the tree in response.
pub type MutationCallback = Rc<dyn Fn(&mut Document, &[MutationRecord])>;

/// Handle identifying one registered observer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// What an observer wants to hear about
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MutationObserverInit {
    /// Child insertions and removals on the target
    pub child_list: bool,
    /// Attribute changes on the target
    pub attributes: bool,
    /// Extend the above to every light-tree descendant of the target
    pub subtree: bool,
}

impl MutationObserverInit {
    /// Child-list changes anywhere below the target
    pub fn child_list_subtree() -> Self {
        Self {
            child_list: true,
            attributes: false,
            subtree: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationKind {
    ChildList,
    Attributes { name: String },
}

/// A single structural change
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord {
    pub kind: MutationKind,
    /// Node whose children or attributes changed
    pub target: NodeId,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
}

impl MutationRecord {
    pub fn child_list(target: NodeId, added_nodes: Vec<NodeId>, removed_nodes: Vec<NodeId>) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target,
            added_nodes,
            removed_nodes,
        }
    }

    pub fn attribute(target: NodeId, name: impl Into<String>) -> Self {
        Self {
            kind: MutationKind::Attributes { name: name.into() },
            target,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
        }
    }

    pub fn is_child_list(&self) -> bool {
        matches!(self.kind, MutationKind::ChildList)
    }
}

struct Observer {
    target: NodeId,
    options: MutationObserverInit,
    callback: MutationCallback,
    pending: Vec<MutationRecord>,
}

impl Observer {
    fn wants(&self, record: &MutationRecord, ancestors: &[NodeId]) -> bool {
        let kind_matches = match record.kind {
            MutationKind::ChildList => self.options.child_list,
            MutationKind::Attributes { .. } => self.options.attributes,
        };
        if !kind_matches {
            return false;
        }
        if self.target == record.target {
            return true;
        }
        self.options.subtree && ancestors.contains(&self.target)
    }
}

/// All observers registered on a document
#[derive(Default)]
pub struct ObserverRegistry {
    observers: BTreeMap<ObserverId, Observer>,
    next_id: u64,
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("active", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl ObserverRegistry {
    pub(super) fn register(
        &mut self,
        target: NodeId,
        options: MutationObserverInit,
        callback: MutationCallback,
    ) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.insert(
            id,
            Observer {
                target,
                options,
                callback,
                pending: Vec::new(),
            },
        );
        id
    }

    /// Remove an observer along with any records it has not received yet.
    /// Returns false when the observer was already gone.
    pub(super) fn unregister(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub fn is_active(&self, id: ObserverId) -> bool {
        self.observers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn pending_count(&self, id: ObserverId) -> usize {
        self.observers.get(&id).map_or(0, |o| o.pending.len())
    }

    /// Queue `record` on every observer interested in it.
    ///
    /// `ancestors` are the light-tree inclusive ancestors of the record target.
    pub(super) fn enqueue(&mut self, record: &MutationRecord, ancestors: &[NodeId]) {
        for observer in self.observers.values_mut() {
            if observer.wants(record, ancestors) {
                observer.pending.push(record.clone());
            }
        }
    }

    /// Take the first observer batch waiting for delivery
    pub(super) fn take_next_batch(&mut self) -> Option<(ObserverId, MutationCallback, Vec<MutationRecord>)> {
        let (id, observer) = self
            .observers
            .iter_mut()
            .find(|(_, observer)| !observer.pending.is_empty())?;
        let records = std::mem::take(&mut observer.pending);
        Some((*id, Rc::clone(&observer.callback), records))
    }
}
