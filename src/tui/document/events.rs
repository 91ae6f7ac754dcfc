//! Input events and bubbling dispatch

use std::fmt;
use std::rc::Rc;

use super::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Primary activation (click, tap, enter on a focused node)
    Click,
}

/// An event travelling from its target towards the document body
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub event_type: EventType,
    /// Node the event was dispatched on
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: NodeId,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: target,
            propagation_stopped: false,
        }
    }

    /// Keep the event from reaching ancestors of the current node.
    /// Remaining listeners on the current node still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

pub type Listener = Rc<dyn Fn(&mut Event)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(super) u64);

#[derive(Clone)]
pub(super) struct RegisteredListener {
    pub id: ListenerId,
    pub event_type: EventType,
    pub listener: Listener,
}

impl fmt::Debug for RegisteredListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredListener")
            .field("id", &self.id)
            .field("event_type", &self.event_type)
            .finish_non_exhaustive()
    }
}
