//! In-memory document tree that hosts self-attaching widgets
//!
//! The document is a node arena rooted at a `body` element. It provides what a
//! widget needs from its host environment:
//!
//! - **Tree operations**: append (moving nodes that already have a parent),
//!   remove, connectedness and containment queries
//! - **Isolated scopes**: shadow roots owned by a host element; styles and
//!   queries do not cross the boundary
//! - **Structural observers**: batched [`MutationRecord`] delivery at an
//!   explicit point ([`Document::deliver_mutations`])
//! - **Events**: listeners with bubbling dispatch along the composed path
//! - **Custom elements**: lifecycle reactions (`connected`, `disconnected`,
//!   `attribute_changed`) run synchronously after the operation that caused them
//!
//! Everything is single-threaded. Callbacks are reference counted and cloned
//! out of the document before they run, so they may mutate the tree.

pub mod events;
pub mod observer;
pub mod registry;
pub mod render;
pub mod style;

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use ratatui::style::Style;

use crate::tui::error::{DomError, DomResult};

pub use events::{Event, EventType, Listener, ListenerId};
pub use observer::{
    MutationCallback, MutationKind, MutationObserverInit, MutationRecord, ObserverId, ObserverRegistry,
};
pub use registry::{CustomElement, CustomElementRegistry, ElementDefinition};
pub use render::PageView;
pub use style::StyleSheet;

use events::RegisteredListener;
use registry::Reaction;

/// Index of a node in its document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String },
    /// Root of an isolated scope, owned by `host`
    ShadowRoot { host: NodeId },
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    shadow_root: Option<NodeId>,
    /// Only consulted on shadow roots
    stylesheet: StyleSheet,
    listeners: Vec<RegisteredListener>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            shadow_root: None,
            stylesheet: StyleSheet::default(),
            listeners: Vec::new(),
        }
    }
}

pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
    stylesheet: StyleSheet,
    observers: ObserverRegistry,
    custom_elements: CustomElementRegistry,
    instances: HashMap<NodeId, Rc<dyn CustomElement>>,
    reactions: VecDeque<Reaction>,
    processing_reactions: bool,
    next_listener_id: u64,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("observers", &self.observers)
            .field("custom_elements", &self.custom_elements)
            .field("instances", &self.instances.len())
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let body = Node::new(NodeKind::Element {
            tag: "body".to_string(),
        });
        Self {
            nodes: vec![body],
            body: NodeId(0),
            stylesheet: StyleSheet::default(),
            observers: ObserverRegistry::default(),
            custom_elements: CustomElementRegistry::default(),
            instances: HashMap::new(),
            reactions: VecDeque::new(),
            processing_reactions: false,
            next_listener_id: 0,
        }
    }

    /// Root of the visible tree
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(Node::new(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
        }))
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes.get(id.0).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(DomError::NodeNotFound(id))
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    /// Tag name of an element, None for shadow roots and unknown ids
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { tag } => Some(tag.as_str()),
            NodeKind::ShadowRoot { .. } => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |n| n.children.as_slice())
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.nodes.get(id.0).map_or(&[], |n| n.classes.as_slice())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let node = self.node_mut(id)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(id.0)?.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let old_value = self.node_mut(id)?.attributes.insert(name.to_string(), value.to_string());
        self.attribute_changed(id, name, old_value, Some(value.to_string()));
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<()> {
        let old_value = self.node_mut(id)?.attributes.remove(name);
        if old_value.is_some() {
            self.attribute_changed(id, name, old_value, None);
        }
        Ok(())
    }

    fn attribute_changed(&mut self, id: NodeId, name: &str, old_value: Option<String>, new_value: Option<String>) {
        let record = MutationRecord::attribute(id, name);
        let ancestors = self.light_inclusive_ancestors(id);
        self.observers.enqueue(&record, &ancestors);

        let observed = self.instances.contains_key(&id)
            && self
                .tag(id)
                .and_then(|tag| self.custom_elements.get(tag))
                .is_some_and(|definition| definition.observes(name));
        if observed {
            self.reactions.push_back(Reaction::AttributeChanged {
                node: id,
                name: name.to_string(),
                old_value,
                new_value,
            });
            self.process_reactions();
        }
    }

    pub fn text(&self, id: NodeId) -> &str {
        self.nodes.get(id.0).map_or("", |n| n.text.as_str())
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        let node = self.node_mut(id)?;
        node.text.clear();
        node.text.push_str(text);
        Ok(())
    }

    // --- Isolated scopes ---

    /// Give `host` an isolated render scope and return its root
    pub fn attach_shadow(&mut self, host: NodeId) -> DomResult<NodeId> {
        let node = self.node(host)?;
        if node.shadow_root.is_some() {
            return Err(DomError::ShadowRootExists(host));
        }
        if !matches!(node.kind, NodeKind::Element { .. }) {
            return Err(DomError::HierarchyRequest {
                parent: host,
                child: host,
                reason: "only elements can host a shadow root",
            });
        }
        let shadow = self.push_node(Node::new(NodeKind::ShadowRoot { host }));
        self.node_mut(host)?.shadow_root = Some(shadow);
        Ok(shadow)
    }

    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.nodes.get(host.0).and_then(|n| n.shadow_root)
    }

    pub fn host(&self, shadow: NodeId) -> Option<NodeId> {
        match self.kind(shadow)? {
            NodeKind::ShadowRoot { host } => Some(*host),
            NodeKind::Element { .. } => None,
        }
    }

    /// Replace the stylesheet scoped to a shadow root
    pub fn adopt_stylesheet(&mut self, shadow: NodeId, sheet: StyleSheet) -> DomResult<()> {
        let node = self.node_mut(shadow)?;
        if !matches!(node.kind, NodeKind::ShadowRoot { .. }) {
            return Err(DomError::NotAShadowRoot(shadow));
        }
        node.stylesheet = sheet;
        Ok(())
    }

    /// Page-level stylesheet, applies to the light tree only
    pub fn stylesheet(&self) -> &StyleSheet {
        &self.stylesheet
    }

    pub fn stylesheet_mut(&mut self) -> &mut StyleSheet {
        &mut self.stylesheet
    }

    /// Nearest shadow root enclosing `id`, if any
    pub fn containing_scope(&self, id: NodeId) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(NodeKind::ShadowRoot { .. }) = self.kind(node) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Style a node gets from the sheet of its own scope
    pub fn computed_style(&self, id: NodeId) -> Style {
        let sheet = match self.containing_scope(id) {
            Some(scope) => &self.nodes[scope.0].stylesheet,
            None => &self.stylesheet,
        };
        sheet.resolve(self.classes(id))
    }

    // --- Tree queries ---

    /// True when `id` is reachable from the body, crossing shadow hosts
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.body {
                return true;
            }
            let Some(node) = self.nodes.get(current.0) else {
                return false;
            };
            current = match (&node.kind, node.parent) {
                (NodeKind::ShadowRoot { host }, _) => *host,
                (_, Some(parent)) => parent,
                (_, None) => return false,
            };
        }
    }

    /// Light-tree inclusive containment
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn light_inclusive_ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            ancestors.push(node);
            current = self.parent(node);
        }
        ancestors
    }

    fn is_shadow_including_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node).or_else(|| self.host(node));
        }
        false
    }

    /// `id`, its shadow tree, then its children, recursively
    fn shadow_including_descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            let Some(data) = self.nodes.get(node.0) else {
                continue;
            };
            stack.extend(data.children.iter().rev().copied());
            if let Some(shadow) = data.shadow_root {
                stack.push(shadow);
            }
        }
        out
    }

    /// Light-tree descendants of `scope` (exclusive) in tree order
    fn light_descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Every element with `tag` in the body's light tree, in tree order
    pub fn query_selector_all(&self, tag: &str) -> Vec<NodeId> {
        self.light_descendants(self.body)
            .into_iter()
            .filter(|&node| self.tag(node) == Some(tag))
            .collect()
    }

    /// First light descendant of `scope` carrying `class`
    pub fn query_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.light_descendants(scope)
            .into_iter()
            .find(|&node| self.has_class(node, class))
    }

    // --- Tree mutation ---

    /// Append `child` as the last child of `parent`, moving it if it already
    /// has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.node(parent)?;
        if !matches!(self.node(child)?.kind, NodeKind::Element { .. }) {
            return Err(DomError::HierarchyRequest {
                parent,
                child,
                reason: "shadow roots cannot be inserted",
            });
        }
        if self.is_shadow_including_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest {
                parent,
                child,
                reason: "the node is an ancestor of the new parent",
            });
        }

        let was_connected = self.is_connected(child);
        self.detach(child);

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.record_child_list(parent, vec![child], Vec::new());

        let now_connected = self.is_connected(child);
        if was_connected || now_connected {
            let elements = self.upgraded_in_subtree(child);
            if was_connected {
                self.reactions.extend(elements.iter().map(|&n| Reaction::Disconnected(n)));
            }
            if now_connected {
                self.reactions.extend(elements.iter().map(|&n| Reaction::Connected(n)));
            }
        }
        self.process_reactions();
        Ok(())
    }

    /// Take `id` out of its parent. Removing a parentless node does nothing.
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        if self.node(id)?.parent.is_none() {
            return Ok(());
        }
        let was_connected = self.is_connected(id);
        self.detach(id);
        if was_connected {
            let elements = self.upgraded_in_subtree(id);
            self.reactions.extend(elements.into_iter().map(Reaction::Disconnected));
        }
        self.process_reactions();
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        let Some(old_parent) = self.nodes[id.0].parent.take() else {
            return;
        };
        self.nodes[old_parent.0].children.retain(|&c| c != id);
        self.record_child_list(old_parent, Vec::new(), vec![id]);
    }

    fn record_child_list(&mut self, target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) {
        let record = MutationRecord::child_list(target, added, removed);
        let ancestors = self.light_inclusive_ancestors(target);
        self.observers.enqueue(&record, &ancestors);
    }

    fn upgraded_in_subtree(&self, root: NodeId) -> Vec<NodeId> {
        self.shadow_including_descendants(root)
            .into_iter()
            .filter(|node| self.instances.contains_key(node))
            .collect()
    }

    // --- Observers ---

    pub fn observe(&mut self, target: NodeId, options: MutationObserverInit, callback: MutationCallback) -> ObserverId {
        let id = self.observers.register(target, options, callback);
        tracing::trace!("Observer {:?} watching {:?} ({:?})", id, target, options);
        id
    }

    /// Stop an observer. Returns false if it was not active.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        let was_active = self.observers.unregister(id);
        if was_active {
            tracing::trace!("Observer {:?} disconnected", id);
        }
        was_active
    }

    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }

    /// Hand queued records to their observers, one batch per callback, until
    /// nothing is pending. Returns the number of callbacks invoked.
    pub fn deliver_mutations(&mut self) -> usize {
        let mut delivered = 0;
        while let Some((id, callback, records)) = self.observers.take_next_batch() {
            tracing::trace!("Delivering {} mutation record(s) to {:?}", records.len(), id);
            callback(self, &records);
            delivered += 1;
        }
        delivered
    }

    // --- Events ---

    pub fn add_event_listener(&mut self, id: NodeId, event_type: EventType, listener: Listener) -> DomResult<ListenerId> {
        let listener_id = ListenerId(self.next_listener_id);
        self.node_mut(id)?.listeners.push(RegisteredListener {
            id: listener_id,
            event_type,
            listener,
        });
        self.next_listener_id += 1;
        Ok(listener_id)
    }

    /// Returns false when the listener was not registered on `id`
    pub fn remove_event_listener(&mut self, id: NodeId, listener_id: ListenerId) -> bool {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return false;
        };
        let before = node.listeners.len();
        node.listeners.retain(|l| l.id != listener_id);
        node.listeners.len() != before
    }

    pub fn listener_count(&self, id: NodeId) -> usize {
        self.nodes.get(id.0).map_or(0, |n| n.listeners.len())
    }

    /// Target, then ancestors, stepping from shadow roots to their hosts
    fn composed_path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node).or_else(|| self.host(node));
        }
        path
    }

    /// Run listeners along the composed path until one stops propagation
    pub fn dispatch_event(&mut self, target: NodeId, event_type: EventType) -> DomResult<Event> {
        self.node(target)?;
        let mut event = Event::new(event_type, target);
        for node in self.composed_path(target) {
            event.current_target = node;
            let listeners: Vec<Listener> = self.nodes[node.0]
                .listeners
                .iter()
                .filter(|l| l.event_type == event_type)
                .map(|l| Rc::clone(&l.listener))
                .collect();
            for listener in listeners {
                listener(&mut event);
            }
            if event.propagation_stopped() {
                break;
            }
        }
        Ok(event)
    }

    // --- Custom elements ---

    pub fn custom_elements(&self) -> &CustomElementRegistry {
        &self.custom_elements
    }

    pub fn custom_elements_mut(&mut self) -> &mut CustomElementRegistry {
        &mut self.custom_elements
    }

    /// Attach element behavior to a node. Reactions start with the next tree
    /// operation that affects it.
    pub fn upgrade(&mut self, id: NodeId, instance: Rc<dyn CustomElement>) -> DomResult<()> {
        self.node(id)?;
        self.instances.insert(id, instance);
        Ok(())
    }

    pub fn instance(&self, id: NodeId) -> Option<Rc<dyn CustomElement>> {
        self.instances.get(&id).cloned()
    }

    fn process_reactions(&mut self) {
        if self.processing_reactions {
            return;
        }
        self.processing_reactions = true;
        while let Some(reaction) = self.reactions.pop_front() {
            let Some(instance) = self.instance(reaction.node()) else {
                continue;
            };
            match reaction {
                Reaction::Connected(_) => instance.connected(self),
                Reaction::Disconnected(_) => instance.disconnected(self),
                Reaction::AttributeChanged {
                    name,
                    old_value,
                    new_value,
                    ..
                } => instance.attribute_changed(self, &name, old_value.as_deref(), new_value.as_deref()),
            }
        }
        self.processing_reactions = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        log: RefCell<Vec<String>>,
    }

    impl CustomElement for Recorder {
        fn connected(&self, _doc: &mut Document) {
            self.log.borrow_mut().push("connected".to_string());
        }

        fn disconnected(&self, _doc: &mut Document) {
            self.log.borrow_mut().push("disconnected".to_string());
        }

        fn attribute_changed(&self, _doc: &mut Document, name: &str, old: Option<&str>, new: Option<&str>) {
            self.log.borrow_mut().push(format!("{name}: {old:?} -> {new:?}"));
        }

        fn remove(&self, _doc: &mut Document) {}
    }

    #[test]
    fn test_append_and_children() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_element("DIV");
        let b = doc.create_element("span");
        doc.append_child(body, a).unwrap();
        doc.append_child(body, b).unwrap();

        assert_eq!(doc.children(body), &[a, b]);
        assert_eq!(doc.parent(a), Some(body));
        assert_eq!(doc.tag(a), Some("div"));
    }

    #[test]
    fn test_append_moves_existing_child() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(body, a).unwrap();
        doc.append_child(body, b).unwrap();
        doc.append_child(a, child).unwrap();

        doc.append_child(b, child).unwrap();

        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[child]);
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let body = doc.body();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(body, outer).unwrap();
        doc.append_child(outer, inner).unwrap();

        assert!(matches!(
            doc.append_child(inner, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(matches!(
            doc.append_child(outer, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert_eq!(doc.parent(outer), Some(body));
    }

    #[test]
    fn test_shadow_root_cannot_be_appended() {
        let mut doc = Document::new();
        let host = doc.create_element("x-host");
        let shadow = doc.attach_shadow(host).unwrap();

        assert!(matches!(
            doc.append_child(doc.body(), shadow),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert_eq!(doc.attach_shadow(host), Err(DomError::ShadowRootExists(host)));
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let mut other = Document::new();
        for _ in 0..5 {
            other.create_element("div");
        }
        let foreign = other.create_element("div");

        let mut doc = Document::new();
        assert_eq!(
            doc.append_child(doc.body(), foreign),
            Err(DomError::NodeNotFound(foreign))
        );
        assert_eq!(doc.remove(foreign), Err(DomError::NodeNotFound(foreign)));
    }

    #[test]
    fn test_is_connected_crosses_shadow_hosts() {
        let mut doc = Document::new();
        let host = doc.create_element("x-host");
        let shadow = doc.attach_shadow(host).unwrap();
        let inner = doc.create_element("img");
        doc.append_child(shadow, inner).unwrap();

        assert!(!doc.is_connected(inner));
        doc.append_child(doc.body(), host).unwrap();
        assert!(doc.is_connected(inner));
        assert!(!doc.contains(doc.body(), inner));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.body(), div).unwrap();

        doc.remove(div).unwrap();
        doc.remove(div).unwrap();
        assert!(!doc.is_connected(div));
        assert!(doc.children(doc.body()).is_empty());
    }

    #[test]
    fn test_queries_skip_shadow_trees() {
        let mut doc = Document::new();
        let body = doc.body();
        let host = doc.create_element("x-host");
        doc.append_child(body, host).unwrap();
        let shadow = doc.attach_shadow(host).unwrap();
        let hidden = doc.create_element("x-host");
        doc.append_child(shadow, hidden).unwrap();
        doc.add_class(hidden, "icon").unwrap();

        assert_eq!(doc.query_selector_all("x-host"), vec![host]);
        assert_eq!(doc.query_class(body, "icon"), None);
        assert_eq!(doc.query_class(shadow, "icon"), Some(hidden));
    }

    #[test]
    fn test_reactions_follow_connection() {
        let mut doc = Document::new();
        let body = doc.body();
        let wrapper = doc.create_element("div");
        let element = doc.create_element("x-rec");
        let recorder = Rc::new(Recorder::default());
        doc.upgrade(element, recorder.clone()).unwrap();

        doc.append_child(wrapper, element).unwrap();
        assert!(recorder.log.borrow().is_empty());

        doc.append_child(body, wrapper).unwrap();
        let other = doc.create_element("div");
        doc.append_child(body, other).unwrap();
        doc.append_child(other, element).unwrap();
        doc.remove(other).unwrap();

        assert_eq!(
            *recorder.log.borrow(),
            vec!["connected", "disconnected", "connected", "disconnected"]
        );
    }

    #[test]
    fn test_attribute_reactions_need_observed_definition() {
        let mut doc = Document::new();
        let element = doc.create_element("x-rec");
        let recorder = Rc::new(Recorder::default());
        doc.upgrade(element, recorder.clone()).unwrap();

        doc.set_attribute(element, "label", "before").unwrap();
        assert!(recorder.log.borrow().is_empty());

        doc.custom_elements_mut()
            .define(ElementDefinition::new("x-rec").observe_attributes(["label"]))
            .unwrap();
        doc.set_attribute(element, "label", "after").unwrap();
        doc.set_attribute(element, "title", "ignored").unwrap();
        doc.remove_attribute(element, "label").unwrap();

        assert_eq!(
            *recorder.log.borrow(),
            vec![
                "label: Some(\"before\") -> Some(\"after\")",
                "label: Some(\"after\") -> None",
            ]
        );
    }

    #[test]
    fn test_computed_style_uses_own_scope() {
        use ratatui::style::Color;

        let mut doc = Document::new();
        doc.stylesheet_mut().insert("icon", Style::default().fg(Color::Red));

        let page_icon = doc.create_element("img");
        doc.add_class(page_icon, "icon").unwrap();
        doc.append_child(doc.body(), page_icon).unwrap();

        let host = doc.create_element("x-host");
        doc.append_child(doc.body(), host).unwrap();
        let shadow = doc.attach_shadow(host).unwrap();
        let scoped_icon = doc.create_element("img");
        doc.add_class(scoped_icon, "icon").unwrap();
        doc.append_child(shadow, scoped_icon).unwrap();

        assert_eq!(doc.computed_style(page_icon).fg, Some(Color::Red));
        assert_eq!(doc.computed_style(scoped_icon), Style::default());

        doc.adopt_stylesheet(shadow, StyleSheet::new().with_rule("icon", Style::default().fg(Color::Green)))
            .unwrap();
        assert_eq!(doc.computed_style(scoped_icon).fg, Some(Color::Green));
        assert_eq!(doc.adopt_stylesheet(host, StyleSheet::new()), Err(DomError::NotAShadowRoot(host)));
    }
}
