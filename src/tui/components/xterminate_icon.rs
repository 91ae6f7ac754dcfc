//! Self-attaching icon element
//!
//! The icon renders an image and a tooltip label inside its own shadow root,
//! so page styles never reach them. When it becomes part of the document it
//! moves itself into its target container. If that container is not in the
//! document yet, it watches the body for child-list changes and attaches as
//! soon as the container shows up.
//!
//! Lifecycle:
//!
//! ```text
//! Unattached ──visible, container present──────────────► Attached
//!     │  ▲                                                  ▲
//!     │  └── hidden ──┐                                     │
//!     └─visible, no container─► Watching ──container seen───┘
//!
//! any state ──remove()──► Destroyed
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use ratatui::style::{Modifier, Style};

use crate::config::DisplayConfig;
use crate::tui::document::{
    CustomElement, Document, ElementDefinition, Event, EventType, Listener, ListenerId,
    MutationObserverInit, MutationRecord, NodeId, ObserverId, StyleSheet,
};
use crate::tui::error::DomResult;

pub const TAG_NAME: &str = "xterminate-icon";
pub const ICON_URL_ATTRIBUTE: &str = "icon-url";
pub const TOOLTIP_TEXT_ATTRIBUTE: &str = "tooltip-text";

pub const DEFAULT_ICON_SOURCE: &str = "icons/icon.png";
pub const DEFAULT_LABEL_TEXT: &str = "Click to Xterminate";

const ICON_ALT: &str = "X-Terminator icon";
const ICON_CLASS: &str = "icon";
const TOOLTIP_CLASS: &str = "tooltip";

pub type ActivateCallback = Rc<dyn Fn()>;

/// Configuration of one icon
#[derive(Clone, Default)]
pub struct IconOptions {
    pub icon_source: String,
    pub label_text: String,
    pub on_activate: Option<ActivateCallback>,
    pub target_container: Option<NodeId>,
}

impl fmt::Debug for IconOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconOptions")
            .field("icon_source", &self.icon_source)
            .field("label_text", &self.label_text)
            .field("on_activate", &self.on_activate.is_some())
            .field("target_container", &self.target_container)
            .finish()
    }
}

impl IconOptions {
    /// Options used by [`inject_icon`] before the caller's patch is applied
    pub fn with_defaults() -> Self {
        Self {
            icon_source: DEFAULT_ICON_SOURCE.to_string(),
            label_text: DEFAULT_LABEL_TEXT.to_string(),
            on_activate: Some(Rc::new(|| tracing::info!("Xterminate action triggered"))),
            target_container: None,
        }
    }

    /// Shallow merge: fields present in `patch` replace the current ones
    pub fn merge(&mut self, patch: IconOptionsPatch) {
        if let Some(icon_source) = patch.icon_source {
            self.icon_source = icon_source;
        }
        if let Some(label_text) = patch.label_text {
            self.label_text = label_text;
        }
        if let Some(on_activate) = patch.on_activate {
            self.on_activate = Some(on_activate);
        }
        if let Some(container) = patch.target_container {
            self.target_container = Some(container);
        }
    }
}

/// Partial [`IconOptions`], `None` keeps the current value
#[derive(Clone, Default)]
pub struct IconOptionsPatch {
    pub icon_source: Option<String>,
    pub label_text: Option<String>,
    pub on_activate: Option<ActivateCallback>,
    pub target_container: Option<NodeId>,
}

impl fmt::Debug for IconOptionsPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconOptionsPatch")
            .field("icon_source", &self.icon_source)
            .field("label_text", &self.label_text)
            .field("on_activate", &self.on_activate.is_some())
            .field("target_container", &self.target_container)
            .finish()
    }
}

impl IconOptionsPatch {
    pub fn icon_source(mut self, source: impl Into<String>) -> Self {
        self.icon_source = Some(source.into());
        self
    }

    pub fn label_text(mut self, text: impl Into<String>) -> Self {
        self.label_text = Some(text.into());
        self
    }

    pub fn on_activate(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_activate = Some(Rc::new(callback));
        self
    }

    pub fn target_container(mut self, container: NodeId) -> Self {
        self.target_container = Some(container);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachState {
    Unattached,
    Watching,
    Attached,
    Destroyed,
}

/// One-shot subscription to child-list changes anywhere under the body
#[derive(Debug)]
struct Watcher {
    observer: ObserverId,
}

impl Watcher {
    fn start(doc: &mut Document, element: Weak<IconElement>) -> Self {
        let body = doc.body();
        let observer = doc.observe(
            body,
            MutationObserverInit::child_list_subtree(),
            Rc::new(move |doc: &mut Document, records: &[MutationRecord]| {
                if let Some(element) = element.upgrade() {
                    element.handle_container_changes(doc, records);
                }
            }),
        );
        Self { observer }
    }

    fn cancel(self, doc: &mut Document) {
        doc.disconnect(self.observer);
    }
}

#[derive(Debug)]
enum Lifecycle {
    Unattached,
    Watching(Watcher),
    Attached,
    Destroyed,
}

impl Lifecycle {
    fn state(&self) -> AttachState {
        match self {
            Lifecycle::Unattached => AttachState::Unattached,
            Lifecycle::Watching(_) => AttachState::Watching,
            Lifecycle::Attached => AttachState::Attached,
            Lifecycle::Destroyed => AttachState::Destroyed,
        }
    }
}

struct IconElement {
    me: Weak<IconElement>,
    node: NodeId,
    shadow: NodeId,
    icon: NodeId,
    tooltip: NodeId,
    /// Shared with the click listener so it always sees the latest callback
    options: Rc<RefCell<IconOptions>>,
    listener: Cell<Option<ListenerId>>,
    lifecycle: RefCell<Lifecycle>,
    attach_count: Cell<usize>,
}

impl IconElement {
    fn state(&self) -> AttachState {
        self.lifecycle.borrow().state()
    }

    fn target_container(&self) -> Option<NodeId> {
        self.options.borrow().target_container
    }

    fn set_lifecycle(&self, lifecycle: Lifecycle) {
        *self.lifecycle.borrow_mut() = lifecycle;
    }

    /// Push the current options into the image and label nodes
    fn render(&self, doc: &mut Document) -> DomResult<()> {
        let (source, label) = {
            let options = self.options.borrow();
            (options.icon_source.clone(), options.label_text.clone())
        };
        doc.set_attribute(self.icon, "src", &source)?;
        doc.set_text(self.tooltip, &label)
    }

    fn start_watching(&self, doc: &mut Document) {
        self.stop_watching(doc);
        let watcher = Watcher::start(doc, self.me.clone());
        tracing::debug!("{:?} waiting for container {:?}", self.node, self.target_container());
        self.set_lifecycle(Lifecycle::Watching(watcher));
    }

    /// Cancel the watcher if there is one. Other states are left alone.
    fn stop_watching(&self, doc: &mut Document) {
        let previous = std::mem::replace(&mut *self.lifecycle.borrow_mut(), Lifecycle::Unattached);
        match previous {
            Lifecycle::Watching(watcher) => {
                watcher.cancel(doc);
                tracing::debug!("{:?} stopped watching", self.node);
            }
            other => self.set_lifecycle(other),
        }
    }

    fn handle_container_changes(&self, doc: &mut Document, records: &[MutationRecord]) {
        if self.state() != AttachState::Watching {
            return;
        }
        let Some(container) = self.target_container() else {
            return;
        };
        for record in records {
            if record.is_child_list() && doc.is_connected(container) {
                self.stop_watching(doc);
                self.attach_to_container(doc);
                break;
            }
        }
    }

    fn attach_to_container(&self, doc: &mut Document) {
        let Some(container) = self.target_container() else {
            return;
        };
        self.stop_watching(doc);
        if matches!(self.state(), AttachState::Attached | AttachState::Destroyed) {
            return;
        }
        self.set_lifecycle(Lifecycle::Attached);
        if doc.parent(self.node) == Some(container) {
            return;
        }
        match doc.append_child(container, self.node) {
            Ok(()) => {
                self.attach_count.set(self.attach_count.get() + 1);
                tracing::debug!("{:?} attached to {:?}", self.node, container);
            }
            Err(e) => {
                tracing::warn!("Failed to attach {:?} to {:?}: {}", self.node, container, e);
                self.set_lifecycle(Lifecycle::Unattached);
            }
        }
    }

    fn update_options(&self, doc: &mut Document, patch: IconOptionsPatch) {
        if self.state() == AttachState::Destroyed {
            tracing::debug!("Ignoring option update on destroyed {:?}", self.node);
            return;
        }
        self.options.borrow_mut().merge(patch);
        if let Err(e) = self.render(doc) {
            tracing::warn!("Failed to render {:?}: {}", self.node, e);
        }
    }

    fn destroy(&self, doc: &mut Document) {
        if self.state() != AttachState::Destroyed {
            self.stop_watching(doc);
            if let Some(listener) = self.listener.take() {
                doc.remove_event_listener(self.node, listener);
            }
            self.set_lifecycle(Lifecycle::Destroyed);
            tracing::debug!("{:?} destroyed", self.node);
        }
        // A destroyed node may have been put back by the page
        if let Err(e) = doc.remove(self.node) {
            tracing::warn!("Failed to remove {:?}: {}", self.node, e);
        }
    }
}

impl CustomElement for IconElement {
    fn connected(&self, doc: &mut Document) {
        let Some(container) = self.target_container() else {
            return;
        };
        if !matches!(self.state(), AttachState::Unattached | AttachState::Watching) {
            return;
        }
        if doc.is_connected(container) {
            self.attach_to_container(doc);
        } else {
            self.start_watching(doc);
        }
    }

    fn disconnected(&self, doc: &mut Document) {
        self.stop_watching(doc);
    }

    fn attribute_changed(&self, doc: &mut Document, name: &str, _old_value: Option<&str>, new_value: Option<&str>) {
        let value = new_value.unwrap_or_default().to_string();
        let patch = match name {
            ICON_URL_ATTRIBUTE => IconOptionsPatch::default().icon_source(value),
            TOOLTIP_TEXT_ATTRIBUTE => IconOptionsPatch::default().label_text(value),
            _ => return,
        };
        self.update_options(doc, patch);
    }

    fn remove(&self, doc: &mut Document) {
        self.destroy(doc);
    }
}

fn activation_listener(options: Rc<RefCell<IconOptions>>) -> Listener {
    Rc::new(move |event: &mut Event| {
        event.stop_propagation();
        let callback = options.borrow().on_activate.clone();
        if let Some(callback) = callback {
            callback();
        }
    })
}

/// Styles scoped to the icon's shadow root
pub fn scoped_stylesheet(display: &DisplayConfig) -> StyleSheet {
    StyleSheet::new()
        .with_rule(ICON_CLASS, Style::default().add_modifier(Modifier::BOLD))
        .with_rule(TOOLTIP_CLASS, display.tooltip_style())
}

/// Handle to an icon living in a [`Document`]
#[derive(Clone)]
pub struct XterminateIcon {
    element: Rc<IconElement>,
}

impl fmt::Debug for XterminateIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XterminateIcon")
            .field("node", &self.element.node)
            .field("state", &self.state())
            .field("options", &*self.element.options.borrow())
            .finish()
    }
}

impl XterminateIcon {
    /// Build the icon and its shadow tree. The icon starts detached.
    pub fn new(doc: &mut Document, options: IconOptions) -> DomResult<Self> {
        let node = doc.create_element(TAG_NAME);
        let shadow = doc.attach_shadow(node)?;
        doc.adopt_stylesheet(shadow, scoped_stylesheet(&DisplayConfig::default()))?;

        let icon = doc.create_element("img");
        doc.add_class(icon, ICON_CLASS)?;
        doc.set_attribute(icon, "alt", ICON_ALT)?;
        doc.append_child(shadow, icon)?;

        let tooltip = doc.create_element("div");
        doc.add_class(tooltip, TOOLTIP_CLASS)?;
        doc.append_child(shadow, tooltip)?;

        let options = Rc::new(RefCell::new(options));
        let listener = doc.add_event_listener(node, EventType::Click, activation_listener(Rc::clone(&options)))?;
        let element = Rc::new_cyclic(|me| IconElement {
            me: me.clone(),
            node,
            shadow,
            icon,
            tooltip,
            options,
            listener: Cell::new(Some(listener)),
            lifecycle: RefCell::new(Lifecycle::Unattached),
            attach_count: Cell::new(0),
        });
        element.render(doc)?;
        doc.upgrade(node, element.clone())?;

        Ok(Self { element })
    }

    pub fn node(&self) -> NodeId {
        self.element.node
    }

    pub fn shadow_root(&self) -> NodeId {
        self.element.shadow
    }

    pub fn icon_node(&self) -> NodeId {
        self.element.icon
    }

    pub fn label_node(&self) -> NodeId {
        self.element.tooltip
    }

    pub fn options(&self) -> IconOptions {
        self.element.options.borrow().clone()
    }

    pub fn state(&self) -> AttachState {
        self.element.state()
    }

    pub fn is_watching(&self) -> bool {
        self.state() == AttachState::Watching
    }

    /// How many times the icon moved itself into its container
    pub fn attach_count(&self) -> usize {
        self.element.attach_count.get()
    }

    /// Merge `patch` into the options and refresh the image and label in
    /// place. Does not re-run attachment, even if the container changed.
    pub fn update_options(&self, doc: &mut Document, patch: IconOptionsPatch) {
        self.element.update_options(doc, patch);
    }

    /// Re-style the shadow scope from display settings
    pub fn apply_theme(&self, doc: &mut Document, display: &DisplayConfig) -> DomResult<()> {
        doc.adopt_stylesheet(self.element.shadow, scoped_stylesheet(display))
    }

    /// Stop watching, drop the click listener and leave the document.
    /// Safe to call any number of times.
    pub fn remove(&self, doc: &mut Document) {
        self.element.destroy(doc);
    }
}

/// Register the icon tag unless the document already knows it.
/// Returns true when this call performed the registration.
pub fn register(doc: &mut Document) -> DomResult<bool> {
    if doc.custom_elements().get(TAG_NAME).is_some() {
        return Ok(false);
    }
    doc.custom_elements_mut().define(
        ElementDefinition::new(TAG_NAME).observe_attributes([ICON_URL_ATTRIBUTE, TOOLTIP_TEXT_ATTRIBUTE]),
    )?;
    Ok(true)
}

/// Create an icon from the defaults merged with `patch` and append it to the
/// patch's container, if any.
pub fn inject_icon(doc: &mut Document, patch: IconOptionsPatch) -> DomResult<XterminateIcon> {
    register(doc)?;
    let mut options = IconOptions::with_defaults();
    options.merge(patch);
    let container = options.target_container;

    let icon = XterminateIcon::new(doc, options)?;
    if let Some(container) = container {
        doc.append_child(container, icon.node())?;
    }
    Ok(icon)
}

/// Destroy every icon in the document's light tree. Returns how many.
pub fn cleanup_icons(doc: &mut Document) -> usize {
    let mut removed = 0;
    for node in doc.query_selector_all(TAG_NAME) {
        if let Some(instance) = doc.instance(node) {
            instance.remove(doc);
            removed += 1;
        }
    }
    tracing::debug!("Cleaned up {} icon(s)", removed);
    removed
}
