//! Custom element definitions and lifecycle reactions

use std::collections::HashMap;

use super::{Document, NodeId};
use crate::tui::error::{DomError, DomResult};

/// Behavior attached to an element node.
///
/// The document calls these hooks synchronously after the tree operation that
/// caused them has completed, so implementations may mutate the tree.
pub trait CustomElement {
    /// The node became part of the document body (possibly through a shadow host)
    fn connected(&self, _doc: &mut Document) {}

    /// The node left the document body
    fn disconnected(&self, _doc: &mut Document) {}

    /// An observed attribute of the node changed
    fn attribute_changed(
        &self,
        _doc: &mut Document,
        _name: &str,
        _old_value: Option<&str>,
        _new_value: Option<&str>,
    ) {
    }

    /// Tear the element down and take it out of the document
    fn remove(&self, doc: &mut Document);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementDefinition {
    pub name: String,
    pub observed_attributes: Vec<String>,
}

impl ElementDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            observed_attributes: Vec::new(),
        }
    }

    pub fn observe_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.observed_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn observes(&self, attribute: &str) -> bool {
        self.observed_attributes.iter().any(|a| a == attribute)
    }
}

/// Tag name to definition map, one per document
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    definitions: HashMap<String, ElementDefinition>,
}

impl CustomElementRegistry {
    /// Register a definition. Names must be lowercase and contain a hyphen.
    pub fn define(&mut self, definition: ElementDefinition) -> DomResult<()> {
        if !is_valid_name(&definition.name) {
            return Err(DomError::InvalidCustomElementName(definition.name));
        }
        if self.definitions.contains_key(&definition.name) {
            return Err(DomError::AlreadyDefined(definition.name));
        }
        tracing::debug!("Defined custom element '{}'", definition.name);
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ElementDefinition> {
        self.definitions.get(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn is_valid_name(name: &str) -> bool {
    name.contains('-')
        && name.starts_with(|c: char| c.is_ascii_lowercase())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' || c == '.')
}

/// Lifecycle callbacks waiting to run
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Reaction {
    Connected(NodeId),
    Disconnected(NodeId),
    AttributeChanged {
        node: NodeId,
        name: String,
        old_value: Option<String>,
        new_value: Option<String>,
    },
}

impl Reaction {
    pub fn node(&self) -> NodeId {
        match self {
            Reaction::Connected(node) | Reaction::Disconnected(node) => *node,
            Reaction::AttributeChanged { node, .. } => *node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut registry = CustomElementRegistry::default();
        registry
            .define(ElementDefinition::new("my-widget").observe_attributes(["label"]))
            .unwrap();

        let definition = registry.get("my-widget").unwrap();
        assert!(definition.observes("label"));
        assert!(!definition.observes("title"));
        assert!(registry.get("other-widget").is_none());
    }

    #[test]
    fn test_define_twice_fails() {
        let mut registry = CustomElementRegistry::default();
        registry.define(ElementDefinition::new("my-widget")).unwrap();

        let err = registry.define(ElementDefinition::new("my-widget")).unwrap_err();
        assert_eq!(err, DomError::AlreadyDefined("my-widget".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_need_a_hyphen() {
        let mut registry = CustomElementRegistry::default();
        for name in ["widget", "My-widget", "-widget", "my widget"] {
            assert_eq!(
                registry.define(ElementDefinition::new(name)),
                Err(DomError::InvalidCustomElementName(name.to_string())),
                "{name} should be rejected"
            );
        }
        assert!(registry.is_empty());
    }
}
