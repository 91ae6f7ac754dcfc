use std::collections::HashMap;

use ratatui::style::Style;

/// Class name to terminal style rules.
///
/// A document has one page-level sheet and each shadow root may adopt its own.
/// Nodes only ever see the sheet of their nearest enclosing scope.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet {
    rules: HashMap<String, Style>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, class: impl Into<String>, style: Style) -> Self {
        self.insert(class, style);
        self
    }

    pub fn insert(&mut self, class: impl Into<String>, style: Style) {
        self.rules.insert(class.into(), style);
    }

    pub fn rule(&self, class: &str) -> Option<Style> {
        self.rules.get(class).copied()
    }

    /// Combined style for a node carrying `classes`, later classes win
    pub fn resolve<'a>(&self, classes: impl IntoIterator<Item = &'a String>) -> Style {
        classes
            .into_iter()
            .filter_map(|class| self.rule(class))
            .fold(Style::default(), |acc, style| acc.patch(style))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
