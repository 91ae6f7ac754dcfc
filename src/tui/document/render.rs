//! Outline rendering of the composed tree
//!
//! Each node becomes one line, indented by depth. Shadow roots are shown
//! between their host and the host's light children. The detail part of a
//! line (image source or text content) is drawn with the node's computed
//! style, so scoped stylesheets are visible in the output.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

use super::{Document, NodeId, NodeKind};
use crate::config::DisplayConfig;
use crate::tui::widgets::RenderableWidget;

const INDENT: u16 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct OutlineLine {
    pub node: NodeId,
    pub depth: u16,
    pub label: String,
    pub detail: Option<String>,
    pub detail_style: Style,
}

impl OutlineLine {
    pub fn plain(&self) -> String {
        let indent = " ".repeat((self.depth * INDENT) as usize);
        match &self.detail {
            Some(detail) => format!("{indent}{} {detail}", self.label),
            None => format!("{indent}{}", self.label),
        }
    }
}

/// Renders a document subtree as an indented outline
pub struct PageView<'a> {
    doc: &'a Document,
    root: NodeId,
    highlight: Option<NodeId>,
}

impl<'a> PageView<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            root: doc.body(),
            highlight: None,
        }
    }

    pub fn with_root(mut self, root: NodeId) -> Self {
        self.root = root;
        self
    }

    /// Draw the label of `node` with the selection color
    pub fn with_highlight(mut self, node: Option<NodeId>) -> Self {
        self.highlight = node;
        self
    }

    pub fn lines(&self) -> Vec<OutlineLine> {
        let mut lines = Vec::new();
        self.collect(self.root, 0, &mut lines);
        lines
    }

    fn collect(&self, node: NodeId, depth: u16, lines: &mut Vec<OutlineLine>) {
        let Some(kind) = self.doc.kind(node) else {
            return;
        };
        lines.push(OutlineLine {
            node,
            depth,
            label: self.label(node, kind),
            detail: self.detail(node),
            detail_style: self.doc.computed_style(node),
        });
        if let Some(shadow) = self.doc.shadow_root(node) {
            self.collect(shadow, depth + 1, lines);
        }
        for &child in self.doc.children(node) {
            self.collect(child, depth + 1, lines);
        }
    }

    fn label(&self, node: NodeId, kind: &NodeKind) -> String {
        match kind {
            NodeKind::ShadowRoot { .. } => "#shadow-root".to_string(),
            NodeKind::Element { tag } => {
                let mut label = tag.clone();
                for class in self.doc.classes(node) {
                    label.push('.');
                    label.push_str(class);
                }
                label
            }
        }
    }

    fn detail(&self, node: NodeId) -> Option<String> {
        if self.doc.tag(node) == Some("img") {
            return Some(format!("[{}]", self.doc.attribute(node, "src").unwrap_or("")));
        }
        let text = self.doc.text(node);
        (!text.is_empty()).then(|| format!("\"{text}\""))
    }
}

impl RenderableWidget for PageView<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        for (line, y) in self.lines().iter().zip(area.top()..area.bottom()) {
            let x = area.x + line.depth * INDENT;
            if x >= area.right() {
                continue;
            }
            let label_style = if self.highlight == Some(line.node) {
                Style::default().fg(config.selection_fg)
            } else {
                config.text_style()
            };
            let available = (area.right() - x) as usize;
            buf.set_stringn(x, y, &line.label, available, label_style);

            if let Some(detail) = &line.detail {
                let detail_x = x + line.label.width() as u16 + 1;
                if detail_x < area.right() {
                    let available = (area.right() - detail_x) as usize;
                    buf.set_stringn(detail_x, y, detail, available, line.detail_style);
                }
            }
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(self.lines().len() as u16)
    }
}
