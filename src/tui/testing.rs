//! General test utilities for TUI tests.
//!
//! For widget-specific rendering helpers, see `crate::tui::widgets::testing`.

use ratatui::buffer::Buffer;

use crate::tui::document::{Document, NodeId};

/// Constant for general rendering width
pub const RENDER_WIDTH: u16 = 80;

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

/// Helper for buffer assertions
pub fn assert_buffer(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_lines(buf);
    let buffer_width = buf.area().width as usize;

    assert_eq!(
        actual.len(),
        expected.len(),
        "Buffer height mismatch: expected {} lines, got {}",
        expected.len(),
        actual.len()
    );
    for (i, expected_line) in expected.iter().enumerate() {
        assert_eq!(
            actual[i].chars().count(),
            buffer_width,
            "Line {} width mismatch: expected {}, got {}",
            i,
            buffer_width,
            actual[i].chars().count()
        );
        assert_eq!(
            actual[i].trim_end(),
            expected_line.trim_end(),
            "Line {} mismatch:\nExpected: '{}'\nActual:   '{}'",
            i,
            expected_line,
            actual[i]
        );
    }
}

/// Document with a `div.header` already in the body and a detached
/// `div.toolbar` that tests can insert later.
///
/// Returns `(doc, header, toolbar)`.
pub fn page_with_late_toolbar() -> (Document, NodeId, NodeId) {
    let mut doc = Document::new();
    let header = doc.create_element("div");
    doc.add_class(header, "header").unwrap();
    doc.append_child(doc.body(), header).unwrap();

    let toolbar = doc.create_element("div");
    doc.add_class(toolbar, "toolbar").unwrap();
    (doc, header, toolbar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_with_late_toolbar() {
        let (doc, header, toolbar) = page_with_late_toolbar();
        assert!(doc.is_connected(header));
        assert!(!doc.is_connected(toolbar));
        assert!(doc.has_class(toolbar, "toolbar"));
    }
}
