/// Widget-based rendering infrastructure for TUI
///
/// Widgets render themselves directly into a ratatui Buffer so they can be
/// composed and tested against in-memory buffers.

#[cfg(test)]
pub mod testing;

pub mod data_display_dialog;
pub use data_display_dialog::{DataDisplayDialog, DataValue};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
};
use crate::config::DisplayConfig;

/// Core trait for renderable widgets
///
/// This trait is object-safe, so different widget types can be stored
/// behind `&dyn RenderableWidget`.
pub trait RenderableWidget {
    /// Render this widget into the provided buffer
    ///
    /// # Arguments
    ///
    /// * `area` - The rectangular area to render into
    /// * `buf` - The buffer to write to
    /// * `config` - Display configuration (colors, box chars, etc.)
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig);

    /// Get the preferred height of this widget
    ///
    /// Returns None if the widget can adapt to any height.
    fn preferred_height(&self) -> Option<u16> {
        None
    }

    /// Get the preferred width of this widget
    ///
    /// Returns None if the widget can adapt to any width.
    fn preferred_width(&self) -> Option<u16> {
        None
    }
}
