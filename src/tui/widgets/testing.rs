/// Testing utilities for widget rendering
///
/// Helpers for rendering widgets into in-memory buffers.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
};
use crate::config::DisplayConfig;
use crate::formatting::BoxChars;
use super::RenderableWidget;

/// DisplayConfig with unicode box characters and a gold selection color,
/// distinct from the default orange so tests notice when a widget ignores
/// the config it was given.
pub fn test_config() -> DisplayConfig {
    DisplayConfig {
        use_unicode: true,
        selection_fg: Color::Rgb(255, 200, 0), // Gold
        unfocused_selection_fg: None,
        tooltip_fg: Color::White,
        tooltip_bg: Color::Black,
        error_fg: Color::Red,
        box_chars: BoxChars::unicode(),
    }
}

/// Same as [`test_config`] with ASCII box characters
pub fn test_config_ascii() -> DisplayConfig {
    DisplayConfig {
        use_unicode: false,
        box_chars: BoxChars::ascii(),
        ..test_config()
    }
}

/// Render a widget with [`test_config`] into a fresh buffer
pub fn render_widget(widget: &impl RenderableWidget, width: u16, height: u16) -> Buffer {
    render_widget_with_config(widget, width, height, &test_config())
}

pub fn render_widget_with_config(
    widget: &impl RenderableWidget,
    width: u16,
    height: u16,
    config: &DisplayConfig,
) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(buf.area, &mut buf, config);
    buf
}

/// Whole buffer as text, rows joined with newlines
pub fn buffer_to_string(buf: &Buffer) -> String {
    crate::tui::testing::buffer_lines(buf).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    struct Label(&'static str);

    impl RenderableWidget for Label {
        fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
            buf.set_string(area.x, area.y, self.0, Style::default().fg(config.selection_fg));
        }
    }

    #[test]
    fn test_render_widget_uses_test_config() {
        let buf = render_widget(&Label("Hi"), 5, 2);
        assert_eq!(buffer_to_string(&buf), "Hi   \n     ");
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 200, 0));
    }

    #[test]
    fn test_ascii_config() {
        let config = test_config_ascii();
        assert_eq!(config.box_chars.top_left, "+");
        assert_eq!(config.selection_fg, test_config().selection_fg);
    }
}
