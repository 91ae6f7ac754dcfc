/// DataDisplayDialog - centered modal showing a key/value mapping
///
/// Every value is classified once and laid out by kind:
/// - sequences: one bulleted row per item, each copyable
/// - mappings: pretty-printed JSON followed by a single copy row
/// - scalars: one inline copyable row
///
/// Copy rows form a selection ring moved with `select_next`/`select_prev`.
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    widgets::{Block, Borders, Clear, Widget},
};
use serde_json::{Map, Value};

use super::RenderableWidget;
use crate::config::DisplayConfig;
use crate::formatting::BoxChars;
use crate::tui::clipboard::Clipboard;

const MODAL_PERCENT: u16 = 80;
const FOOTER: &str = "y copy  esc close";
const COPY_LABEL: &str = "[copy]";

const ASCII_BORDER: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

/// Shape of one inspected value, decided once at construction
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Sequence(Vec<Value>),
    Mapping(Map<String, Value>),
    Scalar(Value),
}

impl DataValue {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => DataValue::Sequence(items),
            Value::Object(map) => DataValue::Mapping(map),
            scalar => DataValue::Scalar(scalar),
        }
    }

    pub fn type_description(&self) -> String {
        match self {
            DataValue::Sequence(items) => format!("{} items", items.len()),
            DataValue::Mapping(_) => "object".to_string(),
            DataValue::Scalar(Value::String(_)) => "string".to_string(),
            DataValue::Scalar(Value::Number(_)) => "number".to_string(),
            DataValue::Scalar(Value::Bool(_)) => "boolean".to_string(),
            DataValue::Scalar(_) => "null".to_string(),
        }
    }
}

/// Text form used for display and copying. Strings are taken as-is,
/// everything else is compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Key,
    Item,
    Json,
    Scalar,
    Copy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogRow {
    pub kind: RowKind,
    pub text: String,
    /// Index into the dialog's copy actions
    pub action: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyAction {
    pub key: String,
    pub payload: String,
}

pub struct DataDisplayDialog {
    title: String,
    rows: Vec<DialogRow>,
    actions: Vec<CopyAction>,
    selected: usize,
    on_close: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for DataDisplayDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataDisplayDialog")
            .field("title", &self.title)
            .field("rows", &self.rows.len())
            .field("actions", &self.actions.len())
            .field("selected", &self.selected)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl DataDisplayDialog {
    pub fn new(title: impl Into<String>, data: Map<String, Value>, on_close: impl FnOnce() + 'static) -> Self {
        let mut rows = Vec::new();
        let mut actions = Vec::new();

        for (key, value) in data {
            let value = DataValue::classify(value);
            rows.push(DialogRow {
                kind: RowKind::Key,
                text: format!("{} ({})", key, value.type_description()),
                action: None,
            });
            match value {
                DataValue::Sequence(items) => {
                    for item in &items {
                        let payload = stringify(item);
                        rows.push(DialogRow {
                            kind: RowKind::Item,
                            text: single_line(&payload),
                            action: Some(actions.len()),
                        });
                        actions.push(CopyAction { key: key.clone(), payload });
                    }
                }
                DataValue::Mapping(map) => {
                    let payload = pretty_json(Value::Object(map));
                    rows.extend(payload.lines().map(|line| DialogRow {
                        kind: RowKind::Json,
                        text: line.to_string(),
                        action: None,
                    }));
                    rows.push(DialogRow {
                        kind: RowKind::Copy,
                        text: COPY_LABEL.to_string(),
                        action: Some(actions.len()),
                    });
                    actions.push(CopyAction { key, payload });
                }
                DataValue::Scalar(scalar) => {
                    let payload = stringify(&scalar);
                    rows.push(DialogRow {
                        kind: RowKind::Scalar,
                        text: single_line(&payload),
                        action: Some(actions.len()),
                    });
                    actions.push(CopyAction { key, payload });
                }
            }
        }

        Self {
            title: title.into(),
            rows,
            actions,
            selected: 0,
            on_close: Some(Box::new(on_close)),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[DialogRow] {
        &self.rows
    }

    pub fn actions(&self) -> &[CopyAction] {
        &self.actions
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_action(&self) -> Option<&CopyAction> {
        self.actions.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.actions.is_empty() {
            self.selected = (self.selected + 1) % self.actions.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.actions.is_empty() {
            self.selected = (self.selected + self.actions.len() - 1) % self.actions.len();
        }
    }

    /// Write the selected payload to `clipboard`. Failures are logged, not
    /// returned.
    pub fn copy_selected(&self, clipboard: &mut dyn Clipboard) -> bool {
        let Some(action) = self.selected_action() else {
            return false;
        };
        match clipboard.write_text(&action.payload) {
            Ok(()) => {
                tracing::debug!("Copied '{}' ({} bytes)", action.key, action.payload.len());
                true
            }
            Err(e) => {
                tracing::error!("Failed to copy text: {}", e);
                false
            }
        }
    }

    /// Invoke the close callback. Only the first call has an effect.
    pub fn close(&mut self) -> bool {
        match self.on_close.take() {
            Some(on_close) => {
                on_close();
                true
            }
            None => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.on_close.is_none()
    }

    /// Body as plain text, without copy rows
    pub fn plain_lines(&self, box_chars: &BoxChars) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| match row.kind {
                RowKind::Key => Some(row.text.clone()),
                RowKind::Item => Some(format!("  {} {}", box_chars.bullet, row.text)),
                RowKind::Json | RowKind::Scalar => Some(format!("  {}", row.text)),
                RowKind::Copy => None,
            })
            .collect()
    }

    /// First row to draw so the selected row stays inside `height` rows
    fn scroll_offset(&self, height: u16) -> usize {
        let height = height as usize;
        let selected_row = self
            .rows
            .iter()
            .position(|row| row.action == Some(self.selected))
            .unwrap_or(0);
        if height == 0 || selected_row < height {
            0
        } else {
            selected_row + 1 - height
        }
    }

    fn render_row(&self, row: &DialogRow, area: Rect, y: u16, buf: &mut Buffer, config: &DisplayConfig) {
        let right = area.right();
        let text_style = config.text_style();
        let mut put = |x: u16, text: &str, style: Style| {
            if x < right {
                buf.set_stringn(x, y, text, (right - x) as usize, style);
            }
        };

        if row.kind == RowKind::Key {
            put(area.x + 1, &row.text, text_style.add_modifier(Modifier::BOLD));
            return;
        }

        let selected = row.action.is_some() && row.action == Some(self.selected);
        if selected {
            put(area.x + 1, &config.box_chars.selector, config.selection_style(true));
        }
        let style = if selected { config.selection_style(true) } else { text_style };
        let x = area.x + 3;
        match row.kind {
            RowKind::Item => {
                put(x, &config.box_chars.bullet, text_style);
                put(x + 2, &row.text, style);
            }
            _ => put(x, &row.text, style),
        }
    }
}

fn pretty_json(value: Value) -> String {
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}

fn border_set(config: &DisplayConfig) -> border::Set {
    if config.use_unicode {
        border::ROUNDED
    } else {
        ASCII_BORDER
    }
}

/// Rect of `percent` of `area` in both directions, centered
pub fn centered_rect(area: Rect, percent: u16) -> Rect {
    let width = (area.width as u32 * percent as u32 / 100) as u16;
    let height = (area.height as u32 * percent as u32 / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl RenderableWidget for DataDisplayDialog {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let modal = centered_rect(area, MODAL_PERCENT);
        Clear.render(modal, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border_set(config))
            .title(format!(" {} ", self.title));
        let inner = block.inner(modal);
        block.render(modal, buf);
        if inner.height < 2 || inner.width < 4 {
            return;
        }

        let body = Rect {
            height: inner.height - 1,
            ..inner
        };
        let offset = self.scroll_offset(body.height);
        for (row, y) in self.rows.iter().skip(offset).zip(body.top()..body.bottom()) {
            self.render_row(row, body, y, buf, config);
        }

        let footer_y = inner.bottom() - 1;
        buf.set_stringn(
            inner.x + 1,
            footer_y,
            FOOTER,
            (inner.width - 1) as usize,
            config.text_style().add_modifier(Modifier::DIM),
        );
    }
}
