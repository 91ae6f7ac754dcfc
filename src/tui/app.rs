//! Demo page: a document with a header, a toolbar container that arrives
//! late, and one icon waiting for it.
//!
//! The icon is created with the toolbar as its target while the toolbar is
//! still detached, so the page starts in the watching state. Inserting the
//! toolbar queues a mutation record; the icon attaches on the next `tick`.

use std::cell::Cell;
use std::rc::Rc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};
use serde_json::{json, Map, Value};

use super::action::{Action, DialogAction};
use super::clipboard::Clipboard;
use super::components::xterminate_icon::{
    self, ActivateCallback, AttachState, IconOptions, IconOptionsPatch, XterminateIcon, ICON_URL_ATTRIBUTE, TAG_NAME,
};
use super::document::{Document, EventType, NodeId, PageView, StyleSheet};
use super::error::DomResult;
use super::widgets::{DataDisplayDialog, RenderableWidget};
use crate::config::{Config, DisplayConfig, IconConfig};
use crate::formatting::format_header;

const ALT_ICON_SOURCE: &str = "icons/icon-alt.png";
const EXTRA_LABELS: [&str; 2] = ["Remove this page", "Xterminate!"];
const HELP: &str = "c toolbar  enter click  l label  i icon-url  x cleanup  r respawn  q quit";
const DIALOG_TITLE: &str = "Xterminate";

/// Page-level rules. The `icon` rule collides with the widget's own class on
/// purpose: it must not leak into the shadow root.
fn page_stylesheet() -> StyleSheet {
    StyleSheet::new()
        .with_rule("header", Style::default().add_modifier(Modifier::BOLD))
        .with_rule("toolbar", Style::default().fg(Color::Cyan))
        .with_rule("icon", Style::default().fg(Color::Red).add_modifier(Modifier::CROSSED_OUT))
}

fn activation_callback(activated: &Rc<Cell<bool>>) -> ActivateCallback {
    let activated = Rc::clone(activated);
    Rc::new(move || {
        tracing::info!("Xterminate action triggered");
        activated.set(true);
    })
}

pub struct App {
    doc: Document,
    display: DisplayConfig,
    icon_config: IconConfig,
    toolbar: NodeId,
    icon: XterminateIcon,
    activated: Rc<Cell<bool>>,
    dialog: Option<DataDisplayDialog>,
    dialogs_closed: Rc<Cell<usize>>,
    clipboard: Box<dyn Clipboard>,
    label_index: usize,
    status: String,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, clipboard: Box<dyn Clipboard>) -> DomResult<Self> {
        let display = config.display();
        let mut doc = Document::new();
        *doc.stylesheet_mut() = page_stylesheet();
        xterminate_icon::register(&mut doc)?;

        let body = doc.body();
        let header = doc.create_element("div");
        doc.add_class(header, "header")?;
        doc.set_text(header, "xterminate demo page")?;
        doc.append_child(body, header)?;

        let toolbar = doc.create_element("div");
        doc.add_class(toolbar, "toolbar")?;

        let activated = Rc::new(Cell::new(false));
        let icon = XterminateIcon::new(
            &mut doc,
            IconOptions {
                icon_source: config.icon.source.clone(),
                label_text: config.icon.label.clone(),
                on_activate: Some(activation_callback(&activated)),
                target_container: Some(toolbar),
            },
        )?;
        icon.apply_theme(&mut doc, &display)?;
        doc.append_child(body, icon.node())?;

        Ok(Self {
            doc,
            display,
            icon_config: config.icon.clone(),
            toolbar,
            icon,
            activated,
            dialog: None,
            dialogs_closed: Rc::new(Cell::new(0)),
            clipboard,
            label_index: 0,
            status: "Waiting for the toolbar, press c to insert it".to_string(),
            should_quit: false,
        })
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn icon(&self) -> &XterminateIcon {
        &self.icon
    }

    pub fn toolbar(&self) -> NodeId {
        self.toolbar
    }

    pub fn dialog(&self) -> Option<&DataDisplayDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn dialogs_closed(&self) -> usize {
        self.dialogs_closed.get()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Deliver pending mutation records and open the dialog if the icon was
    /// activated since the last tick.
    pub fn tick(&mut self) {
        let delivered = self.doc.deliver_mutations();
        if delivered > 0 {
            tracing::trace!("TICK: delivered to {} observer(s)", delivered);
        }
        if self.activated.replace(false) {
            self.open_dialog();
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!("ACTION: {:?}", action);
        let result = match action {
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Action::ToggleToolbar => self.toggle_toolbar(),
            Action::ClickIcon => self.click_icon(),
            Action::CycleLabel => {
                self.cycle_label();
                Ok(())
            }
            Action::ToggleIconUrl => self.toggle_icon_url(),
            Action::CleanupIcons => {
                let removed = xterminate_icon::cleanup_icons(&mut self.doc);
                self.status = format!("Removed {} icon(s)", removed);
                Ok(())
            }
            Action::RespawnIcon => self.respawn_icon(),
            Action::Dialog(dialog_action) => {
                self.handle_dialog(dialog_action);
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::warn!("{:?} failed: {}", action, e);
            self.status = format!("Error: {}", e);
        }
        self.tick();
    }

    fn toggle_toolbar(&mut self) -> DomResult<()> {
        if self.doc.is_connected(self.toolbar) {
            self.doc.remove(self.toolbar)?;
            self.status = "Toolbar removed".to_string();
        } else {
            let body = self.doc.body();
            self.doc.append_child(body, self.toolbar)?;
            self.status = "Toolbar inserted".to_string();
        }
        Ok(())
    }

    fn click_icon(&mut self) -> DomResult<()> {
        let event = self.doc.dispatch_event(self.icon.node(), EventType::Click)?;
        self.status = if event.propagation_stopped() {
            "Icon clicked".to_string()
        } else {
            "Nobody answered the click".to_string()
        };
        Ok(())
    }

    fn cycle_label(&mut self) {
        self.label_index = (self.label_index + 1) % (EXTRA_LABELS.len() + 1);
        let label = match self.label_index {
            0 => self.icon_config.label.clone(),
            n => EXTRA_LABELS[n - 1].to_string(),
        };
        self.icon
            .update_options(&mut self.doc, IconOptionsPatch::default().label_text(label.clone()));
        self.status = format!("Label set to '{}'", label);
    }

    fn toggle_icon_url(&mut self) -> DomResult<()> {
        let next = if self.icon.options().icon_source == ALT_ICON_SOURCE {
            self.icon_config.source.clone()
        } else {
            ALT_ICON_SOURCE.to_string()
        };
        self.doc.set_attribute(self.icon.node(), ICON_URL_ATTRIBUTE, &next)?;
        self.status = format!("{}=\"{}\"", ICON_URL_ATTRIBUTE, next);
        Ok(())
    }

    fn respawn_icon(&mut self) -> DomResult<()> {
        if self.icon.state() != AttachState::Destroyed {
            self.status = "The icon is still alive, press x first".to_string();
            return Ok(());
        }
        let patch = IconOptionsPatch {
            icon_source: Some(self.icon_config.source.clone()),
            label_text: Some(self.icon_config.label.clone()),
            on_activate: Some(activation_callback(&self.activated)),
            target_container: Some(self.toolbar),
        };
        let icon = xterminate_icon::inject_icon(&mut self.doc, patch)?;
        icon.apply_theme(&mut self.doc, &self.display)?;
        self.icon = icon;
        self.label_index = 0;
        self.status = format!("New icon is {:?}", self.icon.state());
        Ok(())
    }

    fn handle_dialog(&mut self, action: DialogAction) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        match action {
            DialogAction::SelectNext => dialog.select_next(),
            DialogAction::SelectPrev => dialog.select_prev(),
            DialogAction::Copy => {
                self.status = if dialog.copy_selected(self.clipboard.as_mut()) {
                    "Copied to clipboard".to_string()
                } else {
                    "Copy failed".to_string()
                };
            }
            DialogAction::Close => {
                dialog.close();
                self.dialog = None;
            }
        }
    }

    fn open_dialog(&mut self) {
        let closed = Rc::clone(&self.dialogs_closed);
        self.dialog = Some(DataDisplayDialog::new(DIALOG_TITLE, self.snapshot(), move || {
            closed.set(closed.get() + 1);
            tracing::debug!("Inspection dialog closed");
        }));
    }

    /// Current icon and page state, as shown in the dialog
    fn snapshot(&self) -> Map<String, Value> {
        let options = self.icon.options();
        let outline = PageView::new(&self.doc)
            .lines()
            .iter()
            .map(|line| Value::String(line.plain()))
            .collect();

        let mut data = Map::new();
        data.insert("state".to_string(), json!(format!("{:?}", self.icon.state())));
        data.insert("attach_count".to_string(), json!(self.icon.attach_count()));
        data.insert("toolbar_connected".to_string(), json!(self.doc.is_connected(self.toolbar)));
        data.insert(
            "options".to_string(),
            json!({
                "icon_source": options.icon_source,
                "label_text": options.label_text,
                "target_container": options.target_container.map(|node| format!("{:?}", node)),
            }),
        );
        data.insert("icons".to_string(), json!(self.doc.query_selector_all(TAG_NAME).len()));
        data.insert("outline".to_string(), Value::Array(outline));
        data
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let display = &self.display;
        if area.height < 4 {
            return;
        }
        let width = area.width as usize;

        let mut y = area.y;
        let title_style = display.text_style().add_modifier(Modifier::BOLD);
        for line in format_header("xterminate", true, display).lines() {
            buf.set_stringn(area.x, y, line, width, title_style);
            y += 1;
        }

        let page = Rect {
            x: area.x,
            y,
            width: area.width,
            height: (area.bottom() - 2).saturating_sub(y),
        };
        PageView::new(&self.doc)
            .with_highlight(Some(self.icon.node()))
            .render(page, buf, display);

        let toolbar = if self.doc.is_connected(self.toolbar) { "present" } else { "absent" };
        let status = format!("icon: {:?}  toolbar: {}  {}", self.icon.state(), toolbar, self.status);
        buf.set_stringn(area.x, area.bottom() - 2, &status, width, display.text_style());
        buf.set_stringn(
            area.x,
            area.bottom() - 1,
            HELP,
            width,
            display.text_style().add_modifier(Modifier::DIM),
        );

        if let Some(dialog) = &self.dialog {
            dialog.render(area, buf, display);
        }
    }
}
