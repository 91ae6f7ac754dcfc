//! Integration tests for the attach flow
//!
//! These tests drive the icon through the document the way a page would:
//! construction → insertion → mutation delivery → activation → teardown

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use ratatui::style::{Color, Style};

    use crate::tui::components::xterminate_icon::{
        cleanup_icons, inject_icon, AttachState, IconOptions, IconOptionsPatch, XterminateIcon,
    };
    use crate::tui::document::{Document, Event, EventType, NodeId, PageView};
    use crate::tui::testing::page_with_late_toolbar;

    fn options(container: Option<NodeId>) -> IconOptions {
        IconOptions {
            icon_source: "a.png".to_string(),
            label_text: "L".to_string(),
            on_activate: None,
            target_container: container,
        }
    }

    #[test]
    fn test_container_present_attaches_without_delivery() {
        let (mut doc, header, _) = page_with_late_toolbar();
        let icon = XterminateIcon::new(&mut doc, options(Some(header))).unwrap();

        doc.append_child(doc.body(), icon.node()).unwrap();

        assert_eq!(doc.parent(icon.node()), Some(header));
        assert_eq!(icon.state(), AttachState::Attached);
        assert_eq!(icon.attach_count(), 1);
        assert!(doc.observers().is_empty());
        assert_eq!(doc.deliver_mutations(), 0);
    }

    #[test]
    fn test_container_inserted_later_attaches_once() {
        let (mut doc, _, toolbar) = page_with_late_toolbar();
        let icon = XterminateIcon::new(&mut doc, options(Some(toolbar))).unwrap();
        doc.append_child(doc.body(), icon.node()).unwrap();
        assert_ne!(doc.parent(icon.node()), Some(toolbar));
        assert!(icon.is_watching());

        doc.append_child(doc.body(), toolbar).unwrap();
        assert_eq!(doc.deliver_mutations(), 1);

        assert_eq!(doc.parent(icon.node()), Some(toolbar));
        assert_eq!(icon.attach_count(), 1);

        // No watcher left to react to anything that follows
        let extra = doc.create_element("p");
        doc.append_child(toolbar, extra).unwrap();
        doc.remove(toolbar).unwrap();
        doc.append_child(doc.body(), toolbar).unwrap();
        assert_eq!(doc.deliver_mutations(), 0);
        assert_eq!(icon.attach_count(), 1);
    }

    #[test]
    fn test_no_container_never_attaches() {
        let (mut doc, _, _) = page_with_late_toolbar();
        let icon = XterminateIcon::new(&mut doc, options(None)).unwrap();
        doc.append_child(doc.body(), icon.node()).unwrap();

        let other = doc.create_element("div");
        doc.append_child(doc.body(), other).unwrap();
        doc.deliver_mutations();

        assert_eq!(doc.parent(icon.node()), Some(doc.body()));
        assert_eq!(icon.state(), AttachState::Unattached);
        assert!(doc.observers().is_empty());
    }

    #[test]
    fn test_destroy_twice() {
        let (mut doc, _, toolbar) = page_with_late_toolbar();
        let icon = XterminateIcon::new(&mut doc, options(Some(toolbar))).unwrap();
        doc.append_child(doc.body(), icon.node()).unwrap();

        icon.remove(&mut doc);
        icon.remove(&mut doc);

        assert_eq!(icon.state(), AttachState::Destroyed);
        assert!(doc.observers().is_empty());
        assert_eq!(doc.listener_count(icon.node()), 0);
    }

    #[test]
    fn test_update_changes_only_given_field() {
        let mut doc = Document::new();
        let icon = XterminateIcon::new(&mut doc, options(None)).unwrap();

        icon.update_options(&mut doc, IconOptionsPatch::default().icon_source("b.png"));

        assert_eq!(doc.attribute(icon.icon_node(), "src"), Some("b.png"));
        assert_eq!(doc.text(icon.label_node()), "L");
    }

    #[test]
    fn test_click_does_not_reach_page_listeners() {
        let (mut doc, header, _) = page_with_late_toolbar();
        let activations = Rc::new(Cell::new(0));
        let page_clicks = Rc::new(Cell::new(0));

        let sink = Rc::clone(&activations);
        let icon = inject_icon(
            &mut doc,
            IconOptionsPatch::default()
                .target_container(header)
                .on_activate(move || sink.set(sink.get() + 1)),
        )
        .unwrap();

        let clicks = Rc::clone(&page_clicks);
        let body = doc.body();
        doc.add_event_listener(body, EventType::Click, Rc::new(move |_: &mut Event| clicks.set(clicks.get() + 1)))
            .unwrap();
        let clicks = Rc::clone(&page_clicks);
        doc.add_event_listener(header, EventType::Click, Rc::new(move |_: &mut Event| clicks.set(clicks.get() + 1)))
            .unwrap();

        let event = doc.dispatch_event(icon.icon_node(), EventType::Click).unwrap();

        assert!(event.propagation_stopped());
        assert_eq!(event.current_target, icon.node());
        assert_eq!(activations.get(), 1);
        assert_eq!(page_clicks.get(), 0);

        // Once destroyed, clicks bubble like any other node's
        icon.remove(&mut doc);
        doc.append_child(header, icon.node()).unwrap();
        doc.dispatch_event(icon.icon_node(), EventType::Click).unwrap();
        assert_eq!(activations.get(), 1);
        assert_eq!(page_clicks.get(), 2);
    }

    #[test]
    fn test_page_styles_do_not_reach_icon() {
        let (mut doc, header, _) = page_with_late_toolbar();
        doc.stylesheet_mut().insert("icon", Style::default().fg(Color::Red));
        doc.stylesheet_mut().insert("tooltip", Style::default().bg(Color::Blue));
        let icon = inject_icon(&mut doc, IconOptionsPatch::default().target_container(header)).unwrap();

        let page_img = doc.create_element("img");
        doc.add_class(page_img, "icon").unwrap();
        doc.append_child(header, page_img).unwrap();

        assert_eq!(doc.computed_style(page_img).fg, Some(Color::Red));
        assert_ne!(doc.computed_style(icon.icon_node()).fg, Some(Color::Red));
        assert_eq!(doc.computed_style(icon.label_node()).bg, Some(Color::Black));
    }

    #[test]
    fn test_independent_watchers() {
        let (mut doc, _, toolbar) = page_with_late_toolbar();
        let sidebar = doc.create_element("aside");
        let first = XterminateIcon::new(&mut doc, options(Some(toolbar))).unwrap();
        let second = XterminateIcon::new(&mut doc, options(Some(sidebar))).unwrap();
        doc.append_child(doc.body(), first.node()).unwrap();
        doc.append_child(doc.body(), second.node()).unwrap();
        assert_eq!(doc.observers().len(), 2);

        doc.append_child(doc.body(), toolbar).unwrap();
        doc.deliver_mutations();

        assert_eq!(first.state(), AttachState::Attached);
        assert!(second.is_watching());
        assert_eq!(doc.observers().len(), 1);

        second.remove(&mut doc);
        doc.append_child(doc.body(), sidebar).unwrap();
        assert_eq!(doc.deliver_mutations(), 0);
        assert!(doc.observers().is_empty());
    }

    #[test]
    fn test_cleanup_then_outline() {
        let (mut doc, header, toolbar) = page_with_late_toolbar();
        inject_icon(&mut doc, IconOptionsPatch::default().target_container(header)).unwrap();
        let waiting = inject_icon(&mut doc, IconOptionsPatch::default().target_container(toolbar)).unwrap();
        doc.append_child(doc.body(), waiting.node()).unwrap();

        let before: Vec<String> = PageView::new(&doc).lines().iter().map(|l| l.plain()).collect();
        assert!(before.contains(&"  div.header".to_string()));
        assert!(before.contains(&"    xterminate-icon".to_string()));

        assert_eq!(cleanup_icons(&mut doc), 2);
        assert!(doc.observers().is_empty());

        let after: Vec<String> = PageView::new(&doc).lines().iter().map(|l| l.plain()).collect();
        assert_eq!(after, vec!["body", "  div.header"]);
    }
}
