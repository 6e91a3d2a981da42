use super::*;
use crate::backend::OverlayKind;

fn sample_page() -> VirtualDom {
    let dom = VirtualDom::new("https://shop.example.com/cart", "Cart");
    let form = dom.add_node(None, VirtualNodeSpec::new("form").with_attr("id", "checkout"));
    dom.add_node(
        Some(form),
        VirtualNodeSpec::new("input")
            .with_attr("type", "email")
            .with_attr("name", "email")
            .with_attr("placeholder", "Email address")
            .with_rect(100.0, 200.0, 300.0, 40.0),
    );
    dom.add_node(
        Some(form),
        VirtualNodeSpec::new("button")
            .with_attr("id", "pay-now")
            .with_attr("class", "btn btn-primary")
            .with_text("Pay now")
            .with_rect(100.0, 260.0, 120.0, 40.0),
    );
    dom.add_node(
        None,
        VirtualNodeSpec::new("a")
            .with_attr("href", "/help")
            .with_text("Need help?")
            .with_rect(20.0, 900.0, 80.0, 20.0),
    );
    dom
}

#[test]
fn test_query_by_id() {
    let dom = sample_page();
    let node = dom.query("#pay-now").unwrap().unwrap();
    assert_eq!(dom.tag_name(node).as_deref(), Some("button"));
}

#[test]
fn test_query_by_tag_and_class() {
    let dom = sample_page();
    let hits = dom.query_all("button.btn-primary").unwrap();
    assert_eq!(hits.len(), 1);
    assert!(dom.query_all("button.missing").unwrap().is_empty());
}

#[test]
fn test_query_by_attribute() {
    let dom = sample_page();
    let hits = dom.query_all(r#"input[type="email"]"#).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(dom.attribute(hits[0], "name").as_deref(), Some("email"));
}

#[test]
fn test_comma_group_query_keeps_document_order() {
    let dom = sample_page();
    let hits = dom.query_all("a, button").unwrap();
    assert_eq!(hits.len(), 2);
    // button precedes the link in the document.
    assert_eq!(dom.tag_name(hits[0]).as_deref(), Some("button"));
    assert_eq!(dom.tag_name(hits[1]).as_deref(), Some("a"));
}

#[test]
fn test_unsupported_selector_is_an_error() {
    let dom = sample_page();
    assert!(matches!(
        dom.query_all("form button"),
        Err(DomError::UnsupportedSelector(_))
    ));
}

#[test]
fn test_text_content_aggregates_descendants() {
    let dom = VirtualDom::new("https://example.com", "t");
    let outer = dom.add_node(
        None,
        VirtualNodeSpec::new("button").with_child(
            VirtualNodeSpec::new("span").with_text("Add to"),
        ),
    );
    dom.add_node(Some(outer), VirtualNodeSpec::new("span").with_text("cart"));
    assert_eq!(dom.text_content(outer), "Add to cart");
}

#[test]
fn test_bounding_box_tracks_scroll() {
    let dom = sample_page();
    let link = dom.query("a").unwrap().unwrap();
    let before = dom.bounding_box(link);
    assert_eq!(before.y, 900.0);

    dom.scroll_into_view(link);
    let after = dom.bounding_box(link);
    // 910 center - 360 half-viewport = 550 scroll offset.
    assert_eq!(dom.viewport().scroll_y, 550.0);
    assert_eq!(after.y, 350.0);
    assert_eq!(dom.scrolled_nodes(), vec![link]);
}

#[test]
fn test_click_on_detached_node_errors() {
    let dom = sample_page();
    let node = dom.query("#pay-now").unwrap().unwrap();
    dom.remove_node(node);
    assert!(matches!(dom.click(node), Err(DomError::DetachedNode(_))));
    assert!(!dom.exists(node));
}

#[test]
fn test_dispatch_records_events() {
    let dom = sample_page();
    let input = dom.query("input").unwrap().unwrap();
    dom.set_value(input, "user@example.com");
    dom.dispatch(input, SyntheticEvent::Input).unwrap();
    dom.dispatch(input, SyntheticEvent::Change).unwrap();
    assert_eq!(dom.value(input).as_deref(), Some("user@example.com"));
    let names: Vec<_> = dom.recorded_events().into_iter().map(|(_, n)| n).collect();
    assert_eq!(names, vec!["input", "change"]);
}

#[test]
fn test_overlay_lifecycle() {
    let dom = sample_page();
    let overlay = dom.insert_overlay(
        OverlaySpec::new(OverlayKind::Message)
            .with_class("dark-voir-message-bottom")
            .with_text("Click here"),
    );
    assert_eq!(dom.nodes_with_class("dark-voir-message"), vec![overlay]);
    assert_eq!(dom.text_content(overlay), "Click here");

    dom.set_overlay_text(overlay, "Done");
    assert_eq!(dom.text_content(overlay), "Done");

    dom.remove_node(overlay);
    assert!(dom.nodes_with_class("dark-voir-message").is_empty());
}

#[test]
fn test_overlay_rect_ignores_scroll() {
    let dom = sample_page();
    let overlay = dom.insert_overlay(
        OverlaySpec::new(OverlayKind::Highlight).with_rect(BoundingBox::new(10.0, 10.0, 50.0, 50.0)),
    );
    let link = dom.query("a").unwrap().unwrap();
    dom.scroll_into_view(link);
    assert_eq!(dom.bounding_box(overlay).y, 10.0);
}

#[test]
fn test_fixture_round_trip() {
    let json = r#"{
        "url": "https://example.com/login",
        "title": "Login",
        "body": [
            {
                "tag": "button",
                "attrs": {"id": "login", "aria-label": "Sign in"},
                "text": "Sign in",
                "rect": {"x": 10.0, "y": 20.0, "width": 100.0, "height": 30.0}
            }
        ]
    }"#;
    let dom = VirtualDom::from_json_str(json).unwrap();
    assert_eq!(dom.url(), "https://example.com/login");
    assert_eq!(dom.title(), "Login");
    let node = dom.query("#login").unwrap().unwrap();
    assert_eq!(dom.attribute(node, "aria-label").as_deref(), Some("Sign in"));
    assert_eq!(dom.bounding_box(node).width, 100.0);
}

#[test]
fn test_ancestor_tags() {
    let dom = VirtualDom::new("https://example.com", "t");
    let nav = dom.add_node(None, VirtualNodeSpec::new("nav"));
    let ul = dom.add_node(Some(nav), VirtualNodeSpec::new("ul"));
    let li = dom.add_node(Some(ul), VirtualNodeSpec::new("li"));
    let a = dom.add_node(Some(li), VirtualNodeSpec::new("a"));
    assert_eq!(dom.ancestor_tags(a, 3), vec!["li", "ul", "nav"]);
    assert_eq!(dom.ancestor_tags(a, 2), vec!["li", "ul"]);
}
