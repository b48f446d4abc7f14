use crate::outbound::{enclosing_anchor, OutboundTracker};
use crate::tracker::EventSink;
use geotrack_types::ExtraFields;
use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, EventInit, HtmlAnchorElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn body() -> HtmlElement {
    document().body().unwrap()
}

/// `<a href=..><span>text</span></a>` appended to the body; returns both so
/// the test can click the inner element.
fn anchor_fixture(href: &str, text: &str) -> (HtmlAnchorElement, web_sys::Element) {
    let document = document();
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .unwrap()
        .dyn_into()
        .unwrap();
    anchor.set_attribute("href", href).unwrap();
    let span = document.create_element("span").unwrap();
    span.set_text_content(Some(text));
    anchor.append_child(&span).unwrap();
    body().append_child(&anchor).unwrap();
    (anchor, span)
}

fn bubbling_click() -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    Event::new_with_event_init_dict("click", &init).unwrap()
}

#[wasm_bindgen_test]
fn finds_the_enclosing_anchor_of_a_nested_click_target() {
    let (anchor, span) = anchor_fixture("https://other.example/x", "Buy");
    let found: Rc<RefCell<Option<HtmlAnchorElement>>> = Rc::new(RefCell::new(None));
    let captured = found.clone();
    let listener = EventListener::new(&span, "click", move |event| {
        *captured.borrow_mut() = enclosing_anchor(event);
    });

    span.dispatch_event(&bubbling_click()).unwrap();

    assert!(found.borrow().is_some());
    drop(listener);
    anchor.remove();
}

#[wasm_bindgen_test]
fn click_on_a_non_link_is_ignored() {
    let document = document();
    let div = document.create_element("div").unwrap();
    body().append_child(&div).unwrap();
    let found: Rc<RefCell<Option<HtmlAnchorElement>>> = Rc::new(RefCell::new(None));
    let captured = found.clone();
    let listener = EventListener::new(&div, "click", move |event| {
        *captured.borrow_mut() = enclosing_anchor(event);
    });

    div.dispatch_event(&bubbling_click()).unwrap();

    assert!(found.borrow().is_none());
    drop(listener);
    div.remove();
}

/// Installs the real capture-phase tracker and records everything it emits.
fn with_tracker<F: FnOnce()>(page_hostname: &str, f: F) -> Vec<(String, ExtraFields)> {
    let events: Rc<RefCell<Vec<(String, ExtraFields)>>> = Rc::new(RefCell::new(Vec::new()));
    let recorded = events.clone();
    let sink = EventSink::new(move |event_type, extra| {
        recorded.borrow_mut().push((event_type.to_string(), extra));
    });
    let tracker = OutboundTracker::install(&document(), page_hostname.to_string(), sink);

    f();

    drop(tracker);
    let collected = events.borrow().clone();
    collected
}

#[wasm_bindgen_test]
fn cross_host_click_emits_one_outbound_event() {
    let (anchor, span) = anchor_fixture("https://other.example/x", " Buy ");
    let events = with_tracker("shop.example", || {
        span.dispatch_event(&bubbling_click()).unwrap();
    });

    assert_eq!(events.len(), 1);
    let (event_type, extra) = &events[0];
    assert_eq!(event_type, "outbound_click");
    assert_eq!(extra["url"], "https://other.example/x");
    assert_eq!(extra["text"], "Buy");
    anchor.remove();
}

#[wasm_bindgen_test]
fn fragment_link_emits_nothing() {
    let (anchor, span) = anchor_fixture("#section", "Jump");
    let events = with_tracker("shop.example", || {
        span.dispatch_event(&bubbling_click()).unwrap();
    });

    assert!(events.is_empty());
    anchor.remove();
}

#[wasm_bindgen_test]
fn same_host_link_emits_nothing() {
    let page_hostname = web_sys::window().unwrap().location().hostname().unwrap();
    let (anchor, span) = anchor_fixture("/cart", "Cart");
    let events = with_tracker(&page_hostname, || {
        span.dispatch_event(&bubbling_click()).unwrap();
    });

    assert!(events.is_empty());
    anchor.remove();
}

#[wasm_bindgen_test]
fn navigation_default_is_not_prevented() {
    let (anchor, span) = anchor_fixture("https://other.example/x", "Buy");
    let click = bubbling_click();
    let _events = with_tracker("shop.example", || {
        span.dispatch_event(&click).unwrap();
    });

    assert!(!click.default_prevented());
    anchor.remove();
}
