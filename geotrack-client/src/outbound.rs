/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Outbound-link interception.
//!
//! One capture-phase click listener at the document root. Observation only:
//! the listener is passive and never prevents or delays the navigation it
//! observes.

use crate::tracker::EventSink;
use geotrack_types::{ExtraFields, OutboundClick};
use gloo::events::{EventListener, EventListenerOptions};
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlAnchorElement};

pub struct OutboundTracker {
    #[allow(dead_code)]
    listener: EventListener,
}

impl OutboundTracker {
    pub fn install(document: &Document, page_hostname: String, sink: EventSink) -> Self {
        let options = EventListenerOptions::run_in_capture_phase();
        let listener = EventListener::new_with_options(document, "click", options, move |event| {
            let Some(anchor) = enclosing_anchor(event) else {
                return;
            };
            let text = anchor.text_content().unwrap_or_default();
            let href = anchor.get_attribute("href");
            if let Some(click) = OutboundClick::evaluate(
                href.as_deref(),
                &anchor.hostname(),
                &page_hostname,
                &text,
            ) {
                let mut extra = ExtraFields::new();
                extra.insert("url".to_string(), json!(click.url));
                extra.insert("text".to_string(), json!(click.text));
                sink.emit("outbound_click", extra);
            }
        });
        Self { listener }
    }
}

/// Nearest enclosing hyperlink of the click target, if any.
pub(crate) fn enclosing_anchor(event: &Event) -> Option<HtmlAnchorElement> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    element
        .closest("a")
        .ok()
        .flatten()?
        .dyn_into::<HtmlAnchorElement>()
        .ok()
}
