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

//! Wires the visibility session to the page lifecycle.
//!
//! `visibilitychange` drives the Visible/Hidden transitions; `beforeunload`
//! is the terminal check that reports time still on the clock when the
//! visitor navigates away. The host runtime never runs these handlers
//! concurrently, so the shared session needs no locking.

use crate::snapshot::now_ms;
use crate::tracker::EventSink;
use geotrack_types::{ExtraFields, VisibilitySession};
use gloo::events::EventListener;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Document, Window};

pub struct VisibilityTracker {
    // Dropping the listeners unregisters them; the tracker owns the page
    // lifecycle from install to unload.
    #[allow(dead_code)]
    listeners: [EventListener; 2],
}

impl VisibilityTracker {
    pub fn install(window: &Window, document: &Document, sink: EventSink) -> Self {
        let session = Rc::new(RefCell::new(VisibilitySession::new(
            !document.hidden(),
            now_ms(),
        )));

        let doc = document.clone();
        let shared = session.clone();
        let on_hidden_sink = sink.clone();
        let visibility = EventListener::new(document, "visibilitychange", move |_| {
            let mut session = shared.borrow_mut();
            if doc.hidden() {
                if let Some(duration) = session.on_hidden(now_ms()) {
                    emit_duration(&on_hidden_sink, duration);
                }
            } else {
                session.on_visible(now_ms());
            }
        });

        let unload = EventListener::new(window, "beforeunload", move |_| {
            if let Some(duration) = session.borrow().on_unload(now_ms()) {
                emit_duration(&sink, duration);
            }
        });

        Self {
            listeners: [visibility, unload],
        }
    }
}

fn emit_duration(sink: &EventSink, duration: u64) {
    let mut extra = ExtraFields::new();
    extra.insert("duration".to_string(), json!(duration));
    sink.emit("time_on_page", extra);
}
