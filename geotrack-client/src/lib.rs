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

#![cfg(target_arch = "wasm32")]

//! Client-side (browser) tracking agent for GeoTrack analytics.
//!
//! The agent runs inside the visitor's page, derives a small set of
//! behavioral and environment signals, and delivers them to the collector as
//! discrete events, with no cookies and no persisted identifiers. It is
//! embedded through a script tag carrying `data-` attributes:
//!
//! ```html
//! <script data-site-key="abc123" data-api-url="https://stats.example"
//!         src=".../geotrack.js" async></script>
//! ```
//!
//! # Outline of usage
//!
//! The module bootstraps itself on load: it resolves the configuration from
//! the script tag, honors Do-Not-Track, optionally fires the initial
//! `pageview`, and installs the outbound-click and visibility listeners.
//! The page can then call the exported surface:
//!
//! ```js
//! track("signup_click", { plan: "pro" });
//! trackPageview();
//! configuration();
//! ```
//!
//! Rust/WASM apps embedding the crate directly can skip the exports and
//! drive a [`Tracker`] themselves:
//!
//! ```ignore
//! let tracker = Tracker::init(&window)?;
//! tracker.track("signup_click", extra);
//! ```
//!
//! Every failure path here ends in a log line, never in an exception the
//! host page could observe.

use log::{Level, LevelFilter};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

mod config;
mod error;
mod outbound;
mod snapshot;
mod tracker;
mod transport;
mod visibility;

#[cfg(test)]
mod tests;

pub use config::TrackerConfig;
pub use error::ConfigError;
pub use tracker::Tracker;

use geotrack_types::ExtraFields;
use gloo::events::EventListener;

// The module-private slot behind the JS exports. Deliberately not attached
// to `window`: the wasm-bindgen exports are the only public surface.
thread_local! {
    static TRACKER: RefCell<Option<Tracker>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() {
    // Install failure means a logger already exists (embedding app). The
    // global max level then belongs to the host and must be left alone.
    let owns_logger = console_log::init_with_level(Level::Debug).is_ok();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", move |_| boot(owns_logger)).forget();
    } else {
        boot(owns_logger);
    }
}

fn boot(owns_logger: bool) {
    if let Some(window) = web_sys::window() {
        let tracker = Tracker::init(&window);
        if owns_logger {
            let debug = tracker.as_ref().map(|t| t.config().debug).unwrap_or(false);
            log::set_max_level(if debug {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            });
        }
        TRACKER.with(|slot| *slot.borrow_mut() = tracker);
    }
}

/// Track a custom event with optional extra fields (a plain JS object).
/// No-op when initialization was aborted.
#[wasm_bindgen]
pub fn track(event_name: String, extra: JsValue) {
    let extra = parse_extra(extra);
    TRACKER.with(|slot| {
        if let Some(tracker) = slot.borrow().as_ref() {
            tracker.track(&event_name, extra);
        }
    });
}

/// Track a pageview for the current location.
#[wasm_bindgen(js_name = trackPageview)]
pub fn track_pageview() {
    TRACKER.with(|slot| {
        if let Some(tracker) = slot.borrow().as_ref() {
            tracker.track_pageview();
        }
    });
}

/// Read-only snapshot of the resolved configuration, `null` before
/// successful initialization.
#[wasm_bindgen(js_name = configuration)]
pub fn configuration() -> JsValue {
    TRACKER.with(|slot| {
        slot.borrow()
            .as_ref()
            .and_then(|tracker| serde_wasm_bindgen::to_value(tracker.config()).ok())
            .unwrap_or(JsValue::NULL)
    })
}

fn parse_extra(extra: JsValue) -> ExtraFields {
    if extra.is_undefined() || extra.is_null() {
        return ExtraFields::new();
    }
    serde_wasm_bindgen::from_value(extra).unwrap_or_default()
}
