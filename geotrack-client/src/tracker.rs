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

//! Orchestration: configuration, the privacy gate, and startup wiring.
//!
//! `Tracker::init` is the single entry point. When it returns `None`
//! (missing site key, or Do-Not-Track honored) nothing was installed and no
//! event can ever be sent: the transport is only reachable through a live
//! `Tracker`.

use crate::config::TrackerConfig;
use crate::outbound::OutboundTracker;
use crate::snapshot::{capture_environment, capture_page};
use crate::transport;
use crate::visibility::VisibilityTracker;
use geotrack_types::{EventRecord, ExtraFields};
use log::{debug, error};
use std::rc::Rc;
use web_sys::Window;

/// Cloneable event sink handed to the DOM listeners.
#[derive(Clone)]
pub struct EventSink {
    inner: Rc<dyn Fn(&str, ExtraFields)>,
}

impl EventSink {
    pub fn new(f: impl Fn(&str, ExtraFields) + 'static) -> Self {
        Self { inner: Rc::new(f) }
    }

    pub fn emit(&self, event_type: &str, extra: ExtraFields) {
        (self.inner)(event_type, extra);
    }
}

/// Builds and sends one event record per tracked action.
#[derive(Clone)]
struct Collector {
    config: Rc<TrackerConfig>,
}

impl Collector {
    fn send(&self, event_type: &str, extra: ExtraFields) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let snapshot = capture_environment(&window);
        let page = capture_page(&window);
        let record = EventRecord::compose(event_type, &page, &snapshot, extra);
        transport::send(&self.config, &record);
    }

    fn sink(&self) -> EventSink {
        let collector = self.clone();
        EventSink::new(move |event_type, extra| collector.send(event_type, extra))
    }
}

/// The decision behind the binary privacy gate: only the literal `"1"`
/// signals an opt-out; null, `"0"`, and `"unspecified"` all mean tracking
/// may proceed.
pub(crate) fn dnt_blocks(value: Option<String>) -> bool {
    value.as_deref() == Some("1")
}

/// `doNotTrack` is nullable in some engines, so it is probed through
/// Reflect rather than the typed accessor.
fn do_not_track_enabled(window: &Window) -> bool {
    dnt_blocks(
        js_sys::Reflect::get(
            window.navigator().as_ref(),
            &wasm_bindgen::JsValue::from_str("doNotTrack"),
        )
        .ok()
        .and_then(|value| value.as_string()),
    )
}

pub struct Tracker {
    collector: Collector,
    #[allow(dead_code)]
    outbound: Option<OutboundTracker>,
    #[allow(dead_code)]
    visibility: VisibilityTracker,
}

impl Tracker {
    /// Resolve configuration and install the tracking pipeline.
    ///
    /// Returns `None` without installing anything when configuration fails
    /// or the visitor opted out via Do-Not-Track. Failures are reported to
    /// the log only; the host page never sees an error.
    pub fn init(window: &Window) -> Option<Tracker> {
        let document = window.document()?;
        let config = match TrackerConfig::resolve(&document, &window.location()) {
            Ok(config) => config,
            Err(err) => {
                error!("initialization failed: {err}");
                return None;
            }
        };

        // The global max level belongs to whoever installed the logger (see
        // `start`), so the config dump is gated on the flag directly.
        if config.debug {
            debug!("initialized with config: {config:?}");
        }

        if config.respect_dnt && do_not_track_enabled(window) {
            if config.debug {
                debug!("do-not-track enabled, tracking disabled");
            }
            return None;
        }

        let collector = Collector {
            config: Rc::new(config),
        };

        if collector.config.auto_track {
            collector.send("pageview", ExtraFields::new());
        }

        let outbound = if collector.config.track_outbound {
            let hostname = window.location().hostname().unwrap_or_default();
            Some(OutboundTracker::install(
                &document,
                hostname,
                collector.sink(),
            ))
        } else {
            None
        };

        let visibility = VisibilityTracker::install(window, &document, collector.sink());

        Some(Tracker {
            collector,
            outbound,
            visibility,
        })
    }

    /// Track a custom event. Returns immediately regardless of transport
    /// outcome.
    pub fn track(&self, event_name: &str, extra: ExtraFields) {
        self.collector.send(event_name, extra);
    }

    pub fn track_pageview(&self) {
        self.collector.send("pageview", ExtraFields::new());
    }

    /// The configuration resolved at startup, immutable since.
    pub fn config(&self) -> &TrackerConfig {
        &self.collector.config
    }
}
