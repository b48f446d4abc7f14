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

//! The event record sent to the collector.
//!
//! One record per tracked action, built fresh, serialized once, then handed
//! to the transport. Caller-supplied extra fields are flattened into the
//! wire object and win on key collision: they are an override mechanism,
//! not validated beyond being serializable scalars.

use crate::environment::{classify_browser, classify_device, classify_os, Browser, DeviceType, Os};
use crate::fingerprint::{fingerprint, EnvironmentSnapshot};
use serde::Serialize;
use serde_json::{Map, Value};

/// Sentinel used when the document has no referrer.
pub const DIRECT_REFERRER: &str = "(direct)";

/// Open mapping of caller-supplied fields, merged into the wire object last.
pub type ExtraFields = Map<String, Value>;

/// Where the event happened: current URL, referrer, and the ISO-8601
/// capture timestamp (opaque to this crate; the client reads it from the
/// browser clock).
#[derive(Clone, Debug)]
pub struct PageContext {
    pub url: String,
    pub referrer: Option<String>,
    pub timestamp: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct EventRecord {
    pub event_type: String,
    pub url: String,
    pub referrer: String,
    pub visitor_hash: String,
    pub device_type: DeviceType,
    pub browser: Browser,
    pub os: Os,
    pub screen_width: i32,
    pub screen_height: i32,
    pub language: String,
    pub timestamp: String,
    #[serde(skip)]
    pub extra: ExtraFields,
}

impl EventRecord {
    /// Compose a record from the page context and an environment snapshot.
    /// Classification and fingerprinting are recomputed per event; both are
    /// cheap and the snapshot is captured fresh anyway.
    pub fn compose(
        event_type: &str,
        page: &PageContext,
        snapshot: &EnvironmentSnapshot,
        extra: ExtraFields,
    ) -> Self {
        let referrer = match page.referrer.as_deref() {
            None | Some("") => DIRECT_REFERRER.to_string(),
            Some(r) => r.to_string(),
        };
        Self {
            event_type: event_type.to_string(),
            url: page.url.clone(),
            referrer,
            visitor_hash: fingerprint(snapshot),
            device_type: classify_device(&snapshot.user_agent),
            browser: classify_browser(&snapshot.user_agent),
            os: classify_os(&snapshot.user_agent),
            screen_width: snapshot.screen_width,
            screen_height: snapshot.screen_height,
            language: snapshot.language.clone(),
            timestamp: page.timestamp.clone(),
            extra,
        }
    }

    /// Flatten into the wire object. Extra fields are inserted after the
    /// computed defaults so a colliding key takes the caller's value.
    pub fn to_wire(&self) -> Value {
        let mut object = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        for (key, value) in &self.extra {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            language: "en-US".to_string(),
            screen_width: 1920,
            screen_height: 1080,
            timezone_offset_minutes: 0,
        }
    }

    fn page() -> PageContext {
        PageContext {
            url: "https://shop.example/home".to_string(),
            referrer: None,
            timestamp: "2025-06-01T12:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn wire_shape_has_expected_fields() {
        let record = EventRecord::compose("pageview", &page(), &snapshot(), ExtraFields::new());
        let wire = record.to_wire();
        assert_eq!(wire["event_type"], "pageview");
        assert_eq!(wire["url"], "https://shop.example/home");
        assert_eq!(wire["referrer"], DIRECT_REFERRER);
        assert_eq!(wire["device_type"], "desktop");
        assert_eq!(wire["browser"], "Chrome");
        assert_eq!(wire["os"], "Linux");
        assert_eq!(wire["screen_width"], 1920);
        assert_eq!(wire["screen_height"], 1080);
        assert_eq!(wire["language"], "en-US");
        assert_eq!(wire["timestamp"], "2025-06-01T12:00:00.000Z");
        let hash = wire["visitor_hash"].as_str().unwrap();
        assert!(!hash.is_empty());
    }

    #[test]
    fn empty_referrer_becomes_direct_sentinel() {
        let mut p = page();
        p.referrer = Some(String::new());
        let record = EventRecord::compose("pageview", &p, &snapshot(), ExtraFields::new());
        assert_eq!(record.referrer, DIRECT_REFERRER);

        p.referrer = Some("https://search.example/".to_string());
        let record = EventRecord::compose("pageview", &p, &snapshot(), ExtraFields::new());
        assert_eq!(record.referrer, "https://search.example/");
    }

    #[test]
    fn extra_fields_are_flattened() {
        let mut extra = ExtraFields::new();
        extra.insert("duration".to_string(), json!(42));
        let record = EventRecord::compose("time_on_page", &page(), &snapshot(), extra);
        let wire = record.to_wire();
        assert_eq!(wire["event_type"], "time_on_page");
        assert_eq!(wire["duration"], 42);
    }

    #[test]
    fn extra_overrides_computed_defaults() {
        let mut extra = ExtraFields::new();
        extra.insert("url".to_string(), json!("https://other.example/x"));
        let record = EventRecord::compose("outbound_click", &page(), &snapshot(), extra);
        let wire = record.to_wire();
        assert_eq!(wire["url"], "https://other.example/x");
        // Untouched defaults survive the merge.
        assert_eq!(wire["referrer"], DIRECT_REFERRER);
    }
}
