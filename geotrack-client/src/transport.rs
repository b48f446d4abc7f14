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

//! Fire-and-forget delivery to the collector.
//!
//! Primary path is `navigator.sendBeacon`, which survives page teardown and
//! never blocks. When the runtime lacks it, the fallback is a `fetch` with
//! `keepalive: true` awaited on a detached task. Every send is at-most-once:
//! failures are logged at debug level and dropped, never retried or queued.
//! Losing an analytics event is preferable to slowing the host page.
//!
//! `sendBeacon` cannot carry custom headers, so the site key always travels
//! in the body as `site_key`; the `X-Site-Key` header is additionally set on
//! the fetch path. The collector accepts either.

use crate::config::TrackerConfig;
use geotrack_types::EventRecord;
use log::debug;
use serde_json::Value;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Blob, BlobPropertyBag, Headers, Navigator, RequestInit, Window};

pub const COLLECT_PATH: &str = "/api/v1/collect/collect";
pub const SITE_KEY_HEADER: &str = "X-Site-Key";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Serialize and deliver one event. Returns nothing: the caller has no
/// result channel by design, and this function never blocks it.
pub fn send(config: &TrackerConfig, record: &EventRecord) {
    let url = format!("{}{}", config.api_url, COLLECT_PATH);
    let mut wire = record.to_wire();
    if let Value::Object(object) = &mut wire {
        object.insert(
            "site_key".to_string(),
            Value::String(config.site_key.clone()),
        );
    }
    let body = wire.to_string();
    debug!("sending {} to {url}", record.event_type);

    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let result = if supports_beacon(&navigator) {
        send_beacon(&navigator, &url, &body)
    } else {
        send_keepalive_fetch(&window, &url, &body, &config.site_key)
    };
    if let Err(err) = result {
        debug!("event delivery failed: {err:?}");
    }
}

fn supports_beacon(navigator: &Navigator) -> bool {
    js_sys::Reflect::has(navigator.as_ref(), &JsValue::from_str("sendBeacon")).unwrap_or(false)
}

fn send_beacon(navigator: &Navigator, url: &str, body: &str) -> Result<(), JsValue> {
    let options = BlobPropertyBag::new();
    options.set_type(JSON_CONTENT_TYPE);
    let parts = js_sys::Array::of1(&JsValue::from_str(body));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let queued = navigator.send_beacon_with_opt_blob(url, Some(&blob))?;
    if !queued {
        debug!("user agent declined to queue the beacon");
    }
    Ok(())
}

fn send_keepalive_fetch(
    window: &Window,
    url: &str,
    body: &str,
    site_key: &str,
) -> Result<(), JsValue> {
    let headers = Headers::new()?;
    headers.set("Content-Type", JSON_CONTENT_TYPE)?;
    headers.set(SITE_KEY_HEADER, site_key)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(headers.as_ref());
    init.set_body(&JsValue::from_str(body));
    // Keep the request alive past navigation so teardown-time events
    // (final time_on_page) still reach the collector.
    init.set_keepalive(true);

    let promise = window.fetch_with_str_and_init(url, &init);
    spawn_local(async move {
        if let Err(err) = JsFuture::from(promise).await {
            debug!("collector unreachable: {err:?}");
        }
    });
    Ok(())
}
