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

//! Configuration resolution from the embedding `<script>` tag.
//!
//! Resolution happens once at startup and the result is immutable; every
//! component receives it by reference. Attribute wins over computed
//! default. No network traffic is generated here.

use crate::error::ConfigError;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlScriptElement, Location};

/// Endpoint substituted when the page is served from a development host.
const LOCAL_DEV_ENDPOINT: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackerConfig {
    /// Opaque per-tenant credential, required.
    pub site_key: String,
    /// Collector base URL, without the collect path.
    pub api_url: String,
    pub debug: bool,
    pub auto_track: bool,
    pub track_outbound: bool,
    pub respect_dnt: bool,
}

impl TrackerConfig {
    /// Resolve the configuration from the embedding script element.
    ///
    /// Attributes: `data-site-key` (required), `data-api-url` (endpoint
    /// override), `data-debug` (`"true"` enables), `data-auto-track`
    /// (`"false"` disables), `data-track-outbound` (`"false"` disables).
    pub fn resolve(document: &Document, location: &Location) -> Result<Self, ConfigError> {
        let script = find_script_element(document)?;

        let site_key = script
            .get_attribute("data-site-key")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingSiteKey)?;

        let api_url = match script.get_attribute("data-api-url").filter(|u| !u.is_empty()) {
            Some(url) => url,
            None => default_endpoint(location)?,
        };

        Ok(Self {
            site_key,
            api_url,
            debug: script.get_attribute("data-debug").as_deref() == Some("true"),
            auto_track: script.get_attribute("data-auto-track").as_deref() != Some("false"),
            track_outbound: script.get_attribute("data-track-outbound").as_deref()
                != Some("false"),
            respect_dnt: true,
        })
    }
}

/// `document.currentScript` when the script is executing at top level,
/// otherwise the first script tag carrying a site key (covers deferred
/// execution, where `currentScript` is already null).
fn find_script_element(document: &Document) -> Result<HtmlScriptElement, ConfigError> {
    // `currentScript` is typed as a union in the DOM IDL; go through Reflect
    // and cast, the same way unknown globals are probed elsewhere.
    if let Some(script) = js_sys::Reflect::get(document.as_ref(), &JsValue::from_str("currentScript"))
        .ok()
        .and_then(|value| value.dyn_into::<HtmlScriptElement>().ok())
    {
        return Ok(script);
    }
    document
        .query_selector("script[data-site-key]")
        .map_err(js_error)?
        .and_then(|element| element.dyn_into::<HtmlScriptElement>().ok())
        .ok_or(ConfigError::ScriptElementNotFound)
}

fn default_endpoint(location: &Location) -> Result<String, ConfigError> {
    let hostname = location.hostname().map_err(js_error)?;
    if hostname == "localhost" || hostname == "127.0.0.1" {
        Ok(LOCAL_DEV_ENDPOINT.to_string())
    } else {
        location.origin().map_err(js_error)
    }
}

fn js_error(value: JsValue) -> ConfigError {
    ConfigError::Environment(format!("{value:?}"))
}
