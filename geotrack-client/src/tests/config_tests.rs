use crate::config::TrackerConfig;
use crate::error::ConfigError;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlScriptElement, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().expect("test harness provides a window")
}

fn document() -> Document {
    window().document().expect("test harness provides a document")
}

/// Injects a script element with the given attributes, runs `f`, and removes
/// the element again so tests do not observe each other's fixtures.
fn with_script_tag<F: FnOnce(&Document, &Window)>(attributes: &[(&str, &str)], f: F) {
    let document = document();
    let script: HtmlScriptElement = document
        .create_element("script")
        .unwrap()
        .dyn_into()
        .unwrap();
    for (name, value) in attributes {
        script.set_attribute(name, value).unwrap();
    }
    document.head().unwrap().append_child(&script).unwrap();

    f(&document, &window());

    script.remove();
}

#[wasm_bindgen_test]
fn resolves_site_key_and_flags_from_attributes() {
    with_script_tag(
        &[
            ("data-site-key", "abc123"),
            ("data-api-url", "https://stats.example"),
            ("data-debug", "true"),
            ("data-auto-track", "false"),
        ],
        |document, window| {
            let config = TrackerConfig::resolve(document, &window.location()).unwrap();
            assert_eq!(config.site_key, "abc123");
            assert_eq!(config.api_url, "https://stats.example");
            assert!(config.debug);
            assert!(!config.auto_track);
            assert!(config.track_outbound);
            assert!(config.respect_dnt);
        },
    );
}

#[wasm_bindgen_test]
fn flags_default_on_when_absent() {
    with_script_tag(&[("data-site-key", "abc123")], |document, window| {
        let config = TrackerConfig::resolve(document, &window.location()).unwrap();
        assert!(!config.debug);
        assert!(config.auto_track);
        assert!(config.track_outbound);
    });
}

#[wasm_bindgen_test]
fn outbound_flag_can_be_disabled() {
    with_script_tag(
        &[("data-site-key", "abc123"), ("data-track-outbound", "false")],
        |document, window| {
            let config = TrackerConfig::resolve(document, &window.location()).unwrap();
            assert!(!config.track_outbound);
        },
    );
}

#[wasm_bindgen_test]
fn endpoint_defaults_from_the_page_when_not_overridden() {
    with_script_tag(&[("data-site-key", "abc123")], |document, window| {
        let config = TrackerConfig::resolve(document, &window.location()).unwrap();
        let hostname = window.location().hostname().unwrap();
        if hostname == "localhost" || hostname == "127.0.0.1" {
            assert_eq!(config.api_url, "http://localhost:8000");
        } else {
            assert_eq!(config.api_url, window.location().origin().unwrap());
        }
    });
}

#[wasm_bindgen_test]
fn missing_site_key_is_a_hard_failure() {
    with_script_tag(&[("data-site-key", "")], |document, window| {
        let err = TrackerConfig::resolve(document, &window.location()).unwrap_err();
        assert_eq!(err, ConfigError::MissingSiteKey);
    });
}

#[wasm_bindgen_test]
fn no_script_tag_means_no_configuration() {
    // The harness page carries no data-site-key script of its own.
    let err = TrackerConfig::resolve(&document(), &window().location()).unwrap_err();
    assert_eq!(err, ConfigError::ScriptElementNotFound);
}
