//! Ambient environment and page-context capture.
//!
//! Every read degrades to a neutral value instead of failing: a missing
//! `screen` or language must never abort a send.

use geotrack_types::{EnvironmentSnapshot, PageContext};
use web_sys::Window;

pub fn capture_environment(window: &Window) -> EnvironmentSnapshot {
    let navigator = window.navigator();
    let (screen_width, screen_height) = window
        .screen()
        .ok()
        .map(|screen| {
            (
                screen.width().unwrap_or_default(),
                screen.height().unwrap_or_default(),
            )
        })
        .unwrap_or_default();
    EnvironmentSnapshot {
        user_agent: navigator.user_agent().unwrap_or_default(),
        language: navigator.language().unwrap_or_default(),
        screen_width,
        screen_height,
        timezone_offset_minutes: js_sys::Date::new_0().get_timezone_offset() as i32,
    }
}

pub fn capture_page(window: &Window) -> PageContext {
    let location = window.location();
    PageContext {
        url: location.href().unwrap_or_default(),
        referrer: window.document().map(|document| document.referrer()),
        timestamp: String::from(js_sys::Date::new_0().to_iso_string()),
    }
}

/// Browser wall clock in milliseconds, the timebase of the visibility
/// session.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
