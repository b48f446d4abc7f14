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

//! Visibility session: the two-state machine behind `time_on_page`.
//!
//! Timestamps are plain milliseconds so the transitions stay pure; the
//! client feeds `Date.now()` and wires the browser signals.

/// Tracks how long the page has been visible since the last state entry.
#[derive(Clone, Debug)]
pub struct VisibilitySession {
    entered_at_ms: f64,
    visible: bool,
}

impl VisibilitySession {
    pub fn new(visible: bool, now_ms: f64) -> Self {
        Self {
            entered_at_ms: now_ms,
            visible,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Visible -> Hidden. Returns the rounded whole-second duration to
    /// report, or `None` when the page was not visible or the duration
    /// rounds to zero.
    pub fn on_hidden(&mut self, now_ms: f64) -> Option<u64> {
        if !self.visible {
            return None;
        }
        self.visible = false;
        self.elapsed_seconds(now_ms)
    }

    /// Hidden -> Visible. Resets the entry timestamp; emits nothing.
    pub fn on_visible(&mut self, now_ms: f64) {
        self.visible = true;
        self.entered_at_ms = now_ms;
    }

    /// Terminal page-teardown check. Same duration rule as [`on_hidden`],
    /// but the state is left alone: the process ends here.
    ///
    /// [`on_hidden`]: VisibilitySession::on_hidden
    pub fn on_unload(&self, now_ms: f64) -> Option<u64> {
        if !self.visible {
            return None;
        }
        self.elapsed_seconds(now_ms)
    }

    fn elapsed_seconds(&self, now_ms: f64) -> Option<u64> {
        let seconds = ((now_ms - self.entered_at_ms) / 1000.0).round();
        if seconds > 0.0 {
            Some(seconds as u64)
        } else {
            None
        }
    }
}
