//! Browser-driven tests for the wasm32-only parts of the crate.
//!
//! Run with `wasm-pack test --headless --chrome` (or firefox). The pure
//! tracking rules are covered natively in `geotrack-types`; these tests
//! exercise the DOM seams: script-tag resolution, anchor discovery, and the
//! capture-phase outbound listener.

pub mod config_tests;
pub mod outbound_tests;
