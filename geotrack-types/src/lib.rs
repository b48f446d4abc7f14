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

//! Platform-agnostic types and pure logic for the GeoTrack analytics client.
//!
//! Everything in this crate is deterministic and free of browser APIs so the
//! tracking rules (environment classification, fingerprinting, visibility
//! durations, outbound-click detection, wire payload shape) can be unit
//! tested on any target. The `geotrack-client` crate supplies the ambient
//! inputs (`navigator`, `screen`, `location`) and the transport.

pub mod environment;
pub mod event;
pub mod fingerprint;
pub mod outbound;
pub mod session;

pub use environment::{classify_browser, classify_device, classify_os, Browser, DeviceType, Os};
pub use event::{EventRecord, ExtraFields, PageContext, DIRECT_REFERRER};
pub use fingerprint::{fingerprint, EnvironmentSnapshot};
pub use outbound::OutboundClick;
pub use session::VisibilitySession;
