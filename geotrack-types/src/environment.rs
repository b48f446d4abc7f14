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

//! User-agent classification.
//!
//! Three pure, total functions over the raw user-agent string. No parsing
//! library: collectors only need the coarse buckets below, and ordered
//! substring scans are what keeps a Chrome UA (which also advertises
//! "Safari") classified as Chrome.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Opera,
    Samsung,
    #[serde(rename = "IE")]
    Ie,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Os {
    Windows,
    #[serde(rename = "MacOS")]
    MacOs,
    Linux,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    Unknown,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeviceType::Mobile => write!(f, "mobile"),
            DeviceType::Tablet => write!(f, "tablet"),
            DeviceType::Desktop => write!(f, "desktop"),
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Browser::Chrome => write!(f, "Chrome"),
            Browser::Firefox => write!(f, "Firefox"),
            Browser::Safari => write!(f, "Safari"),
            Browser::Edge => write!(f, "Edge"),
            Browser::Opera => write!(f, "Opera"),
            Browser::Samsung => write!(f, "Samsung"),
            Browser::Ie => write!(f, "IE"),
            Browser::Unknown => write!(f, "Unknown"),
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Os::Windows => write!(f, "Windows"),
            Os::MacOs => write!(f, "MacOS"),
            Os::Linux => write!(f, "Linux"),
            Os::Android => write!(f, "Android"),
            Os::Ios => write!(f, "iOS"),
            Os::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Tokens that mark a mobile UA when none of the tablet markers matched.
/// Case-sensitive, matching the vendor spellings as they appear in the wild.
const MOBILE_TOKENS: [&str; 12] = [
    "Mobile",
    "Android",
    "iPhone",
    "iPod",
    "IEMobile",
    "BlackBerry",
    "Kindle",
    "Silk-Accelerated",
    "hpwOS",
    "webOS",
    "Opera Mobi",
    "Opera Mini",
];

/// Coarse device bucket. The tablet check runs first: Android tablets carry
/// the "android" token without "mobi", which would otherwise land in the
/// mobile bucket.
pub fn classify_device(user_agent: &str) -> DeviceType {
    let ua = user_agent.to_lowercase();
    let tablet = ua.contains("tablet")
        || ua.contains("ipad")
        || ua.contains("playbook")
        || ua.contains("silk")
        || (ua.contains("android") && !ua.contains("mobi"));
    if tablet {
        return DeviceType::Tablet;
    }
    if MOBILE_TOKENS.iter().any(|t| user_agent.contains(t)) {
        return DeviceType::Mobile;
    }
    DeviceType::Desktop
}

/// First-match-wins browser family. Order matters: Chrome-based browsers
/// also advertise "Safari", Edge advertises "Chrome", Opera advertises both.
pub fn classify_browser(user_agent: &str) -> Browser {
    if user_agent.contains("Firefox") {
        Browser::Firefox
    } else if user_agent.contains("SamsungBrowser") {
        Browser::Samsung
    } else if user_agent.contains("Opera") || user_agent.contains("OPR") {
        Browser::Opera
    } else if user_agent.contains("Trident") {
        Browser::Ie
    } else if user_agent.contains("Edge") {
        Browser::Edge
    } else if user_agent.contains("Chrome") {
        Browser::Chrome
    } else if user_agent.contains("Safari") {
        Browser::Safari
    } else {
        Browser::Unknown
    }
}

/// Operating system family, ordered scan.
pub fn classify_os(user_agent: &str) -> Os {
    if user_agent.contains("Win") {
        Os::Windows
    } else if user_agent.contains("Mac") {
        Os::MacOs
    } else if user_agent.contains("Linux") {
        Os::Linux
    } else if user_agent.contains("Android") {
        Os::Android
    } else if user_agent.contains("iOS") {
        Os::Ios
    } else {
        Os::Unknown
    }
}
