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

//! Ephemeral visitor fingerprint.
//!
//! The fingerprint is a short radix-36 hash over a fixed tuple of ambient
//! signals. It is deterministic within one page load, never persisted, and
//! not identity-grade: the same visitor on a different browser, screen or
//! timezone hashes differently, and that is acceptable.

use serde::{Deserialize, Serialize};

/// Ambient signals captured once per event by the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    pub user_agent: String,
    pub language: String,
    pub screen_width: i32,
    pub screen_height: i32,
    /// Offset from UTC in minutes, as reported by `Date.getTimezoneOffset`.
    pub timezone_offset_minutes: i32,
}

/// Derive the visitor fingerprint from a snapshot.
///
/// Rolling multiply-shift hash (`h = h * 31 + unit`) over the UTF-16 code
/// units of the joined signal string, folded into a signed 32-bit domain,
/// absolute value encoded in base 36.
pub fn fingerprint(snapshot: &EnvironmentSnapshot) -> String {
    let data = format!(
        "{}|{}|{}x{}|{}",
        snapshot.user_agent,
        snapshot.language,
        snapshot.screen_width,
        snapshot.screen_height,
        snapshot.timezone_offset_minutes
    );

    let mut hash: i32 = 0;
    for unit in data.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    to_radix_36(hash.unsigned_abs())
}

fn to_radix_36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    // Digits are ASCII by construction.
    String::from_utf8(out).unwrap_or_default()
}
