//! Outbound-click rule: decides whether a clicked link leaves the current
//! host and what gets reported about it. Pure so the filters are testable
//! without a DOM; the client resolves the anchor element and hostnames.

/// What an `outbound_click` event carries.
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundClick {
    /// The raw `href` attribute, not the resolved URL.
    pub url: String,
    /// Trimmed link text, truncated to 100 characters.
    pub text: String,
}

const MAX_TEXT_LEN: usize = 100;

impl OutboundClick {
    /// Evaluate a click on a hyperlink. Returns `None` for missing hrefs,
    /// same-page fragment references, and links whose resolved hostname
    /// matches the page (or could not be resolved).
    pub fn evaluate(
        href: Option<&str>,
        link_hostname: &str,
        page_hostname: &str,
        text: &str,
    ) -> Option<OutboundClick> {
        let href = match href {
            Some(h) if !h.is_empty() && !h.starts_with('#') => h,
            _ => return None,
        };
        if link_hostname.is_empty() || link_hostname == page_hostname {
            return None;
        }
        Some(OutboundClick {
            url: href.to_string(),
            text: text.trim().chars().take(MAX_TEXT_LEN).collect(),
        })
    }
}
