//! HTTP routes.
//!
//! Pages are rendered server-side from string templates; the JSON API and
//! system routes sit alongside them.

pub mod api;
pub mod landing;
pub mod sitemap;
pub mod sys;
pub mod thanks;
pub mod waitlist;

/// Escape text for use in HTML content and double-quoted attributes.
pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
