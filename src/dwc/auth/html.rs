//! Minimal HTML scraping for the login pages
//!
//! The identity provider pages are small server-rendered forms. Only tag
//! attributes and a few text nodes are needed, so tags are matched with
//! regular expressions instead of building a DOM.

use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<([a-z][a-z0-9]*)\b([^>]*)>").expect("static regex is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z_:][-a-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("static regex is valid")
});

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h2\b[^>]*>(.*?)</h2>").expect("static regex is valid"));

static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex is valid"));

static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("static regex is valid"));

/// Attributes of one start tag, lower-cased names with unescaped values
fn attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str())
                .unwrap_or_default();
            (name, unescape(value))
        })
        .collect()
}

/// Find the first `<tag>` and return the value of `attr`
fn first_tag_attribute(html: &str, tag: &str, attr: &str) -> Option<String> {
    TAG.captures_iter(html)
        .find(|caps| caps[1].eq_ignore_ascii_case(tag))
        .and_then(|caps| {
            attributes(&caps[2])
                .into_iter()
                .find(|(name, _)| name == attr)
                .map(|(_, value)| value)
        })
}

/// Value of the first element whose `name` attribute equals `field`
pub fn named_value(html: &str, field: &str) -> Option<String> {
    TAG.captures_iter(html).find_map(|caps| {
        let attrs = attributes(&caps[2]);
        let named = attrs.iter().any(|(name, value)| name == "name" && value == field);
        if !named {
            return None;
        }
        attrs
            .into_iter()
            .find(|(name, _)| name == "value")
            .map(|(_, value)| value)
    })
}

/// `action` of the first form
pub fn form_action(html: &str) -> Option<String> {
    first_tag_attribute(html, "form", "action")
}

/// `href` of the first anchor
pub fn first_link(html: &str) -> Option<String> {
    first_tag_attribute(html, "a", "href")
}

/// Text of the first `<h2>`, inner markup removed
pub fn heading_text(html: &str) -> Option<String> {
    let caps = HEADING.captures(html)?;
    let text = INNER_TAG.replace_all(&caps[1], "");
    let text = unescape(text.trim());
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// First capture group of `pattern` in `text`
pub fn capture(text: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode the HTML entities that appear in attribute values
pub fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }

    let decoded = NUMERIC_ENTITY.replace_all(value, |caps: &regex::Captures| {
        let code = &caps[1];
        let parsed = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        parsed
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    decoded
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
