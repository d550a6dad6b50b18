// src/render/html.rs

use std::borrow::Cow;

use quick_xml::escape::escape;

/// Escape text for an HTML text node.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text)
}

/// ` key="value"` with the value escaped.
pub fn attr(key: &str, value: &str) -> String {
    format!(" {key}=\"{}\"", escape(value))
}
