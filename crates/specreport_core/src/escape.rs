//! Escape untrusted text before it is embedded in an HTML document.
//!
//! Spec names, statuses, failure messages and stacks are arbitrary text; any of them may contain
//! markup. All of it passes through [`escape_html`] before reaching the report.

use std::borrow::Cow;

/// Escape `&`, `<`, `>`, `"` and `'` for use in HTML text and attribute values.
///
/// ## Parameters
/// - `input`: untrusted text.
///
/// ## Returns
/// - (`Cow<str>`): the input unchanged (borrowed) if nothing needed escaping, otherwise an owned escaped copy.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find(['&', '<', '>', '"', '\'']) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 16);
    out.push_str(&input[..first]);
    for ch in input[first..].chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
