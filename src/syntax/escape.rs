//! Escaping raw text into display-safe markup text
//!
//! The five structurally significant characters are replaced by fixed
//! references. Escaping is a single pass, so `&` produced by one
//! substitution is never escaped again within the same call.

/// The fixed reference table, `&` first.
pub const REFERENCES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#039;"),
];

/// Reference for a structurally significant character, if it is one.
#[inline]
pub fn reference_for(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#039;"),
        _ => None,
    }
}

/// Escape raw text.
///
/// Input is always treated as raw: text that already looks escaped is
/// escaped again (`&amp;` becomes `&amp;amp;`).
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    push_escaped(&mut out, raw);
    out
}

/// Append the escaped form of `raw` to `out`.
pub fn push_escaped(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        match reference_for(ch) {
            Some(reference) => out.push_str(reference),
            None => out.push(ch),
        }
    }
}

/// Decode a reference at the start of `escaped`, returning the character and
/// the number of bytes consumed.
///
/// Only the five references produced by [`escape`] are recognized.
#[inline]
pub fn decode_reference(escaped: &str) -> Option<(char, usize)> {
    if !escaped.starts_with('&') {
        return None;
    }
    REFERENCES
        .iter()
        .find(|(_, reference)| escaped.starts_with(reference))
        .map(|(ch, reference)| (*ch, reference.len()))
}

/// Reverse [`escape`]. Anything that is not one of the five references is
/// copied through unchanged.
pub fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_reference(rest) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_five() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape(""), "");
        assert_eq!(unescape(""), "");
    }

    #[test]
    fn test_escape_identity_on_safe_text() {
        let safe = "plain text, with punctuation: (ok) [fine] {yes} #1 ; 100%\n\tünïcödé";
        assert_eq!(escape(safe), safe);
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        let once = escape("a & b");
        assert_eq!(once, "a &amp; b");
        assert_eq!(escape(&once), "a &amp;amp; b");
    }

    #[test]
    fn test_already_escaped_looking_input_is_escaped_again() {
        assert_eq!(escape("&lt;"), "&amp;lt;");
        assert_eq!(unescape(&escape("&lt;")), "&lt;");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let samples = [
            "<p class=\"a\">Hi &amp; bye</p>",
            "''\"\"<<>>&&",
            "&#039; literal",
            "& dangling &",
            "no specials",
        ];
        for raw in samples {
            assert_eq!(unescape(&escape(raw)), raw, "round trip of {:?}", raw);
        }
    }

    #[test]
    fn test_unescape_leaves_unknown_references() {
        assert_eq!(unescape("&nbsp;&amp;"), "&nbsp;&");
    }
}
