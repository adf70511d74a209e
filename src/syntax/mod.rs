//! Syntax highlighting module
//!
//! Converts raw editor text into a flat, classified token stream:
//! - Escaping of the five structural characters
//! - Markup and style-sheet grammars over the escaped text
//! - Token-wrapped HTML for rendering, and the inverse `strip_tokens`
//!
//! ## Pipeline
//!
//! ```text
//! raw text → escape → grammar (markup | stylesheet) → Highlighted
//!          → to_html / segments → surface
//! ```
//!
//! Tokenizing is a total function: malformed input degrades to plain spans
//! and never loses characters.

pub mod escape;
mod highlights;
mod languages;
pub mod markup;
mod scanner;
pub mod stylesheet;
mod values;

pub use escape::{escape, unescape};
pub use highlights::{
    strip_tokens, HighlightSpan, Highlighted, Segment, Token, TokenKind, TOKEN_KINDS,
};
pub use languages::Language;

/// Escape `raw` and tokenize it with the grammar for `language`.
pub fn highlight(raw: &str, language: Language) -> Highlighted {
    let escaped = escape(raw);
    let spans = match language {
        Language::Markup => markup::tokenize(&escaped),
        Language::Stylesheet => stylesheet::tokenize(&escaped),
    };
    Highlighted::new(language, escaped, spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_round_trips_through_html() {
        let raw = "<p class=\"a\">Hi &amp; bye</p>";
        let highlighted = highlight(raw, Language::Markup);
        assert_eq!(strip_tokens(&highlighted.to_html()), raw);
        assert_eq!(highlighted.plain_text(), raw);
    }

    #[test]
    fn test_declaration_scenario() {
        let pairs = highlight("color: #fff;", Language::Stylesheet).token_pairs();
        assert_eq!(
            pairs,
            vec![
                (TokenKind::Property, "color".to_string()),
                (TokenKind::Punctuation, ":".to_string()),
                (TokenKind::Plain, " ".to_string()),
                (TokenKind::ValueUnit, "#fff".to_string()),
                (TokenKind::Punctuation, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_input_has_no_tokens() {
        for language in [Language::Markup, Language::Stylesheet] {
            let highlighted = highlight("", language);
            assert!(highlighted.spans.is_empty());
            assert_eq!(highlighted.to_html(), "");
        }
    }

    #[test]
    fn test_html_never_contains_raw_user_markup() {
        let highlighted = highlight("<script>alert(1)</script>", Language::Markup);
        let html = highlighted.to_html();
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;"));
    }
}
