//! Tokenizer tests for both grammars
//!
//! Scenario checks plus the properties every highlighted result must hold:
//! spans tile the escaped text, stripping the token markup recovers the
//! input exactly, and no raw user markup survives into the output.

mod common;

use common::{MARKUP_CASES, STYLESHEET_CASES};
use playpen::syntax::{escape, highlight, strip_tokens, unescape, Language, TokenKind};

fn pairs(raw: &str, language: Language) -> Vec<(TokenKind, String)> {
    highlight(raw, language).token_pairs()
}

fn has(raw: &str, language: Language, kind: TokenKind, text: &str) -> bool {
    pairs(raw, language)
        .iter()
        .any(|(k, t)| *k == kind && t == text)
}

fn check_properties(raw: &str, language: Language) {
    let highlighted = highlight(raw, language);

    // Spans tile the escaped text with no gaps or overlaps
    let mut at = 0;
    for span in &highlighted.spans {
        assert_eq!(span.start, at, "gap or overlap in {:?}", raw);
        assert!(span.end > span.start, "empty span in {:?}", raw);
        at = span.end;
    }
    assert_eq!(at, highlighted.escaped.len(), "spans stop early in {:?}", raw);

    assert_eq!(highlighted.escaped, escape(raw));
    assert_eq!(highlighted.plain_text(), raw);
    assert_eq!(strip_tokens(&highlighted.to_html()), raw, "round trip of {:?}", raw);
    assert_eq!(highlighted.char_len(), raw.chars().count());

    // Adjacent plain spans are merged
    for pair in highlighted.spans.windows(2) {
        assert!(
            !(pair[0].kind == TokenKind::Plain && pair[1].kind == TokenKind::Plain),
            "unmerged plain text in {:?}",
            raw
        );
    }
}

// ========================================================================
// Properties
// ========================================================================

#[test]
fn test_markup_properties_hold_for_every_case() {
    for raw in MARKUP_CASES {
        check_properties(raw, Language::Markup);
    }
}

#[test]
fn test_stylesheet_properties_hold_for_every_case() {
    for raw in STYLESHEET_CASES {
        check_properties(raw, Language::Stylesheet);
    }
}

#[test]
fn test_every_prefix_of_every_case_round_trips() {
    // Partial input is what the grammar sees while the user types
    for (cases, language) in [
        (MARKUP_CASES, Language::Markup),
        (STYLESHEET_CASES, Language::Stylesheet),
    ] {
        for raw in cases {
            for (end, _) in raw.char_indices() {
                check_properties(&raw[..end], language);
            }
        }
    }
}

#[test]
fn test_grammars_are_interchangeable_on_any_input() {
    for raw in MARKUP_CASES.iter().chain(STYLESHEET_CASES) {
        check_properties(raw, Language::Markup);
        check_properties(raw, Language::Stylesheet);
    }
}

#[test]
fn test_output_never_contains_raw_user_markup() {
    let html = highlight("<b onclick=\"x()\">&lt;</b>", Language::Markup).to_html();
    assert!(!html.contains("<b"));
    assert!(html.contains("&amp;lt;"));
}

// ========================================================================
// Markup scenarios
// ========================================================================

#[test]
fn test_markup_paragraph_tokens() {
    assert_eq!(
        pairs(r#"<p class="a">x</p>"#, Language::Markup),
        vec![
            (TokenKind::Punctuation, "<".to_string()),
            (TokenKind::TagName, "p".to_string()),
            (TokenKind::Plain, " ".to_string()),
            (TokenKind::AttributeName, "class".to_string()),
            (TokenKind::Punctuation, "=".to_string()),
            (TokenKind::Punctuation, "\"".to_string()),
            (TokenKind::AttributeValue, "a".to_string()),
            (TokenKind::Punctuation, "\"".to_string()),
            (TokenKind::Punctuation, ">".to_string()),
            (TokenKind::Plain, "x".to_string()),
            (TokenKind::Punctuation, "</".to_string()),
            (TokenKind::TagName, "p".to_string()),
            (TokenKind::Punctuation, ">".to_string()),
        ]
    );
}

#[test]
fn test_markup_inline_style_uses_declaration_tokens() {
    let raw = r#"<div style="margin: 0 auto; color: #fff">"#;
    assert!(has(raw, Language::Markup, TokenKind::Property, "margin"));
    assert!(has(raw, Language::Markup, TokenKind::ValueUnit, "0"));
    assert!(has(raw, Language::Markup, TokenKind::Keyword, "auto"));
    assert!(has(raw, Language::Markup, TokenKind::ValueUnit, "#fff"));
    assert!(!pairs(raw, Language::Markup)
        .iter()
        .any(|(k, _)| *k == TokenKind::AttributeValue));
}

#[test]
fn test_markup_entity() {
    assert!(has("a &amp; b", Language::Markup, TokenKind::Entity, "&amp;"));
    assert!(has("&nbsp;", Language::Markup, TokenKind::Entity, "&nbsp;"));
}

#[test]
fn test_markup_comment_and_unterminated_comment() {
    assert_eq!(
        pairs("<!-- x -->", Language::Markup),
        vec![(TokenKind::Comment, "<!-- x -->".to_string())]
    );
    assert!(!pairs("<!-- x", Language::Markup)
        .iter()
        .any(|(k, _)| *k == TokenKind::Comment));
}

#[test]
fn test_markup_embedded_stylesheet() {
    let raw = "<style>h1 { font-size: 2em; }</style>";
    assert!(has(raw, Language::Markup, TokenKind::Selector, "h1"));
    assert!(has(raw, Language::Markup, TokenKind::Property, "font-size"));
    assert!(has(raw, Language::Markup, TokenKind::ValueUnit, "2em"));
}

// ========================================================================
// Stylesheet scenarios
// ========================================================================

#[test]
fn test_stylesheet_declaration_scenario() {
    assert_eq!(
        pairs("color: red;", Language::Stylesheet),
        vec![
            (TokenKind::Property, "color".to_string()),
            (TokenKind::Punctuation, ":".to_string()),
            (TokenKind::Plain, " ".to_string()),
            (TokenKind::Keyword, "red".to_string()),
            (TokenKind::Punctuation, ";".to_string()),
        ]
    );
}

#[test]
fn test_stylesheet_value_categories() {
    let raw = "a { width: calc(100% - 2px); color: rgba(0, 0, 0, 0.5) !important; font-family: 'Inter', sans-serif; }";
    let lang = Language::Stylesheet;
    assert!(has(raw, lang, TokenKind::FunctionName, "calc"));
    assert!(has(raw, lang, TokenKind::ValueUnit, "rgba(0, 0, 0, 0.5)"));
    assert!(has(raw, lang, TokenKind::Keyword, "!important"));
    assert!(has(raw, lang, TokenKind::String, "Inter"));
    assert!(has(raw, lang, TokenKind::Keyword, "sans-serif"));
}

#[test]
fn test_stylesheet_units() {
    for value in ["10px", "1.5em", "2rem", "50%", "100vh", "0.3s", "200ms", "45deg", "1fr"] {
        let raw = format!("a {{ x: {}; }}", value);
        assert!(
            has(&raw, Language::Stylesheet, TokenKind::ValueUnit, value),
            "{} should be a single value-unit token",
            value
        );
    }
}

#[test]
fn test_stylesheet_comment() {
    assert!(has(
        "/* note */ a {}",
        Language::Stylesheet,
        TokenKind::Comment,
        "/* note */"
    ));
}

#[test]
fn test_unescape_is_inverse_of_escape() {
    for raw in MARKUP_CASES.iter().chain(STYLESHEET_CASES) {
        assert_eq!(unescape(&escape(raw)), *raw);
    }
}
