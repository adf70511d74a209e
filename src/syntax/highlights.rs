//! Token categories and highlighted output
//!
//! A [`Highlighted`] value owns the escaped text and a contiguous list of
//! spans covering all of it. Spans are never nested: inline style values
//! inside a `style="..."` attribute appear as their own spans between the
//! attribute quotes.

use serde::Serialize;

use super::escape::unescape;
use super::languages::Language;

/// The closed set of token categories surfaced to the theme layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Comment,
    TagName,
    AttributeName,
    AttributeValue,
    Punctuation,
    Entity,
    Selector,
    Property,
    ValueLiteral,
    ValueUnit,
    FunctionName,
    Keyword,
    String,
    Plain,
}

/// Every category, in declaration order.
pub const TOKEN_KINDS: [TokenKind; 14] = [
    TokenKind::Comment,
    TokenKind::TagName,
    TokenKind::AttributeName,
    TokenKind::AttributeValue,
    TokenKind::Punctuation,
    TokenKind::Entity,
    TokenKind::Selector,
    TokenKind::Property,
    TokenKind::ValueLiteral,
    TokenKind::ValueUnit,
    TokenKind::FunctionName,
    TokenKind::Keyword,
    TokenKind::String,
    TokenKind::Plain,
];

impl TokenKind {
    /// Category name as used in stylesheets and themes
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::TagName => "tag-name",
            TokenKind::AttributeName => "attribute-name",
            TokenKind::AttributeValue => "attribute-value",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Entity => "entity",
            TokenKind::Selector => "selector",
            TokenKind::Property => "property",
            TokenKind::ValueLiteral => "value-literal",
            TokenKind::ValueUnit => "value-unit",
            TokenKind::FunctionName => "function-name",
            TokenKind::Keyword => "keyword",
            TokenKind::String => "string",
            TokenKind::Plain => "plain",
        }
    }

    /// CSS class applied to wrapped spans
    pub fn class_name(&self) -> String {
        format!("token-{}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        TOKEN_KINDS.iter().copied().find(|kind| kind.name() == name)
    }
}

/// A span of escaped text (byte offsets, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

/// Borrowed view of one token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The token's escaped text
    pub escaped: &'a str,
}

impl Token<'_> {
    /// The token's text as displayed (references decoded)
    pub fn text(&self) -> String {
        unescape(self.escaped)
    }
}

/// A run of displayed text produced by rendering, one per text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: TokenKind,
    pub text: String,
}

/// Highlighted text for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub language: Language,
    pub escaped: String,
    pub spans: Vec<HighlightSpan>,
}

impl Highlighted {
    pub fn new(language: Language, escaped: String, spans: Vec<HighlightSpan>) -> Self {
        debug_assert!(covers(&escaped, &spans), "spans must tile the escaped text");
        Self {
            language,
            escaped,
            spans,
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token<'_>> {
        self.spans.iter().map(|span| Token {
            kind: span.kind,
            escaped: &self.escaped[span.start..span.end],
        })
    }

    /// Tokens as `(kind, displayed text)` pairs
    pub fn token_pairs(&self) -> Vec<(TokenKind, String)> {
        self.tokens().map(|t| (t.kind, t.text())).collect()
    }

    /// Display segments, one per non-empty token
    pub fn segments(&self) -> Vec<Segment> {
        self.tokens()
            .map(|t| Segment {
                kind: t.kind,
                text: t.text(),
            })
            .collect()
    }

    /// Escaped text with every non-plain token wrapped in a classed span
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(self.escaped.len() * 2);
        for token in self.tokens() {
            if token.kind == TokenKind::Plain {
                html.push_str(token.escaped);
            } else {
                html.push_str("<span class=\"");
                html.push_str(&token.kind.class_name());
                html.push_str("\">");
                html.push_str(token.escaped);
                html.push_str("</span>");
            }
        }
        html
    }

    /// The original raw text
    pub fn plain_text(&self) -> String {
        unescape(&self.escaped)
    }

    /// Number of displayed characters
    pub fn char_len(&self) -> usize {
        self.tokens().map(|t| t.text().chars().count()).sum()
    }
}

fn covers(escaped: &str, spans: &[HighlightSpan]) -> bool {
    let mut at = 0;
    for span in spans {
        if span.start != at || span.end <= span.start {
            return false;
        }
        at = span.end;
    }
    at == escaped.len()
}

/// Remove token markup from rendered HTML and decode references,
/// recovering the raw text.
///
/// Rendered output never contains a raw `<` outside of tags, so every
/// `<...>` run is markup.
pub fn strip_tokens(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = "";
            }
        }
    }
    text.push_str(rest);
    unescape(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in TOKEN_KINDS {
            assert_eq!(TokenKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TokenKind::from_name("bogus"), None);
    }

    #[test]
    fn test_class_name() {
        assert_eq!(TokenKind::TagName.class_name(), "token-tag-name");
    }

    #[test]
    fn test_to_html_leaves_plain_unwrapped() {
        let escaped = "a&lt;b".to_string();
        let highlighted = Highlighted::new(
            Language::Markup,
            escaped,
            vec![
                HighlightSpan {
                    start: 0,
                    end: 1,
                    kind: TokenKind::Plain,
                },
                HighlightSpan {
                    start: 1,
                    end: 5,
                    kind: TokenKind::Punctuation,
                },
                HighlightSpan {
                    start: 5,
                    end: 6,
                    kind: TokenKind::Plain,
                },
            ],
        );
        assert_eq!(
            highlighted.to_html(),
            "a<span class=\"token-punctuation\">&lt;</span>b"
        );
        assert_eq!(strip_tokens(&highlighted.to_html()), "a<b");
        assert_eq!(highlighted.char_len(), 3);
    }

    #[test]
    fn test_strip_tokens_without_markup() {
        assert_eq!(strip_tokens("x &amp; y"), "x & y");
    }
}
