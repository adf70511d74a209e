//! Markup grammar
//!
//! A single left-to-right pass over escaped text. Comments, tags with their
//! attributes, and character references in text content are recognized;
//! everything else stays plain. `<style>` bodies are handed to the
//! style-sheet grammar and `<script>` bodies are left untouched.

use super::highlights::{HighlightSpan, TokenKind};
use super::scanner::{Scanner, SpanSink};
use super::stylesheet;
use super::values::quoted_string;

/// How a tag ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagEnd {
    Open,
    SelfClosing,
    Unterminated,
}

/// Tokenize escaped markup
pub fn tokenize(escaped: &str) -> Vec<HighlightSpan> {
    let mut scanner = Scanner::new(escaped);
    let mut sink = SpanSink::new();

    while let Some(ch) = scanner.peek() {
        match ch {
            '<' => {
                if scanner.starts_with("<!--") && comment(&mut scanner, &mut sink) {
                    continue;
                }
                if scanner.starts_with("<!") && doctype(&mut scanner, &mut sink) {
                    continue;
                }
                if !tag(&mut scanner, &mut sink) {
                    sink.plain_char(&mut scanner);
                }
            }
            '&' => {
                if !entity(&mut scanner, &mut sink) {
                    sink.plain_char(&mut scanner);
                }
            }
            _ => {
                let start = scanner.pos();
                scanner.eat_while(|c| c != '<' && c != '&');
                sink.push_to(TokenKind::Plain, start, &scanner);
            }
        }
    }

    sink.into_spans()
}

#[inline]
fn is_tag_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | ':' | '-')
}

#[inline]
fn is_attribute_name_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '"' | '\'' | '<' | '>' | '/' | '=')
}

/// `<!-- ... -->`, possibly spanning lines. Unterminated comments are left
/// for the other rules.
fn comment(scanner: &mut Scanner<'_>, sink: &mut SpanSink) -> bool {
    let start = scanner.pos();
    let mut probe = *scanner;
    probe.eat("<!--");
    match probe.find_end("-->") {
        Some(end) => {
            scanner.reset(end);
            sink.push(TokenKind::Comment, start, end);
            true
        }
        None => false,
    }
}

/// `<!DOCTYPE html>`
fn doctype(scanner: &mut Scanner<'_>, sink: &mut SpanSink) -> bool {
    if !scanner.peek_nth(2).is_some_and(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    sink.eat_as(TokenKind::Punctuation, scanner, "<!");
    let keyword = scanner.pos();
    scanner.eat_while(|c| c.is_ascii_alphabetic());
    sink.push_to(TokenKind::Keyword, keyword, scanner);

    while let Some(ch) = scanner.peek() {
        match ch {
            '>' => {
                sink.eat_as(TokenKind::Punctuation, scanner, ">");
                break;
            }
            '<' => break,
            '"' | '\'' => quoted_string(scanner, sink, ch),
            c if c.is_whitespace() => {
                sink.whitespace(scanner);
            }
            _ => {
                let start = scanner.pos();
                scanner.eat_while(|c| !c.is_whitespace() && !matches!(c, '>' | '<' | '"' | '\''));
                sink.push_to(TokenKind::ValueLiteral, start, scanner);
            }
        }
    }
    true
}

/// `<name ...>` or `</name ...>`. Returns false if no tag name follows the
/// bracket.
fn tag(scanner: &mut Scanner<'_>, sink: &mut SpanSink) -> bool {
    let closing = scanner.starts_with("</");
    let bracket_len = if closing { 2 } else { 1 };
    if !scanner
        .peek_nth(bracket_len)
        .is_some_and(|c| c.is_ascii_alphanumeric())
    {
        return false;
    }

    let start = scanner.pos();
    scanner.bump();
    if closing {
        scanner.bump();
    }
    sink.push_to(TokenKind::Punctuation, start, scanner);

    let name_start = scanner.pos();
    scanner.eat_while(is_tag_name_char);
    let name = scanner.slice(name_start, scanner.pos()).to_ascii_lowercase();
    sink.push_to(TokenKind::TagName, name_start, scanner);

    let end = tag_body(scanner, sink);

    if !closing && end == TagEnd::Open {
        match name.as_str() {
            "style" => raw_text_element(scanner, sink, "</style", true),
            "script" => raw_text_element(scanner, sink, "</script", false),
            _ => {}
        }
    }
    true
}

/// Attributes and the closing marker of a tag
fn tag_body(scanner: &mut Scanner<'_>, sink: &mut SpanSink) -> TagEnd {
    while let Some(ch) = scanner.peek() {
        if ch.is_whitespace() {
            let start = scanner.pos();
            let mut probe = *scanner;
            probe.eat_while(char::is_whitespace);
            if probe.starts_with(">") || probe.starts_with("/>") {
                scanner.reset(probe.pos());
                return close_marker(scanner, sink, start);
            }
            sink.whitespace(scanner);
            continue;
        }
        match ch {
            '>' => {
                let start = scanner.pos();
                return close_marker(scanner, sink, start);
            }
            '/' if scanner.starts_with("/>") => {
                let start = scanner.pos();
                return close_marker(scanner, sink, start);
            }
            '<' => return TagEnd::Unterminated,
            c if is_attribute_name_char(c) => attribute(scanner, sink),
            _ => sink.plain_char(scanner),
        }
    }
    TagEnd::Unterminated
}

/// `>` or `/>` as one punctuation token starting at `start` (which may
/// include preceding whitespace)
fn close_marker(scanner: &mut Scanner<'_>, sink: &mut SpanSink, start: usize) -> TagEnd {
    let end = if scanner.eat("/>") {
        TagEnd::SelfClosing
    } else {
        scanner.eat(">");
        TagEnd::Open
    };
    sink.push_to(TokenKind::Punctuation, start, scanner);
    end
}

/// `name`, `name=value`, `name="value"` or `name='value'`
fn attribute(scanner: &mut Scanner<'_>, sink: &mut SpanSink) {
    let name_start = scanner.pos();
    scanner.eat_while(is_attribute_name_char);
    let name_end = scanner.pos();
    let is_style = scanner
        .slice(name_start, name_end)
        .eq_ignore_ascii_case("style");
    sink.push(TokenKind::AttributeName, name_start, name_end);

    let mut probe = *scanner;
    probe.eat_while(char::is_whitespace);
    if probe.peek() != Some('=') {
        return;
    }

    sink.whitespace(scanner);
    sink.eat_as(TokenKind::Punctuation, scanner, "=");

    let mut probe = *scanner;
    probe.eat_while(char::is_whitespace);
    match probe.peek() {
        Some(quote @ ('"' | '\'')) => {
            sink.whitespace(scanner);
            quoted_value(scanner, sink, quote, is_style);
        }
        Some(c) if !matches!(c, '>' | '<' | '=' | '`') && !c.is_whitespace() => {
            sink.whitespace(scanner);
            let start = scanner.pos();
            scanner.eat_while(|c| !c.is_whitespace() && !matches!(c, '>' | '<' | '"' | '\'' | '=' | '`'));
            sink.push_to(TokenKind::AttributeValue, start, scanner);
        }
        _ => {}
    }
}

/// A quoted attribute value. `style` values are tokenized as inline
/// declarations; an unterminated value runs up to the next `>`.
fn quoted_value(scanner: &mut Scanner<'_>, sink: &mut SpanSink, quote: char, is_style: bool) {
    let open = scanner.pos();
    scanner.bump();
    sink.push_to(TokenKind::Punctuation, open, scanner);

    let mut quote_str = [0u8; 4];
    let quote_str: &str = quote.encode_utf8(&mut quote_str);
    let (value_end, closed) = match scanner.find(quote_str) {
        Some(end) => (end, true),
        None => (scanner.find(">").unwrap_or_else(|| scanner.end()), false),
    };

    if is_style {
        let mut inner = scanner.until(value_end);
        stylesheet::inline_declarations(&mut inner, sink);
    } else {
        sink.push(TokenKind::AttributeValue, scanner.pos(), value_end);
    }
    scanner.reset(value_end);

    if closed {
        let close = scanner.pos();
        scanner.bump();
        sink.push_to(TokenKind::Punctuation, close, scanner);
    }
}

/// Body of `<style>` / `<script>` up to the closing tag
fn raw_text_element(scanner: &mut Scanner<'_>, sink: &mut SpanSink, close: &str, styles: bool) {
    let body_end = scanner
        .find_ignore_case(close)
        .unwrap_or_else(|| scanner.end());
    if styles {
        let mut body = scanner.until(body_end);
        stylesheet::tokenize_region(&mut body, sink);
    } else {
        sink.push(TokenKind::Plain, scanner.pos(), body_end);
    }
    scanner.reset(body_end);
}

/// `&name;`, `&#digits;` or `&#xhex;` in text content
fn entity(scanner: &mut Scanner<'_>, sink: &mut SpanSink) -> bool {
    let start = scanner.pos();
    let mut probe = *scanner;
    probe.bump();

    let body = if probe.eat("#") {
        if probe.peek().is_some_and(|c| c == 'x' || c == 'X') {
            probe.bump();
            probe.eat_while(|c| c.is_ascii_hexdigit())
        } else {
            probe.eat_while(|c| c.is_ascii_digit())
        }
    } else {
        probe.eat_while(|c| c.is_ascii_alphanumeric())
    };

    if body == 0 || !probe.eat(";") {
        return false;
    }
    scanner.reset(probe.pos());
    sink.push_to(TokenKind::Entity, start, scanner);
    true
}
