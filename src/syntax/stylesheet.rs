//! Style-sheet grammar
//!
//! Walks rule sets with a small context stack: selector lists before `{`,
//! declarations inside blocks. At-rules either nest another rule context
//! (`@media`) or open a declaration block (`@font-face`).

use super::highlights::{HighlightSpan, TokenKind};
use super::scanner::{Scanner, SpanSink};
use super::values::{
    block_comment, eat_ident, ident_starts, tokenize_value, ValueContext,
};

/// At-rules whose block holds declarations rather than rules
const DECLARATION_AT_RULES: &[&str] = &[
    "font-face",
    "page",
    "counter-style",
    "property",
    "font-palette-values",
    "viewport",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Rules,
    Declarations,
}

/// Tokenize an escaped style sheet
pub fn tokenize(escaped: &str) -> Vec<HighlightSpan> {
    let mut scanner = Scanner::new(escaped);
    let mut sink = SpanSink::new();
    tokenize_region(&mut scanner, &mut sink);
    sink.into_spans()
}

/// Tokenize a whole style-sheet region (also used for `<style>` bodies)
pub(crate) fn tokenize_region(scanner: &mut Scanner<'_>, sink: &mut SpanSink) {
    let mut stack: Vec<Block> = Vec::new();

    while let Some(ch) = scanner.peek() {
        let block = stack.last().copied().unwrap_or(Block::Rules);

        if scanner.starts_with("/*") && block_comment(scanner, sink) {
            continue;
        }
        if ch.is_whitespace() {
            sink.whitespace(scanner);
            continue;
        }
        match ch {
            '}' => {
                sink.eat_as(TokenKind::Punctuation, scanner, "}");
                stack.pop();
                continue;
            }
            ';' => {
                sink.eat_as(TokenKind::Punctuation, scanner, ";");
                continue;
            }
            '{' => {
                sink.eat_as(TokenKind::Punctuation, scanner, "{");
                stack.push(Block::Declarations);
                continue;
            }
            '@' => {
                if let Some(opened) = at_rule(scanner, sink) {
                    stack.push(opened);
                }
                continue;
            }
            _ => {}
        }

        match next_structural(scanner) {
            Some(('{', brace)) => {
                let mut selectors = scanner.until(brace);
                selector_list(&mut selectors, sink);
                scanner.reset(brace);
                sink.eat_as(TokenKind::Punctuation, scanner, "{");
                stack.push(Block::Declarations);
            }
            _ if block == Block::Declarations || looks_like_declaration(scanner) => {
                declaration(scanner, sink, ValueContext::DECLARATION);
            }
            _ => {
                // Neither a rule nor a declaration: pass the run through.
                let start = scanner.pos();
                while let Some(c) = scanner.peek() {
                    if matches!(c, '{' | '}' | ';') {
                        break;
                    }
                    scanner.bump();
                }
                sink.push_to(TokenKind::Plain, start, scanner);
            }
        }
    }
}

/// First of `{`, `;`, `}` ahead of the cursor and its offset, skipping
/// strings and comments
fn next_structural(scanner: &Scanner<'_>) -> Option<(char, usize)> {
    let mut probe = *scanner;
    while let Some(ch) = probe.peek() {
        match ch {
            '{' | ';' | '}' => return Some((ch, probe.pos())),
            '"' | '\'' => {
                probe.bump();
                probe.eat_while(|c| c != ch && c != '\n');
                probe.bump();
            }
            '/' if probe.starts_with("/*") => match probe.find_end("*/") {
                Some(end) => probe.reset(end),
                None => return None,
            },
            _ => {
                probe.bump();
            }
        }
    }
    None
}

/// `ident :` at the cursor
fn looks_like_declaration(scanner: &Scanner<'_>) -> bool {
    let mut probe = *scanner;
    if !ident_starts(&probe) {
        return false;
    }
    eat_ident(&mut probe);
    probe.eat_while(char::is_whitespace);
    probe.peek() == Some(':')
}

/// `@name prelude` followed by `;` or `{`. Returns the block kind opened.
fn at_rule(scanner: &mut Scanner<'_>, sink: &mut SpanSink) -> Option<Block> {
    let start = scanner.pos();
    scanner.bump();
    let name = eat_ident(scanner);
    sink.push_to(TokenKind::Keyword, start, scanner);

    tokenize_value(scanner, sink, ValueContext::PRELUDE);

    match scanner.peek() {
        Some('{') => {
            sink.eat_as(TokenKind::Punctuation, scanner, "{");
            let lowered = name.to_ascii_lowercase();
            if DECLARATION_AT_RULES.contains(&lowered.as_str()) {
                Some(Block::Declarations)
            } else {
                Some(Block::Rules)
            }
        }
        Some(';') => {
            sink.eat_as(TokenKind::Punctuation, scanner, ";");
            None
        }
        _ => None,
    }
}

/// `property: value;` with the value handed to the value sub-grammar.
pub(crate) fn declaration(scanner: &mut Scanner<'_>, sink: &mut SpanSink, ctx: ValueContext) {
    let start = scanner.pos();
    if !ident_starts(scanner) {
        sink.plain_char(scanner);
        return;
    }
    eat_ident(scanner);
    let name_end = scanner.pos();

    let mut probe = *scanner;
    probe.eat_while(char::is_whitespace);
    if probe.peek() != Some(':') {
        sink.push(TokenKind::Plain, start, name_end);
        return;
    }

    sink.push(TokenKind::Property, start, name_end);
    sink.whitespace(scanner);
    sink.eat_as(TokenKind::Punctuation, scanner, ":");
    tokenize_value(scanner, sink, ctx);
    sink.eat_as(TokenKind::Punctuation, scanner, ";");
}

/// Declarations inside a `style="..."` attribute value
pub(crate) fn inline_declarations(scanner: &mut Scanner<'_>, sink: &mut SpanSink) {
    while let Some(ch) = scanner.peek() {
        if ch.is_whitespace() {
            sink.whitespace(scanner);
        } else if ch == ';' {
            sink.eat_as(TokenKind::Punctuation, scanner, ";");
        } else {
            declaration(scanner, sink, ValueContext::INLINE);
        }
    }
}

/// Selector list up to (not including) the rule's `{`
fn selector_list(scanner: &mut Scanner<'_>, sink: &mut SpanSink) {
    while let Some(ch) = scanner.peek() {
        if ch.is_whitespace() {
            sink.whitespace(scanner);
            continue;
        }
        if scanner.starts_with("/*") && block_comment(scanner, sink) {
            continue;
        }
        match ch {
            '>' | '+' | '~' | ',' => {
                let start = scanner.pos();
                scanner.bump();
                sink.push_to(TokenKind::Punctuation, start, scanner);
            }
            ':' => pseudo(scanner, sink),
            '#' | '.' if scanner.peek_nth(1).is_some_and(|c| c == '-' || c == '_' || c.is_alphanumeric()) => {
                let start = scanner.pos();
                scanner.bump();
                eat_ident(scanner);
                sink.push_to(TokenKind::Selector, start, scanner);
            }
            '*' | '&' => {
                let start = scanner.pos();
                scanner.bump();
                sink.push_to(TokenKind::Selector, start, scanner);
            }
            '[' => {
                let start = scanner.pos();
                match scanner.find_end("]") {
                    Some(end) => scanner.reset(end),
                    None => scanner.reset(scanner.end()),
                }
                sink.push_to(TokenKind::Selector, start, scanner);
            }
            _ if ident_starts(scanner) => {
                let start = scanner.pos();
                eat_ident(scanner);
                sink.push_to(TokenKind::Selector, start, scanner);
            }
            _ => sink.plain_char(scanner),
        }
    }
}

/// `:name` / `::name`, with a parenthesized argument list for functional
/// pseudo-classes (`:not(.a)`)
fn pseudo(scanner: &mut Scanner<'_>, sink: &mut SpanSink) {
    let start = scanner.pos();
    scanner.bump();
    scanner.eat(":");
    sink.push_to(TokenKind::Punctuation, start, scanner);

    if !ident_starts(scanner) {
        return;
    }
    let name_start = scanner.pos();
    eat_ident(scanner);
    sink.push_to(TokenKind::Selector, name_start, scanner);

    if scanner.peek() != Some('(') {
        return;
    }
    sink.eat_as(TokenKind::Punctuation, scanner, "(");
    let close = matching_paren(scanner).unwrap_or_else(|| scanner.end());
    let mut inner = scanner.until(close);
    selector_list(&mut inner, sink);
    scanner.reset(close);
    sink.eat_as(TokenKind::Punctuation, scanner, ")");
}

/// Offset of the `)` closing an already-consumed `(`
fn matching_paren(scanner: &Scanner<'_>) -> Option<usize> {
    let mut probe = *scanner;
    let mut depth = 0usize;
    while let Some(ch) = probe.peek() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(probe.pos()),
            ')' => depth -= 1,
            _ => {}
        }
        probe.bump();
    }
    None
}
