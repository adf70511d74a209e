//! Value expression sub-grammar
//!
//! Shared by style-sheet declarations, inline `style` attributes and at-rule
//! preludes. Each step consumes the longest applicable token at the cursor;
//! anything unrecognized is passed through one character at a time.

use super::highlights::TokenKind;
use super::scanner::{Scanner, SpanSink};

/// Dimension units, longest first so prefixes never shadow longer units.
pub const UNITS: &[&str] = &[
    "vmin", "vmax", "turn", "rem", "deg", "px", "em", "vh", "vw", "ms", "fr", "ch", "ex", "pt",
    "pc", "in", "cm", "mm", "%", "s", "Q",
];

/// Color functions are literals, not function-name tokens.
pub const COLOR_FUNCTIONS: &[&str] = &["rgb", "rgba", "hsl", "hsla"];

/// Bare identifiers highlighted as keywords (compared case-insensitively).
pub const KEYWORDS: &[&str] = &[
    // global
    "inherit", "initial", "unset", "revert", "auto", "none",
    // display / layout
    "block", "inline", "inline-block", "inline-flex", "inline-grid", "flex", "grid", "contents",
    "table", "table-cell", "table-row", "list-item", "flow-root",
    "row", "row-reverse", "column", "column-reverse", "wrap", "nowrap", "wrap-reverse",
    "flex-start", "flex-end", "space-between", "space-around", "space-evenly", "stretch",
    "baseline", "start", "end",
    // position / box
    "static", "relative", "absolute", "fixed", "sticky", "border-box", "content-box",
    // visibility / overflow
    "visible", "hidden", "collapse", "scroll", "clip",
    // text
    "left", "right", "center", "justify", "top", "bottom", "middle", "normal", "bold", "bolder",
    "lighter", "italic", "oblique", "underline", "overline", "line-through", "uppercase",
    "lowercase", "capitalize", "pre", "pre-wrap", "pre-line", "break-word", "ellipsis",
    // font family generics
    "serif", "sans-serif", "monospace", "cursive", "fantasy", "system-ui", "ui-monospace",
    // cursor
    "pointer", "default", "text", "move", "wait", "help", "crosshair", "not-allowed", "grab",
    "grabbing",
    // borders
    "solid", "dashed", "dotted", "double", "groove", "ridge", "inset", "outset",
    // timing
    "ease", "ease-in", "ease-out", "ease-in-out", "linear", "infinite", "alternate", "forwards",
    "backwards", "both",
    // misc
    "cover", "contain", "repeat", "no-repeat", "repeat-x", "repeat-y", "transparent",
    "currentcolor", "important",
    // named colors
    "black", "white", "red", "green", "blue", "yellow", "orange", "purple", "pink", "gray",
    "grey", "brown", "cyan", "magenta", "lime", "navy", "teal", "olive", "maroon", "silver",
    "aqua", "fuchsia", "gold", "indigo", "violet", "coral", "crimson", "salmon", "tomato",
    "orchid", "khaki", "plum", "tan", "beige", "ivory", "lavender", "turquoise",
];

/// Whether `word` is in the keyword table
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(word))
}

#[inline]
pub(crate) fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || (!ch.is_ascii() && ch.is_alphabetic())
}

#[inline]
pub(crate) fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || (!ch.is_ascii() && ch.is_alphabetic())
}

/// Whether an identifier begins at the cursor (allowing a leading `-` or `--`)
pub(crate) fn ident_starts(scanner: &Scanner<'_>) -> bool {
    match scanner.peek() {
        Some('-') => match scanner.peek_nth(1) {
            Some('-') => true,
            Some(ch) => is_ident_start(ch),
            None => false,
        },
        Some(ch) => is_ident_start(ch),
        None => false,
    }
}

/// Consume an identifier, returning its decoded text
pub(crate) fn eat_ident(scanner: &mut Scanner<'_>) -> String {
    let mut word = String::new();
    while let Some(ch) = scanner.peek() {
        if !is_ident_char(ch) {
            break;
        }
        word.push(ch);
        scanner.bump();
    }
    word
}

/// Options for one value expression
#[derive(Debug, Clone, Copy)]
pub struct ValueContext {
    /// Characters that end the expression (left unconsumed)
    pub stops: &'static [char],
    /// Recognize `/* ... */` comments inside the value
    pub comments: bool,
}

impl ValueContext {
    /// Value inside a `style="..."` attribute
    pub const INLINE: ValueContext = ValueContext {
        stops: &[';'],
        comments: false,
    };

    /// Value of a style-sheet declaration
    pub const DECLARATION: ValueContext = ValueContext {
        stops: &[';', '}', '{'],
        comments: true,
    };

    /// Prelude of an at-rule
    pub const PRELUDE: ValueContext = ValueContext {
        stops: &[';', '{', '}'],
        comments: true,
    };
}

/// Tokenize one value expression up to a stop character or the scanner bound.
pub fn tokenize_value(scanner: &mut Scanner<'_>, sink: &mut SpanSink, ctx: ValueContext) {
    while let Some(ch) = scanner.peek() {
        if ctx.stops.contains(&ch) {
            break;
        }
        if ctx.comments && scanner.starts_with("/*") && block_comment(scanner, sink) {
            continue;
        }
        if ch == '"' || ch == '\'' {
            quoted_string(scanner, sink, ch);
            continue;
        }
        if ch == '!' && scanner.starts_with_ignore_case("!important") {
            let start = scanner.pos();
            for _ in 0.."!important".len() {
                scanner.bump();
            }
            sink.push_to(TokenKind::Keyword, start, scanner);
            continue;
        }
        if ident_starts(scanner) && function_call(scanner, sink) {
            continue;
        }
        if ch == '#' && hex_color(scanner, sink) {
            continue;
        }
        if number(scanner, sink) {
            continue;
        }
        if ident_starts(scanner) {
            let start = scanner.pos();
            let word = eat_ident(scanner);
            let kind = if is_keyword(&word) {
                TokenKind::Keyword
            } else {
                TokenKind::Plain
            };
            sink.push_to(kind, start, scanner);
            continue;
        }
        if ch == ',' {
            sink.eat_as(TokenKind::Punctuation, scanner, ",");
            continue;
        }
        if ch.is_whitespace() {
            sink.whitespace(scanner);
            continue;
        }
        sink.plain_char(scanner);
    }
}

/// `/* ... */` as a comment token. Unterminated comments are not consumed.
pub(crate) fn block_comment(scanner: &mut Scanner<'_>, sink: &mut SpanSink) -> bool {
    let start = scanner.pos();
    let mut probe = *scanner;
    probe.eat("/*");
    match probe.find_end("*/") {
        Some(end) => {
            scanner.reset(end);
            sink.push(TokenKind::Comment, start, end);
            true
        }
        None => false,
    }
}

/// Quote marks as punctuation, the interior as a string token.
/// An unterminated string runs to the bound.
pub(crate) fn quoted_string(scanner: &mut Scanner<'_>, sink: &mut SpanSink, quote: char) {
    let open = scanner.pos();
    scanner.bump();
    sink.push_to(TokenKind::Punctuation, open, scanner);

    let body = scanner.pos();
    while let Some(ch) = scanner.peek() {
        if ch == quote || ch == '\n' {
            break;
        }
        scanner.bump();
        if ch == '\\' {
            scanner.bump();
        }
    }
    sink.push_to(TokenKind::String, body, scanner);

    if scanner.peek() == Some(quote) {
        let close = scanner.pos();
        scanner.bump();
        sink.push_to(TokenKind::Punctuation, close, scanner);
    }
}

/// `name(args)`. Color functions become one value-unit literal; others
/// split into function-name, parens, and untouched arguments.
fn function_call(scanner: &mut Scanner<'_>, sink: &mut SpanSink) -> bool {
    let start = scanner.pos();
    let mut probe = *scanner;
    let name = eat_ident(&mut probe);
    if name.is_empty() || probe.peek() != Some('(') {
        return false;
    }

    let name_end = probe.pos();
    probe.bump();
    let args_start = probe.pos();
    let closed = skip_arguments(&mut probe);
    let args_end = probe.pos();

    if COLOR_FUNCTIONS
        .iter()
        .any(|f| f.eq_ignore_ascii_case(&name))
    {
        if closed {
            probe.bump();
        }
        sink.push(TokenKind::ValueUnit, start, probe.pos());
        scanner.reset(probe.pos());
        return true;
    }

    sink.push(TokenKind::FunctionName, start, name_end);
    sink.push(TokenKind::Punctuation, name_end, args_start);
    sink.push(TokenKind::Plain, args_start, args_end);
    if closed {
        probe.bump();
        sink.push(TokenKind::Punctuation, args_end, probe.pos());
    }
    scanner.reset(probe.pos());
    true
}

/// Advance to the `)` matching an already-consumed `(`, leaving it
/// unconsumed. Returns false when the bound or a brace is hit first.
fn skip_arguments(scanner: &mut Scanner<'_>) -> bool {
    let mut depth = 0usize;
    while let Some(ch) = scanner.peek() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return true,
            ')' => depth -= 1,
            '{' | '}' => return false,
            '"' | '\'' => {
                scanner.bump();
                while let Some(inner) = scanner.peek() {
                    if inner == ch || inner == '\n' {
                        break;
                    }
                    scanner.bump();
                }
                if scanner.peek() != Some(ch) {
                    continue;
                }
            }
            _ => {}
        }
        scanner.bump();
    }
    false
}

/// `#` followed by 3, 4, 6 or 8 hex digits and no further identifier chars.
fn hex_color(scanner: &mut Scanner<'_>, sink: &mut SpanSink) -> bool {
    let start = scanner.pos();
    let mut probe = *scanner;
    probe.bump();
    let digits = probe.eat_while(|c| c.is_ascii_hexdigit());
    if !matches!(digits, 3 | 4 | 6 | 8) || probe.peek().is_some_and(is_ident_char) {
        return false;
    }
    scanner.reset(probe.pos());
    sink.push_to(TokenKind::ValueUnit, start, scanner);
    true
}

/// A number with an optional unit from [`UNITS`], as one value-unit token.
fn number(scanner: &mut Scanner<'_>, sink: &mut SpanSink) -> bool {
    let start = scanner.pos();
    let mut probe = *scanner;

    if matches!(probe.peek(), Some('-') | Some('+')) {
        probe.bump();
    }
    let int_digits = probe.eat_while(|c| c.is_ascii_digit());
    let mut frac_digits = 0;
    if probe.peek() == Some('.') && probe.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
        probe.bump();
        frac_digits = probe.eat_while(|c| c.is_ascii_digit());
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    let number_end = probe.pos();
    for unit in UNITS {
        let mut unit_probe = probe;
        if unit_probe.eat_ignore_case(unit) && !unit_probe.peek().is_some_and(is_ident_char) {
            probe = unit_probe;
            break;
        }
    }
    // A number glued to an unknown suffix (`10abc`) still ends at the digits.
    let end = if probe.pos() > number_end {
        probe.pos()
    } else {
        number_end
    };

    scanner.reset(end);
    sink.push(TokenKind::ValueUnit, start, end);
    true
}
