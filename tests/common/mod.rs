//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use playpen::config::PlaygroundConfig;
use playpen::editable::{MemoryEnvironment, MemorySurface, RenderSync, RestoreMode};
use playpen::model::PlaygroundModel;
use playpen::syntax::Language;

/// Markup inputs exercising every construct the grammar knows, plus
/// malformed and partial input
pub const MARKUP_CASES: &[&str] = &[
    "",
    "plain text only",
    "<p class=\"a\">Hi &amp; bye</p>",
    "<p style=\"color:red; margin: 0 auto !important\">x</p>",
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head></head>\n</html>",
    "<!-- comment <b>not a tag</b> -->",
    "<!-- unterminated comment",
    "<br /><img src='a.png' alt=x>",
    "<div\n  id=\"main\"\n  data-x='1'\n>",
    "<a href=\"x\"",
    "<",
    "</",
    "<p <b>",
    "a < b && c > d",
    "&copy; &#169; &#x1F600; &bogus",
    "<style>\n  .c { padding: 20px; color: #fff; }\n</style>",
    "<style>a { color: red",
    "<script>if (a < b && c > d) { alert('</p>'); }</script>",
    "<SCRIPT>x</SCRIPT>",
    "<p title=\"&quot;quoted&quot;\">caf\u{e9} \u{1F600}</p>",
    "\r\n<p>\r\n</p>\r\n",
    "<input disabled value=3 style='width: calc(100% - 2px)'>",
];

/// Stylesheet inputs, including nesting and partial input
pub const STYLESHEET_CASES: &[&str] = &[
    "",
    "color: red;",
    "body { margin: 0; padding: 0; }",
    "h1, .title > span:hover::before { content: \"\u{2192}\"; }",
    "a[href^='http']:not(.internal) { color: rgb(0, 128, 255); }",
    "/* comment */ p { /* inner */ color: blue }",
    "/* unterminated",
    "@media (max-width: 600px) { .c { width: 100%; } }",
    "@import url('x.css');",
    "@font-face { font-family: 'My Font'; src: url(f.woff2); }",
    ".a { .b { color: red; } }",
    ":root { --main: #3498db; width: var(--main); }",
    "p { transition: opacity 0.3s ease-in-out, transform 200ms; }",
    "}}} stray { braces",
    "p { color: red !IMPORTANT; }",
    "div > p + p ~ span { margin: -1.5em auto 2rem; }",
    "a { content: '<tag> & \"quotes\"'; }",
    "x { grid-template-columns: repeat(3, 1fr); transform: rotate(45deg); }",
];

/// A focused environment with no selection yet
pub fn focused_env() -> MemoryEnvironment {
    let mut env = MemoryEnvironment::new();
    env.focus();
    env
}

/// A surface already showing `value`, with a focused environment and the
/// synchronizer that rendered it
pub fn rendered(
    value: &str,
    language: Language,
) -> (MemorySurface, MemoryEnvironment, RenderSync) {
    let mut surface = MemorySurface::new();
    let mut env = focused_env();
    let mut sync = RenderSync::new(language, RestoreMode::Collapse);
    sync.apply_external(&mut surface, &mut env, value, language);
    (surface, env, sync)
}

/// A model with the given region values and default config
pub fn test_model(markup: &str, styles: &str, script: &str) -> PlaygroundModel {
    PlaygroundModel::with_values(markup, styles, script, PlaygroundConfig::default())
}
