//! Sandboxed preview document
//!
//! Markup and styles are embedded as-is. The script is wrapped so a thrown
//! exception shows a small diagnostic box in the page instead of silently
//! breaking the preview; the box removes itself after a timeout.

use crate::config::DEFAULT_ERROR_OVERLAY_MS;

/// Styles for the exception overlay
const ERROR_OVERLAY_CSS: &str = r#".preview-error-box {
  position: fixed;
  bottom: 10px;
  left: 10px;
  padding: 10px 15px;
  background-color: #521313;
  color: #FFBDBD;
  border: 1px solid #800000;
  border-radius: 5px;
  font-family: 'Consolas', 'Menlo', 'Courier New', Courier, monospace;
  font-size: 13px;
  z-index: 9999;
  max-width: calc(100% - 20px);
  box-shadow: 0 2px 10px rgba(0,0,0,0.5);
}
.preview-error-box strong {
  color: #FF8F8F;
}"#;

/// The three region values feeding a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSources<'a> {
    pub markup: &'a str,
    pub styles: &'a str,
    pub script: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// How long the exception overlay stays visible
    pub error_overlay_ms: u64,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            error_overlay_ms: DEFAULT_ERROR_OVERLAY_MS,
        }
    }
}

/// Assemble the full preview document
pub fn build_document(sources: &PreviewSources<'_>, options: &PreviewOptions) -> String {
    let styles = neutralize_closing_tag(sources.styles, "style");
    let script = neutralize_closing_tag(sources.script, "script");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
{overlay_css}
</style>
<style>{styles}</style>
</head>
<body>
{markup}
<script>
try {{
{script}
}} catch (error) {{
  console.error("Error in preview JavaScript:", error);
  const errorDiv = document.createElement('div');
  errorDiv.className = 'preview-error-box';
  const errorMessage = (error instanceof Error) ? error.message : String(error);
  errorDiv.innerHTML = '<strong>JS EXCEPTION:</strong> ' + JSON.stringify(errorMessage).slice(1, -1).replace(/\\n/g, '<br>');
  (document.body || document.documentElement).appendChild(errorDiv);
  setTimeout(() => errorDiv.remove(), {overlay_ms});
}}
</script>
</body>
</html>
"#,
        overlay_css = ERROR_OVERLAY_CSS,
        styles = styles,
        markup = sources.markup,
        script = script,
        overlay_ms = options.error_overlay_ms,
    )
}

/// Rewrite every `</tag` (ASCII case-insensitive) as `<\/tag` so embedded
/// text cannot close its wrapping element early.
pub fn neutralize_closing_tag(text: &str, tag: &str) -> String {
    let needle_len = 2 + tag.len();
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut i = 0;

    while i + needle_len <= bytes.len() {
        if bytes[i] == b'<'
            && bytes[i + 1] == b'/'
            && bytes[i + 2..i + needle_len].eq_ignore_ascii_case(tag.as_bytes())
        {
            out.push_str(&text[last..i + 1]);
            out.push('\\');
            last = i + 1;
            i += needle_len;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[last..]);
    out
}
