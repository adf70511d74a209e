//! Command-line argument parsing
//!
//! Supports:
//! - Highlighting a single file to HTML or JSON
//! - Building a one-shot preview document
//! - Watching sources and rebuilding the preview on change
//! - Writing a starter project

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::runtime::SourcePaths;
use crate::syntax::Language;

/// Live-preview code playground
#[derive(Parser, Debug)]
#[command(name = "playpen", version, about = "Live-preview code playground")]
pub struct CliArgs {
    /// Read configuration from this file instead of the user config
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Highlight a markup or stylesheet file
    Highlight(HighlightArgs),
    /// Assemble the preview document once
    Build(BuildArgs),
    /// Rebuild the preview whenever a source file changes
    Watch(WatchArgs),
    /// Write the sample index.html, style.css and script.js
    Init(InitArgs),
    /// List available themes
    Themes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Token markup (`<span class="token-...">`)
    Html,
    /// Token list as JSON
    Json,
}

#[derive(Args, Debug)]
pub struct HighlightArgs {
    /// File to highlight
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Grammar to use (html, css); detected from the extension if omitted
    #[arg(short, long)]
    pub language: Option<String>,

    /// Theme id for --standalone output
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Emit a complete page with theme styles
    #[arg(short, long)]
    pub standalone: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,
}

impl HighlightArgs {
    /// Resolve the grammar from `--language` or the file extension
    pub fn resolve_language(&self) -> Result<Language, String> {
        match &self.language {
            Some(name) => {
                Language::from_name(name).ok_or_else(|| format!("Unknown language: {}", name))
            }
            None => Language::from_path(&self.file).ok_or_else(|| {
                format!(
                    "Cannot detect language of {}; pass --language",
                    self.file.display()
                )
            }),
        }
    }
}

/// Source file selection shared by `build` and `watch`
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory holding index.html, style.css and script.js
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Markup source (overrides --dir)
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Stylesheet source (overrides --dir)
    #[arg(long, value_name = "FILE")]
    pub css: Option<PathBuf>,

    /// Script source (overrides --dir)
    #[arg(long, value_name = "FILE")]
    pub js: Option<PathBuf>,
}

impl SourceArgs {
    /// Combine explicit paths with the conventional names in `--dir`
    pub fn into_paths(self) -> Result<SourcePaths, String> {
        let mut paths = match &self.dir {
            Some(dir) => SourcePaths::in_dir(dir),
            None if self.html.is_none() && self.css.is_none() && self.js.is_none() => {
                SourcePaths::in_dir(Path::new("."))
            }
            None => SourcePaths::default(),
        };
        if self.html.is_some() {
            paths.markup = self.html;
        }
        if self.css.is_some() {
            paths.styles = self.css;
        }
        if self.js.is_some() {
            paths.script = self.js;
        }

        if paths.is_empty() {
            return Err("No source files found; pass --html, --css, --js or --dir".to_string());
        }
        Ok(paths)
    }
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Open the result in the default browser (requires --output)
    #[arg(long, requires = "output")]
    pub open: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output file rewritten on every change
    #[arg(short, long, value_name = "FILE", default_value = "preview.html")]
    pub output: PathBuf,

    /// Open the preview in the default browser once it is first written
    #[arg(long)]
    pub open: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Target directory
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_highlight_args() {
        let args = CliArgs::try_parse_from(["playpen", "highlight", "page.html", "-s"]).unwrap();
        match args.command {
            Command::Highlight(h) => {
                assert!(h.standalone);
                assert_eq!(h.format, OutputFormat::Html);
                assert_eq!(h.resolve_language(), Ok(Language::Markup));
            }
            other => panic!("Expected highlight, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_language_overrides_extension() {
        let args = CliArgs::try_parse_from([
            "playpen",
            "highlight",
            "notes.txt",
            "--language",
            "css",
            "--format",
            "json",
        ])
        .unwrap();
        let Command::Highlight(h) = args.command else {
            panic!("Expected highlight");
        };
        assert_eq!(h.resolve_language(), Ok(Language::Stylesheet));
        assert_eq!(h.format, OutputFormat::Json);
    }

    #[test]
    fn test_undetectable_language() {
        let args = CliArgs::try_parse_from(["playpen", "highlight", "notes.txt"]).unwrap();
        let Command::Highlight(h) = args.command else {
            panic!("Expected highlight");
        };
        assert!(h.resolve_language().is_err());
    }

    #[test]
    fn test_open_requires_output() {
        assert!(CliArgs::try_parse_from(["playpen", "build", "--html", "a.html", "--open"]).is_err());
        assert!(CliArgs::try_parse_from([
            "playpen", "build", "--html", "a.html", "--open", "-o", "out.html"
        ])
        .is_ok());
    }

    #[test]
    fn test_explicit_source_overrides_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "").unwrap();
        fs::write(dir.path().join("style.css"), "").unwrap();

        let args = SourceArgs {
            dir: Some(dir.path().to_path_buf()),
            css: Some(PathBuf::from("other.css")),
            ..SourceArgs::default()
        };
        let paths = args.into_paths().unwrap();
        assert_eq!(paths.markup, Some(dir.path().join("index.html")));
        assert_eq!(paths.styles, Some(PathBuf::from("other.css")));
        assert_eq!(paths.script, None);
    }

    #[test]
    fn test_empty_dir_has_no_sources() {
        let dir = tempdir().unwrap();
        let args = SourceArgs {
            dir: Some(dir.path().to_path_buf()),
            ..SourceArgs::default()
        };
        assert!(args.into_paths().is_err());
    }

    #[test]
    fn test_watch_default_output() {
        let args = CliArgs::try_parse_from(["playpen", "watch", "--js", "a.js"]).unwrap();
        let Command::Watch(w) = args.command else {
            panic!("Expected watch");
        };
        assert_eq!(w.output, PathBuf::from("preview.html"));
        assert!(!w.open);
    }
}
