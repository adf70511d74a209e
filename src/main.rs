use std::io::Write;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use playpen::cli::{BuildArgs, CliArgs, Command, HighlightArgs, InitArgs, OutputFormat, WatchArgs};
use playpen::config::PlaygroundConfig;
use playpen::model::PlaygroundModel;
use playpen::runtime::{self, WatchApp};
use playpen::syntax::highlight;
use playpen::theme::{list_available_themes, load_theme, ThemeSource};

fn main() -> Result<()> {
    playpen::tracing::init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => PlaygroundConfig::load_from(path),
        None => PlaygroundConfig::load(),
    };

    match args.command {
        Command::Highlight(h) => run_highlight(h, &config),
        Command::Build(b) => run_build(b, &config),
        Command::Watch(w) => run_watch(w, config),
        Command::Init(i) => run_init(i),
        Command::Themes => run_themes(),
    }
}

fn run_highlight(args: HighlightArgs, config: &PlaygroundConfig) -> Result<()> {
    let language = args.resolve_language().map_err(|e| anyhow!(e))?;
    let source = runtime::read_source(&args.file)?;
    let highlighted = highlight(&source, language);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&highlighted.segments())
            .context("Failed to serialize tokens")?,
        OutputFormat::Html if args.standalone => {
            let id = args.theme.as_deref().unwrap_or(&config.theme);
            let theme = load_theme(id).map_err(|e| anyhow!(e))?;
            theme.standalone_page(&highlighted)
        }
        OutputFormat::Html => highlighted.to_html(),
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    Ok(())
}

fn run_build(args: BuildArgs, config: &PlaygroundConfig) -> Result<()> {
    let paths = args.sources.into_paths().map_err(|e| anyhow!(e))?;
    let html = runtime::build_preview(&paths, config)?;

    match args.output {
        Some(output) => {
            runtime::write_preview(&output, &html)?;
            eprintln!("Wrote {}", output.display());
            if args.open {
                open::that(&output)
                    .with_context(|| format!("Failed to open {}", output.display()))?;
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
        }
    }
    Ok(())
}

fn run_watch(args: WatchArgs, config: PlaygroundConfig) -> Result<()> {
    let paths = args.sources.into_paths().map_err(|e| anyhow!(e))?;
    let model = PlaygroundModel::with_values("", "", "", config);
    let mut app = WatchApp::new(model, paths, args.output).with_open_browser(args.open);
    eprintln!("Watching; preview at {}", app.output().display());
    app.run()
}

fn run_init(args: InitArgs) -> Result<()> {
    let written = runtime::init_sources(&args.dir, args.force)?;
    if written.is_empty() {
        eprintln!("All files already exist in {}; use --force to overwrite", args.dir.display());
    }
    for path in written {
        eprintln!("Created {}", path.display());
    }
    Ok(())
}

fn run_themes() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for info in list_available_themes() {
        let source = match info.source {
            ThemeSource::User => "user",
            ThemeSource::Builtin => "builtin",
        };
        writeln!(stdout, "{:<20} {:<24} ({})", info.id, info.name, source)?;
    }
    if let Some(dir) = playpen::config_paths::themes_dir() {
        eprintln!("User themes are read from {}", dir.display());
    }
    Ok(())
}
