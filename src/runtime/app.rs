//! Watch loop
//!
//! Source edits on disk become `AppMsg::SourceLoaded`, flow through
//! `update`, and the resulting debounced rebuilds are written to the
//! output file. Everything runs on one thread: the loop blocks on the
//! watcher until either a file changes or the debounce deadline passes.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::commands::Cmd;
use crate::fs_watcher::SourceWatcher;
use crate::messages::{AppMsg, Msg, PreviewMsg};
use crate::model::{PlaygroundModel, Region};
use crate::preview::Debouncer;
use crate::update::update;

use super::{read_source, write_preview, SourcePaths};

/// How long the loop sleeps when no rebuild is pending
const IDLE_WAIT: Duration = Duration::from_millis(500);

/// Debounce applied by the file watcher itself
const WATCH_DEBOUNCE: Duration = Duration::from_millis(50);

pub struct WatchApp {
    model: PlaygroundModel,
    sources: SourcePaths,
    output: PathBuf,
    debouncer: Debouncer,
    open_browser: bool,
    opened: bool,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
}

impl WatchApp {
    pub fn new(model: PlaygroundModel, sources: SourcePaths, output: PathBuf) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            sources,
            output,
            debouncer: Debouncer::new(),
            open_browser: false,
            opened: false,
            msg_tx,
            msg_rx,
        }
    }

    /// Open the preview in the default browser after the first write
    pub fn with_open_browser(mut self, open: bool) -> Self {
        self.open_browser = open;
        self
    }

    pub fn model(&self) -> &PlaygroundModel {
        &self.model
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Whether a rebuild is waiting for its quiet period
    pub fn has_pending_rebuild(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Run a message through `update` and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::DebouncedPreviewRebuild { revision, delay_ms } => {
                self.debouncer
                    .schedule(revision, Duration::from_millis(delay_ms), Instant::now());
            }
            Cmd::WritePreview { html } => {
                let result = write_preview(&self.output, &html)
                    .map(|()| self.output.clone())
                    .map_err(|e| format!("{:#}", e));
                if result.is_ok() && self.open_browser && !self.opened {
                    self.opened = true;
                    if let Err(e) = open::that(&self.output) {
                        tracing::warn!("Failed to open {}: {}", self.output.display(), e);
                    }
                }
                let _ = self.msg_tx.send(Msg::Preview(PreviewMsg::Written(result)));
            }
        }
    }

    /// Drain queued messages. Returns how many were handled.
    pub fn process_async_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            handled += 1;
        }
        handled
    }

    /// Queue a read of one region's source file
    fn queue_load(&self, region: Region, path: &Path) {
        let result = read_source(path).map_err(|e| format!("{:#}", e));
        let _ = self
            .msg_tx
            .send(Msg::App(AppMsg::SourceLoaded { region, result }));
    }

    /// Read every source file into the model
    pub fn load_all(&mut self) {
        for (region, path) in self.sources.iter() {
            self.queue_load(region, path);
        }
        self.process_async_messages();
    }

    /// Re-read the regions backed by the changed files
    pub fn reload(&mut self, changed: &[PathBuf]) {
        let regions: Vec<(Region, PathBuf)> = self
            .sources
            .iter()
            .filter(|(_, path)| changed.iter().any(|c| same_file(c, path)))
            .map(|(region, path)| (region, path.to_path_buf()))
            .collect();
        for (region, path) in regions {
            tracing::debug!("Reloading {} from {}", region.title(), path.display());
            self.queue_load(region, &path);
        }
        self.process_async_messages();
    }

    /// Fire the debounced rebuild if its quiet period has elapsed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.fire_if_due(now) {
            Some(revision) => {
                self.dispatch(Msg::Preview(PreviewMsg::RebuildReady { revision }));
                self.process_async_messages();
                true
            }
            None => false,
        }
    }

    /// Build immediately, skipping any pending quiet period
    pub fn flush(&mut self) {
        self.debouncer.cancel();
        let revision = self.model.revision;
        self.dispatch(Msg::Preview(PreviewMsg::RebuildReady { revision }));
        self.process_async_messages();
    }

    /// Watch the sources until the watcher shuts down
    pub fn run(&mut self) -> Result<()> {
        let files: Vec<PathBuf> = self.sources.iter().map(|(_, p)| p.to_path_buf()).collect();
        let watcher = SourceWatcher::new(&files, WATCH_DEBOUNCE)
            .context("Failed to start watching source files")?;

        self.load_all();
        self.flush();
        tracing::info!(
            "Watching {} sources, writing {}",
            files.len(),
            self.output.display()
        );

        loop {
            let timeout = self
                .debouncer
                .time_until(Instant::now())
                .unwrap_or(IDLE_WAIT);
            match watcher.wait_events(timeout) {
                Some(changed) if !changed.is_empty() => self.reload(&changed),
                Some(_) => {}
                None => break,
            }
            self.tick(Instant::now());
        }
        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
