//! Headless lantern host.
//!
//! Replays a JSON-lines event script against the status line engine and
//! prints every surface call to stdout. Logs go to stderr.

mod cli;
mod editor;
mod input;
mod surface;

use std::fs::File;
use std::io::{self, BufReader};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lantern_config::StatuslineConfig;
use lantern_status::signal::{LintMsg, NotifyMsg};
use lantern_status::{EditorHandle, STATUSLINE_CHANNEL, StatusSurface, Statusline};
use lantern_worker::TaskClass;
use tokio::sync::mpsc;

use crate::cli::Cli;
use crate::editor::HeadlessEditor;
use crate::input::Command;
use crate::surface::PrintSurface;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = StatuslineConfig::load_or_default(cli.config.as_deref()).context("loading status line configuration")?;
	for warning in &config.warnings {
		tracing::warn!("{warning}");
	}
	let config = Arc::new(config);

	let editor = Arc::new(HeadlessEditor::default());
	let mut statusline = Statusline::with_git_cli(
		Arc::clone(&config),
		PrintSurface::new(io::stdout().lock()),
		Arc::clone(&editor) as Arc<dyn EditorHandle>,
	);
	statusline.subscribe()?;
	statusline.paint_static();

	let (tx, mut commands) = mpsc::unbounded_channel();
	let source = cli.input.clone();
	let reader = lantern_worker::spawn_blocking(TaskClass::IoBlocking, "script.read", move || match source {
		Some(path) => {
			let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
			input::read_commands(BufReader::new(file), tx)
		}
		None => input::read_commands(io::stdin().lock(), tx),
	});

	// Queued signals go first so each command sees the state left by the previous one.
	loop {
		tokio::select! {
			biased;
			_ = statusline.step() => {}
			command = commands.recv() => match command {
				Some(command) => apply(&mut statusline, &editor, command),
				None => break,
			},
		}
	}
	statusline.pump();

	let grace = config.git.timeout() * 2;
	while statusline.git_pending() {
		match tokio::time::timeout(grace, statusline.step()).await {
			Ok(Some(_)) => {}
			Ok(None) | Err(_) => break,
		}
	}

	reader.await.context("event script reader panicked")??;
	Ok(())
}

fn apply<S: StatusSurface>(statusline: &mut Statusline<S>, editor: &HeadlessEditor, command: Command) {
	match command {
		Command::Notify(batch) => {
			editor.deliver(STATUSLINE_CHANNEL, batch);
		}
		Command::Path(path) => editor.set_path(path),
		Command::Mode(mode) => {
			statusline.redraw_mode(&mode);
		}
		Command::Cursor { line, col } => {
			statusline.redraw_cursor(line, col);
		}
		Command::Lint(counts) => {
			statusline.emitter().emit(LintMsg::Counts(counts));
		}
		Command::Messages(count) => {
			statusline.emitter().emit(NotifyMsg::Count(count));
		}
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("debug")
		} else {
			EnvFilter::new("info")
		}
	});
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}
