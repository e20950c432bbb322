//! The status line aggregate and its synchronization loop.

use std::sync::Arc;

use lantern_config::{Color, FieldToken, ModeIndicator, StatuslineConfig};
use tokio_util::sync::CancellationToken;

use crate::cell::policy::{ENCODING, FILEFORMAT, FILENAME, FILEPATH, FILETYPE, NOTIFY, POSITION, READONLY};
use crate::cell::{FieldCell, GitCell, LintCell, LintCounts, Mode, ModeCell, Position, Track, split_path};
use crate::channel::{EventReceiver, EventSender, event_channel};
use crate::editor::EditorHandle;
use crate::event::{BufEnter, EventBatch, StatusEvent};
use crate::git::{BranchProbe, GitCli, spawn_lookup};
use crate::layout::Layout;
use crate::signal::{SignalEmitter, SignalReceiver, StatusMsg, signal_bus};
use crate::surface::{Element, Icon, StatusSurface};
use crate::{Dirty, Result, StatusError};

/// Editor notification channel carrying status line events.
pub const STATUSLINE_CHANNEL: &str = "statusline";

struct Cells {
	mode: ModeCell,
	filepath: FieldCell<String>,
	filename: FieldCell<String>,
	readonly: FieldCell<bool>,
	filetype: FieldCell<String>,
	encoding: FieldCell<String>,
	fileformat: FieldCell<String>,
	position: FieldCell<Position>,
	notify: FieldCell<usize>,
	lint: LintCell,
	git: GitCell,
}

impl Cells {
	fn new() -> Self {
		Self {
			mode: ModeCell::new(),
			filepath: FieldCell::new(&FILEPATH),
			filename: FieldCell::new(&FILENAME),
			readonly: FieldCell::new(&READONLY),
			filetype: FieldCell::new(&FILETYPE),
			encoding: FieldCell::new(&ENCODING),
			fileformat: FieldCell::new(&FILEFORMAT),
			position: FieldCell::new(&POSITION),
			notify: FieldCell::new(&NOTIFY),
			lint: LintCell::new(),
			git: GitCell::new(),
		}
	}
}

/// Status line state for one editor window.
///
/// Lives on the UI context. All cell state is mutated here, one signal at a
/// time; producers only reach it through the event channel and signal bus.
pub struct Statusline<S> {
	config: Arc<StatuslineConfig>,
	layout: Layout,
	surface: S,
	editor: Arc<dyn EditorHandle>,
	probe: Arc<dyn BranchProbe>,
	events: EventReceiver,
	sender: EventSender,
	signals: SignalReceiver,
	emitter: SignalEmitter,
	cells: Cells,
}

impl<S: StatusSurface> Statusline<S> {
	pub fn new(config: Arc<StatuslineConfig>, surface: S, editor: Arc<dyn EditorHandle>, probe: Arc<dyn BranchProbe>) -> Self {
		let (emitter, signals) = signal_bus();
		let (sender, events) = event_channel(&config.channel, emitter.clone());
		Self {
			layout: Layout::from_config(&config),
			config,
			surface,
			editor,
			probe,
			events,
			sender,
			signals,
			emitter,
			cells: Cells::new(),
		}
	}

	/// Creates a status line whose branch lookups run the configured git.
	pub fn with_git_cli(config: Arc<StatuslineConfig>, surface: S, editor: Arc<dyn EditorHandle>) -> Self {
		let probe = Arc::new(GitCli::from_config(&config.git));
		Self::new(config, surface, editor, probe)
	}

	/// Producer handle for the editor's notification callback.
	pub fn event_sender(&self) -> EventSender {
		self.sender.clone()
	}

	/// Publishing handle for lint and notification producers.
	pub fn emitter(&self) -> SignalEmitter {
		self.emitter.clone()
	}

	/// Routes the editor's `statusline` notifications into the event channel.
	///
	/// When the status line is disabled the bar is hidden and nothing is
	/// registered.
	pub fn subscribe(&mut self) -> Result<()> {
		if !self.config.visible {
			self.surface.set_visible(Element::Bar, false);
			return Ok(());
		}

		let sender = self.sender.clone();
		self.editor.register_handler(
			STATUSLINE_CHANNEL,
			Box::new(move |batch: EventBatch| {
				if let Err(error) = sender.push(batch) {
					tracing::debug!(?error, "Status line event after shutdown");
				}
			}),
		);
		self.editor
			.subscribe(STATUSLINE_CHANNEL)
			.map_err(|source| StatusError::Subscribe {
				channel: STATUSLINE_CHANNEL.to_string(),
				source,
			})?;
		tracing::debug!(channel = STATUSLINE_CHANNEL, "Subscribed to editor notifications");
		Ok(())
	}

	/// Shows the bar and the icons that never change with editor state.
	pub fn paint_static(&mut self) -> Dirty {
		if !self.config.visible {
			return Dirty::NONE;
		}
		let neutral = self.neutral_color();
		self.surface.set_visible(Element::Bar, true);
		if self.layout.contains(Element::NotifyIcon) {
			self.surface.set_icon(Element::NotifyIcon, Icon::Bell, neutral);
			self.surface.set_visible(Element::NotifyIcon, true);
		}
		if self.layout.contains(Element::Git) {
			self.cells.git.paint_icon(neutral, &mut self.surface);
		}
		self.request_repaint(Dirty::BAR)
	}

	/// Waits for the next signal and applies it. Returns `None` once every
	/// producer is gone.
	pub async fn step(&mut self) -> Option<Dirty> {
		let msg = self.signals.recv().await?;
		Some(self.dispatch(msg))
	}

	/// Applies signals until `cancel` fires.
	pub async fn run(&mut self, cancel: CancellationToken) {
		loop {
			tokio::select! {
				biased;
				_ = cancel.cancelled() => break,
				dirty = self.step() => {
					if dirty.is_none() {
						break;
					}
				}
			}
		}
		tracing::debug!("Status line loop stopped");
	}

	/// Applies every signal that is ready without waiting.
	pub fn pump(&mut self) -> Dirty {
		let mut dirty = Dirty::NONE;
		while let Some(msg) = self.signals.try_recv() {
			dirty |= self.dispatch(msg);
		}
		dirty
	}

	/// Applies one message and requests a repaint if it changed anything.
	pub fn dispatch(&mut self, msg: StatusMsg) -> Dirty {
		let topic = msg.topic();
		let dirty = msg.apply(self);
		tracing::trace!(topic = topic.as_str(), ?dirty, "Applied status message");
		self.request_repaint(dirty)
	}

	/// Redraws the mode indicator. Called from the grid's mode-change handler.
	pub fn redraw_mode(&mut self, name: &str) -> Dirty {
		let dirty = self.cells.mode.redraw(
			Mode::from_name(name),
			self.config.mode_indicator,
			&self.config.colors,
			&mut self.surface,
		);
		self.request_repaint(dirty)
	}

	/// Redraws the cursor position. Called from the grid's cursor handler.
	pub fn redraw_cursor(&mut self, line: u64, col: u64) -> Dirty {
		let dirty = self.cells.position.redraw(Position { line, col }, &mut self.surface);
		self.request_repaint(dirty)
	}

	pub(crate) fn process_queued_batch(&mut self) -> Dirty {
		match self.events.take_announced() {
			Some(batch) => self.handle_batch(&batch),
			None => Dirty::NONE,
		}
	}

	fn handle_batch(&mut self, batch: &[crate::Value]) -> Dirty {
		match StatusEvent::decode(batch) {
			Ok(StatusEvent::BufEnter(event)) => self.on_bufenter(event),
			Err(error) => {
				tracing::warn!(%error, "Dropping status line event");
				Dirty::NONE
			}
		}
	}

	/// Local cells first; the branch lookup is launched last.
	fn on_bufenter(&mut self, event: BufEnter) -> Dirty {
		let path = self.editor.current_path();
		let parts = split_path(&path);
		let cells = &mut self.cells;
		let surface = &mut self.surface;

		let mut dirty = cells.readonly.redraw(event.readonly, surface);
		dirty |= cells.filename.redraw(parts.name, surface);
		dirty |= cells.filepath.redraw(parts.dir, surface);
		dirty |= cells.filetype.redraw(event.filetype, surface);
		dirty |= cells.encoding.redraw(event.encoding, surface);
		dirty |= cells.fileformat.redraw(event.fileformat, surface);
		dirty | self.track_git(&path)
	}

	fn track_git(&mut self, path: &str) -> Dirty {
		if !self.config.shows(FieldToken::Git) {
			return Dirty::NONE;
		}
		match self.cells.git.track(path, &mut self.surface) {
			Track::Unchanged => Dirty::NONE,
			Track::Hidden(dirty) => dirty,
			Track::Lookup(lookup) => {
				tracing::trace!(path = %lookup.path, token = lookup.token, "Launching git lookup");
				drop(spawn_lookup(Arc::clone(&self.probe), lookup, self.emitter.clone()));
				Dirty::NONE
			}
		}
	}

	pub(crate) fn resolve_git(&mut self, path: &str, token: u64, branch: Option<String>) -> Dirty {
		self.cells.git.resolve(path, token, branch, &mut self.surface)
	}

	pub(crate) fn redraw_lint(&mut self, counts: LintCounts) -> Dirty {
		let neutral = self.neutral_color();
		self.cells.lint.redraw(counts, neutral, &mut self.surface)
	}

	pub(crate) fn redraw_notify(&mut self, count: usize) -> Dirty {
		self.cells.notify.redraw(count, &mut self.surface)
	}

	/// Icon color for zero counts and static icons.
	fn neutral_color(&self) -> Option<Color> {
		match self.config.mode_indicator {
			ModeIndicator::Background => Some(Color::WHITE),
			ModeIndicator::None | ModeIndicator::TextLabel | ModeIndicator::Icon => None,
		}
	}

	fn request_repaint(&mut self, dirty: Dirty) -> Dirty {
		if dirty.needs_redraw() {
			self.surface.request_repaint(dirty);
		}
		dirty
	}

	pub fn config(&self) -> &StatuslineConfig {
		&self.config
	}

	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	/// Branch currently shown, if any.
	pub fn git_branch(&self) -> Option<&str> {
		self.cells.git.branch()
	}

	/// Returns true while a branch lookup for the current buffer is in flight.
	pub fn git_pending(&self) -> bool {
		self.cells.git.is_pending()
	}

	pub fn lint_counts(&self) -> Option<LintCounts> {
		self.cells.lint.counts()
	}

	pub fn filetype(&self) -> Option<&str> {
		self.cells.filetype.last().map(String::as_str)
	}
}
