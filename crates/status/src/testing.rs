//! Test doubles for the surface, editor and branch probe seams.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lantern_config::Color;
use parking_lot::Mutex;

use crate::error::BoxError;
use crate::event::EventBatch;
use crate::git::{BranchProbe, GitError};
use crate::surface::{Element, Icon, StatusSurface};
use crate::{Dirty, EditorHandle, NotificationHandler};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
	Text(Element, String),
	Icon(Element, Icon, Option<Color>),
	Visible(Element, bool),
	Accent(Element, Color),
	Background(Option<Color>),
	Repaint(Dirty),
}

/// Surface that records every call in order.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
	calls: Vec<Call>,
}

impl RecordingSurface {
	pub(crate) fn calls(&self) -> &[Call] {
		&self.calls
	}

	pub(crate) fn texts(&self, element: Element) -> Vec<String> {
		self.calls
			.iter()
			.filter_map(|call| match call {
				Call::Text(e, text) if *e == element => Some(text.clone()),
				_ => None,
			})
			.collect()
	}

	/// Last visibility set for `element`, if any.
	pub(crate) fn visibility(&self, element: Element) -> Option<bool> {
		self.calls.iter().rev().find_map(|call| match call {
			Call::Visible(e, visible) if *e == element => Some(*visible),
			_ => None,
		})
	}

	pub(crate) fn backgrounds(&self) -> Vec<Option<Color>> {
		self.calls
			.iter()
			.filter_map(|call| match call {
				Call::Background(color) => Some(*color),
				_ => None,
			})
			.collect()
	}

	pub(crate) fn repaints(&self) -> Vec<Dirty> {
		self.calls
			.iter()
			.filter_map(|call| match call {
				Call::Repaint(dirty) => Some(*dirty),
				_ => None,
			})
			.collect()
	}

	/// Calls other than repaint requests.
	pub(crate) fn mutations(&self) -> usize {
		self.calls.iter().filter(|call| !matches!(call, Call::Repaint(_))).count()
	}
}

impl StatusSurface for RecordingSurface {
	fn set_text(&mut self, element: Element, text: &str) {
		self.calls.push(Call::Text(element, text.to_string()));
	}

	fn set_icon(&mut self, element: Element, icon: Icon, color: Option<Color>) {
		self.calls.push(Call::Icon(element, icon, color));
	}

	fn set_visible(&mut self, element: Element, visible: bool) {
		self.calls.push(Call::Visible(element, visible));
	}

	fn set_accent(&mut self, element: Element, color: Color) {
		self.calls.push(Call::Accent(element, color));
	}

	fn set_background(&mut self, color: Option<Color>) {
		self.calls.push(Call::Background(color));
	}

	fn request_repaint(&mut self, dirty: Dirty) {
		self.calls.push(Call::Repaint(dirty));
	}
}

/// Editor stand-in with a settable current path.
#[derive(Default)]
pub(crate) struct FakeEditor {
	path: Mutex<String>,
	handlers: Mutex<HashMap<String, NotificationHandler>>,
	subscribed: Mutex<Vec<String>>,
	refuse: bool,
}

impl FakeEditor {
	/// An editor that rejects every subscription.
	pub(crate) fn refusing() -> Self {
		Self {
			refuse: true,
			..Self::default()
		}
	}

	pub(crate) fn set_path(&self, path: &str) {
		*self.path.lock() = path.to_string();
	}

	/// Delivers `batch` on `channel` like the RPC client would.
	pub(crate) fn notify(&self, channel: &str, batch: EventBatch) -> bool {
		match self.handlers.lock().get(channel) {
			Some(handler) => {
				handler(batch);
				true
			}
			None => false,
		}
	}

	pub(crate) fn subscribed(&self) -> Vec<String> {
		self.subscribed.lock().clone()
	}
}

impl EditorHandle for FakeEditor {
	fn current_path(&self) -> String {
		self.path.lock().clone()
	}

	fn register_handler(&self, channel: &str, handler: NotificationHandler) {
		self.handlers.lock().insert(channel.to_string(), handler);
	}

	fn subscribe(&self, channel: &str) -> Result<(), BoxError> {
		if self.refuse {
			return Err(format!("no such channel: {channel}").into());
		}
		self.subscribed.lock().push(channel.to_string());
		Ok(())
	}
}

/// Probe answering from a fixed table, with optional per-directory delays.
#[derive(Debug, Default)]
pub(crate) struct ScriptedProbe {
	branches: HashMap<PathBuf, String>,
	delays: HashMap<PathBuf, Duration>,
	calls: AtomicUsize,
}

impl ScriptedProbe {
	pub(crate) fn with(mut self, dir: &str, branch: &str) -> Self {
		self.branches.insert(PathBuf::from(dir), branch.to_string());
		self
	}

	pub(crate) fn delayed(mut self, dir: &str, delay: Duration) -> Self {
		self.delays.insert(PathBuf::from(dir), delay);
		self
	}

	pub(crate) fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl BranchProbe for ScriptedProbe {
	async fn probe(&self, dir: &Path) -> Result<String, GitError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(delay) = self.delays.get(dir) {
			tokio::time::sleep(*delay).await;
		}
		self.branches.get(dir).cloned().ok_or(GitError::NoBranch)
	}
}
