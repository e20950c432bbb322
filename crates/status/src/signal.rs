//! Signal bus: fan-in of producer notifications to the status line.
//!
//! Producers on any thread hold a cloned [`SignalEmitter`]; the single
//! [`SignalReceiver`] is owned by the [`Statusline`] on the UI context, which
//! applies every message through [`StatusMsg::apply`].
//!
//! ```text
//! EventSender::push ─► UpdateAvailable ─┐
//! git lookup task ───► GitMsg ──────────┤
//! lint producer ─────► LintMsg ─────────┼──► SignalReceiver ──► StatusMsg::apply
//! notification log ──► NotifyMsg ───────┘
//! ```

use tokio::sync::mpsc;

use crate::cell::LintCounts;
use crate::surface::StatusSurface;
use crate::{Dirty, Statusline};

/// Topic a message was published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
	/// An event batch is queued on the event channel.
	StatusUpdate,
	Lint,
	Git,
	Notify,
}

impl Topic {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::StatusUpdate => "status_update",
			Self::Lint => "lint",
			Self::Git => "git",
			Self::Notify => "notify",
		}
	}
}

/// Version-control lookup results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitMsg {
	/// A branch lookup finished. `branch` is `None` when it was unavailable.
	Resolved {
		path: String,
		token: u64,
		branch: Option<String>,
	},
}

impl GitMsg {
	pub fn apply<S: StatusSurface>(self, statusline: &mut Statusline<S>) -> Dirty {
		match self {
			Self::Resolved { path, token, branch } => statusline.resolve_git(&path, token, branch),
		}
	}
}

/// Diagnostics updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintMsg {
	Counts(LintCounts),
}

impl LintMsg {
	pub fn apply<S: StatusSurface>(self, statusline: &mut Statusline<S>) -> Dirty {
		match self {
			Self::Counts(counts) => statusline.redraw_lint(counts),
		}
	}
}

/// Notification log updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyMsg {
	/// Number of unread notifications.
	Count(usize),
}

impl NotifyMsg {
	pub fn apply<S: StatusSurface>(self, statusline: &mut Statusline<S>) -> Dirty {
		match self {
			Self::Count(count) => statusline.redraw_notify(count),
		}
	}
}

/// Top-level message applied to the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMsg {
	/// Event batches are queued; the handler takes exactly one and
	/// re-announces if more remain.
	UpdateAvailable,
	Git(GitMsg),
	Lint(LintMsg),
	Notify(NotifyMsg),
}

impl StatusMsg {
	pub const fn topic(&self) -> Topic {
		match self {
			Self::UpdateAvailable => Topic::StatusUpdate,
			Self::Git(_) => Topic::Git,
			Self::Lint(_) => Topic::Lint,
			Self::Notify(_) => Topic::Notify,
		}
	}

	/// Applies this message to the status line, returning dirty flags.
	pub fn apply<S: StatusSurface>(self, statusline: &mut Statusline<S>) -> Dirty {
		match self {
			Self::UpdateAvailable => statusline.process_queued_batch(),
			Self::Git(msg) => msg.apply(statusline),
			Self::Lint(msg) => msg.apply(statusline),
			Self::Notify(msg) => msg.apply(statusline),
		}
	}
}

impl From<GitMsg> for StatusMsg {
	fn from(msg: GitMsg) -> Self {
		Self::Git(msg)
	}
}

impl From<LintMsg> for StatusMsg {
	fn from(msg: LintMsg) -> Self {
		Self::Lint(msg)
	}
}

impl From<NotifyMsg> for StatusMsg {
	fn from(msg: NotifyMsg) -> Self {
		Self::Notify(msg)
	}
}

/// Cloneable, non-blocking publishing end of the bus.
#[derive(Debug, Clone)]
pub struct SignalEmitter {
	tx: mpsc::UnboundedSender<StatusMsg>,
}

impl SignalEmitter {
	/// Publishes `msg`. Returns false if the status line is gone.
	pub fn emit(&self, msg: impl Into<StatusMsg>) -> bool {
		let msg = msg.into();
		let topic = msg.topic();
		let sent = self.tx.send(msg).is_ok();
		if !sent {
			tracing::trace!(topic = topic.as_str(), "Signal dropped, status line closed");
		}
		sent
	}
}

/// Receiving end of the bus; owned by the status line.
#[derive(Debug)]
pub struct SignalReceiver {
	rx: mpsc::UnboundedReceiver<StatusMsg>,
}

impl SignalReceiver {
	/// Waits for the next message. `None` once every emitter is gone.
	pub async fn recv(&mut self) -> Option<StatusMsg> {
		self.rx.recv().await
	}

	/// Takes a message if one is ready.
	pub fn try_recv(&mut self) -> Option<StatusMsg> {
		self.rx.try_recv().ok()
	}
}

/// Creates a new bus.
pub fn signal_bus() -> (SignalEmitter, SignalReceiver) {
	let (tx, rx) = mpsc::unbounded_channel();
	(SignalEmitter { tx }, SignalReceiver { rx })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_arrive_in_emit_order() {
		let (emitter, mut rx) = signal_bus();
		let other = emitter.clone();
		let thread = std::thread::spawn(move || other.emit(NotifyMsg::Count(1)));
		assert!(thread.join().unwrap());
		assert!(emitter.emit(LintMsg::Counts(LintCounts { errors: 1, warnings: 0 })));

		assert_eq!(rx.try_recv().map(|m| m.topic()), Some(Topic::Notify));
		assert_eq!(rx.try_recv().map(|m| m.topic()), Some(Topic::Lint));
		assert_eq!(rx.try_recv(), None);
	}

	#[test]
	fn emit_fails_after_receiver_drop() {
		let (emitter, rx) = signal_bus();
		drop(rx);
		assert!(!emitter.emit(StatusMsg::UpdateAvailable));
	}
}
