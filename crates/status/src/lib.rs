//! Status line synchronization engine.
//!
//! The editor process reports buffer changes through an RPC notification
//! callback running on its own thread. That callback pushes raw batches into
//! the [`channel`], which keeps a single pending announcement on the
//! [`signal`] bus while batches are queued. The [`Statusline`] is the only consumer of the bus: it runs on the UI
//! context, decodes each batch into a [`StatusEvent`], and redraws the field
//! [`cell`]s, which diff against their last value and touch the
//! [`StatusSurface`] only when something changed.
//!
//! ```text
//! RPC callback ──► EventSender ──┐
//! git task ──────► GitMsg ───────┤
//! lint producer ─► LintMsg ──────┼──► SignalEmitter ──► Statusline::step ──► cells ──► surface
//! notifications ─► NotifyMsg ────┘
//! ```
//!
//! Branch lookups leave the UI context: [`git`] runs the subprocesses on a
//! worker task and publishes a pure result; the [`cell::GitCell`] discards it
//! unless it still matches the tracked path.

pub mod cell;
pub mod channel;
mod dirty;
pub mod editor;
mod error;
pub mod event;
pub mod git;
pub mod layout;
pub mod signal;
mod statusline;
pub mod surface;
#[cfg(test)]
pub(crate) mod testing;
pub mod value;

pub use dirty::Dirty;
pub use editor::{EditorHandle, NotificationHandler};
pub use error::{BoxError, Result, StatusError};
pub use event::{BufEnter, EventBatch, EventError, StatusEvent};
pub use lantern_config::{Color, StatuslineConfig};
pub use statusline::{STATUSLINE_CHANNEL, Statusline};
pub use surface::{Element, Icon, StatusSurface};
pub use value::Value;
