//! Seam to the embedded editor process.

use crate::error::BoxError;
use crate::event::EventBatch;

/// Callback invoked by the RPC client for every notification on a channel.
///
/// It runs on the client's own thread, never on the UI context.
pub type NotificationHandler = Box<dyn Fn(EventBatch) + Send + Sync>;

/// Editor operations the status line needs.
pub trait EditorHandle: Send + Sync {
	/// Full path of the current buffer; empty for an unnamed buffer.
	fn current_path(&self) -> String;

	/// Routes notifications sent on `channel` to `handler`.
	fn register_handler(&self, channel: &str, handler: NotificationHandler);

	/// Asks the editor to start sending notifications on `channel`.
	fn subscribe(&self, channel: &str) -> Result<(), BoxError>;
}
