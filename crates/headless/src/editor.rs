use std::collections::HashMap;

use lantern_status::event::EventBatch;
use lantern_status::{BoxError, EditorHandle, NotificationHandler};
use parking_lot::Mutex;

/// Editor stand-in fed by the input script.
#[derive(Default)]
pub struct HeadlessEditor {
	path: Mutex<String>,
	handlers: Mutex<HashMap<String, NotificationHandler>>,
}

impl HeadlessEditor {
	pub fn set_path(&self, path: String) {
		*self.path.lock() = path;
	}

	/// Delivers a notification the way the RPC client would. Returns false
	/// when nobody listens on `channel`.
	pub fn deliver(&self, channel: &str, batch: EventBatch) -> bool {
		let handlers = self.handlers.lock();
		let Some(handler) = handlers.get(channel) else {
			tracing::debug!(channel, "No handler for notification");
			return false;
		};
		handler(batch);
		true
	}
}

impl EditorHandle for HeadlessEditor {
	fn current_path(&self) -> String {
		self.path.lock().clone()
	}

	fn register_handler(&self, channel: &str, handler: NotificationHandler) {
		self.handlers.lock().insert(channel.to_string(), handler);
	}

	fn subscribe(&self, channel: &str) -> Result<(), BoxError> {
		tracing::debug!(channel, "Editor subscription");
		Ok(())
	}
}
