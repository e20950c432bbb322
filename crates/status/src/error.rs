use thiserror::Error;

/// Boxed error returned by an [`crate::EditorHandle`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced to the host. Everything else degrades a single field.
#[derive(Debug, Error)]
pub enum StatusError {
	/// The editor refused the notification subscription.
	#[error("failed to subscribe to editor channel '{channel}': {source}")]
	Subscribe {
		channel: String,
		#[source]
		source: BoxError,
	},
}

pub type Result<T> = std::result::Result<T, StatusError>;
