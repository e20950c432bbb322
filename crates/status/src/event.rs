//! Decoding of raw notification batches into status events.

use thiserror::Error;

use crate::Value;

/// A raw notification: the event kind followed by its positional payload.
pub type EventBatch = Vec<Value>;

/// Event kind sent when the editor enters a buffer.
pub const BUFENTER: &str = "bufenter";

/// A decoded status line event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
	BufEnter(BufEnter),
}

/// Payload of [`BUFENTER`]: `(filetype, encoding, fileformat, readonly)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufEnter {
	pub filetype: String,
	pub encoding: String,
	pub fileformat: String,
	pub readonly: bool,
}

/// Why a batch was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
	#[error("empty event batch")]
	Empty,
	#[error("event kind must be a string, got {0}")]
	KindNotString(&'static str),
	#[error("unhandled statusline event '{0}'")]
	UnknownKind(String),
	#[error("'{kind}' expects {expected} arguments, got {got}")]
	Arity { kind: &'static str, expected: usize, got: usize },
	#[error("'{kind}' argument {index} must be {expected}, got {got}")]
	Argument {
		kind: &'static str,
		index: usize,
		expected: &'static str,
		got: &'static str,
	},
}

impl StatusEvent {
	/// Decodes one batch. Extra trailing arguments are ignored.
	pub fn decode(batch: &[Value]) -> Result<Self, EventError> {
		let (kind, args) = batch.split_first().ok_or(EventError::Empty)?;
		let kind = kind.as_str().ok_or(EventError::KindNotString(kind.type_name()))?;
		match kind {
			BUFENTER => decode_bufenter(args).map(Self::BufEnter),
			other => Err(EventError::UnknownKind(other.to_string())),
		}
	}
}

fn decode_bufenter(args: &[Value]) -> Result<BufEnter, EventError> {
	if args.len() < 4 {
		return Err(EventError::Arity {
			kind: BUFENTER,
			expected: 4,
			got: args.len(),
		});
	}
	let string = |index: usize| {
		args[index].as_str().map(str::to_string).ok_or(EventError::Argument {
			kind: BUFENTER,
			index,
			expected: "string",
			got: args[index].type_name(),
		})
	};
	let readonly = args[3].as_flag().ok_or(EventError::Argument {
		kind: BUFENTER,
		index: 3,
		expected: "integer",
		got: args[3].type_name(),
	})?;

	Ok(BufEnter {
		filetype: string(0)?,
		encoding: string(1)?,
		fileformat: string(2)?,
		readonly,
	})
}
