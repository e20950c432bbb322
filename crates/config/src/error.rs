//! Error and warning types for status line configuration.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::fields::Side;

/// Errors that make a configuration file unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A color value could not be parsed.
	#[error("invalid color format: {0} (expected #rrggbb)")]
	InvalidColor(String),

	/// The event channel must hold at least one batch.
	#[error("channel capacity must be greater than zero")]
	ZeroCapacity,

	/// Branch lookups need a non-zero subprocess timeout.
	#[error("git timeout must be greater than zero")]
	ZeroTimeout,
}

/// Non-fatal configuration problems, collected on [`crate::StatuslineConfig::warnings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A layout list named a field that does not exist; it is skipped.
	UnknownField {
		/// Which layout list contained the token.
		side: Side,
		/// The unrecognized token.
		token: String,
	},
	/// The mode indicator style was not recognized; `none` is used.
	UnknownModeIndicator(String),
}

impl fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UnknownField { side, token } => {
				write!(f, "unknown status line field '{token}' in {} list (ignored)", side.as_str())
			}
			Self::UnknownModeIndicator(style) => write!(f, "unknown mode indicator '{style}' (using 'none')"),
		}
	}
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
