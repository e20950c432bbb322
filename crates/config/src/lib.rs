//! Configuration for the lantern status line.
//!
//! Configuration is read once into an immutable [`StatuslineConfig`] snapshot
//! that the status line keeps for its whole lifetime. It is written in TOML:
//!
//! ```toml
//! visible = true
//! left = ["mode", "filepath", "filename"]
//! right = ["message", "git", "filetype", "fileformat", "fileencoding", "curpos", "lint"]
//! mode_indicator = "textLabel"   # none | textLabel | icon | background
//!
//! [colors]
//! normal = "#3cabeb"
//! insert = "#2abcb4"
//!
//! [channel]
//! capacity = 1000
//! overflow = "block"             # block | drop-oldest | drop-newest
//!
//! [git]
//! program = "git"
//! timeout_ms = 3000
//! ```
//!
//! Every key is optional. Unknown layout tokens and indicator styles do not
//! fail parsing; they are collected in [`StatuslineConfig::warnings`].

mod color;
pub mod error;
pub mod fields;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use color::Color;
pub use error::{ConfigError, ConfigWarning, Result};
pub use fields::{FieldToken, ModeIndicator, Side};
use serde::Deserialize;

/// File name looked up inside the platform config directory.
pub const CONFIG_FILE: &str = "statusline.toml";

/// Immutable status line configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatuslineConfig {
	/// Whether the status bar is drawn at all.
	pub visible: bool,
	/// Fields of the left-aligned region, in order.
	pub left: Vec<FieldToken>,
	/// Fields of the right-aligned region, in order.
	pub right: Vec<FieldToken>,
	pub mode_indicator: ModeIndicator,
	pub colors: ModeColors,
	pub channel: ChannelConfig,
	pub git: GitConfig,
	/// Non-fatal problems found while parsing.
	pub warnings: Vec<ConfigWarning>,
}

/// Accent color per editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModeColors {
	pub normal: Color,
	pub command: Color,
	pub insert: Color,
	pub visual: Color,
	pub replace: Color,
	pub terminal: Color,
}

impl Default for ModeColors {
	fn default() -> Self {
		Self {
			normal: Color::rgb(0x3c, 0xab, 0xeb),
			command: Color::rgb(0x52, 0x85, 0xb8),
			insert: Color::rgb(0x2a, 0xbc, 0xb4),
			visual: Color::rgb(0x99, 0x32, 0xcc),
			replace: Color::rgb(0xff, 0x8c, 0x0a),
			terminal: Color::rgb(0x71, 0x9e, 0x07),
		}
	}
}

/// Behavior of the inbound event channel when it is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
	/// The editor callback waits for the status line to catch up.
	#[default]
	Block,
	/// The oldest queued batch is discarded.
	DropOldest,
	/// The incoming batch is discarded.
	DropNewest,
}

/// Event channel sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
	pub capacity: usize,
	pub overflow: Overflow,
}

impl Default for ChannelConfig {
	fn default() -> Self {
		Self {
			capacity: 1000,
			overflow: Overflow::Block,
		}
	}
}

/// Version-control lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GitConfig {
	/// Executable used for branch queries.
	pub program: String,
	/// Upper bound for each subprocess invocation.
	pub timeout_ms: u64,
}

impl GitConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}
}

impl Default for GitConfig {
	fn default() -> Self {
		Self {
			program: "git".to_string(),
			timeout_ms: 3000,
		}
	}
}

/// On-disk shape; tokens stay strings so unknown ones become warnings.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
	visible: bool,
	left: Vec<String>,
	right: Vec<String>,
	mode_indicator: String,
	colors: ModeColors,
	channel: ChannelConfig,
	git: GitConfig,
}

impl Default for RawConfig {
	fn default() -> Self {
		let defaults = StatuslineConfig::default();
		Self {
			visible: defaults.visible,
			left: defaults.left.iter().map(|f| f.as_str().to_string()).collect(),
			right: defaults.right.iter().map(|f| f.as_str().to_string()).collect(),
			mode_indicator: defaults.mode_indicator.as_str().to_string(),
			colors: defaults.colors,
			channel: defaults.channel,
			git: defaults.git,
		}
	}
}

impl Default for StatuslineConfig {
	fn default() -> Self {
		Self {
			visible: true,
			left: vec![FieldToken::Mode, FieldToken::Filepath, FieldToken::Filename],
			right: vec![
				FieldToken::Message,
				FieldToken::Git,
				FieldToken::Filetype,
				FieldToken::Fileformat,
				FieldToken::Fileencoding,
				FieldToken::Curpos,
				FieldToken::Lint,
			],
			mode_indicator: ModeIndicator::TextLabel,
			colors: ModeColors::default(),
			channel: ChannelConfig::default(),
			git: GitConfig::default(),
			warnings: Vec::new(),
		}
	}
}

impl StatuslineConfig {
	/// Parses a TOML string into a configuration snapshot.
	pub fn parse(input: &str) -> Result<Self> {
		let raw: RawConfig = toml::from_str(input)?;
		if raw.channel.capacity == 0 {
			return Err(ConfigError::ZeroCapacity);
		}
		if raw.git.timeout_ms == 0 {
			return Err(ConfigError::ZeroTimeout);
		}

		let mut warnings = Vec::new();
		let left = resolve_fields(Side::Left, &raw.left, &mut warnings);
		let right = resolve_fields(Side::Right, &raw.right, &mut warnings);
		let mode_indicator = ModeIndicator::parse(&raw.mode_indicator).unwrap_or_else(|| {
			warnings.push(ConfigWarning::UnknownModeIndicator(raw.mode_indicator.clone()));
			ModeIndicator::None
		});

		Ok(Self {
			visible: raw.visible,
			left,
			right,
			mode_indicator,
			colors: raw.colors,
			channel: raw.channel,
			git: raw.git,
			warnings,
		})
	}

	/// Reads and parses a configuration file.
	pub fn load(path: &Path) -> Result<Self> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&input)
	}

	/// Loads `path`, or the default location when `None`. A missing file at
	/// the default location yields the built-in defaults; an explicitly named
	/// file must exist.
	pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
		if let Some(path) = path {
			return Self::load(path);
		}
		match default_path() {
			Some(path) if path.is_file() => Self::load(&path),
			_ => Ok(Self::default()),
		}
	}

	/// Returns true if `field` is placed in either region.
	pub fn shows(&self, field: FieldToken) -> bool {
		self.left.contains(&field) || self.right.contains(&field)
	}
}

/// Returns `<config dir>/lantern/statusline.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("lantern").join(CONFIG_FILE))
}

fn resolve_fields(side: Side, tokens: &[String], warnings: &mut Vec<ConfigWarning>) -> Vec<FieldToken> {
	tokens
		.iter()
		.filter_map(|token| {
			let field = FieldToken::parse(token);
			if field.is_none() {
				warnings.push(ConfigWarning::UnknownField { side, token: token.clone() });
			}
			field
		})
		.collect()
}

#[cfg(test)]
mod tests;
