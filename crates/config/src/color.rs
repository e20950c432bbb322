use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::ConfigError;

/// An opaque RGB color read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const WHITE: Self = Self::rgb(255, 255, 255);
	/// Accent for modes without a configured color.
	pub const DEFAULT_ACCENT: Self = Self::rgb(102, 153, 204);
	/// Diagnostic icon color when errors are present.
	pub const LINT_ERROR: Self = Self::rgb(204, 62, 68);
	/// Diagnostic icon color when warnings are present.
	pub const LINT_WARNING: Self = Self::rgb(203, 203, 65);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}
}

impl FromStr for Color {
	type Err = ConfigError;

	/// Parses `#rrggbb` or `rrggbb`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let hex = s.trim().trim_start_matches('#');
		if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(ConfigError::InvalidColor(s.to_string()));
		}
		let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| ConfigError::InvalidColor(s.to_string()));
		Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
	}
}

impl TryFrom<String> for Color {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}
