//! Layout tokens and the mode indicator style.

/// One of the two aligned regions of the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
	Left,
	Right,
}

impl Side {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Left => "left",
			Self::Right => "right",
		}
	}
}

/// A status field that can be placed in a layout list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldToken {
	Mode,
	Filepath,
	Filename,
	Message,
	Git,
	Filetype,
	Fileformat,
	Fileencoding,
	Curpos,
	Lint,
}

impl FieldToken {
	pub const ALL: [Self; 10] = [
		Self::Mode,
		Self::Filepath,
		Self::Filename,
		Self::Message,
		Self::Git,
		Self::Filetype,
		Self::Fileformat,
		Self::Fileencoding,
		Self::Curpos,
		Self::Lint,
	];

	/// Parses a layout token as written in configuration.
	pub fn parse(token: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|field| field.as_str() == token)
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Mode => "mode",
			Self::Filepath => "filepath",
			Self::Filename => "filename",
			Self::Message => "message",
			Self::Git => "git",
			Self::Filetype => "filetype",
			Self::Fileformat => "fileformat",
			Self::Fileencoding => "fileencoding",
			Self::Curpos => "curpos",
			Self::Lint => "lint",
		}
	}
}

/// How the current editor mode is indicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeIndicator {
	/// No mode indicator at all.
	None,
	/// A colored text label such as "Insert".
	#[default]
	TextLabel,
	/// An icon per mode.
	Icon,
	/// The whole bar takes the mode color.
	Background,
}

impl ModeIndicator {
	pub fn parse(style: &str) -> Option<Self> {
		match style {
			"none" => Some(Self::None),
			"textLabel" => Some(Self::TextLabel),
			"icon" => Some(Self::Icon),
			"background" => Some(Self::Background),
			_ => None,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::TextLabel => "textLabel",
			Self::Icon => "icon",
			Self::Background => "background",
		}
	}
}
