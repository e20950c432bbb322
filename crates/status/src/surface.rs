//! Contract between the engine and the presentation layer.

use lantern_config::Color;

use crate::Dirty;

/// A visual element of the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
	/// The bar itself.
	Bar,
	ModeLabel,
	ModeIcon,
	Filepath,
	FileName,
	/// Lock icon next to the file name.
	ReadOnly,
	/// Branch icon and label.
	Git,
	Filetype,
	Encoding,
	FileFormat,
	Position,
	NotifyIcon,
	NotifyCount,
	/// Error icon and count.
	LintErrors,
	/// Warning icon and count.
	LintWarnings,
}

impl Element {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Bar => "bar",
			Self::ModeLabel => "mode_label",
			Self::ModeIcon => "mode_icon",
			Self::Filepath => "filepath",
			Self::FileName => "filename",
			Self::ReadOnly => "readonly",
			Self::Git => "git",
			Self::Filetype => "filetype",
			Self::Encoding => "encoding",
			Self::FileFormat => "fileformat",
			Self::Position => "position",
			Self::NotifyIcon => "notify_icon",
			Self::NotifyCount => "notify_count",
			Self::LintErrors => "lint_errors",
			Self::LintWarnings => "lint_warnings",
		}
	}
}

/// Icons the engine asks the presentation layer to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
	Git,
	Bell,
	Lock,
	Thought,
	Command,
	Edit,
	Select,
	Replace,
	Terminal,
	Bad,
	Exclamation,
}

impl Icon {
	/// Asset name of the icon.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Git => "git",
			Self::Bell => "bell",
			Self::Lock => "lock",
			Self::Thought => "thought",
			Self::Command => "command",
			Self::Edit => "edit",
			Self::Select => "select",
			Self::Replace => "replace",
			Self::Terminal => "terminal",
			Self::Bad => "bad",
			Self::Exclamation => "exclamation",
		}
	}
}

/// Widget operations implemented by the presentation layer.
///
/// Every element starts hidden. Calls only ever come from the UI context that
/// owns the [`crate::Statusline`].
pub trait StatusSurface {
	fn set_text(&mut self, element: Element, text: &str);

	/// `color` of `None` means the theme foreground.
	fn set_icon(&mut self, element: Element, icon: Icon, color: Option<Color>);

	fn set_visible(&mut self, element: Element, visible: bool);

	/// Colors a label's background (mode label in `textLabel` style).
	fn set_accent(&mut self, element: Element, color: Color);

	/// Tints the whole bar, or restores the theme background with `None`.
	fn set_background(&mut self, color: Option<Color>);

	/// Called once per applied message that changed something.
	fn request_repaint(&mut self, dirty: Dirty) {
		let _ = dirty;
	}
}
