use lantern_config::{Color, ModeColors, ModeIndicator};

use crate::surface::{Element, Icon, StatusSurface};
use crate::Dirty;

/// Editor mode as named by the grid's mode-change event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
	Normal,
	/// Normal mode entered from the command line window.
	CmdlineNormal,
	Insert,
	Visual,
	Replace,
	/// Terminal input mode.
	Terminal,
	/// Any other mode, shown verbatim.
	Other(String),
}

impl Mode {
	pub fn from_name(name: &str) -> Self {
		match name {
			"normal" => Self::Normal,
			"cmdline_normal" => Self::CmdlineNormal,
			"insert" => Self::Insert,
			"visual" => Self::Visual,
			"replace" => Self::Replace,
			"terminal-input" => Self::Terminal,
			other => Self::Other(other.to_string()),
		}
	}

	pub fn label(&self) -> &str {
		match self {
			Self::Normal | Self::CmdlineNormal => "Normal",
			Self::Insert => "Insert",
			Self::Visual => "Visual",
			Self::Replace => "Replace",
			Self::Terminal => "Terminal",
			Self::Other(name) => name,
		}
	}

	pub const fn icon(&self) -> Icon {
		match self {
			Self::Normal | Self::Other(_) => Icon::Thought,
			Self::CmdlineNormal => Icon::Command,
			Self::Insert => Icon::Edit,
			Self::Visual => Icon::Select,
			Self::Replace => Icon::Replace,
			Self::Terminal => Icon::Terminal,
		}
	}

	pub const fn accent(&self, colors: &ModeColors) -> Color {
		match self {
			Self::Normal => colors.normal,
			Self::CmdlineNormal => colors.command,
			Self::Insert => colors.insert,
			Self::Visual => colors.visual,
			Self::Replace => colors.replace,
			Self::Terminal => colors.terminal,
			Self::Other(_) => Color::DEFAULT_ACCENT,
		}
	}
}

/// Mode indicator state.
#[derive(Debug, Default)]
pub struct ModeCell {
	last: Option<Mode>,
}

impl ModeCell {
	pub const fn new() -> Self {
		Self { last: None }
	}

	/// Shows `mode` in the configured indicator style.
	pub fn redraw(&mut self, mode: Mode, style: ModeIndicator, colors: &ModeColors, surface: &mut dyn StatusSurface) -> Dirty {
		if self.last.as_ref() == Some(&mode) {
			return Dirty::NONE;
		}
		let first = self.last.is_none();
		let accent = mode.accent(colors);

		if first {
			surface.set_visible(Element::ModeLabel, style == ModeIndicator::TextLabel);
			surface.set_visible(Element::ModeIcon, style == ModeIndicator::Icon);
		}
		match style {
			ModeIndicator::None => {}
			ModeIndicator::TextLabel => {
				surface.set_text(Element::ModeLabel, mode.label());
				surface.set_accent(Element::ModeLabel, accent);
			}
			ModeIndicator::Icon => surface.set_icon(Element::ModeIcon, mode.icon(), Some(accent)),
			ModeIndicator::Background => surface.set_background(Some(accent)),
		}

		self.last = Some(mode);
		Dirty::MODE
	}

	pub fn last(&self) -> Option<&Mode> {
		self.last.as_ref()
	}
}
