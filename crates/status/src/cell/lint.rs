use lantern_config::Color;

use crate::surface::{Element, Icon, StatusSurface};
use crate::Dirty;

/// Diagnostic counts for the current buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LintCounts {
	pub errors: u32,
	pub warnings: u32,
}

/// Diagnostics indicator.
///
/// `counts` is `None` until the first report so that an initial report of
/// zero issues still paints the labels.
#[derive(Debug, Default)]
pub struct LintCell {
	counts: Option<LintCounts>,
}

impl LintCell {
	pub const fn new() -> Self {
		Self { counts: None }
	}

	/// Applies new counts. `neutral` colors icons whose count is zero.
	pub fn redraw(&mut self, counts: LintCounts, neutral: Option<Color>, surface: &mut dyn StatusSurface) -> Dirty {
		if self.counts == Some(counts) {
			return Dirty::NONE;
		}
		let first = self.counts.is_none();
		self.counts = Some(counts);

		paint(counts, neutral, surface);
		surface.set_text(Element::LintErrors, &counts.errors.to_string());
		surface.set_text(Element::LintWarnings, &counts.warnings.to_string());
		if first {
			surface.set_visible(Element::LintErrors, true);
			surface.set_visible(Element::LintWarnings, true);
		}
		Dirty::LINT
	}

	pub fn counts(&self) -> Option<LintCounts> {
		self.counts
	}
}

fn paint(counts: LintCounts, neutral: Option<Color>, surface: &mut dyn StatusSurface) {
	let error = if counts.errors > 0 { Some(Color::LINT_ERROR) } else { neutral };
	let warning = if counts.warnings > 0 { Some(Color::LINT_WARNING) } else { neutral };
	surface.set_icon(Element::LintErrors, Icon::Bad, error);
	surface.set_icon(Element::LintWarnings, Icon::Exclamation, warning);
}
