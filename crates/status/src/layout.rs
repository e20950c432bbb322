//! Placement of status elements in the left and right regions.

use lantern_config::{FieldToken, StatuslineConfig};

use crate::surface::Element;

/// Ordered elements per region, derived from the configured field tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
	pub left: Vec<Element>,
	pub right: Vec<Element>,
}

impl Layout {
	pub fn from_config(config: &StatuslineConfig) -> Self {
		Self {
			left: expand(&config.left),
			right: expand(&config.right),
		}
	}

	/// Returns true if `element` is placed in either region.
	pub fn contains(&self, element: Element) -> bool {
		self.left.contains(&element) || self.right.contains(&element)
	}
}

/// Elements making up one field token.
pub const fn elements(field: FieldToken) -> &'static [Element] {
	match field {
		FieldToken::Mode => &[Element::ModeLabel, Element::ModeIcon],
		FieldToken::Filepath => &[Element::Filepath],
		FieldToken::Filename => &[Element::FileName, Element::ReadOnly],
		FieldToken::Message => &[Element::NotifyIcon, Element::NotifyCount],
		FieldToken::Git => &[Element::Git],
		FieldToken::Filetype => &[Element::Filetype],
		FieldToken::Fileformat => &[Element::FileFormat],
		FieldToken::Fileencoding => &[Element::Encoding],
		FieldToken::Curpos => &[Element::Position],
		FieldToken::Lint => &[Element::LintErrors, Element::LintWarnings],
	}
}

fn expand(fields: &[FieldToken]) -> Vec<Element> {
	fields.iter().flat_map(|field| elements(*field).iter().copied()).collect()
}
