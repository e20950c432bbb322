//! Field state cells.
//!
//! A cell remembers the last value it rendered and touches the surface only
//! when a new value differs. Most dimensions share [`FieldCell`] and differ
//! only in their static [`FieldPolicy`]; mode, diagnostics and the branch
//! indicator carry extra state and have their own cells.

mod git;
mod lint;
mod mode;
pub mod policy;

pub use git::{GitCell, GitLookup, Track, is_virtual_path};
pub use lint::{LintCell, LintCounts};
pub use mode::{Mode, ModeCell};
pub use policy::{PathParts, Position, split_path};

use crate::surface::{Element, Icon, StatusSurface};
use crate::Dirty;

/// What a cell shows for a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
	Text(String),
	Icon(Icon),
}

/// Per-dimension behavior of a [`FieldCell`].
pub struct FieldPolicy<T> {
	pub element: Element,
	/// Flag reported when the cell changes.
	pub dirty: Dirty,
	/// Input that fails this predicate is ignored without touching the cell.
	pub accept: fn(&T) -> bool,
	/// Whether the element is shown for a value.
	pub visible: fn(&T) -> bool,
	pub render: fn(&T) -> Rendered,
}

impl<T> std::fmt::Debug for FieldPolicy<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldPolicy").field("element", &self.element).finish_non_exhaustive()
	}
}

/// Diffing cell for one status dimension.
#[derive(Debug)]
pub struct FieldCell<T: 'static> {
	policy: &'static FieldPolicy<T>,
	last: Option<T>,
	visible: bool,
}

impl<T: PartialEq + 'static> FieldCell<T> {
	pub const fn new(policy: &'static FieldPolicy<T>) -> Self {
		Self {
			policy,
			last: None,
			visible: false,
		}
	}

	/// Applies `value`, mutating the surface only if it differs from the last
	/// rendered value. Returns the policy's dirty flag when something changed.
	pub fn redraw(&mut self, value: T, surface: &mut dyn StatusSurface) -> Dirty {
		let policy = self.policy;
		if !(policy.accept)(&value) || self.last.as_ref() == Some(&value) {
			return Dirty::NONE;
		}

		let visible = (policy.visible)(&value);
		if visible != self.visible {
			self.visible = visible;
			surface.set_visible(policy.element, visible);
		}
		match (policy.render)(&value) {
			Rendered::Text(text) => surface.set_text(policy.element, &text),
			Rendered::Icon(icon) => surface.set_icon(policy.element, icon, None),
		}
		self.last = Some(value);
		policy.dirty
	}

	pub fn last(&self) -> Option<&T> {
		self.last.as_ref()
	}

	pub const fn is_visible(&self) -> bool {
		self.visible
	}
}
