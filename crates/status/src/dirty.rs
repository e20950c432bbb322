bitflags::bitflags! {
	/// Status elements touched while applying one message.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Dirty: u16 {
		const MODE = 1 << 0;
		const FILEPATH = 1 << 1;
		const FILENAME = 1 << 2;
		const READONLY = 1 << 3;
		const FILETYPE = 1 << 4;
		const ENCODING = 1 << 5;
		const FILEFORMAT = 1 << 6;
		const POSITION = 1 << 7;
		const LINT = 1 << 8;
		const NOTIFY = 1 << 9;
		const GIT = 1 << 10;
		const BAR = 1 << 11;
	}
}

impl Dirty {
	pub const NONE: Self = Self::empty();

	/// Returns true when the surface must be repainted.
	pub const fn needs_redraw(self) -> bool {
		!self.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::Dirty;

	#[test]
	fn none_needs_no_redraw() {
		assert!(!Dirty::NONE.needs_redraw());
		assert!((Dirty::NONE | Dirty::GIT).needs_redraw());
	}
}
