//! Visibility and render policies for the generic field cells.

use std::fmt;
use std::path::Path;

use super::git::is_virtual_path;
use super::{FieldPolicy, Rendered};
use crate::surface::{Element, Icon};
use crate::Dirty;

/// Shown in place of a file name for unnamed buffers.
pub const NO_NAME: &str = "[No Name]";

/// Cursor position as reported by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
	pub line: u64,
	pub col: u64,
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{},{}", self.line, self.col)
	}
}

pub static FILETYPE: FieldPolicy<String> = FieldPolicy {
	element: Element::Filetype,
	dirty: Dirty::FILETYPE,
	accept: any,
	visible: non_empty,
	render: filetype_text,
};

pub static ENCODING: FieldPolicy<String> = FieldPolicy {
	element: Element::Encoding,
	dirty: Dirty::ENCODING,
	accept: any,
	visible: non_empty,
	render: raw_text,
};

pub static FILEFORMAT: FieldPolicy<String> = FieldPolicy {
	element: Element::FileFormat,
	dirty: Dirty::FILEFORMAT,
	accept: non_empty,
	visible: non_empty,
	render: raw_text,
};

/// Value is the directory part from [`split_path`].
pub static FILEPATH: FieldPolicy<String> = FieldPolicy {
	element: Element::Filepath,
	dirty: Dirty::FILEPATH,
	accept: any,
	visible: non_empty,
	render: raw_text,
};

/// Value is the name part from [`split_path`].
pub static FILENAME: FieldPolicy<String> = FieldPolicy {
	element: Element::FileName,
	dirty: Dirty::FILENAME,
	accept: any,
	visible: always,
	render: raw_text,
};

pub static READONLY: FieldPolicy<bool> = FieldPolicy {
	element: Element::ReadOnly,
	dirty: Dirty::READONLY,
	accept: any,
	visible: is_set,
	render: lock_icon,
};

pub static POSITION: FieldPolicy<Position> = FieldPolicy {
	element: Element::Position,
	dirty: Dirty::POSITION,
	accept: any,
	visible: always,
	render: display_text,
};

pub static NOTIFY: FieldPolicy<usize> = FieldPolicy {
	element: Element::NotifyCount,
	dirty: Dirty::NOTIFY,
	accept: any,
	visible: non_zero,
	render: display_text,
};

fn any<T>(_: &T) -> bool {
	true
}

fn always<T>(_: &T) -> bool {
	true
}

fn non_empty(s: &String) -> bool {
	!s.is_empty()
}

fn is_set(flag: &bool) -> bool {
	*flag
}

fn non_zero(n: &usize) -> bool {
	*n > 0
}

fn raw_text(s: &String) -> Rendered {
	Rendered::Text(s.clone())
}

fn display_text<T: fmt::Display>(value: &T) -> Rendered {
	Rendered::Text(value.to_string())
}

fn filetype_text(filetype: &String) -> Rendered {
	Rendered::Text(filetype_label(filetype))
}

fn lock_icon(_: &bool) -> Rendered {
	Rendered::Icon(Icon::Lock)
}

/// Title-cases a filetype for display; `cpp` reads as `C++`.
pub fn filetype_label(filetype: &str) -> String {
	let label = title_case(filetype);
	if label == "Cpp" { "C++".to_string() } else { label }
}

/// Uppercases the first letter of every word. ASCII characters other than
/// letters, digits and `_` separate words, as does Unicode whitespace; other
/// non-ASCII symbols stay inside the word.
fn title_case(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	let mut at_word_start = true;
	for c in s.chars() {
		if at_word_start {
			out.extend(c.to_uppercase());
		} else {
			out.push(c);
		}
		at_word_start = is_word_separator(c);
	}
	out
}

fn is_word_separator(c: char) -> bool {
	if c.is_ascii() {
		return !(c.is_ascii_alphanumeric() || c == '_');
	}
	c.is_whitespace()
}

/// Directory and display name of a buffer path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
	pub dir: String,
	pub name: String,
}

/// Splits a buffer path for the filepath and file name cells.
///
/// Unnamed buffers show [`NO_NAME`]; terminal buffers show their full URI as
/// the name with no directory; a bare file name has no directory.
pub fn split_path(path: &str) -> PathParts {
	let file = if path.is_empty() { NO_NAME } else { path };
	if is_virtual_path(file) {
		return PathParts {
			dir: String::new(),
			name: file.to_string(),
		};
	}

	let p = Path::new(file);
	let name = p
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_else(|| file.to_string());
	let dir = p
		.parent()
		.map(|d| d.to_string_lossy().into_owned())
		.unwrap_or_default();
	PathParts { dir, name }
}
