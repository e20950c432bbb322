use std::path::{Path, PathBuf};

use crate::surface::{Element, Icon, StatusSurface};
use crate::Dirty;

/// Prefix of terminal buffer names; they have no working directory to query.
const VIRTUAL_PREFIX: &str = "term://";

/// Returns true for terminal buffers.
pub fn is_virtual_path(path: &str) -> bool {
	path.starts_with(VIRTUAL_PREFIX)
}

/// A branch query to run off the UI context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitLookup {
	/// Buffer path the lookup was issued for.
	pub path: String,
	/// Directory the subprocesses run in.
	pub dir: PathBuf,
	/// Lookup generation; only the newest one may land.
	pub token: u64,
}

/// Result of tracking a new buffer path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Track {
	/// Same path as before; nothing to do.
	Unchanged,
	/// Path has no repository context; the indicator was hidden.
	Hidden(Dirty),
	/// A lookup must be launched.
	Lookup(GitLookup),
}

/// Branch indicator state.
///
/// Lookups are keyed by the tracked path and a generation token. Results come
/// back through the signal bus and are dropped unless both still match, so an
/// older lookup that finishes late cannot overwrite a newer one.
#[derive(Debug)]
pub struct GitCell {
	tracked: String,
	branch: String,
	hidden: bool,
	token: u64,
	pending: bool,
}

impl Default for GitCell {
	fn default() -> Self {
		Self::new()
	}
}

impl GitCell {
	pub const fn new() -> Self {
		Self {
			tracked: String::new(),
			branch: String::new(),
			hidden: true,
			token: 0,
			pending: false,
		}
	}

	/// Starts tracking `path`, returning the lookup to launch if any.
	pub fn track(&mut self, path: &str, surface: &mut dyn StatusSurface) -> Track {
		if path.is_empty() || is_virtual_path(path) {
			self.tracked = path.to_string();
			self.token = self.token.wrapping_add(1);
			self.pending = false;
			self.branch.clear();
			return Track::Hidden(self.hide(surface));
		}
		if self.tracked == path {
			return Track::Unchanged;
		}

		self.tracked = path.to_string();
		self.token = self.token.wrapping_add(1);
		self.pending = true;
		Track::Lookup(GitLookup {
			path: self.tracked.clone(),
			dir: lookup_dir(path),
			token: self.token,
		})
	}

	/// Applies a finished lookup. `branch` is `None` when git was unavailable
	/// or the directory is not a repository.
	pub fn resolve(&mut self, path: &str, token: u64, branch: Option<String>, surface: &mut dyn StatusSurface) -> Dirty {
		if path != self.tracked || token != self.token {
			tracing::debug!(path, token, tracked = %self.tracked, "Ignoring stale git lookup");
			return Dirty::NONE;
		}
		self.pending = false;

		let Some(branch) = branch else {
			self.branch.clear();
			return self.hide(surface);
		};
		if branch == self.branch {
			return Dirty::NONE;
		}

		self.branch = branch;
		surface.set_text(Element::Git, &self.branch);
		if self.hidden {
			self.hidden = false;
			surface.set_visible(Element::Git, true);
		}
		Dirty::GIT
	}

	/// Paints the static branch icon.
	pub fn paint_icon(&self, color: Option<lantern_config::Color>, surface: &mut dyn StatusSurface) {
		surface.set_icon(Element::Git, Icon::Git, color);
	}

	fn hide(&mut self, surface: &mut dyn StatusSurface) -> Dirty {
		if self.hidden {
			return Dirty::NONE;
		}
		self.hidden = true;
		surface.set_visible(Element::Git, false);
		Dirty::GIT
	}

	/// Returns true while the lookup for the tracked path has not landed.
	pub const fn is_pending(&self) -> bool {
		self.pending
	}

	/// The displayed branch, if the indicator is shown.
	pub fn branch(&self) -> Option<&str> {
		(!self.hidden).then_some(self.branch.as_str())
	}
}

/// Containing directory of a buffer path; `.` for a bare file name.
fn lookup_dir(path: &str) -> PathBuf {
	match Path::new(path).parent() {
		Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
		_ => PathBuf::from("."),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::RecordingSurface;

	fn lookup(track: Track) -> GitLookup {
		match track {
			Track::Lookup(lookup) => lookup,
			other => panic!("expected a lookup, got {other:?}"),
		}
	}

	#[test]
	fn same_path_does_not_reissue_lookup() {
		let mut surface = RecordingSurface::default();
		let mut cell = GitCell::new();

		let first = lookup(cell.track("/a/b.go", &mut surface));
		assert_eq!(first.dir, PathBuf::from("/a"));
		assert_eq!(cell.track("/a/b.go", &mut surface), Track::Unchanged);
		assert!(cell.is_pending());
		cell.resolve(&first.path, first.token, None, &mut surface);
		assert!(!cell.is_pending());
	}

	#[test]
	fn virtual_and_empty_paths_hide_without_lookup() {
		let mut surface = RecordingSurface::default();
		let mut cell = GitCell::new();
		let first = lookup(cell.track("/repo/main.rs", &mut surface));
		assert_eq!(cell.resolve(&first.path, first.token, Some("main".into()), &mut surface), Dirty::GIT);
		assert_eq!(cell.branch(), Some("main"));

		assert_eq!(cell.track("term://~//1:/bin/sh", &mut surface), Track::Hidden(Dirty::GIT));
		assert_eq!(cell.branch(), None);
		assert_eq!(surface.visibility(Element::Git), Some(false));

		assert_eq!(cell.track("", &mut surface), Track::Hidden(Dirty::NONE));
	}

	#[test]
	fn stale_result_for_previous_path_is_discarded() {
		let mut surface = RecordingSurface::default();
		let mut cell = GitCell::new();
		let old = lookup(cell.track("/a/b.go", &mut surface));
		let new = lookup(cell.track("/a/c.go", &mut surface));

		assert_eq!(cell.resolve(&old.path, old.token, Some("old".into()), &mut surface), Dirty::NONE);
		assert_eq!(cell.branch(), None);
		assert!(surface.texts(Element::Git).is_empty());

		assert_eq!(cell.resolve(&new.path, new.token, Some("new".into()), &mut surface), Dirty::GIT);
		assert_eq!(cell.branch(), Some("new"));
	}

	#[test]
	fn superseded_lookup_for_same_path_is_discarded() {
		let mut surface = RecordingSurface::default();
		let mut cell = GitCell::new();
		let first = lookup(cell.track("/a/b.go", &mut surface));
		let _ = lookup(cell.track("/a/c.go", &mut surface));
		let again = lookup(cell.track("/a/b.go", &mut surface));

		assert_eq!(cell.resolve(&first.path, first.token, Some("old".into()), &mut surface), Dirty::NONE);
		assert_eq!(cell.resolve(&again.path, again.token, Some("main".into()), &mut surface), Dirty::GIT);
	}

	#[test]
	fn failure_hides_and_same_branch_is_not_repainted() {
		let mut surface = RecordingSurface::default();
		let mut cell = GitCell::new();
		let a = lookup(cell.track("/r/a.rs", &mut surface));
		cell.resolve(&a.path, a.token, Some("dev".into()), &mut surface);
		let b = lookup(cell.track("/r/b.rs", &mut surface));
		assert_eq!(cell.resolve(&b.path, b.token, Some("dev".into()), &mut surface), Dirty::NONE);
		assert_eq!(surface.texts(Element::Git), vec!["dev"]);

		let c = lookup(cell.track("/tmp/c.rs", &mut surface));
		assert_eq!(cell.resolve(&c.path, c.token, None, &mut surface), Dirty::GIT);
		assert_eq!(cell.branch(), None);
	}

	#[test]
	fn bare_file_name_queries_current_directory() {
		assert_eq!(lookup_dir("main.rs"), PathBuf::from("."));
		assert_eq!(lookup_dir("/main.rs"), PathBuf::from("/"));
	}
}
