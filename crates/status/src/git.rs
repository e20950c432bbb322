//! Branch lookups for the git indicator.
//!
//! A lookup runs two subprocesses in the buffer's directory: `git branch` for
//! the current branch and `git diff --quiet` for the dirty marker. It runs on a
//! worker task and publishes a [`GitMsg::Resolved`]; applying the result is up
//! to the [`crate::cell::GitCell`] on the UI context.

use std::io;
use std::path::Path;
use std::process::{Output, Stdio};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lantern_config::GitConfig;
use lantern_worker::TaskClass;
use thiserror::Error;
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::cell::GitLookup;
use crate::signal::{GitMsg, SignalEmitter};

/// Suffix appended to the branch name when the worktree has changes.
pub const DIRTY_MARKER: char = '*';

/// Keeps console applications from flashing a window on Windows.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

#[derive(Debug, Error)]
pub enum GitError {
	#[error("failed to spawn {program}: {source}")]
	Spawn {
		program: String,
		#[source]
		source: io::Error,
	},
	#[error("`git {command}` exited with {code:?}")]
	Status { command: &'static str, code: Option<i32> },
	#[error("`git {command}` timed out after {timeout:?}")]
	Timeout { command: &'static str, timeout: Duration },
	#[error("no current branch")]
	NoBranch,
}

/// Source of branch names for a directory.
#[async_trait]
pub trait BranchProbe: Send + Sync {
	/// Returns the display branch for `dir`, dirty marker included.
	async fn probe(&self, dir: &Path) -> Result<String, GitError>;
}

/// [`BranchProbe`] backed by the git command line.
#[derive(Debug, Clone)]
pub struct GitCli {
	program: String,
	timeout: Duration,
}

impl GitCli {
	pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
		Self {
			program: program.into(),
			timeout,
		}
	}

	pub fn from_config(config: &GitConfig) -> Self {
		Self::new(config.program.clone(), config.timeout())
	}

	async fn run(&self, dir: &Path, command: &'static str, args: &[&str]) -> Result<Output, GitError> {
		let mut cmd = Command::new(&self.program);
		cmd.arg("-C")
			.arg(dir)
			.arg(command)
			.args(args)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::null())
			.kill_on_drop(true);
		#[cfg(windows)]
		cmd.creation_flags(CREATE_NO_WINDOW);

		let output = tokio::time::timeout(self.timeout, cmd.output())
			.await
			.map_err(|_| GitError::Timeout {
				command,
				timeout: self.timeout,
			})?
			.map_err(|source| GitError::Spawn {
				program: self.program.clone(),
				source,
			})?;

		if output.status.success() {
			Ok(output)
		} else {
			Err(GitError::Status {
				command,
				code: output.status.code(),
			})
		}
	}
}

#[async_trait]
impl BranchProbe for GitCli {
	async fn probe(&self, dir: &Path) -> Result<String, GitError> {
		let output = self.run(dir, "branch", &[]).await?;
		let stdout = String::from_utf8_lossy(&output.stdout);
		let branch = parse_branch(&stdout).ok_or(GitError::NoBranch)?;

		let dirty = match self.run(dir, "diff", &["--quiet"]).await {
			Ok(_) => false,
			Err(error) => {
				tracing::trace!(dir = %dir.display(), %error, "Treating worktree as dirty");
				true
			}
		};
		Ok(with_dirty_marker(branch, dirty))
	}
}

/// Extracts the current branch from `git branch` output.
///
/// A detached head (`* (HEAD detached at abc123)`) yields the commit.
pub fn parse_branch(output: &str) -> Option<String> {
	let line = output
		.lines()
		.rev()
		.map(|line| line.trim_end_matches('\r'))
		.find_map(|line| line.strip_prefix("* "))?;
	let name = line
		.strip_prefix("(HEAD detached at ")
		.and_then(|rest| rest.strip_suffix(')'))
		.unwrap_or(line);
	Some(name.to_string())
}

pub fn with_dirty_marker(mut branch: String, dirty: bool) -> String {
	if dirty {
		branch.push(DIRTY_MARKER);
	}
	branch
}

/// Runs `lookup` on a background task and publishes the result on `signals`.
pub fn spawn_lookup(probe: Arc<dyn BranchProbe>, lookup: GitLookup, signals: SignalEmitter) -> JoinHandle<()> {
	lantern_worker::spawn(TaskClass::Background, "git.lookup", async move {
		let branch = match probe.probe(&lookup.dir).await {
			Ok(branch) => Some(branch),
			Err(error) => {
				tracing::debug!(path = %lookup.path, %error, "Git lookup unavailable");
				None
			}
		};
		signals.emit(GitMsg::Resolved {
			path: lookup.path,
			token: lookup.token,
			branch,
		});
	})
}
