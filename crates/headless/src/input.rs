//! JSON-lines event script.
//!
//! Each non-empty line is an array whose first element names the command:
//!
//! ```text
//! ["path", "/src/main.rs"]
//! ["bufenter", "rust", "utf-8", "unix", 0]
//! ["mode", "insert"]
//! ["cursor", 3, 7]
//! ["lint", 1, 2]
//! ["notify", 4]
//! ```
//!
//! Any other array is delivered verbatim on the status line channel.

use std::io::BufRead;

use anyhow::{Context, bail};
use lantern_status::Value;
use lantern_status::cell::LintCounts;
use lantern_status::event::EventBatch;
use tokio::sync::mpsc;

/// One scripted editor action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
	/// Raw notification for the status line channel.
	Notify(EventBatch),
	Path(String),
	Mode(String),
	Cursor { line: u64, col: u64 },
	Lint(LintCounts),
	Messages(usize),
}

/// Parses one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<Command>> {
	let line = line.trim();
	if line.is_empty() || line.starts_with('#') {
		return Ok(None);
	}

	let items: Vec<serde_json::Value> = serde_json::from_str(line).context("expected a JSON array")?;
	let Some(kind) = items.first().and_then(serde_json::Value::as_str) else {
		let batch = items.iter().map(to_value).collect::<anyhow::Result<_>>()?;
		return Ok(Some(Command::Notify(batch)));
	};

	let command = match kind {
		"path" => Command::Path(string_arg(&items, 1)?),
		"mode" => Command::Mode(string_arg(&items, 1)?),
		"cursor" => Command::Cursor {
			line: int_arg(&items, 1)?,
			col: int_arg(&items, 2)?,
		},
		"lint" => Command::Lint(LintCounts {
			errors: u32::try_from(int_arg(&items, 1)?).context("error count out of range")?,
			warnings: u32::try_from(int_arg(&items, 2)?).context("warning count out of range")?,
		}),
		"notify" => Command::Messages(usize::try_from(int_arg(&items, 1)?).context("count out of range")?),
		_ => Command::Notify(items.iter().map(to_value).collect::<anyhow::Result<_>>()?),
	};
	Ok(Some(command))
}

fn string_arg(items: &[serde_json::Value], index: usize) -> anyhow::Result<String> {
	match items.get(index).and_then(serde_json::Value::as_str) {
		Some(s) => Ok(s.to_string()),
		None => bail!("argument {index} must be a string"),
	}
}

fn int_arg(items: &[serde_json::Value], index: usize) -> anyhow::Result<u64> {
	match items.get(index).and_then(serde_json::Value::as_u64) {
		Some(n) => Ok(n),
		None => bail!("argument {index} must be a non-negative integer"),
	}
}

/// Converts JSON into the value shape the RPC layer produces.
fn to_value(json: &serde_json::Value) -> anyhow::Result<Value> {
	Ok(match json {
		serde_json::Value::Null => Value::Nil,
		serde_json::Value::Bool(b) => Value::Bool(*b),
		serde_json::Value::Number(n) => {
			if let Some(i) = n.as_i64() {
				Value::Int(i)
			} else if let Some(u) = n.as_u64() {
				Value::UInt(u)
			} else {
				Value::Float(n.as_f64().unwrap_or_default())
			}
		}
		serde_json::Value::String(s) => Value::Str(s.clone()),
		serde_json::Value::Array(items) => Value::Array(items.iter().map(to_value).collect::<anyhow::Result<_>>()?),
		serde_json::Value::Object(_) => bail!("objects are not valid notification arguments"),
	})
}

/// Reads `reader` line by line, forwarding commands until EOF or until the
/// receiver goes away. Bad lines are logged and skipped.
pub fn read_commands(reader: impl BufRead, commands: mpsc::UnboundedSender<Command>) -> anyhow::Result<()> {
	for (index, line) in reader.lines().enumerate() {
		let line = line.context("reading event script")?;
		match parse_line(&line) {
			Ok(Some(command)) => {
				if commands.send(command).is_err() {
					break;
				}
			}
			Ok(None) => {}
			Err(error) => tracing::warn!(line = index + 1, "Skipping script line: {error:#}"),
		}
	}
	Ok(())
}
