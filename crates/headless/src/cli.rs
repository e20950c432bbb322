use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lantern")]
#[command(about = "Drive the status line from editor events given as JSON lines")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to the platform config dir)
	#[arg(short, long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,

	/// Event file to replay (reads stdin if omitted)
	#[arg(short, long, value_name = "PATH")]
	pub input: Option<PathBuf>,
}
