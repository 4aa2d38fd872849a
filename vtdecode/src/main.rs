mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

/// Decode Mapbox Vector Tiles and show what they contain.
#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Show the layers and features of a vector tile
	Inspect(tools::inspect::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
	match &cli.command {
		Commands::Inspect(arguments) => tools::inspect::run(arguments),
	}
}

#[cfg(test)]
mod tests {
	use crate::{Cli, run};
	use anyhow::Result;
	use clap::Parser;

	pub fn run_command(arg_vec: Vec<&str>) -> Result<String> {
		let cli = Cli::try_parse_from(arg_vec)?;
		let msg = format!("{cli:?}");
		run(&cli)?;
		Ok(msg)
	}

	#[test]
	fn help() {
		let err = run_command(vec!["vtdecode"]).unwrap_err().to_string();
		assert!(err.starts_with("Lazy, memoizing decoder for Mapbox Vector Tile geometries and attributes."));
		assert!(err.contains("\nUsage: vtdecode [OPTIONS] <COMMAND>"));
	}

	#[test]
	fn version() {
		let err = run_command(vec!["vtdecode", "-V"]).unwrap_err().to_string();
		assert!(err.starts_with("vtdecode "));
	}

	#[test]
	fn inspect_subcommand() {
		let output = run_command(vec!["vtdecode", "inspect"]).unwrap_err().to_string();
		assert!(output.starts_with("Show the layers and features of a vector tile"));
	}
}
