use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use kvconf::KvconfError;
use kvconf::parser::{Entry, entries_from_file};

#[derive(Parser)]
#[command(name = "kvconf")]
#[command(
	author,
	version,
	about = "Check and inspect line-oriented key = value configuration files"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Log debug output to stderr (overridden by KVCONF_LOG)
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Check config files for syntax errors without binding them
	Check {
		/// Treat a key repeated within one file as an error
		#[arg(long)]
		strict: bool,

		/// Files to check
		#[arg(required = true, value_name = "FILE")]
		files: Vec<PathBuf>,
	},
	/// Print every entry of a config file after normalization
	Dump {
		/// File to dump
		#[arg(value_name = "FILE")]
		file: PathBuf,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_env("KVCONF_LOG")
		.unwrap_or_else(|_| EnvFilter::new(format!("kvconf={default_level}")));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	match cli.command {
		Commands::Check { strict, files } => handle_check(&files, strict),
		Commands::Dump { file } => handle_dump(&file),
	}
}

fn handle_check(files: &[PathBuf], strict: bool) -> Result<ExitCode> {
	let mut failed = false;

	for path in files {
		match check_file(path, strict) {
			Ok(count) => println!("{}: ok ({} entries)", path.display(), count),
			Err(e) => {
				eprintln!("Configuration error: {}", e);
				failed = true;
			}
		}
	}

	if failed {
		Ok(ExitCode::FAILURE)
	} else {
		Ok(ExitCode::SUCCESS)
	}
}

/// Parse a whole file, returning the number of entries.
fn check_file(path: &Path, strict: bool) -> kvconf::Result<usize> {
	let mut first_seen: HashMap<String, usize> = HashMap::new();
	let mut count = 0;

	for entry in entries_from_file(path)? {
		let entry = entry?;

		if let Some(&first_line) = first_seen.get(&entry.key)
			&& strict
		{
			return Err(KvconfError::DuplicateKey {
				path: path.to_path_buf(),
				line: entry.line,
				key: entry.key,
				first_line,
			});
		}

		first_seen.entry(entry.key).or_insert(entry.line);
		count += 1;
	}

	debug!(path = %path.display(), entries = count, keys = first_seen.len(), "checked");
	Ok(count)
}

fn handle_dump(path: &Path) -> Result<ExitCode> {
	let source = entries_from_file(path)
		.with_context(|| format!("Failed to open {}", path.display()))?;

	for entry in source {
		let Entry { line, key, value } = entry.context("Failed to parse configuration")?;
		println!("{line}: {key} = {value:?}");
	}

	Ok(ExitCode::SUCCESS)
}
