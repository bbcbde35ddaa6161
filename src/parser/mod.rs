//! Line parsing for kvconf files.
//!
//! This module handles:
//! - Quote-aware scanning of a single line
//! - Splitting lines into key and value, skipping blanks and comments
//! - Normalizing keys and values (trimming, comments, quotes, escapes)

pub mod line;
pub mod scanner;
pub mod value;

use crate::error::{KvconfError, Result, SyntaxError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::trace;

pub use line::{SplitLine, split_line};
pub use value::{normalize_key, normalize_value};

/// A normalized `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	/// 1-based line number in the source.
	pub line: usize,

	/// Trimmed key, matched verbatim against field names.
	pub key: String,

	/// Value after comment, quote and whitespace processing.
	pub value: String,
}

/// Parse one line. Returns `Ok(None)` for blank and comment-only lines.
pub fn parse_line(text: &str, line: usize) -> std::result::Result<Option<Entry>, SyntaxError> {
	let (raw_key, raw_value) = match split_line(text)? {
		SplitLine::Skip => return Ok(None),
		SplitLine::Pair { key, value } => (key, value),
	};

	let key = normalize_key(raw_key)?;
	let value = normalize_value(key, raw_value)?;

	Ok(Some(Entry {
		line,
		key: key.to_string(),
		value,
	}))
}

/// Iterator over the entries of a line-oriented source.
///
/// Yields at most one error, after which it is exhausted.
pub struct Entries<R> {
	path: PathBuf,
	lines: std::io::Split<R>,
	lines_read: usize,
	done: bool,
}

/// Parse entries from any buffered reader. `path` identifies the source in errors.
pub fn entries<R: BufRead>(path: impl AsRef<Path>, reader: R) -> Entries<R> {
	Entries {
		path: path.as_ref().to_path_buf(),
		lines: reader.split(b'\n'),
		lines_read: 0,
		done: false,
	}
}

/// Open a file and parse its entries.
pub fn entries_from_file(path: &Path) -> Result<Entries<BufReader<File>>> {
	let file = File::open(path).map_err(|source| KvconfError::Open {
		path: path.to_path_buf(),
		source,
	})?;

	Ok(entries(path, BufReader::new(file)))
}

impl<R> Entries<R> {
	/// Number of lines consumed so far.
	pub fn lines_read(&self) -> usize {
		self.lines_read
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl<R: BufRead> Iterator for Entries<R> {
	type Item = Result<Entry>;

	fn next(&mut self) -> Option<Self::Item> {
		while !self.done {
			let mut bytes = match self.lines.next()? {
				Ok(bytes) => bytes,
				Err(source) => {
					self.done = true;
					return Some(Err(KvconfError::Read {
						path: self.path.clone(),
						line: self.lines_read + 1,
						source,
					}));
				}
			};
			self.lines_read += 1;

			if bytes.last() == Some(&b'\r') {
				bytes.pop();
			}

			// Encoding problems belong to the line, not to the reader.
			let parsed = match String::from_utf8(bytes) {
				Ok(text) => parse_line(&text, self.lines_read),
				Err(_) => Err(SyntaxError::InvalidUtf8),
			};

			match parsed {
				Ok(Some(entry)) => return Some(Ok(entry)),
				Ok(None) => trace!(line = self.lines_read, "skipping blank or comment line"),
				Err(reason) => {
					self.done = true;
					return Some(Err(KvconfError::Syntax {
						path: self.path.clone(),
						line: self.lines_read,
						reason,
					}));
				}
			}
		}

		None
	}
}
