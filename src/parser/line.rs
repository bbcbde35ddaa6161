use crate::error::SyntaxError;
use crate::parser::scanner::{Event, Scanner};

/// Outcome of splitting one raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitLine<'a> {
	/// Blank or comment-only line.
	Skip,
	/// Raw text on either side of the first unquoted `=`, comment removed.
	Pair { key: &'a str, value: &'a str },
}

/// Classify a line and split it into raw key and value text.
pub fn split_line(line: &str) -> Result<SplitLine<'_>, SyntaxError> {
	let mut equals = None;
	let mut comment = None;

	for (at, event) in Scanner::new(line) {
		match event {
			Event::Equals if equals.is_none() => equals = Some(at),
			Event::CommentStart => {
				comment = Some(at);
				break;
			}
			_ => {}
		}
	}

	let content = &line[..comment.unwrap_or(line.len())];
	if content.trim().is_empty() {
		return Ok(SplitLine::Skip);
	}

	match equals {
		Some(at) => Ok(SplitLine::Pair {
			key: &content[..at],
			value: &content[at + 1..],
		}),
		None => {
			// A quote before the `=` swallowed it: blame the key, not the missing `=`.
			if let Some(at) = content.find('=')
				&& content[..at].contains('"')
			{
				return Err(SyntaxError::QuoteInKey {
					key: content[..at].trim().to_string(),
				});
			}
			Err(SyntaxError::MissingEquals)
		}
	}
}
