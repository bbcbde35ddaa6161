use crate::error::SyntaxError;
use crate::parser::scanner::{Event, Scanner, comment_start};

/// Trim a raw key and check it can name a field.
pub fn normalize_key(raw: &str) -> Result<&str, SyntaxError> {
	let key = raw.trim();

	if key.is_empty() {
		return Err(SyntaxError::EmptyKey);
	}
	if key.contains('"') {
		return Err(SyntaxError::QuoteInKey {
			key: key.to_string(),
		});
	}

	Ok(key)
}

/// Turn raw value text into the value a field is bound from.
///
/// Whitespace is trimmed, an unquoted `#` comment tail is dropped, then quote
/// characters are removed with `\"` collapsing to `"`. An empty result is only
/// accepted when the value was written with quotes, as in `Key = ""`.
pub fn normalize_value(key: &str, raw: &str) -> Result<String, SyntaxError> {
	let value = strip_comment(raw.trim());
	let (value, quoted) = unquote(value);

	if value.is_empty() && !quoted {
		return Err(SyntaxError::EmptyValue {
			key: key.to_string(),
		});
	}

	Ok(value)
}

/// Drop an unquoted `#...` suffix and the whitespace before it.
pub fn strip_comment(text: &str) -> &str {
	match comment_start(text) {
		Some(at) => text[..at].trim_end(),
		None => text,
	}
}

/// Remove quote characters, returning the text and whether any quote was seen.
pub fn unquote(text: &str) -> (String, bool) {
	let mut value = String::with_capacity(text.len());
	let mut quoted = false;

	for (_, event) in Scanner::new(text) {
		match event {
			Event::Quote => quoted = true,
			Event::EscapedQuote => value.push('"'),
			Event::Equals => value.push('='),
			Event::CommentStart => value.push('#'),
			Event::Literal(c) => value.push(c),
		}
	}

	(value, quoted)
}
