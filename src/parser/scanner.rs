use std::iter::Peekable;
use std::str::CharIndices;

/// Whether the scanner currently sits inside a double-quoted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quoting {
	Outside,
	Inside,
}

impl Quoting {
	fn toggled(self) -> Self {
		match self {
			Quoting::Outside => Quoting::Inside,
			Quoting::Inside => Quoting::Outside,
		}
	}
}

/// A classified position in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
	/// Ordinary character, kept as-is.
	Literal(char),
	/// An unescaped `"`; toggles the quote state.
	Quote,
	/// `\"`, standing for a literal quote character.
	EscapedQuote,
	/// `=` outside quotes.
	Equals,
	/// `#` outside quotes.
	CommentStart,
}

/// Single-pass, quote-aware scanner over one line.
///
/// Yields `(byte_offset, event)` pairs. Quote balance alone decides whether
/// `=` and `#` are structural: an unclosed quote runs to the end of the line.
pub struct Scanner<'a> {
	chars: Peekable<CharIndices<'a>>,
	quoting: Quoting,
}

impl<'a> Scanner<'a> {
	pub fn new(text: &'a str) -> Self {
		Scanner {
			chars: text.char_indices().peekable(),
			quoting: Quoting::Outside,
		}
	}
}

impl Iterator for Scanner<'_> {
	type Item = (usize, Event);

	fn next(&mut self) -> Option<Self::Item> {
		let (at, c) = self.chars.next()?;

		let event = match c {
			'\\' if matches!(self.chars.peek(), Some((_, '"'))) => {
				self.chars.next();
				Event::EscapedQuote
			}
			'"' => {
				self.quoting = self.quoting.toggled();
				Event::Quote
			}
			'=' if self.quoting == Quoting::Outside => Event::Equals,
			'#' if self.quoting == Quoting::Outside => Event::CommentStart,
			c => Event::Literal(c),
		};

		Some((at, event))
	}
}

/// Byte offset of the first `#` outside quotes.
pub fn comment_start(text: &str) -> Option<usize> {
	Scanner::new(text).find_map(|(at, event)| (event == Event::CommentStart).then_some(at))
}
