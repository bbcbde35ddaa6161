use crate::schema::ScalarKind;
use std::num::{ParseFloatError, ParseIntError};
use std::path::{Path, PathBuf};

/// Library-level structured errors for kvconf.
///
/// Every failed load returns exactly one of these. Line-scoped variants carry
/// the source identifier and the 1-based line number they were raised on.
/// The CLI binary wraps these with `anyhow` for context chains.
#[derive(Debug, thiserror::Error)]
pub enum KvconfError {
	#[error("Invalid destination: {reason}")]
	InvalidDestination { reason: String },

	#[error("{path}:{line}: config key is not valid: {key}")]
	UnknownKey {
		path: PathBuf,
		line: usize,
		key: String,
	},

	#[error("{path}:{line}: config key names a field that cannot be set: {key}")]
	ReadOnlyField {
		path: PathBuf,
		line: usize,
		key: String,
	},

	#[error("{path}:{line}: unsupported type {kind} for key \"{key}\"")]
	UnsupportedType {
		path: PathBuf,
		line: usize,
		key: String,
		kind: &'static str,
	},

	#[error("{path}:{line}: {reason}")]
	Syntax {
		path: PathBuf,
		line: usize,
		reason: SyntaxError,
	},

	#[error("{path}:{line}: {source} in key \"{key}\"")]
	InvalidValue {
		path: PathBuf,
		line: usize,
		key: String,
		#[source]
		source: ValueError,
	},

	#[error("{path}:{line}: key \"{key}\" is already defined on line {first_line}")]
	DuplicateKey {
		path: PathBuf,
		line: usize,
		key: String,
		first_line: usize,
	},

	#[error("Failed to open config file: {path}")]
	Open {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read line {line} of config file: {path}")]
	Read {
		path: PathBuf,
		line: usize,
		#[source]
		source: std::io::Error,
	},
}

/// Broad category of a [`KvconfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// The destination cannot accept the key: unknown, read-only or unsupported field.
	Schema,
	/// The line itself is malformed.
	Syntax,
	/// The value does not convert into the field's declared type.
	Value,
	/// A scalar key appears on more than one line.
	DuplicateKey,
	/// The source could not be opened or read.
	Resource,
}

impl KvconfError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			KvconfError::InvalidDestination { .. }
			| KvconfError::UnknownKey { .. }
			| KvconfError::ReadOnlyField { .. }
			| KvconfError::UnsupportedType { .. } => ErrorKind::Schema,
			KvconfError::Syntax { .. } => ErrorKind::Syntax,
			KvconfError::InvalidValue { .. } => ErrorKind::Value,
			KvconfError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
			KvconfError::Open { .. } | KvconfError::Read { .. } => ErrorKind::Resource,
		}
	}

	/// The 1-based line the error was raised on, if it is line-scoped.
	pub fn line(&self) -> Option<usize> {
		match self {
			KvconfError::UnknownKey { line, .. }
			| KvconfError::ReadOnlyField { line, .. }
			| KvconfError::UnsupportedType { line, .. }
			| KvconfError::Syntax { line, .. }
			| KvconfError::InvalidValue { line, .. }
			| KvconfError::DuplicateKey { line, .. }
			| KvconfError::Read { line, .. } => Some(*line),
			KvconfError::InvalidDestination { .. } | KvconfError::Open { .. } => None,
		}
	}

	/// The source identifier the error refers to.
	pub fn path(&self) -> Option<&Path> {
		match self {
			KvconfError::InvalidDestination { .. } => None,
			KvconfError::UnknownKey { path, .. }
			| KvconfError::ReadOnlyField { path, .. }
			| KvconfError::UnsupportedType { path, .. }
			| KvconfError::Syntax { path, .. }
			| KvconfError::InvalidValue { path, .. }
			| KvconfError::DuplicateKey { path, .. }
			| KvconfError::Open { path, .. }
			| KvconfError::Read { path, .. } => Some(path.as_path()),
		}
	}
}

/// Reasons a single line is rejected before any field is looked up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
	#[error("config line must contain \"=\"")]
	MissingEquals,

	#[error("key can't be empty")]
	EmptyKey,

	#[error("\" are not allowed in key: {key}")]
	QuoteInKey { key: String },

	#[error("value of key \"{key}\" can't be empty")]
	EmptyValue { key: String },

	#[error("line is not valid UTF-8")]
	InvalidUtf8,
}

/// Conversion failures of a textual value into a typed field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
	#[error("invalid bool \"{value}\"")]
	InvalidBool { value: String },

	#[error("invalid int \"{value}\" for {kind}")]
	InvalidInt {
		value: String,
		kind: ScalarKind,
		#[source]
		source: ParseIntError,
	},

	#[error("invalid uint \"{value}\" for {kind}")]
	InvalidUint {
		value: String,
		kind: ScalarKind,
		#[source]
		source: ParseIntError,
	},

	#[error("invalid float \"{value}\" for {kind}")]
	InvalidFloat {
		value: String,
		kind: ScalarKind,
		#[source]
		source: ParseFloatError,
	},

	#[error("invalid float \"{value}\" for {kind}: value out of range")]
	FloatOutOfRange { value: String, kind: ScalarKind },
}

/// Result type alias using KvconfError.
pub type Result<T> = std::result::Result<T, KvconfError>;
