use crate::error::{KvconfError, Result};
use crate::parser::{Entries, entries, entries_from_file};
use crate::schema::{Access, Destination, Existing, Schema};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, trace};

/// What happens to the elements a list field already holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListMode {
	/// Values from the file are appended after the caller's defaults.
	#[default]
	Append,
	/// The first occurrence of a key in the file clears the defaults.
	Replace,
}

/// Options controlling a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
	pub list_mode: ListMode,
}

/// Populates destinations from config sources.
///
/// Loading stops at the first error. Fields bound on earlier lines keep
/// their new values; nothing is rolled back.
#[derive(Debug, Clone, Default)]
pub struct Loader {
	options: LoadOptions,
}

impl Loader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_options(options: LoadOptions) -> Self {
		Loader { options }
	}

	pub fn list_mode(mut self, list_mode: ListMode) -> Self {
		self.options.list_mode = list_mode;
		self
	}

	pub fn options(&self) -> &LoadOptions {
		&self.options
	}

	/// Load a config file into `destination`.
	///
	/// The destination's schema is checked before the file is opened. The
	/// file is closed on every return path.
	pub fn load<D>(&self, path: impl AsRef<Path>, destination: &mut D) -> Result<()>
	where
		D: Destination + ?Sized,
	{
		let path = path.as_ref();
		let schema = destination.schema();
		schema.validate()?;

		let source = entries_from_file(path)?;
		self.bind_entries(source, schema)
	}

	/// Load from an already open reader. `name` identifies the source in errors.
	pub fn load_reader<R, D>(
		&self,
		name: impl AsRef<Path>,
		reader: R,
		destination: &mut D,
	) -> Result<()>
	where
		R: BufRead,
		D: Destination + ?Sized,
	{
		let schema = destination.schema();
		schema.validate()?;

		self.bind_entries(entries(name, reader), schema)
	}

	/// Load from in-memory text.
	pub fn load_str<D>(&self, name: impl AsRef<Path>, content: &str, destination: &mut D) -> Result<()>
	where
		D: Destination + ?Sized,
	{
		self.load_reader(name, content.as_bytes(), destination)
	}

	fn bind_entries<R: BufRead>(&self, mut source: Entries<R>, mut schema: Schema<'_>) -> Result<()> {
		debug!(
			path = %source.path().display(),
			fields = schema.len(),
			list_mode = ?self.options.list_mode,
			"loading configuration"
		);

		// Line each key was first bound on.
		let mut first_seen: HashMap<String, usize> = HashMap::new();

		let path = source.path().to_path_buf();
		for entry in source.by_ref() {
			let entry = entry?;

			let Some(slot) = schema.get_mut(&entry.key) else {
				return Err(KvconfError::UnknownKey {
					path: path.clone(),
					line: entry.line,
					key: entry.key,
				});
			};

			let field = match &mut slot.access {
				Access::Writable(field) => field,
				Access::ReadOnly(_) => {
					return Err(KvconfError::ReadOnlyField {
						path: path.clone(),
						line: entry.line,
						key: entry.key,
					});
				}
				Access::Unsupported(kind) => {
					return Err(KvconfError::UnsupportedType {
						path: path.clone(),
						line: entry.line,
						key: entry.key,
						kind: *kind,
					});
				}
			};

			let kind = field.kind();
			let first_line = first_seen.get(&entry.key).copied();

			if let Some(first_line) = first_line
				&& !kind.is_list()
			{
				return Err(KvconfError::DuplicateKey {
					path: path.clone(),
					line: entry.line,
					key: entry.key,
					first_line,
				});
			}

			let existing = match (self.options.list_mode, first_line) {
				(ListMode::Replace, None) => Existing::Discard,
				_ => Existing::Keep,
			};

			field
				.bind(&entry.value, existing)
				.map_err(|source| KvconfError::InvalidValue {
					path: path.clone(),
					line: entry.line,
					key: entry.key.clone(),
					source,
				})?;

			trace!(line = entry.line, key = %entry.key, kind = %kind, "bound field");
			first_seen.entry(entry.key).or_insert(entry.line);
		}

		debug!(
			path = %path.display(),
			lines = source.lines_read(),
			keys = first_seen.len(),
			"configuration loaded"
		);

		Ok(())
	}
}

/// Load a config file into `destination` with default options.
pub fn load<D>(path: impl AsRef<Path>, destination: &mut D) -> Result<()>
where
	D: Destination + ?Sized,
{
	Loader::new().load(path, destination)
}

/// Load from an open reader with default options.
pub fn load_reader<R, D>(name: impl AsRef<Path>, reader: R, destination: &mut D) -> Result<()>
where
	R: BufRead,
	D: Destination + ?Sized,
{
	Loader::new().load_reader(name, reader, destination)
}

/// Load from in-memory text with default options.
pub fn load_str<D>(name: impl AsRef<Path>, content: &str, destination: &mut D) -> Result<()>
where
	D: Destination + ?Sized,
{
	Loader::new().load_str(name, content, destination)
}
