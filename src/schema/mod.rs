//! Binding of config keys to the fields of a caller-owned record.
//!
//! There is no runtime reflection, so a destination describes itself: it
//! implements [`Destination`] and lists its fields by name in a [`Schema`].
//! Each writable field borrows the record mutably for the duration of a load.
//!
//! ```
//! use kvconf::schema::{Destination, Schema};
//!
//! struct Config {
//! 	port: u16,
//! 	admin_email: Vec<String>,
//! }
//!
//! impl Destination for Config {
//! 	fn schema(&mut self) -> Schema<'_> {
//! 		Schema::new()
//! 			.field("Port", &mut self.port)
//! 			.field("AdminEmail", &mut self.admin_email)
//! 	}
//! }
//! ```

pub mod field;
pub mod kind;

use crate::error::{KvconfError, Result};

pub use field::{Existing, Field, Scalar, parse_bool};
pub use kind::{FieldKind, ScalarKind};

/// A record whose fields can be populated from a config file.
///
/// Loading the same destination from several threads at once is not
/// supported; callers serialize access themselves.
pub trait Destination {
	fn schema(&mut self) -> Schema<'_>;
}

/// How a named field may be reached.
pub enum Access<'a> {
	Writable(&'a mut dyn Field),
	ReadOnly(&'a dyn Field),
	Unsupported(&'static str),
}

/// One named field of a destination.
pub struct FieldSlot<'a> {
	pub name: &'static str,
	pub access: Access<'a>,
}

impl FieldSlot<'_> {
	pub fn descriptor(&self) -> FieldDescriptor {
		let (kind, writable) = match &self.access {
			Access::Writable(field) => (field.kind(), true),
			Access::ReadOnly(field) => (field.kind(), false),
			Access::Unsupported(kind) => (FieldKind::Unsupported(*kind), false),
		};

		FieldDescriptor {
			name: self.name,
			kind,
			writable,
		}
	}
}

/// Read-only view of one destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
	pub name: &'static str,
	pub kind: FieldKind,
	pub writable: bool,
}

/// The named fields of a destination, in declaration order.
#[derive(Default)]
pub struct Schema<'a> {
	fields: Vec<FieldSlot<'a>>,
}

impl<'a> Schema<'a> {
	pub fn new() -> Self {
		Schema { fields: Vec::new() }
	}

	/// Register a field that config lines may set.
	pub fn field<F: Field>(mut self, name: &'static str, target: &'a mut F) -> Self {
		self.fields.push(FieldSlot {
			name,
			access: Access::Writable(target),
		});
		self
	}

	/// Register a field that exists but must not be set from a file.
	pub fn read_only<F: Field>(mut self, name: &'static str, target: &'a F) -> Self {
		self.fields.push(FieldSlot {
			name,
			access: Access::ReadOnly(target),
		});
		self
	}

	/// Register a field whose type cannot be bound from text, e.g. a nested struct.
	pub fn unsupported(mut self, name: &'static str, kind: &'static str) -> Self {
		self.fields.push(FieldSlot {
			name,
			access: Access::Unsupported(kind),
		});
		self
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn descriptors(&self) -> Vec<FieldDescriptor> {
		self.fields.iter().map(FieldSlot::descriptor).collect()
	}

	/// Find a field by its exact, case-sensitive name.
	pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldSlot<'a>> {
		self.fields.iter_mut().find(|slot| slot.name == name)
	}

	/// Check that every field name could be matched by a config key.
	///
	/// Names must be non-empty, unique, free of surrounding whitespace, and
	/// must not contain `"`, `=` or `#`.
	pub fn validate(&self) -> Result<()> {
		for (i, slot) in self.fields.iter().enumerate() {
			let name = slot.name;

			let problem = if name.is_empty() {
				Some("empty field name")
			} else if name.trim() != name {
				Some("field name has surrounding whitespace")
			} else if name.contains(['"', '=', '#']) {
				Some("field name contains '\"', '=' or '#'")
			} else if self.fields[..i].iter().any(|other| other.name == name) {
				Some("duplicate field name")
			} else {
				None
			};

			if let Some(problem) = problem {
				return Err(KvconfError::InvalidDestination {
					reason: format!("{problem}: {name:?}"),
				});
			}
		}

		Ok(())
	}
}
