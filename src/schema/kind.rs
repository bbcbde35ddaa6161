use std::fmt;

/// Scalar types a field (or list element) can be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
	String,
	Bool,
	I8,
	I16,
	I32,
	I64,
	Isize,
	U8,
	U16,
	U32,
	U64,
	Usize,
	F32,
	F64,
}

impl ScalarKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ScalarKind::String => "string",
			ScalarKind::Bool => "bool",
			ScalarKind::I8 => "i8",
			ScalarKind::I16 => "i16",
			ScalarKind::I32 => "i32",
			ScalarKind::I64 => "i64",
			ScalarKind::Isize => "isize",
			ScalarKind::U8 => "u8",
			ScalarKind::U16 => "u16",
			ScalarKind::U32 => "u32",
			ScalarKind::U64 => "u64",
			ScalarKind::Usize => "usize",
			ScalarKind::F32 => "f32",
			ScalarKind::F64 => "f64",
		}
	}
}

impl fmt::Display for ScalarKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Declared kind of a destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	Scalar(ScalarKind),
	/// Ordered list of scalars; repeated keys append.
	List(ScalarKind),
	/// A field whose type cannot be bound from text, named for diagnostics.
	Unsupported(&'static str),
}

impl FieldKind {
	pub fn is_list(&self) -> bool {
		matches!(self, FieldKind::List(_))
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldKind::Scalar(kind) => write!(f, "{kind}"),
			FieldKind::List(kind) => write!(f, "list of {kind}"),
			FieldKind::Unsupported(name) => f.write_str(name),
		}
	}
}
