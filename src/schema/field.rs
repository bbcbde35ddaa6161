use crate::error::ValueError;
use crate::schema::kind::{FieldKind, ScalarKind};

/// What a list field does with the elements it already holds when bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existing {
	/// Append after the current elements.
	Keep,
	/// Clear the list, then append.
	Discard,
}

/// A value that can be parsed from normalized config text.
pub trait Scalar: Sized {
	const KIND: ScalarKind;

	fn parse_scalar(text: &str) -> Result<Self, ValueError>;
}

/// A destination slot that a config value can be bound into.
///
/// Implemented for every [`Scalar`], `Vec` of a scalar, and `Option` of
/// either. A failed `bind` leaves the field untouched.
pub trait Field {
	fn kind(&self) -> FieldKind;

	fn bind(&mut self, text: &str, existing: Existing) -> Result<(), ValueError>;
}

/// Parse a boolean, case-insensitively.
///
/// Accepts `true`, `t`, `yes`, `y`, `on`, `1` and `false`, `f`, `no`, `n`,
/// `off`, `0`.
pub fn parse_bool(text: &str) -> Result<bool, ValueError> {
	match text.to_ascii_lowercase().as_str() {
		"true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
		"false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
		_ => Err(ValueError::InvalidBool {
			value: text.to_string(),
		}),
	}
}

impl Scalar for String {
	const KIND: ScalarKind = ScalarKind::String;

	fn parse_scalar(text: &str) -> Result<Self, ValueError> {
		Ok(text.to_string())
	}
}

impl Scalar for bool {
	const KIND: ScalarKind = ScalarKind::Bool;

	fn parse_scalar(text: &str) -> Result<Self, ValueError> {
		parse_bool(text)
	}
}

// `str::parse` enforces the integer width, so out-of-range literals fail here.
macro_rules! impl_parsed_scalar {
	($error:ident => $($ty:ty => $kind:ident),+ $(,)?) => {
		$(
			impl Scalar for $ty {
				const KIND: ScalarKind = ScalarKind::$kind;

				fn parse_scalar(text: &str) -> Result<Self, ValueError> {
					text.parse().map_err(|source| ValueError::$error {
						value: text.to_string(),
						kind: Self::KIND,
						source,
					})
				}
			}
		)+
	};
}

impl_parsed_scalar!(InvalidInt =>
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	isize => Isize,
);

impl_parsed_scalar!(InvalidUint =>
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	usize => Usize,
);

/// Whether `text` spells infinity outright rather than overflowing to it.
fn is_infinity_literal(text: &str) -> bool {
	let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
	unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

// Float parsing saturates to infinity instead of failing, so range is checked here.
macro_rules! impl_float_scalar {
	($($ty:ty => $kind:ident),+ $(,)?) => {
		$(
			impl Scalar for $ty {
				const KIND: ScalarKind = ScalarKind::$kind;

				fn parse_scalar(text: &str) -> Result<Self, ValueError> {
					let value: $ty = text.parse().map_err(|source| ValueError::InvalidFloat {
						value: text.to_string(),
						kind: Self::KIND,
						source,
					})?;

					if value.is_infinite() && !is_infinity_literal(text) {
						return Err(ValueError::FloatOutOfRange {
							value: text.to_string(),
							kind: Self::KIND,
						});
					}

					Ok(value)
				}
			}
		)+
	};
}

impl_float_scalar!(
	f32 => F32,
	f64 => F64,
);

fn push_element<T>(list: &mut Vec<T>, element: T, existing: Existing) {
	if existing == Existing::Discard {
		list.clear();
	}
	list.push(element);
}

macro_rules! impl_field {
	($($ty:ty),+ $(,)?) => {
		$(
			impl Field for $ty {
				fn kind(&self) -> FieldKind {
					FieldKind::Scalar(<$ty as Scalar>::KIND)
				}

				fn bind(&mut self, text: &str, _existing: Existing) -> Result<(), ValueError> {
					*self = <$ty as Scalar>::parse_scalar(text)?;
					Ok(())
				}
			}

			impl Field for Option<$ty> {
				fn kind(&self) -> FieldKind {
					FieldKind::Scalar(<$ty as Scalar>::KIND)
				}

				fn bind(&mut self, text: &str, _existing: Existing) -> Result<(), ValueError> {
					*self = Some(<$ty as Scalar>::parse_scalar(text)?);
					Ok(())
				}
			}

			impl Field for Vec<$ty> {
				fn kind(&self) -> FieldKind {
					FieldKind::List(<$ty as Scalar>::KIND)
				}

				fn bind(&mut self, text: &str, existing: Existing) -> Result<(), ValueError> {
					let element = <$ty as Scalar>::parse_scalar(text)?;
					push_element(self, element, existing);
					Ok(())
				}
			}

			impl Field for Option<Vec<$ty>> {
				fn kind(&self) -> FieldKind {
					FieldKind::List(<$ty as Scalar>::KIND)
				}

				fn bind(&mut self, text: &str, existing: Existing) -> Result<(), ValueError> {
					let element = <$ty as Scalar>::parse_scalar(text)?;
					push_element(self.get_or_insert_with(Vec::new), element, existing);
					Ok(())
				}
			}
		)+
	};
}

impl_field!(
	String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
);
