//! Decoded RPC values as delivered by the editor's notification callback.

/// One positional argument of an editor notification.
///
/// The RPC layer decodes integers into whatever width the wire used, so the
/// conversions below funnel every fixed-width integer into [`Value::Int`] or
/// [`Value::UInt`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Nil,
	Bool(bool),
	Int(i64),
	UInt(u64),
	Float(f64),
	Str(String),
	Array(Vec<Value>),
}

impl Value {
	/// Short name of the variant, used in decode errors.
	pub const fn type_name(&self) -> &'static str {
		match self {
			Self::Nil => "nil",
			Self::Bool(_) => "boolean",
			Self::Int(_) | Self::UInt(_) => "integer",
			Self::Float(_) => "float",
			Self::Str(_) => "string",
			Self::Array(_) => "array",
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Normalizes an editor boolean option (`0`/`1` of any integer width, or a
	/// real boolean). Only `1` is true, matching how the editor reports flags.
	pub const fn as_flag(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			Self::Int(n) => Some(*n == 1),
			Self::UInt(n) => Some(*n == 1),
			_ => None,
		}
	}
}

macro_rules! impl_from_int {
	($variant:ident as $wide:ty: $($ty:ty),+) => {
		$(
			impl From<$ty> for Value {
				fn from(n: $ty) -> Self {
					Self::$variant(n as $wide)
				}
			}
		)+
	};
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize);
impl_from_int!(UInt as u64: u8, u16, u32, u64, usize);

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<f64> for Value {
	fn from(f: f64) -> Self {
		Self::Float(f)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::Str(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::Str(s)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::Array(items)
	}
}
