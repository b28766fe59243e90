use std::fmt;
use std::rc::Rc;

/// Dynamic value stored in and carried by model properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
	#[default]
	Undefined,
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(Rc<str>),
	List(Rc<[Value]>),
}

impl Value {
	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(f) => Some(*f),
			Value::Int(i) => Some(*i as f64),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(items) => Some(items),
			_ => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Null => f.write_str("null"),
			Value::Bool(b) => b.fmt(f),
			Value::Int(i) => i.fmt(f),
			Value::Float(x) => x.fmt(f),
			Value::Str(s) => f.write_str(s),
			Value::List(items) => {
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(",")?;
					}
					item.fmt(f)?;
				}
				Ok(())
			}
		}
	}
}

impl From<()> for Value {
	fn from(_: ()) -> Self {
		Value::Undefined
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

macro_rules! from_int {
	($($t:ty),*) => {
		$(
			impl From<$t> for Value {
				fn from(i: $t) -> Self {
					Value::Int(i as i64)
				}
			}
		)*
	};
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
	fn from(x: f32) -> Self {
		Value::Float(x as f64)
	}
}

impl From<f64> for Value {
	fn from(x: f64) -> Self {
		Value::Float(x)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::Str(Rc::from(s))
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::Str(Rc::from(s))
	}
}

impl From<Rc<str>> for Value {
	fn from(s: Rc<str>) -> Self {
		Value::Str(s)
	}
}

impl<T> From<Option<T>> for Value
where
	T: Into<Value>,
{
	fn from(option: Option<T>) -> Self {
		match option {
			Some(value) => value.into(),
			None => Value::Null,
		}
	}
}

impl<T> From<Vec<T>> for Value
where
	T: Into<Value>,
{
	fn from(items: Vec<T>) -> Self {
		Value::List(items.into_iter().map(Into::into).collect())
	}
}
