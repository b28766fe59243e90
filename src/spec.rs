use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::{Class, Model, Name, Result, Value};

pub type Getter = Rc<dyn Fn(&Model) -> Result<Value>>;
pub type Setter = Rc<dyn Fn(&Model, Value) -> Result<()>>;

/// Declaration of a single property.
///
/// Plain values convert into [`PropertySpec::Literal`], so a spec entry
/// `("foo", 1)` is the same as `("foo", PropertySpec::Literal(1.into()))`.
#[derive(Clone)]
pub enum PropertySpec {
	Literal(Value),
	Computed(Computed),
}

/// User accessors for a computed property.
#[derive(Clone, Default)]
pub struct Computed {
	pub(crate) get: Option<Getter>,
	pub(crate) set: Option<Setter>,
	pub(crate) depends: SmallVec<[Name; 2]>,
}

impl Computed {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(mut self, func: impl Fn(&Model) -> Result<Value> + 'static) -> Self {
		self.get = Some(Rc::new(func));
		self
	}

	pub fn set(mut self, func: impl Fn(&Model, Value) -> Result<()> + 'static) -> Self {
		self.set = Some(Rc::new(func));
		self
	}

	/// Names of the properties this one is computed from. Order is kept.
	pub fn depends<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for name in names {
			let name = name.as_ref();
			if !self.depends.iter().any(|d| &**d == name) {
				self.depends.push(Name::from(name));
			}
		}
		self
	}

	pub fn dependencies(&self) -> &[Name] {
		&self.depends
	}
}

impl fmt::Debug for Computed {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Computed")
			.field("get", &self.get.is_some())
			.field("set", &self.set.is_some())
			.field("depends", &self.depends)
			.finish()
	}
}

impl fmt::Debug for PropertySpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PropertySpec::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
			PropertySpec::Computed(computed) => computed.fmt(f),
		}
	}
}

impl From<Computed> for PropertySpec {
	fn from(computed: Computed) -> Self {
		PropertySpec::Computed(computed)
	}
}

impl From<Value> for PropertySpec {
	fn from(value: Value) -> Self {
		PropertySpec::Literal(value)
	}
}

macro_rules! literal {
	($($t:ty),*) => {
		$(
			impl From<$t> for PropertySpec {
				fn from(value: $t) -> Self {
					PropertySpec::Literal(value.into())
				}
			}
		)*
	};
}

literal!((), bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, &str, String, Rc<str>);

impl<T> From<Option<T>> for PropertySpec
where
	T: Into<Value>,
{
	fn from(value: Option<T>) -> Self {
		PropertySpec::Literal(value.into())
	}
}

impl<T> From<Vec<T>> for PropertySpec
where
	T: Into<Value>,
{
	fn from(value: Vec<T>) -> Self {
		PropertySpec::Literal(value.into())
	}
}

/// Ordered map of property declarations, the input of the class builder.
#[derive(Clone, Debug, Default)]
pub struct Spec {
	name: Option<Name>,
	entries: Vec<(Name, PropertySpec)>,
}

impl Spec {
	pub fn new() -> Self {
		Self::default()
	}

	/// Name given to the class built from this spec.
	#[must_use]
	pub fn named(mut self, name: &str) -> Self {
		self.name = Some(Name::from(name));
		self
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	#[must_use]
	pub fn property(mut self, name: &str, spec: impl Into<PropertySpec>) -> Self {
		self.insert(name, spec);
		self
	}

	/// Declaring a name twice replaces the earlier declaration in place.
	pub fn insert(&mut self, name: &str, spec: impl Into<PropertySpec>) {
		let spec = spec.into();
		match self.entries.iter_mut().find(|(n, _)| &**n == name) {
			Some(entry) => entry.1 = spec,
			None => self.entries.push((Name::from(name), spec)),
		}
	}

	pub fn get(&self, name: &str) -> Option<&PropertySpec> {
		self.entries
			.iter()
			.find(|(n, _)| &**n == name)
			.map(|(_, spec)| spec)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Name, &PropertySpec)> {
		self.entries.iter().map(|(name, spec)| (name, spec))
	}

	/// Builds a class deriving directly from the root class.
	pub fn create(self) -> Result<Class> {
		crate::create(self, None)
	}

	/// Builds a class deriving from `base`.
	pub fn extend(self, base: &Class) -> Result<Class> {
		crate::create(self, Some(base))
	}
}
