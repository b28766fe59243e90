use thiserror::Error;

use crate::Name;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	#[error("base class `{class}` must inherit from Paragon")]
	InvalidBaseClass { class: Name },

	#[error("class `{class}` does not inherit from Paragon and cannot be instantiated as a model")]
	NotAModel { class: Name },

	#[error("property `{property}` depends on `{dependency}` which is not declared")]
	UnknownDependency { property: Name, dependency: Name },

	#[error("unknown property `{name}`")]
	UnknownProperty { name: Name },

	#[error("property `{name}` has no setter")]
	ReadOnly { name: Name },

	#[error("{0}")]
	Custom(String),
}

impl Error {
	/// Error for user accessors that need to fail with their own message.
	pub fn custom(message: impl Into<String>) -> Self {
		Error::Custom(message.into())
	}
}
