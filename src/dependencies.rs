use fxhash::FxHashMap;
use smallvec::SmallVec;

use crate::Name;

pub(crate) type Dependents = SmallVec<[Name; 4]>;

/// Maps a source property to the properties computed from it.
#[derive(Clone, Debug, Default)]
pub(crate) struct Dependencies {
	dependents: FxHashMap<Name, Dependents>,
}

impl Dependencies {
	pub fn new() -> Self {
		Self {
			dependents: FxHashMap::default(),
		}
	}

	/// Records that `dependent` is computed from `source`.
	pub fn depends_on(&mut self, dependent: &Name, source: &Name) {
		let list = self.dependents.entry(source.clone()).or_default();
		if !list.contains(dependent) {
			list.push(dependent.clone());
		}
	}

	/// Union of both tables. Existing edges are kept, new ones appended.
	pub fn merge(&mut self, other: &Dependencies) {
		for (source, dependents) in &other.dependents {
			for dependent in dependents {
				self.depends_on(dependent, source);
			}
		}
	}

	pub fn dependents(&self, source: &str) -> &[Name] {
		self.dependents
			.get(source)
			.map(|list| list.as_slice())
			.unwrap_or(&[])
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Name, &[Name])> {
		self.dependents
			.iter()
			.map(|(source, dependents)| (source, dependents.as_slice()))
	}
}
