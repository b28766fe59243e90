use std::fmt;
use std::rc::Rc;

use fxhash::FxHashMap;
use smallvec::SmallVec;

use crate::dependencies::Dependencies;
use crate::spec::{Getter, PropertySpec, Setter};
use crate::{Error, Model, Name, Result, Spec, Value};

const ROOT_NAME: &str = "Paragon";
const ANONYMOUS: &str = "<anonymous>";

thread_local! {
	static ROOT: Class = Class::new(ROOT_NAME, Kind::Root, None, Rc::new(Layout::default()));
}

#[derive(Clone)]
pub(crate) enum Accessor {
	Stored { initial: Value },
	Computed {
		get: Option<Getter>,
		set: Option<Setter>,
	},
}

#[derive(Clone)]
pub(crate) struct Descriptor {
	pub name: Name,
	pub accessor: Accessor,
}

/// Resolved property table of a class: every property of the chain,
/// ancestors first, overridden entries replaced in place.
#[derive(Clone, Default)]
pub(crate) struct Layout {
	pub descriptors: Vec<Descriptor>,
	pub index: FxHashMap<Name, usize>,
	pub dependencies: Dependencies,
}

impl Layout {
	fn define(&mut self, name: &Name, accessor: Accessor) {
		match self.index.get(name) {
			Some(&i) => self.descriptors[i].accessor = accessor,
			None => {
				self.index.insert(name.clone(), self.descriptors.len());
				self.descriptors.push(Descriptor {
					name: name.clone(),
					accessor,
				});
			}
		}
	}

	pub fn position(&self, name: &str) -> Option<usize> {
		self.index.get(name).copied()
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Kind {
	Root,
	Model,
	Plain,
}

/// A model class.
///
/// Cloning is cheap and clones compare equal: a `Class` is a handle.
#[derive(Clone)]
pub struct Class {
	body: Rc<ClassBody>,
}

struct ClassBody {
	name: Name,
	kind: Kind,
	parent: Option<Class>,
	declared: SmallVec<[Name; 4]>,
	layout: Rc<Layout>,
}

impl Class {
	fn new(name: &str, kind: Kind, parent: Option<Class>, layout: Rc<Layout>) -> Self {
		Class {
			body: Rc::new(ClassBody {
				name: Name::from(name),
				kind,
				parent,
				declared: SmallVec::new(),
				layout,
			}),
		}
	}

	/// The base class of every model class.
	pub fn root() -> Class {
		ROOT.with(Class::clone)
	}

	/// Subclass that declares no properties of its own.
	///
	/// Any class can be extended this way. When `parent` descends from the
	/// root the result can sit between two model classes.
	pub fn extend(name: &str, parent: &Class) -> Class {
		Class::new(
			name,
			Kind::Plain,
			Some(parent.clone()),
			parent.body.layout.clone(),
		)
	}

	/// Class outside of the root hierarchy.
	pub fn standalone(name: &str) -> Class {
		Class::new(name, Kind::Plain, None, Rc::new(Layout::default()))
	}

	pub fn create(spec: Spec, base: Option<&Class>) -> Result<Class> {
		create(spec, base)
	}

	pub fn name(&self) -> &str {
		&self.body.name
	}

	pub fn parent(&self) -> Option<&Class> {
		self.body.parent.as_ref()
	}

	pub fn is_root(&self) -> bool {
		self.body.kind == Kind::Root
	}

	/// `true` for `other` itself and all of its descendants.
	pub fn is_subclass_of(&self, other: &Class) -> bool {
		self.ancestors().any(|class| class == other)
	}

	pub fn descends_from_root(&self) -> bool {
		self.ancestors().any(Class::is_root)
	}

	/// This class followed by its parents, ending with the base-most one.
	pub fn ancestors(&self) -> impl Iterator<Item = &Class> {
		std::iter::successors(Some(self), |&class| class.parent())
	}

	/// Whether this class itself declares `name`.
	pub fn declares(&self, name: &str) -> bool {
		self.body.declared.iter().any(|d| &**d == name)
	}

	/// Whether instances have `name`, declared here or by an ancestor.
	pub fn has_property(&self, name: &str) -> bool {
		self.body.layout.index.contains_key(name)
	}

	pub fn properties(&self) -> impl Iterator<Item = &str> {
		self.body.layout.descriptors.iter().map(|d| &*d.name)
	}

	/// Properties computed from `name`, across the whole chain.
	pub fn dependents(&self, name: &str) -> &[Name] {
		self.body.layout.dependencies.dependents(name)
	}

	pub fn instantiate(&self) -> Result<Model> {
		if !self.descends_from_root() {
			return Err(Error::NotAModel {
				class: self.body.name.clone(),
			});
		}

		Ok(Model::new(self.clone()))
	}

	pub(crate) fn layout(&self) -> &Rc<Layout> {
		&self.body.layout
	}
}

/// Builds a model class from `spec`, deriving from `base` or the root class.
pub fn create(spec: Spec, base: Option<&Class>) -> Result<Class> {
	let parent = match base {
		Some(base) => base.clone(),
		None => Class::root(),
	};

	if !parent.descends_from_root() {
		return Err(Error::InvalidBaseClass {
			class: parent.body.name.clone(),
		});
	}

	let mut layout = Layout::clone(&parent.body.layout);
	let mut edges = Dependencies::new();
	let mut declared = SmallVec::new();

	for (name, property) in spec.iter() {
		let accessor = match property {
			PropertySpec::Literal(value) => Accessor::Stored {
				initial: value.clone(),
			},
			PropertySpec::Computed(computed) => {
				for source in &computed.depends {
					edges.depends_on(name, source);
				}
				Accessor::Computed {
					get: computed.get.clone(),
					set: computed.set.clone(),
				}
			}
		};

		layout.define(name, accessor);
		declared.push(name.clone());
	}

	for (name, property) in spec.iter() {
		if let PropertySpec::Computed(computed) = property {
			if let Some(missing) = computed.depends.iter().find(|d| !layout.index.contains_key(*d)) {
				return Err(Error::UnknownDependency {
					property: name.clone(),
					dependency: missing.clone(),
				});
			}
		}
	}

	layout.dependencies.merge(&edges);

	let name = spec.name().unwrap_or(ANONYMOUS);
	tracing::debug!(
		class = name,
		base = parent.name(),
		properties = layout.descriptors.len() as u64,
		"model class created"
	);

	Ok(Class {
		body: Rc::new(ClassBody {
			name: Name::from(name),
			kind: Kind::Model,
			parent: Some(parent),
			declared,
			layout: Rc::new(layout),
		}),
	})
}

impl PartialEq for Class {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}
}

impl Eq for Class {}

impl fmt::Debug for Class {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Class")
			.field("name", &self.body.name)
			.field("parent", &self.parent().map(Class::name))
			.field("properties", &self.properties().collect::<Vec<_>>())
			.finish()
	}
}
