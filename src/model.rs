use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::class::{Accessor, Layout};
use crate::dependencies::Dependents;
use crate::session::{ModelId, Session};
use crate::{Change, Class, Error, Name, Result, Signal, Value};

/// Instance of a model class.
///
/// Cloning returns another handle to the same instance.
#[derive(Clone)]
pub struct Model {
	body: Rc<ModelBody>,
}

struct ModelBody {
	id: ModelId,
	class: Class,
	layout: Rc<Layout>,
	slots: Vec<RefCell<Value>>,
	channels: Vec<Signal>,
	changed: Signal,
}

pub struct WeakModel {
	body: Weak<ModelBody>,
}

impl WeakModel {
	pub fn upgrade(&self) -> Option<Model> {
		self.body.upgrade().map(|body| Model { body })
	}
}

impl Clone for WeakModel {
	fn clone(&self) -> Self {
		WeakModel {
			body: self.body.clone(),
		}
	}
}

impl Model {
	pub(crate) fn new(class: Class) -> Self {
		let layout = class.layout().clone();

		let slots = layout
			.descriptors
			.iter()
			.map(|descriptor| match &descriptor.accessor {
				Accessor::Stored { initial } => RefCell::new(initial.clone()),
				Accessor::Computed { .. } => RefCell::new(Value::Undefined),
			})
			.collect();

		let channels = layout.descriptors.iter().map(|_| Signal::new()).collect();

		let model = Model {
			body: Rc::new(ModelBody {
				id: ModelId::next(),
				class,
				layout,
				slots,
				channels,
				changed: Signal::new(),
			}),
		};

		// Links go first so they run before any user listener.
		for (source, dependents) in model.body.layout.dependencies.iter() {
			if let Some(index) = model.body.layout.position(source) {
				let dependents: Dependents = dependents.iter().cloned().collect();
				model.body.channels[index].add(move |change| change.model.forward(&dependents, change));
			}
		}

		tracing::debug!(
			class = model.body.class.name(),
			properties = model.body.channels.len() as u64,
			"model instantiated"
		);

		model
	}

	pub fn class(&self) -> &Class {
		&self.body.class
	}

	pub fn is_a(&self, class: &Class) -> bool {
		self.body.class.is_subclass_of(class)
	}

	pub fn has_property(&self, name: &str) -> bool {
		self.body.layout.position(name).is_some()
	}

	pub fn properties(&self) -> impl Iterator<Item = &str> {
		self.body.layout.descriptors.iter().map(|d| &*d.name)
	}

	pub fn downgrade(&self) -> WeakModel {
		WeakModel {
			body: Rc::downgrade(&self.body),
		}
	}

	/// Reads a property through its getter.
	pub fn get(&self, name: &str) -> Result<Value> {
		self.read(self.position(name)?)
	}

	/// Writes a property and notifies listeners. Returns the assigned value.
	///
	/// The property's own channel fires on every call. Channels of computed
	/// properties depending on it fire at most once per update session, and
	/// the aggregate [`Model::changed`] channel fires once, from the
	/// outermost write only.
	pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<Value> {
		let value = value.into();
		let index = self.position(name)?;
		let descriptor = &self.body.layout.descriptors[index];

		if let Accessor::Computed { set: None, .. } = descriptor.accessor {
			return Err(Error::ReadOnly {
				name: descriptor.name.clone(),
			});
		}

		let previous = self.read(index)?;

		let session = Session::enter(self.body.id, &descriptor.name);
		tracing::trace!(property = name, root = session.is_root(), "set");

		self.write(index, value.clone())?;

		let change = Change {
			value: &value,
			name: &descriptor.name,
			previous: &previous,
			model: self,
		};

		self.body.channels[index].dispatch(&change);

		if session.is_root() {
			self.body.changed.dispatch(&change);
		}

		std::mem::drop(session);

		Ok(value)
	}

	/// Channel fired when `name` changes, directly or through a dependency.
	pub fn property_changed(&self, name: &str) -> Result<&Signal> {
		let index = self.position(name)?;
		Ok(&self.body.channels[index])
	}

	/// Channel fired once per update session for any change.
	pub fn changed(&self) -> &Signal {
		&self.body.changed
	}

	fn position(&self, name: &str) -> Result<usize> {
		self.body
			.layout
			.position(name)
			.ok_or_else(|| Error::UnknownProperty {
				name: Name::from(name),
			})
	}

	fn read(&self, index: usize) -> Result<Value> {
		match &self.body.layout.descriptors[index].accessor {
			Accessor::Stored { .. } => Ok(self.body.slots[index].borrow().clone()),
			Accessor::Computed { get: Some(get), .. } => get(self),
			Accessor::Computed { get: None, .. } => Ok(Value::Undefined),
		}
	}

	fn write(&self, index: usize, value: Value) -> Result<()> {
		let descriptor = &self.body.layout.descriptors[index];
		match &descriptor.accessor {
			Accessor::Stored { .. } => {
				*self.body.slots[index].borrow_mut() = value;
				Ok(())
			}
			Accessor::Computed { set: Some(set), .. } => set(self, value),
			Accessor::Computed { set: None, .. } => Err(Error::ReadOnly {
				name: descriptor.name.clone(),
			}),
		}
	}

	/// Re-dispatches a source change on the channels of its dependents.
	///
	/// A source dispatched by hand outside of a write gets a session of its
	/// own, so dependency cycles still terminate.
	fn forward(&self, dependents: &[Name], change: &Change<'_>) {
		let _session = Session::join();
		for dependent in dependents {
			if !Session::mark(self.body.id, dependent) {
				continue;
			}

			if let Some(index) = self.body.layout.position(dependent) {
				tracing::trace!(source = change.name, dependent = &**dependent, "forward");
				self.body.channels[index].dispatch(&Change {
					value: change.value,
					name: dependent,
					previous: change.previous,
					model: self,
				});
			}
		}
	}
}

impl PartialEq for Model {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}
}

impl Eq for Model {}

impl fmt::Debug for Model {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut map = f.debug_map();
		for (index, descriptor) in self.body.layout.descriptors.iter().enumerate() {
			if let Accessor::Stored { .. } = descriptor.accessor {
				map.entry(&descriptor.name, &*self.body.slots[index].borrow());
			}
		}
		map.finish()
	}
}
