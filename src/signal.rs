use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::{Model, Value};

pub type Listener = Rc<dyn Fn(&Change<'_>)>;

/// Arguments of a change notification.
#[derive(Clone, Copy)]
pub struct Change<'a> {
	pub value: &'a Value,
	pub name: &'a str,
	pub previous: &'a Value,
	pub model: &'a Model,
}

impl<'a> fmt::Debug for Change<'a> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Change")
			.field("value", self.value)
			.field("name", &self.name)
			.field("previous", self.previous)
			.finish()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Synchronous notification channel.
///
/// Listeners run in the order they were added. Dispatch works on a
/// snapshot of the listener list, so a listener may add or remove
/// listeners of the same signal while it runs.
#[derive(Default)]
pub struct Signal {
	listeners: RefCell<SmallVec<[(ListenerId, Listener); 2]>>,
	next_id: Cell<u64>,
}

impl Signal {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&self, listener: impl Fn(&Change<'_>) + 'static) -> ListenerId {
		let id = ListenerId(self.next_id.get());
		self.next_id.set(id.0 + 1);
		let listener: Listener = Rc::new(listener);
		self.listeners.borrow_mut().push((id, listener));
		id
	}

	/// Returns `false` if the listener was not registered.
	pub fn remove(&self, id: ListenerId) -> bool {
		let mut listeners = self.listeners.borrow_mut();
		match listeners.iter().position(|(lid, _)| *lid == id) {
			Some(index) => {
				listeners.remove(index);
				true
			}
			None => false,
		}
	}

	pub fn clear(&self) {
		self.listeners.borrow_mut().clear();
	}

	pub fn len(&self) -> usize {
		self.listeners.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.listeners.borrow().is_empty()
	}

	pub fn dispatch(&self, change: &Change<'_>) {
		let listeners = {
			let borrow = self.listeners.borrow();
			borrow
				.iter()
				.map(|(_, listener)| listener.clone())
				.collect::<SmallVec<[Listener; 4]>>()
		};

		for listener in listeners {
			listener(change);
		}
	}
}

impl fmt::Debug for Signal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("listeners", &self.len())
			.finish()
	}
}
