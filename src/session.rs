use std::cell::{Cell, RefCell};

use fxhash::FxHashSet;

use crate::Name;

/// Identity of a model instance, never reused on this thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ModelId(u64);

type Notified = FxHashSet<(ModelId, Name)>;

thread_local! {
	static SESSION: RefCell<Option<Notified>> = const { RefCell::new(None) };
	static NEXT_MODEL_ID: Cell<u64> = const { Cell::new(0) };
}

impl ModelId {
	pub fn next() -> Self {
		NEXT_MODEL_ID.with(|next| {
			let id = next.get();
			next.set(id + 1);
			ModelId(id)
		})
	}
}

/// Whether a property write is currently in progress on this thread.
pub fn in_session() -> bool {
	SESSION.with(|s| s.borrow().is_some())
}

/// Guard for one property write.
///
/// The outermost write opens the update session and closes it when the
/// guard drops, also on early return and unwind.
pub(crate) struct Session {
	root: bool,
}

impl Session {
	pub fn enter(model: ModelId, name: &Name) -> Self {
		let session = Session::join();
		if session.root {
			tracing::trace!(property = &**name, "update session opened");
		}

		SESSION.with(|s| {
			if let Some(notified) = s.borrow_mut().as_mut() {
				notified.insert((model, name.clone()));
			}
		});

		session
	}

	/// Joins the active session, opening one if there is none.
	pub fn join() -> Self {
		SESSION.with(|s| {
			let mut session = s.borrow_mut();
			let root = session.is_none();
			if root {
				*session = Some(Notified::default());
			}

			Session { root }
		})
	}

	pub fn is_root(&self) -> bool {
		self.root
	}

	/// Marks `name` as notified.
	///
	/// Returns `false` if it was already notified in the active session.
	pub fn mark(model: ModelId, name: &Name) -> bool {
		SESSION.with(|s| match s.borrow_mut().as_mut() {
			Some(notified) => notified.insert((model, name.clone())),
			None => true,
		})
	}
}

impl Drop for Session {
	fn drop(&mut self) {
		if self.root {
			SESSION.with(|s| s.borrow_mut().take());
			tracing::trace!("update session closed");
		}
	}
}
