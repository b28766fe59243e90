use std::sync::{Arc, Mutex, MutexGuard};

use mockall::*;
use paragon::Change;

#[automock]
pub trait Spy {
	fn notified(&self, name: String, value: String);
}

/// Spy handle that listeners can capture by value.
#[derive(Clone)]
pub struct SharedMock(Arc<Mutex<MockSpy>>);

impl SharedMock {
	pub fn new() -> SharedMock {
		SharedMock(Arc::new(Mutex::new(MockSpy::new())))
	}

	pub fn get(&self) -> MutexGuard<'_, MockSpy> {
		self.0.lock().unwrap()
	}

	/// Records the name and the new value of a change.
	pub fn record(&self, change: &Change<'_>) {
		self.get()
			.notified(change.name.to_owned(), change.value.to_string());
	}
}
