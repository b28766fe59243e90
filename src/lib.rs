//! Observable property models.
//!
//! A [`Spec`] declares stored and computed properties. [`create`] turns it
//! into a [`Class`], optionally deriving from another model class, and
//! [`Class::instantiate`] produces [`Model`]s whose writes notify
//! per-property [`Signal`]s, the signals of dependent computed properties,
//! and one aggregate `changed` signal per logical update.

pub mod macros;

mod class;
mod dependencies;
mod error;
mod model;
mod session;
mod signal;
mod spec;
mod value;

use std::rc::Rc;

pub use class::{create, Class};
pub use error::{Error, Result};
pub use model::{Model, WeakModel};
pub use session::in_session;
pub use signal::{Change, Listener, ListenerId, Signal};
pub use spec::{Computed, Getter, PropertySpec, Setter, Spec};
pub use value::Value;

/// Property name.
pub type Name = Rc<str>;
