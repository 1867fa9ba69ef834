//! Decision core: who may see, create, edit, or transition what.
//!
//! Everything in this crate is a pure function over an explicit
//! [`guard::Identity`] — no I/O, no ambient session state. The API
//! layer fetches the entities, calls in here for the decision, and
//! only then touches the store.

pub mod guard;
pub mod validate;
pub mod visibility;
pub mod workflow;

mod error;

pub use error::{Error, Result};
