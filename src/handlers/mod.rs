//! Event handlers and dispatching.
//!
//! This module contains the event dispatcher that processes events
//! from the event bus and executes the corresponding controller calls.

pub mod dispatcher;

pub use dispatcher::{DispatchError, Dispatcher, Reply};
