//! taskpad: a personal task list that follows you between devices.
//!
//! The library is the whole application minus the terminal front end:
//! the task store with write-through persistence ([`store`]), the
//! capped history and notification logs ([`model`], [`ops`]), and the
//! sync-code exchange with preview, merge/replace, and one-shot undo
//! ([`sync`]).

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod store;
pub mod sync;
