//! Console command handlers.
//!
//! One module per command, a `Registry` that owns the command table and
//! dispatch, and the `Context` handed to every handler. Handlers validate
//! their own parameters and emit structured [`crate::reply::Reply`] values;
//! they never format wire text.

mod context;
mod echo;
mod help;
mod info;
mod led;
mod registry;
mod reset;
mod stats;

pub use context::{Context, Handler};
pub use help::help_listing;
pub use registry::Registry;
