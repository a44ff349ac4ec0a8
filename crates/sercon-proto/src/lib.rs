//! # sercon-proto
//!
//! Line framing and command tokenization for the sercond serial console.
//!
//! ## Features
//!
//! - Tokenization of console input lines into a command name plus a bounded,
//!   ordered parameter list
//! - Case-insensitive command names (normalized to ASCII uppercase)
//! - Explicit, observable truncation when a line carries more parameters
//!   than the configured cap
//! - Optional Tokio integration: a newline-delimited codec with a length
//!   limit and partial-line flush for timeout-bounded readers

#![deny(clippy::all)]
#![warn(missing_docs)]

//! ## Quick Start
//!
//! ```rust
//! use sercon_proto::tokenize;
//!
//! let cmd = tokenize("led ON EXTERNAL 128", 5).expect("non-empty line");
//! assert_eq!(cmd.name, "LED");
//! assert_eq!(cmd.arg(0), Some("ON"));
//! assert_eq!(cmd.param_count(), 3);
//! ```

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;

pub use command::{tokenize, Command, DEFAULT_PARAM_CAP};
pub use error::{ProtocolError, Result};
#[cfg(feature = "tokio")]
pub use line::LineCodec;
