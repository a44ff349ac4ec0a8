//! Command tokenization.
//!
//! Splits one line of console input into a command name and an ordered
//! sequence of parameters. Names are normalized to ASCII uppercase so
//! dispatch is case-insensitive; parameters keep their original case and
//! are validated by the handler that receives them.

use smallvec::SmallVec;

use crate::error::{ProtocolError, Result};

/// Default maximum number of parameters retained after the command name.
pub const DEFAULT_PARAM_CAP: usize = 5;

/// One tokenized console command.
///
/// Parameters borrow from the input line; `name` is owned because it is
/// case-normalized. A `Command` is consumed by a single dispatch call and
/// never retained across lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    /// Command name, ASCII-uppercased.
    pub name: String,
    raw: &'a str,
    params: SmallVec<[&'a str; DEFAULT_PARAM_CAP]>,
    truncated: bool,
}

impl<'a> Command<'a> {
    /// Get a parameter by index, if present.
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).copied()
    }

    /// All parameters, in input order.
    pub fn params(&self) -> &[&'a str] {
        &self.params
    }

    /// Number of retained parameters. Always `<=` the tokenizer cap.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// The stripped input line this command was tokenized from.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Length of the stripped input line, for statistics accounting.
    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }

    /// Whether tokens beyond the parameter cap were dropped.
    ///
    /// Truncation is deliberate policy, not an error: the dispatcher
    /// surfaces it to the operator as a warning.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

/// Tokenize one stripped input line into a [`Command`].
///
/// Tokens are separated by spaces; runs of spaces collapse, so no token is
/// empty. The first token becomes the (uppercased) name, the next `cap`
/// tokens become parameters in order, and any further tokens are dropped
/// with [`Command::truncated`] set.
///
/// Callers must skip blank lines before invoking this; a line with no
/// tokens yields [`ProtocolError::EmptyLine`].
pub fn tokenize(line: &str, cap: usize) -> Result<Command<'_>> {
    let mut tokens = line.split(' ').filter(|t| !t.is_empty());

    let name = tokens.next().ok_or(ProtocolError::EmptyLine)?.to_ascii_uppercase();

    let mut params = SmallVec::new();
    let mut truncated = false;
    for token in tokens {
        if params.len() == cap {
            truncated = true;
            break;
        }
        params.push(token);
    }

    Ok(Command {
        name,
        raw: line,
        params,
        truncated,
    })
}
