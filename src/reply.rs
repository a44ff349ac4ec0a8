//! Structured handler replies.
//!
//! Handlers emit `Reply` values instead of formatting wire text themselves;
//! [`Reply::render`] is the single point where replies become output lines.
//! This keeps handler logic assertable without string matching.

/// Per-character-class counts for the echo breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClasses {
    /// ASCII letters.
    pub letters: usize,
    /// ASCII digits.
    pub digits: usize,
    /// Space characters.
    pub spaces: usize,
    /// Everything else.
    pub special: usize,
}

impl CharClasses {
    /// Classify every character of `text` into letter/digit/space/special.
    pub fn classify(text: &str) -> Self {
        let mut classes = Self::default();
        for ch in text.chars() {
            if ch.is_ascii_alphabetic() {
                classes.letters += 1;
            } else if ch.is_ascii_digit() {
                classes.digits += 1;
            } else if ch == ' ' {
                classes.spaces += 1;
            } else {
                classes.special += 1;
            }
        }
        classes
    }
}

/// One structured reply from a handler to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A command completed and did something.
    Success(String),
    /// Input was rejected; `hint` points the operator at HELP.
    Error {
        /// What was wrong with the input.
        message: String,
        /// Optional follow-up line, e.g. a HELP pointer.
        hint: Option<String>,
    },
    /// Something non-fatal went wrong (hardware failure, dropped tokens).
    Warning(String),
    /// A titled block of report lines (STATS, INFO, HELP).
    Report {
        /// Block title.
        title: String,
        /// Report body lines, already formatted.
        lines: Vec<String>,
    },
    /// Echoed input with its character-class breakdown.
    Echo {
        /// The echoed text.
        text: String,
        /// Classification of `text`.
        classes: CharClasses,
    },
    /// A verbatim line (banner text).
    Text(String),
}

impl Reply {
    /// Render to output lines.
    pub fn render(&self) -> Vec<String> {
        match self {
            Reply::Success(text) => vec![format!("SUCCESS: {text}")],
            Reply::Error { message, hint } => {
                let mut lines = vec![format!("ERROR: {message}")];
                if let Some(hint) = hint {
                    lines.push(hint.clone());
                }
                lines
            }
            Reply::Warning(text) => vec![format!("WARNING: {text}")],
            Reply::Report { title, lines } => {
                let mut out = Vec::with_capacity(lines.len() + 1);
                out.push(format!("==={title}==="));
                out.extend(lines.iter().cloned());
                out
            }
            Reply::Echo { text, classes } => vec![format!(
                "ECHO: '{}' (Letters: {}, Digits: {}, Spaces: {}, Special: {})",
                text, classes.letters, classes.digits, classes.spaces, classes.special
            )],
            Reply::Text(line) => vec![line.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_counts_each_class() {
        let classes = CharClasses::classify("abc 123!?");
        assert_eq!(
            classes,
            CharClasses {
                letters: 3,
                digits: 3,
                spaces: 1,
                special: 2,
            }
        );
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(CharClasses::classify(""), CharClasses::default());
    }

    #[test]
    fn test_render_success() {
        let lines = Reply::Success("EXTERNAL LED turned off".into()).render();
        assert_eq!(lines, vec!["SUCCESS: EXTERNAL LED turned off"]);
    }

    #[test]
    fn test_render_error_with_hint() {
        let reply = Reply::Error {
            message: "unknown command `FOO`!".into(),
            hint: Some("Type `HELP` for available commands.".into()),
        };
        assert_eq!(
            reply.render(),
            vec![
                "ERROR: unknown command `FOO`!",
                "Type `HELP` for available commands.",
            ]
        );
    }

    #[test]
    fn test_render_report_block() {
        let reply = Reply::Report {
            title: "Statistics".into(),
            lines: vec!["Total Messages: 3".into()],
        };
        assert_eq!(reply.render(), vec!["===Statistics===", "Total Messages: 3"]);
    }

    #[test]
    fn test_render_echo_breakdown() {
        let reply = Reply::Echo {
            text: "hi 5".into(),
            classes: CharClasses::classify("hi 5"),
        };
        assert_eq!(
            reply.render(),
            vec!["ECHO: 'hi 5' (Letters: 2, Digits: 1, Spaces: 1, Special: 0)"]
        );
    }
}
