//! HELP command handler.

use async_trait::async_trait;
use sercon_proto::Command;

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::reply::Reply;

/// Static help text for commands: (name, [usage, description]).
const HELP_TOPICS: &[(&str, &[&str])] = &[
    (
        "ECHO",
        &[
            "ECHO <text>",
            "Echo text back with a character-class breakdown.",
        ],
    ),
    (
        "HELP",
        &[
            "HELP [command]",
            "Show help for a command, or list all commands.",
        ],
    ),
    ("INFO", &["INFO", "Display system information."]),
    (
        "LED",
        &[
            "LED ON|OFF [INTERNAL|EXTERNAL] [brightness]",
            "Control LED state & brightness (0-255).",
        ],
    ),
    ("RESET", &["RESET", "Reset current usage statistics."]),
    ("STATS", &["STATS", "Display current usage statistics."]),
];

/// The full command listing, also printed under the startup banner.
pub fn help_listing() -> Reply {
    let mut lines = Vec::with_capacity(HELP_TOPICS.len() * 2);
    for (_, text) in HELP_TOPICS {
        lines.push(text[0].to_string());
        for detail in &text[1..] {
            lines.push(format!("    - {detail}"));
        }
    }
    Reply::Report {
        title: "AVAILABLE COMMANDS".to_string(),
        lines,
    }
}

/// Handler for the HELP command.
///
/// `HELP [command]`
pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        if cmd.param_count() > 1 {
            return Err(HandlerError::TooManyParams);
        }

        let reply = match cmd.arg(0) {
            None => help_listing(),
            Some(topic) => {
                let entry = HELP_TOPICS
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(topic));
                match entry {
                    Some((name, text)) => Reply::Report {
                        title: format!("HELP: {name}"),
                        lines: text.iter().map(|s| s.to_string()).collect(),
                    },
                    None => {
                        return Err(HandlerError::InvalidParameter {
                            value: topic.to_string(),
                            expected: "a command name",
                        });
                    }
                }
            }
        };

        ctx.send(reply).await
    }
}
