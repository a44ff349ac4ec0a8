//! STATS command handler.

use async_trait::async_trait;
use sercon_proto::Command;

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::reply::Reply;

/// Handler for the STATS command.
///
/// `STATS`
///
/// Reports the session usage counters and per-command usage. Read-only.
pub struct StatsHandler;

#[async_trait]
impl Handler for StatsHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        if cmd.param_count() > 0 {
            return Err(HandlerError::TooManyParams);
        }

        // The request line is already in the counters; report the state as
        // of the previous line so RESET then STATS reads all zeroes.
        let snap = ctx.stats.snapshot();
        let messages = snap.messages.saturating_sub(1);
        let chars = snap.chars.saturating_sub(cmd.raw_len() as u64);
        let bytes = snap.bytes.saturating_sub(cmd.raw_len() as u64 + 1);

        let mut lines = vec![
            format!("Total Messages: {messages}"),
            format!("Runtime: {:.2}", snap.elapsed.as_secs_f64()),
            format!("Total Bytes: {bytes}"),
            format!("Total Chars: {chars}"),
        ];

        let usage = ctx.registry.command_stats();
        if !usage.is_empty() {
            lines.push("Commands Used:".to_string());
            for (name, count) in usage {
                lines.push(format!("  {name}: {count}"));
            }
        }

        ctx.send(Reply::Report {
            title: "Statistics".to_string(),
            lines,
        })
        .await
    }
}
