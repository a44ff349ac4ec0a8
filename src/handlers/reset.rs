//! RESET command handler.

use async_trait::async_trait;
use sercon_proto::Command;

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::reply::Reply;

/// Handler for the RESET command.
///
/// `RESET`
///
/// Zeroes all usage counters and restarts the session clock. The RESET line
/// itself was counted before the handler ran, so the wipe covers it too.
pub struct ResetHandler;

#[async_trait]
impl Handler for ResetHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        if cmd.param_count() > 0 {
            return Err(HandlerError::TooManyParams);
        }

        ctx.stats.reset();
        ctx.send(Reply::Success("reset all statistics".to_string()))
            .await
    }
}
