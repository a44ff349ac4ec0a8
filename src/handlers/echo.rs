//! ECHO command handler.

use async_trait::async_trait;
use sercon_proto::Command;

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::reply::{CharClasses, Reply};

/// Handler for the ECHO command.
///
/// `ECHO <text>`
///
/// Echoes its parameters back with a character-class breakdown. The text is
/// the tokenized parameter list, so the parameter cap applies to it like any
/// other command.
pub struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        if cmd.param_count() == 0 {
            return Err(HandlerError::NeedMoreParams);
        }

        let text = cmd.params().join(" ");
        let classes = CharClasses::classify(&text);
        ctx.send(Reply::Echo { text, classes }).await
    }
}
