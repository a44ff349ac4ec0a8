//! Handler context and core types.

use async_trait::async_trait;
use sercon_proto::Command;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::device::{OutputDevice, SystemInfo};
use crate::error::{HandlerError, HandlerResult};
use crate::reply::Reply;
use crate::stats::UsageStats;

use super::registry::Registry;

/// Handler context passed to each command handler.
///
/// Borrows the console loop's state for the duration of one dispatch call;
/// nothing in here outlives the line being processed.
pub struct Context<'a> {
    /// Daemon configuration.
    pub config: &'a Config,
    /// Session usage counters.
    pub stats: &'a mut UsageStats,
    /// LED output bank.
    pub output: &'a dyn OutputDevice,
    /// Platform facts for INFO.
    pub sysinfo: &'a dyn SystemInfo,
    /// Command registry, for per-command usage counts in STATS.
    pub registry: &'a Registry,
    /// Sender for replies to the operator.
    pub sender: mpsc::Sender<Reply>,
}

impl Context<'_> {
    /// Send one reply to the operator.
    #[inline]
    pub async fn send(&self, reply: Reply) -> Result<(), HandlerError> {
        self.sender.send(reply).await?;
        Ok(())
    }
}

/// Trait implemented by all command handlers.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handle one tokenized command.
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult;
}
