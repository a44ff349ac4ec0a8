//! Command handler registry and dispatch.
//!
//! The `Registry` maps normalized command names to handlers and keeps
//! per-command usage counters for the STATS report.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use sercon_proto::Command;
use tracing::{debug, warn};

use super::context::{Context, Handler};
use super::echo::EchoHandler;
use super::help::HelpHandler;
use super::info::InfoHandler;
use super::led::LedHandler;
use super::reset::ResetHandler;
use super::stats::StatsHandler;
use crate::config::UnknownPolicy;
use crate::error::{HandlerError, HandlerResult};
use crate::reply::{CharClasses, Reply};

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
    /// Command usage counters for the STATS report
    command_counts: HashMap<&'static str, AtomicU64>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        handlers.insert("LED", Box::new(LedHandler));
        handlers.insert("STATS", Box::new(StatsHandler));
        handlers.insert("RESET", Box::new(ResetHandler));
        handlers.insert("INFO", Box::new(InfoHandler));
        handlers.insert("HELP", Box::new(HelpHandler));
        handlers.insert("ECHO", Box::new(EchoHandler));

        // Initialize command counters for all registered commands
        let mut command_counts = HashMap::new();
        for &cmd in handlers.keys() {
            command_counts.insert(cmd, AtomicU64::new(0));
        }

        Self {
            handlers,
            command_counts,
        }
    }

    /// Per-command usage counts, most used first. Commands never dispatched
    /// are omitted.
    pub fn command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .iter()
            .map(|(cmd, count)| (*cmd, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Dispatch one tokenized command to the appropriate handler.
    ///
    /// The line is recorded into the session statistics up front, whether or
    /// not its name matches a handler. Validation errors from handlers are
    /// turned into operator-visible replies here; none of them end the
    /// session.
    pub async fn dispatch(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        ctx.stats.record(cmd.raw_len());

        match self.handlers.get(cmd.name.as_str()) {
            Some(handler) => {
                if cmd.truncated() {
                    ctx.send(Reply::Warning(format!(
                        "parameters beyond the first {} were dropped",
                        ctx.config.console.max_params
                    )))
                    .await?;
                }

                // We use expect() here because the invariant is that all
                // handlers have counters. If this fails, it indicates a logic
                // error in Registry::new().
                let counter = self
                    .command_counts
                    .get(cmd.name.as_str())
                    .expect("command counter missing for registered handler");
                counter.fetch_add(1, Ordering::Relaxed);

                debug!(command = %cmd.name, params = cmd.param_count(), "dispatching command");

                match handler.handle(ctx, cmd).await {
                    Ok(()) => Ok(()),
                    Err(e) => match e.to_reply(&cmd.name) {
                        Some(reply) => {
                            if matches!(e, HandlerError::Device(_)) {
                                warn!(command = %cmd.name, error = %e, "hardware operation failed");
                            } else {
                                debug!(
                                    command = %cmd.name,
                                    error_code = e.error_code(),
                                    "command rejected"
                                );
                            }
                            ctx.send(reply).await?;
                            Ok(())
                        }
                        None => Err(e),
                    },
                }
            }
            None => match ctx.config.console.on_unknown {
                UnknownPolicy::Error => {
                    debug!(command = %cmd.name, "unknown command");
                    let e = HandlerError::UnknownCommand(cmd.name.clone());
                    if let Some(reply) = e.to_reply(&cmd.name) {
                        ctx.send(reply).await?;
                    }
                    Ok(())
                }
                UnknownPolicy::Echo => {
                    // The whole line is free text in this mode, including
                    // the first token.
                    let text = cmd.raw();
                    ctx.send(Reply::Echo {
                        text: text.to_string(),
                        classes: CharClasses::classify(text),
                    })
                    .await
                }
            },
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::device::{SimulatedBoard, SimulatedOutput};
    use crate::stats::UsageStats;
    use sercon_proto::tokenize;
    use tokio::sync::mpsc;

    async fn run_line(registry: &Registry, config: &Config, line: &str) -> (Vec<Reply>, u64) {
        let mut stats = UsageStats::new();
        let output = SimulatedOutput::new();
        let board = SimulatedBoard::default();
        let (tx, mut rx) = mpsc::channel(64);

        let cmd = tokenize(line, config.console.max_params).unwrap();
        let mut ctx = Context {
            config,
            stats: &mut stats,
            output: &output,
            sysinfo: &board,
            registry,
            sender: tx,
        };
        registry.dispatch(&mut ctx, &cmd).await.unwrap();
        drop(ctx);

        let mut replies = Vec::new();
        while let Ok(reply) = rx.try_recv() {
            replies.push(reply);
        }
        (replies, stats.snapshot().messages)
    }

    #[tokio::test]
    async fn test_unknown_command_error_policy() {
        let registry = Registry::new();
        let config = Config::default();

        let (replies, messages) = run_line(&registry, &config, "BOGUS 1 2").await;
        assert_eq!(messages, 1);
        assert!(matches!(&replies[..], [Reply::Error { .. }]));
    }

    #[tokio::test]
    async fn test_unknown_command_echo_policy() {
        let registry = Registry::new();
        let mut config = Config::default();
        config.console.on_unknown = UnknownPolicy::Echo;

        let (replies, messages) = run_line(&registry, &config, "hello 42").await;
        assert_eq!(messages, 1);
        match &replies[..] {
            [Reply::Echo { text, classes }] => {
                assert_eq!(text, "hello 42");
                assert_eq!(classes.letters, 5);
                assert_eq!(classes.digits, 2);
            }
            other => panic!("expected echo reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_truncation_warns_once() {
        let registry = Registry::new();
        let mut config = Config::default();
        config.console.max_params = 2;

        let (replies, _) = run_line(&registry, &config, "ECHO a b c d").await;
        let warnings = replies
            .iter()
            .filter(|r| matches!(r, Reply::Warning(_)))
            .count();
        assert_eq!(warnings, 1);
    }

    #[tokio::test]
    async fn test_command_stats_counts_usage() {
        let registry = Registry::new();
        let config = Config::default();
        assert!(registry.command_stats().is_empty());

        run_line(&registry, &config, "HELP").await;
        run_line(&registry, &config, "help").await;
        run_line(&registry, &config, "INFO").await;
        // Unknown names are not counted per command.
        run_line(&registry, &config, "NOPE").await;

        assert_eq!(registry.command_stats(), vec![("HELP", 2), ("INFO", 1)]);
    }
}
