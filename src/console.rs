//! Console session loop.
//!
//! Pulls newline-terminated lines from any `AsyncRead`, tokenizes and
//! dispatches them, and renders the resulting replies to any `AsyncWrite`.
//! A read timeout bounds the wait for a terminator; after it, whatever was
//! received is accepted as a complete line. No input condition ends the
//! session, only end of stream does.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use sercon_proto::{tokenize, LineCodec};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::device::{OutputDevice, SystemInfo};
use crate::handlers::{help_listing, Context, Registry};
use crate::reply::Reply;
use crate::stats::UsageStats;

/// Replies buffered per line between dispatch and rendering.
const REPLY_BUFFER: usize = 64;

/// One console session: registry, statistics, and the injected devices.
pub struct Console {
    config: Config,
    registry: Registry,
    stats: UsageStats,
    output: Arc<dyn OutputDevice>,
    sysinfo: Arc<dyn SystemInfo>,
}

impl Console {
    /// Create a session with fresh statistics.
    pub fn new(
        config: Config,
        output: Arc<dyn OutputDevice>,
        sysinfo: Arc<dyn SystemInfo>,
    ) -> Self {
        Self {
            config,
            registry: Registry::new(),
            stats: UsageStats::new(),
            output,
            sysinfo,
        }
    }

    /// Run the session until the reader reaches end of input.
    pub async fn run<R, W>(mut self, reader: R, writer: W) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let codec = LineCodec::with_max_len(self.config.console.max_line_len);
        let mut reader = FramedRead::new(reader, codec);
        let mut writer = FramedWrite::new(writer, LineCodec::new());

        if self.config.console.banner {
            write_reply(
                &mut writer,
                &Reply::Text("===sercond Serial Console===".to_string()),
            )
            .await?;
            write_reply(&mut writer, &help_listing()).await?;
        }

        let read_timeout = Duration::from_millis(self.config.console.read_timeout_ms);
        info!(
            timeout_ms = self.config.console.read_timeout_ms,
            "console session started"
        );

        loop {
            let frame = if read_timeout.is_zero() {
                reader.next().await
            } else {
                tokio::select! {
                    frame = reader.next() => frame,
                    _ = tokio::time::sleep(read_timeout) => {
                        // The terminator never arrived: accept the partial
                        // input as a complete line.
                        let mut pending = reader.read_buffer_mut().split();
                        match reader.decoder_mut().take_partial(&mut pending) {
                            Ok(Some(line)) => Some(Ok(line)),
                            Ok(None) => continue,
                            Err(e) => Some(Err(e)),
                        }
                    }
                }
            };

            match frame {
                Some(Ok(line)) => self.process_line(&line, &mut writer).await?,
                Some(Err(e)) => {
                    warn!(error = %e, "discarding unreadable input");
                    write_reply(&mut writer, &Reply::Warning(format!("input discarded: {e}")))
                        .await?;
                }
                None => break,
            }
        }

        info!("console session ended");
        Ok(())
    }

    async fn process_line<W>(
        &mut self,
        line: &str,
        writer: &mut FramedWrite<W, LineCodec>,
    ) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        let cmd = match tokenize(line, self.config.console.max_params) {
            Ok(cmd) => cmd,
            // Unreachable for non-blank input, but not worth a panic.
            Err(e) => {
                debug!(error = %e, "tokenize failed");
                return Ok(());
            }
        };

        let (tx, mut rx) = mpsc::channel(REPLY_BUFFER);
        let mut ctx = Context {
            config: &self.config,
            stats: &mut self.stats,
            output: self.output.as_ref(),
            sysinfo: self.sysinfo.as_ref(),
            registry: &self.registry,
            sender: tx,
        };

        if let Err(e) = self.registry.dispatch(&mut ctx, &cmd).await {
            // Only send failures reach this point, and the reply channel is
            // owned by this very loop, so treat it as a bug to log.
            warn!(command = %cmd.name, error = %e, "dispatch failed");
        }
        drop(ctx);

        while let Ok(reply) = rx.try_recv() {
            write_reply(writer, &reply).await?;
        }
        Ok(())
    }
}

async fn write_reply<W>(
    writer: &mut FramedWrite<W, LineCodec>,
    reply: &Reply,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    for line in reply.render() {
        writer.send(line).await?;
    }
    Ok(())
}
