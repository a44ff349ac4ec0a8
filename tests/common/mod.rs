//! Integration test common infrastructure.
//!
//! Spawns sercond instances with piped stdin/stdout and asserts on console
//! line flows.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;

/// A sercond instance under test, driven over its stdio.
pub struct TestConsole {
    child: Child,
    stdin: ChildStdin,
    reader: Lines<BufReader<ChildStdout>>,
    // Keeps the config file alive for the child's lifetime.
    _data_dir: tempfile::TempDir,
}

impl TestConsole {
    /// Spawn a daemon with the given TOML configuration.
    pub async fn spawn(config_content: &str) -> anyhow::Result<Self> {
        let data_dir = tempfile::tempdir()?;
        let config_path = data_dir.path().join("config.toml");
        std::fs::write(&config_path, config_content)?;

        let mut child = Command::new(env!("CARGO_BIN_EXE_sercond"))
            .arg(&config_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child.stdin.take().expect("child stdin is piped");
        let stdout = child.stdout.take().expect("child stdout is piped");

        Ok(Self {
            child,
            stdin,
            reader: BufReader::new(stdout).lines(),
            _data_dir: data_dir,
        })
    }

    /// Spawn with the quiet baseline config most tests want, applying the
    /// given extra `[console]` keys.
    pub async fn spawn_quiet(console_extras: &str) -> anyhow::Result<Self> {
        let config = format!("[console]\nbanner = false\nread_timeout_ms = 0\n{console_extras}");
        Self::spawn(&config).await
    }

    /// Send one command line.
    pub async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Send bytes with no line terminator, for read-timeout flows.
    pub async fn send_raw(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.stdin.write_all(bytes).await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Receive a single output line.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        self.recv_line_timeout(Duration::from_secs(5)).await
    }

    /// Receive a single output line with a timeout.
    pub async fn recv_line_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        match timeout(dur, self.reader.next_line()).await?? {
            Some(line) => Ok(line),
            None => anyhow::bail!("console closed its output"),
        }
    }

    /// Receive lines until the given predicate returns true.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv_line().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Close stdin and wait for the daemon to exit cleanly on EOF.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        drop(self.stdin);
        let status = timeout(Duration::from_secs(5), self.child.wait()).await??;
        anyhow::ensure!(status.success(), "daemon exited with {status}");
        Ok(())
    }
}
