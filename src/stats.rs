//! Usage statistics for the console session.
//!
//! One counter set per session, owned by the console loop and passed by
//! mutable reference into dispatch. Counters only move forward except on an
//! explicit reset.

use std::time::{Duration, Instant};

/// Running totals since startup or the last reset.
#[derive(Debug)]
pub struct UsageStats {
    total_messages: u64,
    total_chars: u64,
    total_bytes: u64,
    started_at: Instant,
}

/// Read-only view of the counters for the STATS report.
#[derive(Debug, Clone, Copy)]
pub struct StatsSnapshot {
    /// Lines processed.
    pub messages: u64,
    /// Characters processed, terminators excluded.
    pub chars: u64,
    /// Bytes processed, one stripped terminator per line included.
    pub bytes: u64,
    /// Time since startup or the last reset.
    pub elapsed: Duration,
}

impl UsageStats {
    /// Fresh counters with the clock starting now.
    pub fn new() -> Self {
        Self {
            total_messages: 0,
            total_chars: 0,
            total_bytes: 0,
            started_at: Instant::now(),
        }
    }

    /// Record one processed line of `raw_len` characters.
    ///
    /// The byte count adds one for the line terminator the framing layer
    /// stripped.
    pub fn record(&mut self, raw_len: usize) {
        self.total_messages += 1;
        self.total_chars += raw_len as u64;
        self.total_bytes += raw_len as u64 + 1;
    }

    /// Zero all counters and restart the clock.
    pub fn reset(&mut self) {
        self.total_messages = 0;
        self.total_chars = 0;
        self.total_bytes = 0;
        self.started_at = Instant::now();
    }

    /// Current counter values.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            messages: self.total_messages,
            chars: self.total_chars,
            bytes: self.total_bytes,
            elapsed: self.started_at.elapsed(),
        }
    }
}

impl Default for UsageStats {
    fn default() -> Self {
        Self::new()
    }
}
