//! Injected hardware and platform seams.
//!
//! The console core never touches GPIO or chip registers directly; the LED
//! handler drives an [`OutputDevice`] and INFO reads a [`SystemInfo`]. The
//! shipped implementations simulate a board so the daemon runs anywhere;
//! real backends implement the same traits.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;

/// Highest output channel the simulated board accepts.
const MAX_OUTPUT_CHANNEL: u8 = 39;

/// Hardware operation failures. Non-fatal: callers surface them to the
/// operator as warnings.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The channel does not map to a usable output.
    #[error("invalid output channel {0}")]
    InvalidChannel(u8),
}

/// A PWM-capable output bank.
pub trait OutputDevice: Send + Sync {
    /// Drive `channel` to `level` (0 = off, 255 = full).
    fn set_output(&self, channel: u8, level: u8) -> Result<(), DeviceError>;
}

/// Read-only platform facts for the INFO report.
pub trait SystemInfo: Send + Sync {
    /// Platform or chip model name.
    fn platform(&self) -> String;
    /// Hardware revision.
    fn revision(&self) -> String;
    /// CPU clock frequency in MHz.
    fn cpu_mhz(&self) -> u32;
    /// Flash size in bytes.
    fn flash_size_bytes(&self) -> u64;
    /// Flash speed in Hz.
    fn flash_speed_hz(&self) -> u64;
    /// Firmware version string.
    fn firmware_version(&self) -> String;
}

/// In-memory output bank. Default wiring for the daemon and the test double
/// for LED flows.
#[derive(Debug, Default)]
pub struct SimulatedOutput {
    levels: Mutex<HashMap<u8, u8>>,
}

impl SimulatedOutput {
    /// New bank with all outputs unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last level written to `channel`, if any.
    pub fn level(&self, channel: u8) -> Option<u8> {
        let levels = self.levels.lock().unwrap_or_else(|e| e.into_inner());
        levels.get(&channel).copied()
    }
}

impl OutputDevice for SimulatedOutput {
    fn set_output(&self, channel: u8, level: u8) -> Result<(), DeviceError> {
        if channel > MAX_OUTPUT_CHANNEL {
            return Err(DeviceError::InvalidChannel(channel));
        }
        let mut levels = self.levels.lock().unwrap_or_else(|e| e.into_inner());
        levels.insert(channel, level);
        debug!(channel, level, "output level set");
        Ok(())
    }
}

/// Fixed facts of the simulated board.
#[derive(Debug)]
pub struct SimulatedBoard {
    platform: String,
    revision: String,
    cpu_mhz: u32,
    flash_size_bytes: u64,
    flash_speed_hz: u64,
}

impl Default for SimulatedBoard {
    fn default() -> Self {
        Self {
            platform: "sercond-sim".to_string(),
            revision: "3".to_string(),
            cpu_mhz: 240,
            flash_size_bytes: 4 * 1024 * 1024,
            flash_speed_hz: 40_000_000,
        }
    }
}

impl SystemInfo for SimulatedBoard {
    fn platform(&self) -> String {
        self.platform.clone()
    }

    fn revision(&self) -> String {
        self.revision.clone()
    }

    fn cpu_mhz(&self) -> u32 {
        self.cpu_mhz
    }

    fn flash_size_bytes(&self) -> u64 {
        self.flash_size_bytes
    }

    fn flash_speed_hz(&self) -> u64 {
        self.flash_speed_hz
    }

    fn firmware_version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_output_records_levels() {
        let output = SimulatedOutput::new();
        assert_eq!(output.level(2), None);

        output.set_output(2, 128).unwrap();
        assert_eq!(output.level(2), Some(128));

        output.set_output(2, 0).unwrap();
        assert_eq!(output.level(2), Some(0));
    }

    #[test]
    fn test_simulated_output_rejects_invalid_channel() {
        let output = SimulatedOutput::new();
        let err = output.set_output(99, 255).unwrap_err();
        assert!(matches!(err, DeviceError::InvalidChannel(99)));
        assert_eq!(output.level(99), None);
    }
}
