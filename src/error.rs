//! Unified error handling for sercond.
//!
//! Input-validation errors are recovered locally: each maps to a structured
//! [`Reply`] through [`HandlerError::to_reply`] and the session continues.
//! Nothing here terminates the console loop.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::device::DeviceError;
use crate::reply::Reply;

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("too many parameters")]
    TooManyParams,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("invalid parameter: {value} (expected {expected})")]
    InvalidParameter {
        value: String,
        expected: &'static str,
    },

    #[error("brightness out of range: {0}")]
    BrightnessOutOfRange(i64),

    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<Reply>),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::TooManyParams => "too_many_params",
            Self::UnknownCommand(_) => "unknown_command",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::BrightnessOutOfRange(_) => "brightness_out_of_range",
            Self::Device(_) => "device_error",
            Self::Send(_) => "send_error",
        }
    }

    /// Convert to the operator-visible reply.
    ///
    /// Returns `None` for errors with no useful reply (send failures mean
    /// the session is already gone).
    pub fn to_reply(&self, cmd_name: &str) -> Option<Reply> {
        let usage_hint = Some(format!("Type `HELP {cmd_name}` for usage."));
        match self {
            Self::NeedMoreParams => Some(Reply::Error {
                message: format!("{cmd_name} command requires a parameter"),
                hint: usage_hint,
            }),
            Self::TooManyParams => Some(Reply::Error {
                message: format!("too many parameters for {cmd_name}"),
                hint: usage_hint,
            }),
            Self::UnknownCommand(name) => Some(Reply::Error {
                message: format!("unknown command `{name}`!"),
                hint: Some("Type `HELP` for available commands.".to_string()),
            }),
            Self::InvalidParameter { value, expected } => Some(Reply::Error {
                message: format!("invalid parameter: `{value}` (expected {expected})"),
                hint: usage_hint,
            }),
            Self::BrightnessOutOfRange(value) => Some(Reply::Error {
                message: format!("invalid parameter: `{value}` (brightness must be 0-255)"),
                hint: usage_hint,
            }),
            Self::Device(e) => Some(Reply::Warning(format!("hardware failure: {e}"))),
            Self::Send(_) => None,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_reply_points_at_help() {
        let err = HandlerError::UnknownCommand("FOO".into());
        let reply = err.to_reply("FOO").unwrap();
        match reply {
            Reply::Error { message, hint } => {
                assert_eq!(message, "unknown command `FOO`!");
                assert_eq!(hint.as_deref(), Some("Type `HELP` for available commands."));
            }
            other => panic!("expected error reply, got {other:?}"),
        }
    }

    #[test]
    fn test_brightness_reply_names_the_value() {
        let err = HandlerError::BrightnessOutOfRange(300);
        let reply = err.to_reply("LED").unwrap();
        match reply {
            Reply::Error { message, .. } => {
                assert!(message.contains("300"));
                assert!(message.contains("0-255"));
            }
            other => panic!("expected error reply, got {other:?}"),
        }
    }

    #[test]
    fn test_device_error_becomes_warning() {
        let err = HandlerError::Device(DeviceError::InvalidChannel(99));
        assert!(matches!(err.to_reply("LED"), Some(Reply::Warning(_))));
        assert_eq!(err.error_code(), "device_error");
    }
}
