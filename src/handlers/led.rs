//! LED command handler.

use async_trait::async_trait;
use sercon_proto::Command;

use super::context::{Context, Handler};
use crate::config::LedTarget;
use crate::error::{HandlerError, HandlerResult};
use crate::reply::Reply;

const DEFAULT_BRIGHTNESS: u8 = 255;

enum LedAction {
    On,
    Off,
}

/// Handler for the LED command.
///
/// `LED ON|OFF [INTERNAL|EXTERNAL] [brightness]`
///
/// Target defaults to the configured one, brightness to 255 and is only
/// accepted with ON. Drives the injected output device; a device failure is
/// reported as a warning, not a fault.
pub struct LedHandler;

#[async_trait]
impl Handler for LedHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        if cmd.param_count() > 3 {
            return Err(HandlerError::TooManyParams);
        }

        let action = match cmd.arg(0) {
            None => return Err(HandlerError::NeedMoreParams),
            Some(op) if op.eq_ignore_ascii_case("ON") => LedAction::On,
            Some(op) if op.eq_ignore_ascii_case("OFF") => LedAction::Off,
            Some(op) => {
                return Err(HandlerError::InvalidParameter {
                    value: op.to_string(),
                    expected: "ON or OFF",
                });
            }
        };

        let target = match cmd.arg(1) {
            None => ctx.config.led.default_target,
            Some(t) if t.eq_ignore_ascii_case("INTERNAL") => LedTarget::Internal,
            Some(t) if t.eq_ignore_ascii_case("EXTERNAL") => LedTarget::External,
            Some(t) => {
                return Err(HandlerError::InvalidParameter {
                    value: t.to_string(),
                    expected: "INTERNAL or EXTERNAL",
                });
            }
        };

        let brightness = match cmd.arg(2) {
            None => DEFAULT_BRIGHTNESS,
            Some(raw) => {
                if matches!(action, LedAction::Off) {
                    return Err(HandlerError::InvalidParameter {
                        value: raw.to_string(),
                        expected: "no brightness with OFF",
                    });
                }
                let value: i64 = raw.parse().map_err(|_| HandlerError::InvalidParameter {
                    value: raw.to_string(),
                    expected: "an integer brightness",
                })?;
                u8::try_from(value).map_err(|_| HandlerError::BrightnessOutOfRange(value))?
            }
        };

        let channel = match target {
            LedTarget::Internal => ctx.config.led.internal_channel,
            LedTarget::External => ctx.config.led.external_channel,
        };

        match action {
            LedAction::On => {
                ctx.output.set_output(channel, brightness)?;
                ctx.send(Reply::Success(format!(
                    "{} LED turned on (Brightness: {brightness})",
                    target.as_str()
                )))
                .await
            }
            LedAction::Off => {
                ctx.output.set_output(channel, 0)?;
                ctx.send(Reply::Success(format!(
                    "{} LED turned off",
                    target.as_str()
                )))
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::device::{SimulatedBoard, SimulatedOutput};
    use crate::handlers::Registry;
    use crate::stats::UsageStats;
    use sercon_proto::tokenize;
    use tokio::sync::mpsc;

    async fn run_led(config: &Config, output: &SimulatedOutput, line: &str) -> HandlerResult {
        let registry = Registry::new();
        let board = SimulatedBoard::default();
        let mut stats = UsageStats::new();
        let (tx, _rx) = mpsc::channel(64);

        let cmd = tokenize(line, config.console.max_params).unwrap();
        let mut ctx = Context {
            config,
            stats: &mut stats,
            output,
            sysinfo: &board,
            registry: &registry,
            sender: tx,
        };
        LedHandler.handle(&mut ctx, &cmd).await
    }

    #[tokio::test]
    async fn test_on_with_target_and_brightness() {
        let config = Config::default();
        let output = SimulatedOutput::new();

        run_led(&config, &output, "LED ON EXTERNAL 128").await.unwrap();
        assert_eq!(output.level(config.led.external_channel), Some(128));
    }

    #[tokio::test]
    async fn test_on_defaults_brightness_to_full() {
        let config = Config::default();
        let output = SimulatedOutput::new();

        run_led(&config, &output, "LED ON INTERNAL").await.unwrap();
        assert_eq!(output.level(config.led.internal_channel), Some(255));
    }

    #[tokio::test]
    async fn test_off_defaults_to_configured_target() {
        let config = Config::default();
        let output = SimulatedOutput::new();

        run_led(&config, &output, "LED OFF").await.unwrap();
        assert_eq!(output.level(config.led.internal_channel), Some(0));
        assert_eq!(output.level(config.led.external_channel), None);
    }

    #[tokio::test]
    async fn test_lowercase_keywords_accepted() {
        let config = Config::default();
        let output = SimulatedOutput::new();

        run_led(&config, &output, "LED on external 7").await.unwrap();
        assert_eq!(output.level(config.led.external_channel), Some(7));
    }

    #[tokio::test]
    async fn test_brightness_out_of_range_rejected() {
        let config = Config::default();
        let output = SimulatedOutput::new();

        let err = run_led(&config, &output, "LED ON INTERNAL 300").await.unwrap_err();
        assert!(matches!(err, HandlerError::BrightnessOutOfRange(300)));
        assert_eq!(output.level(config.led.internal_channel), None);
    }

    #[tokio::test]
    async fn test_non_numeric_brightness_rejected() {
        let config = Config::default();
        let output = SimulatedOutput::new();

        let err = run_led(&config, &output, "LED ON INTERNAL bright").await.unwrap_err();
        assert!(matches!(err, HandlerError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn test_brightness_with_off_rejected() {
        let config = Config::default();
        let output = SimulatedOutput::new();

        let err = run_led(&config, &output, "LED OFF INTERNAL 10").await.unwrap_err();
        assert!(matches!(err, HandlerError::InvalidParameter { .. }));
        assert_eq!(output.level(config.led.internal_channel), None);
    }

    #[tokio::test]
    async fn test_unknown_operation_rejected() {
        let config = Config::default();
        let output = SimulatedOutput::new();

        let err = run_led(&config, &output, "LED BLINK").await.unwrap_err();
        assert!(matches!(err, HandlerError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn test_missing_operation_rejected() {
        let config = Config::default();
        let output = SimulatedOutput::new();

        let err = run_led(&config, &output, "LED").await.unwrap_err();
        assert!(matches!(err, HandlerError::NeedMoreParams));
    }

    #[tokio::test]
    async fn test_device_failure_surfaces() {
        let mut config = Config::default();
        config.led.internal_channel = 99;
        let output = SimulatedOutput::new();

        let err = run_led(&config, &output, "LED ON").await.unwrap_err();
        assert!(matches!(err, HandlerError::Device(_)));
    }
}
