//! INFO command handler.

use async_trait::async_trait;
use sercon_proto::Command;

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::reply::Reply;

/// Handler for the INFO command.
///
/// `INFO`
///
/// Reports platform facts from the injected system-info interface, verbatim.
pub struct InfoHandler;

#[async_trait]
impl Handler for InfoHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        if cmd.param_count() > 0 {
            return Err(HandlerError::TooManyParams);
        }

        let info = ctx.sysinfo;
        let lines = vec![
            format!("Platform: {}", info.platform()),
            format!("Revision: {}", info.revision()),
            format!("CPU Frequency: {} MHz", info.cpu_mhz()),
            format!(
                "Flash Size: {:.2} MB",
                info.flash_size_bytes() as f64 / (1024.0 * 1024.0)
            ),
            format!(
                "Flash Speed: {:.2} MHz",
                info.flash_speed_hz() as f64 / 1_000_000.0
            ),
            format!("Firmware Version: {}", info.firmware_version()),
        ];

        ctx.send(Reply::Report {
            title: "SYSTEM INFORMATION".to_string(),
            lines,
        })
        .await
    }
}
