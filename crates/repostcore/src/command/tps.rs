//! `!tps`：查詢伺服器 TPS（需要 Forge）

use super::{Command, CommandContext, CommandError};
use crate::player::Player;

/// `/forge tps` 的回應行數
pub const TPS_REPLY_LINES: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct TpsCommand;

impl Command for TpsCommand {
    fn keyword(&self) -> &'static str {
        "tps"
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        player: &Player,
        args: &[&str],
    ) -> Result<(), CommandError> {
        if !args.is_empty() {
            ctx.reject(player);
            return Ok(());
        }

        if !ctx.config.forge {
            return Ok(());
        }

        ctx.send("/forge tps");
        ctx.repost.arm(player.clone(), TPS_REPLY_LINES);
        Ok(())
    }
}
