//! `!tp`：傳送到其他玩家或座標

use super::{Command, CommandContext, CommandError};
use crate::cooldown::Cooldown;
use crate::player::Player;

/// `!tp <player>` 或 `!tp <x> <y> <z>`
///
/// 受 `tp-cd` 冷卻限制，只有真正送出命令時才記錄使用時間。
#[derive(Debug, Clone, Copy, Default)]
pub struct TpCommand;

impl Command for TpCommand {
    fn keyword(&self) -> &'static str {
        "tp"
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        player: &Player,
        args: &[&str],
    ) -> Result<(), CommandError> {
        if player.name.is_empty() || player.name.contains(char::is_whitespace) {
            return Err(CommandError::MissingField("player name"));
        }

        let destination = match args {
            [target] => target.to_string(),
            [x, y, z] => format!("{} {} {}", x, y, z),
            _ => {
                ctx.reject(player);
                return Ok(());
            }
        };

        if let Cooldown::Cooling { remaining_secs } = ctx.cooldowns.check(&player.name, ctx.now) {
            ctx.warn(player, "Command tp is now cooling down!");
            ctx.warn(
                player,
                format!("You cannot use tp again until {} seconds later.", remaining_secs),
            );
            return Ok(());
        }

        let name = &player.name;
        ctx.send(format!(
            "/execute as {name} at {name} run tp {name} {destination}"
        ));
        ctx.cooldowns.record(name, ctx.now);
        Ok(())
    }
}
