//! `!restart`：保留命令，目前不做任何事

use super::{Command, CommandContext, CommandError};
use crate::player::Player;

#[derive(Debug, Clone, Copy, Default)]
pub struct RestartCommand;

impl Command for RestartCommand {
    fn keyword(&self) -> &'static str {
        "restart"
    }

    fn execute(
        &self,
        _ctx: &mut CommandContext<'_>,
        player: &Player,
        _args: &[&str],
    ) -> Result<(), CommandError> {
        tracing::debug!("{} 要求重啟伺服器，尚未支援", player);
        Ok(())
    }
}
