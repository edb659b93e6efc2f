//! `!time`：查詢遊戲內時間

use super::{Command, CommandContext, CommandError};
use crate::player::Player;

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeCommand;

impl Command for TimeCommand {
    fn keyword(&self) -> &'static str {
        "time"
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        player: &Player,
        args: &[&str],
    ) -> Result<(), CommandError> {
        // 只開放查詢 daytime
        if !args.is_empty() {
            ctx.reject(player);
            return Ok(());
        }

        ctx.send("/time query daytime");
        ctx.repost.arm(player.clone(), 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::Harness;
    use crate::command::NOT_ACCEPTABLE;
    use crate::config::Config;
    use crate::outbound::Outbound;

    #[test]
    fn test_time_arms_single_line() {
        let mut h = Harness::new(Config::default());
        let bob = Player::new("Bob");
        h.run(&TimeCommand, &bob, &[]).unwrap();

        assert_eq!(h.out, vec![Outbound::command("/time query daytime")]);
        assert_eq!(h.repost.remaining(), 1);
        assert_eq!(h.repost.receiver(), Some(&bob));
    }

    #[test]
    fn test_time_overrides_pending_repost() {
        let mut h = Harness::new(Config::default());
        h.repost.arm(Player::new("Alice"), 4);

        h.run(&TimeCommand, &Player::new("Bob"), &[]).unwrap();
        assert_eq!(h.repost.remaining(), 1);
        assert_eq!(h.repost.receiver().map(|p| p.name.as_str()), Some("Bob"));
    }

    #[test]
    fn test_time_set_is_rejected() {
        let mut h = Harness::new(Config::default());
        let bob = Player::new("Bob");
        h.run(&TimeCommand, &bob, &["set", "day"]).unwrap();

        assert_eq!(h.out, vec![Outbound::warning(&bob, NOT_ACCEPTABLE)]);
        assert!(!h.repost.is_armed());
    }
}
