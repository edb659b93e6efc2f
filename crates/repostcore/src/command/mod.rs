//! 玩家命令模組
//!
//! 玩家在聊天中輸入 `!tp Bob` 之類的命令，由 [`CommandTable`] 找到對應的
//! [`Command`] 執行。命令執行失敗不會往外傳，只記錄錯誤並通知玩家。

mod restart;
mod time;
mod tp;
mod tps;

pub use restart::RestartCommand;
pub use time::TimeCommand;
pub use tp::TpCommand;
pub use tps::TpsCommand;

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error};

use crate::config::Config;
use crate::cooldown::CooldownTracker;
use crate::outbound::Outbound;
use crate::player::Player;
use crate::repost::RepostCorrelator;

/// 參數不符時回覆玩家的訊息
pub const NOT_ACCEPTABLE: &str = "Command not acceptable. Please check again.";

/// 命令內部錯誤時回覆玩家的訊息
pub const INTERNAL_ERROR: &str = "An internal error occurred. Please contact the server admin.";

/// 命令執行錯誤
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("缺少必要欄位: {0}")]
    MissingField(&'static str),

    #[error("內部錯誤: {0}")]
    Internal(String),
}

/// 命令執行時可用的狀態
pub struct CommandContext<'a> {
    pub config: &'a Config,
    pub cooldowns: &'a mut CooldownTracker,
    pub repost: &'a mut RepostCorrelator,
    /// 事件發生時間
    pub now: Duration,
    /// 產生的動作
    pub out: &'a mut Vec<Outbound>,
}

impl CommandContext<'_> {
    /// 送出伺服器命令
    pub fn send(&mut self, cmd: impl Into<String>) {
        self.out.push(Outbound::command(cmd));
    }

    /// 一般私訊
    pub fn tell(&mut self, player: &Player, message: impl Into<String>) {
        self.out.push(Outbound::info(player, message));
    }

    /// 警告私訊
    pub fn warn(&mut self, player: &Player, message: impl Into<String>) {
        self.out.push(Outbound::warning(player, message));
    }

    /// 回覆參數不符
    pub fn reject(&mut self, player: &Player) {
        debug!("{} 的命令參數不符", player);
        self.warn(player, NOT_ACCEPTABLE);
    }
}

/// 玩家命令
pub trait Command: Send + Sync {
    /// 命令關鍵字（不含前綴）
    fn keyword(&self) -> &'static str;

    /// 檢查參數並執行
    ///
    /// `args` 不含命令本身。
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        player: &Player,
        args: &[&str],
    ) -> Result<(), CommandError>;
}

/// 命令表
pub struct CommandTable {
    prefix: char,
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl CommandTable {
    /// 建立空的命令表
    pub fn new(prefix: char) -> Self {
        Self {
            prefix,
            commands: HashMap::new(),
        }
    }

    /// 內建命令：`tp`、`tps`、`time`、`restart`
    pub fn with_builtins(prefix: char) -> Self {
        let mut table = Self::new(prefix);
        table.register(TpCommand);
        table.register(TpsCommand);
        table.register(TimeCommand);
        table.register(RestartCommand);
        table
    }

    /// 註冊命令，關鍵字重複時取代舊的
    pub fn register(&mut self, command: impl Command + 'static) {
        self.commands.insert(command.keyword(), Box::new(command));
    }

    /// 依輸入的第一個字（含前綴）找命令
    pub fn lookup(&self, word: &str) -> Option<&dyn Command> {
        let keyword = word.strip_prefix(self.prefix)?;
        self.commands.get(keyword).map(|c| &**c)
    }

    /// 所有關鍵字（排序）
    pub fn keywords(&self) -> Vec<&'static str> {
        let mut keywords: Vec<_> = self.commands.keys().copied().collect();
        keywords.sort_unstable();
        keywords
    }

    /// 處理一行玩家輸入
    ///
    /// 控制台與空白輸入直接忽略；非命令的一般聊天也不做任何事。
    /// 回傳是否有命令被執行。
    pub fn dispatch(&self, ctx: &mut CommandContext<'_>, player: &Player, text: &str) -> bool {
        if player.is_console() {
            return false;
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let Some((&first, args)) = tokens.split_first() else {
            return false;
        };
        let Some(command) = self.lookup(first) else {
            return false;
        };

        debug!("{} 執行命令 {}", player, command.keyword());
        if let Err(e) = command.execute(ctx, player, args) {
            error!("命令 {} 執行失敗 ({}): {}", command.keyword(), player, e);
            ctx.warn(player, INTERNAL_ERROR);
        }
        true
    }
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable")
            .field("prefix", &self.prefix)
            .field("commands", &self.keywords())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// 測試用的命令執行環境
    pub struct Harness {
        pub config: Config,
        pub cooldowns: CooldownTracker,
        pub repost: RepostCorrelator,
        pub now: Duration,
        pub out: Vec<Outbound>,
    }

    impl Harness {
        pub fn new(config: Config) -> Self {
            Self {
                cooldowns: CooldownTracker::new(config.tp_cooldown()),
                config,
                repost: RepostCorrelator::new(),
                now: Duration::from_secs(1_000),
                out: Vec::new(),
            }
        }

        pub fn run(&mut self, command: &dyn Command, player: &Player, args: &[&str]) -> Result<(), CommandError> {
            let mut ctx = CommandContext {
                config: &self.config,
                cooldowns: &mut self.cooldowns,
                repost: &mut self.repost,
                now: self.now,
                out: &mut self.out,
            };
            command.execute(&mut ctx, player, args)
        }

        pub fn dispatch(&mut self, table: &CommandTable, player: &Player, text: &str) -> bool {
            let mut ctx = CommandContext {
                config: &self.config,
                cooldowns: &mut self.cooldowns,
                repost: &mut self.repost,
                now: self.now,
                out: &mut self.out,
            };
            table.dispatch(&mut ctx, player, text)
        }
    }
}
