//! 控制器
//!
//! 持有所有狀態（冷卻、轉發、傳送紀錄、命令表），對外只有三個入口：
//! - [`Controller::on_player_input`]：玩家輸入
//! - [`Controller::on_server_output_batch`]：一批伺服器輸出
//! - [`Controller::on_server_stop`]：伺服器停止
//!
//! 每個事件都完整處理完才會處理下一個，因此不需要任何鎖。

use std::time::Duration;

use tracing::{debug, error, info};

use crate::chat::ChatBridge;
use crate::clock::{Clock, SystemClock};
use crate::command::{CommandContext, CommandTable};
use crate::config::Config;
use crate::cooldown::CooldownTracker;
use crate::matcher::TeleportWatcher;
use crate::outbound::Outbound;
use crate::player::Player;
use crate::repost::RepostCorrelator;

/// 啟用中的控制器狀態
#[derive(Debug)]
struct State {
    config: Config,
    chat: ChatBridge,
    commands: CommandTable,
    cooldowns: CooldownTracker,
    repost: RepostCorrelator,
    teleports: TeleportWatcher,
}

impl State {
    fn new(config: Config, chat: ChatBridge) -> Self {
        Self {
            commands: CommandTable::with_builtins(config.prefix),
            cooldowns: CooldownTracker::new(config.tp_cooldown()),
            repost: RepostCorrelator::new(),
            teleports: TeleportWatcher::new(),
            chat,
            config,
        }
    }

    fn dispatch(&mut self, player: &Player, text: &str, now: Duration, out: &mut Vec<Outbound>) {
        let mut ctx = CommandContext {
            config: &self.config,
            cooldowns: &mut self.cooldowns,
            repost: &mut self.repost,
            now,
            out,
        };
        self.commands.dispatch(&mut ctx, player, text);
    }

    fn process_line(&mut self, line: &str, now: Duration, out: &mut Vec<Outbound>) {
        if let Some(notice) = self.teleports.check(line, now) {
            out.push(Outbound::info(&Player::new(notice.player), notice.message));
        }

        if let Some(repost) = self.repost.feed(line) {
            out.push(Outbound::info(&repost.receiver, repost.text));
        }

        if let Some((player, text)) = self.chat.parse(line) {
            self.dispatch(&player, &text, now, out);
        }
    }
}

/// 命令轉發控制器
#[derive(Debug)]
pub struct Controller<C: Clock = SystemClock> {
    clock: C,
    /// `None` 表示已停用
    state: Option<State>,
}

impl Controller<SystemClock> {
    /// 以系統時鐘建立
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Controller<C> {
    /// 以指定時鐘建立
    ///
    /// 聊天橋接器無法建立時，控制器會停用自己，之後所有事件都不做任何事。
    pub fn with_clock(config: Config, clock: C) -> Self {
        let state = match ChatBridge::from_pattern(config.chat_pattern.as_deref()) {
            Ok(chat) => Some(State::new(config, chat)),
            Err(e) => {
                error!("無法建立聊天橋接器: {}，控制器將停用", e);
                error!("請確認設定檔中的 chat-pattern 是否正確");
                None
            }
        };

        Self { clock, state }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    pub fn cooldowns(&self) -> Option<&CooldownTracker> {
        self.state.as_ref().map(|s| &s.cooldowns)
    }

    pub fn repost(&self) -> Option<&RepostCorrelator> {
        self.state.as_ref().map(|s| &s.repost)
    }

    /// 玩家最近一次傳送完成的時間
    pub fn last_teleport(&self, player: &str) -> Option<Duration> {
        self.state.as_ref()?.teleports.last_teleport(player)
    }

    /// 玩家輸入一行文字
    pub fn on_player_input(&mut self, player: &Player, text: &str) -> Vec<Outbound> {
        let mut out = Vec::new();
        let now = self.clock.now();
        if let Some(state) = self.state.as_mut() {
            state.dispatch(player, text, now, &mut out);
        }
        out
    }

    /// 一批伺服器輸出，逐行依序處理
    ///
    /// 每行依序檢查：傳送完成通知、待轉發訊息、玩家聊天命令。
    pub fn on_server_output_batch<S: AsRef<str>>(&mut self, lines: &[S]) -> Vec<Outbound> {
        let mut out = Vec::new();
        let now = self.clock.now();
        if let Some(state) = self.state.as_mut() {
            for line in lines {
                state.process_line(line.as_ref(), now, &mut out);
            }
        }
        out
    }

    /// 伺服器停止
    ///
    /// 一律清除傳送紀錄；`reset-on-stop` 開啟時也清除冷卻並解除轉發。
    pub fn on_server_stop(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        debug!("伺服器已停止，清除傳送紀錄");
        state.teleports.clear();

        if state.config.reset_on_stop {
            info!("伺服器已停止，重設冷卻與轉發狀態");
            state.cooldowns.clear();
            state.repost.disarm();
        }
    }
}
