//! 命令轉發核心庫
//!
//! 位於遊戲伺服器輸出與玩家之間：
//! - `matcher`: 伺服器日誌比對（傳送完成通知）
//! - `repost`: 將稍後出現的命令結果轉發給玩家
//! - `cooldown`: 命令冷卻時間
//! - `command`: 玩家命令分派與處理
//! - `chat`: 從伺服器輸出辨識玩家聊天
//! - `controller`: 持有所有狀態的控制器
//! - `config`: 設定檔

pub mod chat;
pub mod clock;
pub mod command;
pub mod config;
pub mod controller;
pub mod cooldown;
pub mod matcher;
pub mod outbound;
pub mod player;
pub mod repost;

pub use chat::{ChatBridge, ChatError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, CommandContext, CommandError, CommandTable};
pub use config::{Config, ConfigError};
pub use controller::Controller;
pub use cooldown::{Cooldown, CooldownTracker};
pub use matcher::{TeleportNotice, TeleportWatcher};
pub use outbound::{Outbound, TellColor};
pub use player::Player;
pub use repost::{Repost, RepostCorrelator};
