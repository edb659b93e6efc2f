//! 伺服器日誌比對模組
//!
//! 伺服器輸出的每一行都包在固定的外殼裡：
//! `[12:00:00] [Server thread/INFO]: <訊息>`。
//! 先取出訊息本體一次，再交給各個規則判斷。

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

/// 取出 `[Server thread/INFO]` 外殼中的訊息本體
///
/// 外殼前段不可含 `<` 或 `>`，避免玩家聊天內容偽造日誌。
pub fn extract_message(line: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[^<>]*?\[Server thread/INFO\].*?: (.*)$").unwrap()
    });

    re.captures(line.trim_end_matches(&['\r', '\n'][..]))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// 可轉發的訊息：外殼內且不含 `<`、`>`（排除玩家聊天）
pub fn repost_candidate(line: &str) -> Option<&str> {
    extract_message(line).filter(|text| !text.contains(&['<', '>'][..]))
}

/// 傳送完成的訊息：`Teleported <name> ...`，回傳玩家名稱
pub fn teleported_player(message: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^Teleported (\w+)").unwrap());

    re.captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// 傳送完成事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeleportNotice {
    /// 被傳送的玩家
    pub player: String,
    /// 原始訊息本體（要回傳給玩家）
    pub message: String,
}

/// 傳送完成觸發器
///
/// 比對到傳送訊息時產生通知，並記錄該玩家最近一次傳送時間。
#[derive(Debug, Default)]
pub struct TeleportWatcher {
    /// 玩家名稱 -> 最近傳送時間
    log: HashMap<String, Duration>,
}

impl TeleportWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 處理一行日誌
    pub fn check(&mut self, line: &str, now: Duration) -> Option<TeleportNotice> {
        let message = extract_message(line)?;
        let player = teleported_player(message)?;

        tracing::debug!("偵測到玩家 {} 傳送完成", player);
        self.log.insert(player.to_string(), now);

        Some(TeleportNotice {
            player: player.to_string(),
            message: message.to_string(),
        })
    }

    /// 最近一次傳送時間
    pub fn last_teleport(&self, player: &str) -> Option<Duration> {
        self.log.get(player).copied()
    }

    /// 清除所有傳送紀錄
    pub fn clear(&mut self) {
        self.log.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
