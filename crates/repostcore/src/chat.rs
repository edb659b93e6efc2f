//! 聊天橋接模組
//!
//! 從伺服器輸出辨識玩家聊天，轉成「玩家輸入」事件。

use regex::Regex;
use thiserror::Error;

use crate::player::Player;

/// 原版伺服器聊天格式：`[12:00:00] [Server thread/INFO]: <Alice> hello`
pub const DEFAULT_CHAT_PATTERN: &str =
    r"^[^<>]*?\[Server thread/INFO\][^<>]*?: <(?P<name>\w+)> (?P<text>.*)$";

/// 聊天橋接錯誤
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("聊天格式無效: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("聊天格式缺少具名群組: {0}")]
    MissingGroup(&'static str),
}

/// 聊天橋接器
#[derive(Debug, Clone)]
pub struct ChatBridge {
    pattern: Regex,
}

impl ChatBridge {
    /// 以自訂格式建立，格式需包含 `name` 與 `text` 具名群組
    pub fn new(pattern: &str) -> Result<Self, ChatError> {
        let pattern = Regex::new(pattern)?;
        for group in ["name", "text"] {
            if !pattern.capture_names().flatten().any(|n| n == group) {
                return Err(ChatError::MissingGroup(group));
            }
        }
        Ok(Self { pattern })
    }

    /// 依設定建立，未指定格式時使用原版格式
    pub fn from_pattern(pattern: Option<&str>) -> Result<Self, ChatError> {
        Self::new(pattern.unwrap_or(DEFAULT_CHAT_PATTERN))
    }

    /// 解析一行伺服器輸出
    pub fn parse(&self, line: &str) -> Option<(Player, String)> {
        let caps = self.pattern.captures(line.trim_end_matches(&['\r', '\n'][..]))?;
        let name = caps.name("name")?.as_str();
        let text = caps.name("text")?.as_str();
        Some((Player::new(name), text.to_string()))
    }
}

impl Default for ChatBridge {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_CHAT_PATTERN).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vanilla_chat() {
        let bridge = ChatBridge::default();
        let (player, text) = bridge
            .parse("[12:00:00] [Server thread/INFO]: <Alice> !tp Bob")
            .unwrap();

        assert_eq!(player, Player::new("Alice"));
        assert!(!player.is_console());
        assert_eq!(text, "!tp Bob");
    }

    #[test]
    fn test_ignore_non_chat() {
        let bridge = ChatBridge::default();
        assert!(bridge.parse("[12:00:00] [Server thread/INFO]: Alice joined the game").is_none());
        assert!(bridge.parse("[12:00:00] [Server thread/INFO]: The time is 1000").is_none());
        assert!(bridge.parse("<Alice> hi").is_none());
    }

    #[test]
    fn test_custom_pattern() {
        let bridge = ChatBridge::from_pattern(Some(r"^\[CHAT\] (?P<name>\w+): (?P<text>.*)$")).unwrap();
        let (player, text) = bridge.parse("[CHAT] Bob: !time").unwrap();
        assert_eq!(player.name, "Bob");
        assert_eq!(text, "!time");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            ChatBridge::new("(unclosed"),
            Err(ChatError::InvalidPattern(_))
        ));
        assert!(matches!(
            ChatBridge::new(r"^(?P<name>\w+)$"),
            Err(ChatError::MissingGroup("text"))
        ));
    }
}
