//! 設定檔模組
//!
//! 設定檔為 JSON，所有欄位皆可省略：
//!
//! ```json
//! { "tp-cd": 30, "forge": true }
//! ```

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// 設定檔錯誤
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("讀取設定檔失敗: {0}")]
    Io(#[from] io::Error),

    #[error("設定檔格式錯誤: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 控制器設定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `!tp` 冷卻秒數
    #[serde(rename = "tp-cd")]
    pub tp_cooldown_secs: u64,
    /// 伺服器是否支援 `/forge tps`
    pub forge: bool,
    /// 命令前綴
    pub prefix: char,
    /// 伺服器停止時是否一併清除冷卻與轉發狀態
    #[serde(rename = "reset-on-stop")]
    pub reset_on_stop: bool,
    /// 自訂聊天行格式（需有 `name` 與 `text` 具名群組）
    #[serde(rename = "chat-pattern")]
    pub chat_pattern: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tp_cooldown_secs: 0,
            forge: false,
            prefix: '!',
            reset_on_stop: false,
            chat_pattern: None,
        }
    }
}

impl Config {
    /// 從檔案載入設定
    ///
    /// 檔案不存在時使用預設值並發出警告；檔案存在但無法解析時回傳錯誤。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("找不到設定檔 {:?}，使用預設設定", path);
            return Ok(Self::default());
        }

        info!("正在載入設定檔 {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 從 JSON 字串解析設定
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// `!tp` 冷卻長度
    pub fn tp_cooldown(&self) -> Duration {
        Duration::from_secs(self.tp_cooldown_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tp_cooldown_secs, 0);
        assert!(!config.forge);
        assert_eq!(config.prefix, '!');
        assert!(!config.reset_on_stop);
        assert!(config.chat_pattern.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{ "tp-cd": 30 }"#).unwrap();
        assert_eq!(config.tp_cooldown(), Duration::from_secs(30));
        assert!(!config.forge);
        assert_eq!(config.prefix, '!');
    }

    #[test]
    fn test_full_json() {
        let config = Config::from_json(
            r##"{ "tp-cd": 5, "forge": true, "prefix": "#", "reset-on-stop": true,
                 "chat-pattern": "^(?P<name>\\w+): (?P<text>.*)$" }"##,
        )
        .unwrap();

        assert_eq!(config.tp_cooldown_secs, 5);
        assert!(config.forge);
        assert_eq!(config.prefix, '#');
        assert!(config.reset_on_stop);
        assert_eq!(config.chat_pattern.as_deref(), Some(r"^(?P<name>\w+): (?P<text>.*)$"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Config::from_json("{ tp-cd: 1 "),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "tp-cd": -1 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("repostcore_missing_config_does_not_exist.json");
        let _ = fs::remove_file(&path);

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join("repostcore_test_config.json");
        fs::write(&path, r#"{ "forge": true }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.forge);
        assert_eq!(config.tp_cooldown_secs, 0);

        let _ = fs::remove_file(&path);
    }
}
