//! 對外輸出
//!
//! 控制器不直接寫入伺服器，而是回傳要執行的動作，由宿主負責送出。

use serde::Serialize;

use crate::player::Player;

/// 私訊顏色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TellColor {
    /// 一般訊息（黃色）
    #[default]
    #[serde(rename = "yellow")]
    Info,
    /// 警告（紅色）
    #[serde(rename = "red")]
    Warning,
}

/// 控制器產生的動作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// 原樣送到伺服器輸入的命令
    Command(String),
    /// 私訊玩家
    Tell {
        player: Player,
        message: String,
        color: TellColor,
    },
}

/// `/tellraw` 使用的 JSON 文字元件
#[derive(Serialize)]
struct TextComponent<'a> {
    text: &'a str,
    color: TellColor,
}

impl Outbound {
    pub fn command(cmd: impl Into<String>) -> Self {
        Outbound::Command(cmd.into())
    }

    pub fn info(player: &Player, message: impl Into<String>) -> Self {
        Outbound::Tell {
            player: player.clone(),
            message: message.into(),
            color: TellColor::Info,
        }
    }

    pub fn warning(player: &Player, message: impl Into<String>) -> Self {
        Outbound::Tell {
            player: player.clone(),
            message: message.into(),
            color: TellColor::Warning,
        }
    }

    /// 轉成伺服器命令文字
    ///
    /// 控制台收不到 `/tellraw`，此時回傳 `Ok(None)`，由宿主自行記錄。
    pub fn render(&self) -> Result<Option<String>, serde_json::Error> {
        match self {
            Outbound::Command(cmd) => Ok(Some(cmd.clone())),
            Outbound::Tell {
                player,
                message,
                color,
            } => {
                if player.is_console() {
                    return Ok(None);
                }
                let json = serde_json::to_string(&TextComponent {
                    text: message,
                    color: *color,
                })?;
                Ok(Some(format!("/tellraw {} {}", player.name, json)))
            }
        }
    }
}
