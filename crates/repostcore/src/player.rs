//! 玩家身分

use std::fmt;

/// 發出輸入的對象：真正連線的玩家或伺服器控制台
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    /// 玩家名稱
    pub name: String,
    /// 是否為控制台（非玩家）
    console: bool,
}

impl Player {
    /// 一般玩家
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            console: false,
        }
    }

    /// 伺服器控制台
    pub fn console() -> Self {
        Self {
            name: "CONSOLE".to_string(),
            console: true,
        }
    }

    pub fn is_console(&self) -> bool {
        self.console
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
