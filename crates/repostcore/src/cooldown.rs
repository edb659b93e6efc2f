//! 冷卻時間模組
//!
//! 記錄每位玩家最後一次使用受限命令的時間

use std::collections::HashMap;
use std::time::Duration;

/// 冷卻檢查結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cooldown {
    /// 可以使用
    Ready,
    /// 冷卻中，剩餘整秒數（無條件捨去）
    Cooling { remaining_secs: u64 },
}

impl Cooldown {
    pub fn is_ready(&self) -> bool {
        matches!(self, Cooldown::Ready)
    }
}

/// 冷卻追蹤器
///
/// `check` 不會更新紀錄；只有在真正執行動作後才呼叫 `record`。
#[derive(Debug, Clone, Default)]
pub struct CooldownTracker {
    /// 冷卻長度
    window: Duration,
    /// 玩家名稱 -> 最後使用時間
    last_use: HashMap<String, Duration>,
}

impl CooldownTracker {
    /// 創建新的冷卻追蹤器
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_use: HashMap::new(),
        }
    }

    /// 檢查玩家在 `now` 時是否可以使用
    ///
    /// 沒有紀錄的玩家視為在時間零使用過。
    pub fn check(&self, player: &str, now: Duration) -> Cooldown {
        let last = self.last_use.get(player).copied().unwrap_or(Duration::ZERO);
        let elapsed = now.saturating_sub(last);

        if elapsed >= self.window {
            Cooldown::Ready
        } else {
            Cooldown::Cooling {
                remaining_secs: (self.window - elapsed).as_secs(),
            }
        }
    }

    /// 記錄一次成功的使用
    pub fn record(&mut self, player: &str, now: Duration) {
        self.last_use.insert(player.to_string(), now);
    }

    /// 最後使用時間
    pub fn last_use(&self, player: &str) -> Option<Duration> {
        self.last_use.get(player).copied()
    }

    /// 清除所有紀錄
    pub fn clear(&mut self) {
        self.last_use.clear();
    }

    pub fn len(&self) -> usize {
        self.last_use.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_use.is_empty()
    }
}
