//! 時間來源模組
//!
//! 冷卻與傳送紀錄都以「自 UNIX epoch 起的時間」表示

use std::cell::Cell;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// 時間來源
pub trait Clock {
    /// 目前時間（自 UNIX epoch 起）
    fn now(&self) -> Duration;
}

/// 系統時鐘
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

/// 手動推進的時鐘，測試用
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new(start: Duration) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// 設定目前時間
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// 往前推進
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}
