//! 轉發（Repost）模組
//!
//! 控制器發出的某些命令，結果會稍後出現在伺服器日誌中。
//! 發出命令時設定「預期行數」與收件玩家，之後每一行符合的日誌
//! 都轉發給該玩家，直到計數歸零。

use std::num::NonZeroUsize;

use crate::matcher::repost_candidate;
use crate::player::Player;

/// 進行中的轉發工作
#[derive(Debug, Clone, PartialEq, Eq)]
struct RepostSession {
    remaining: NonZeroUsize,
    receiver: Player,
}

/// 一則要轉發的訊息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repost {
    pub receiver: Player,
    pub text: String,
}

/// 轉發狀態機
///
/// 同時只會有一個轉發工作；重新設定會直接覆蓋舊的。
#[derive(Debug, Clone, Default)]
pub struct RepostCorrelator {
    session: Option<RepostSession>,
}

impl RepostCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 預期接下來 `count` 行要轉發給 `receiver`
    ///
    /// `count` 為 0 時等同於解除。
    pub fn arm(&mut self, receiver: Player, count: usize) {
        self.session = NonZeroUsize::new(count).map(|remaining| RepostSession {
            remaining,
            receiver,
        });
    }

    /// 解除轉發
    pub fn disarm(&mut self) {
        self.session = None;
    }

    /// 剩餘待轉發行數
    pub fn remaining(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.remaining.get())
    }

    /// 目前的收件玩家
    pub fn receiver(&self) -> Option<&Player> {
        self.session.as_ref().map(|s| &s.receiver)
    }

    pub fn is_armed(&self) -> bool {
        self.session.is_some()
    }

    /// 處理一行日誌，符合時回傳要轉發的訊息
    pub fn feed(&mut self, line: &str) -> Option<Repost> {
        let session = self.session.as_mut()?;
        let text = repost_candidate(line)?;

        tracing::debug!("轉發剩餘行數 = {}", session.remaining);

        let repost = Repost {
            receiver: session.receiver.clone(),
            text: text.to_string(),
        };

        match NonZeroUsize::new(session.remaining.get() - 1) {
            Some(remaining) => session.remaining = remaining,
            None => self.session = None,
        }

        Some(repost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(text: &str) -> String {
        format!("[12:00:00] [Server thread/INFO]: {}", text)
    }

    #[test]
    fn test_disarmed_is_noop() {
        let mut correlator = RepostCorrelator::new();
        assert!(correlator.feed(&info("The time is 1000")).is_none());
        assert_eq!(correlator.remaining(), 0);
    }

    #[test]
    fn test_forwards_exactly_n_in_order() {
        let mut correlator = RepostCorrelator::new();
        let alice = Player::new("Alice");
        correlator.arm(alice.clone(), 3);

        let mut forwarded = Vec::new();
        for i in 0..5 {
            if let Some(r) = correlator.feed(&info(&format!("line {}", i))) {
                assert_eq!(r.receiver, alice);
                forwarded.push(r.text);
            }
        }

        assert_eq!(forwarded, vec!["line 0", "line 1", "line 2"]);
        assert_eq!(correlator.remaining(), 0);
        assert!(correlator.receiver().is_none());
    }

    #[test]
    fn test_non_matching_line_changes_nothing() {
        let mut correlator = RepostCorrelator::new();
        correlator.arm(Player::new("Alice"), 2);

        assert!(correlator.feed("garbage").is_none());
        assert!(correlator.feed(&info("<Bob> chatting")).is_none());
        assert_eq!(correlator.remaining(), 2);
        assert_eq!(correlator.receiver(), Some(&Player::new("Alice")));
    }

    #[test]
    fn test_last_line_still_returns_receiver() {
        let mut correlator = RepostCorrelator::new();
        correlator.arm(Player::new("Alice"), 1);

        let r = correlator.feed(&info("The time is 6000")).unwrap();
        assert_eq!(r.receiver.name, "Alice");
        assert_eq!(r.text, "The time is 6000");
        assert!(!correlator.is_armed());
    }

    #[test]
    fn test_rearm_discards_previous_session() {
        let mut correlator = RepostCorrelator::new();
        correlator.arm(Player::new("Alice"), 4);
        correlator.feed(&info("first"));

        correlator.arm(Player::new("Bob"), 1);
        assert_eq!(correlator.remaining(), 1);

        let r = correlator.feed(&info("second")).unwrap();
        assert_eq!(r.receiver.name, "Bob");
        assert!(correlator.feed(&info("third")).is_none());
    }

    #[test]
    fn test_arm_zero_disarms() {
        let mut correlator = RepostCorrelator::new();
        correlator.arm(Player::new("Alice"), 2);
        correlator.arm(Player::new("Alice"), 0);
        assert!(!correlator.is_armed());
    }
}
