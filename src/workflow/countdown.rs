//! 倒计时 - 流程层
//!
//! 限时作答的倒计时，每秒递减一次，归零时恰好触发一次到期事件。
//! 到期后继续 tick 不再触发（强制提交只发生一次）。

use std::fmt;

/// 单次 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// 还在倒计时，携带剩余秒数
    Running(u64),
    /// 刚刚归零，本次且仅本次返回
    Expired,
    /// 已经到期过，不再触发
    Done,
}

/// 倒计时
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    remaining_secs: u64,
    fired: bool,
}

impl CountdownTimer {
    /// 按分钟创建倒计时
    pub fn from_minutes(minutes: u64) -> Self {
        Self {
            remaining_secs: minutes * 60,
            fired: false,
        }
    }

    /// 按秒创建倒计时
    pub fn from_secs(secs: u64) -> Self {
        Self {
            remaining_secs: secs,
            fired: false,
        }
    }

    /// 剩余秒数
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// 剩余时间是否不足 5 分钟（界面提醒用）
    pub fn is_low(&self) -> bool {
        self.remaining_secs < 5 * 60
    }

    /// 递减一秒
    ///
    /// 归零的那一次返回 Expired，之后恒为 Done
    pub fn tick(&mut self) -> TimerTick {
        if self.fired {
            return TimerTick::Done;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.fired = true;
            TimerTick::Expired
        } else {
            TimerTick::Running(self.remaining_secs)
        }
    }
}

impl fmt::Display for CountdownTimer {
    /// MM:SS 格式
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_exactly_once() {
        let mut timer = CountdownTimer::from_minutes(1);
        let mut expired_count = 0;

        for _ in 0..120 {
            match timer.tick() {
                TimerTick::Expired => expired_count += 1,
                TimerTick::Running(_) | TimerTick::Done => {}
            }
        }

        assert_eq!(expired_count, 1);
        assert_eq!(timer.tick(), TimerTick::Done);
    }

    #[test]
    fn counts_down_second_by_second() {
        let mut timer = CountdownTimer::from_secs(3);
        assert_eq!(timer.tick(), TimerTick::Running(2));
        assert_eq!(timer.tick(), TimerTick::Running(1));
        assert_eq!(timer.tick(), TimerTick::Expired);
    }

    #[test]
    fn formats_as_mm_ss() {
        let timer = CountdownTimer::from_secs(65);
        assert_eq!(format!("{}", timer), "01:05");
        assert!(timer.is_low());
        assert!(!CountdownTimer::from_minutes(10).is_low());
    }
}
