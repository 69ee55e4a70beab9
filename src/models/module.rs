//! 课程模块实体
//!
//! 模块带起止时间，按当前时刻分类为 未开始 / 进行中 / 已结束

use crate::models::ordering::Ordered;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 课程模块
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub ordinal: Option<u32>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// 模块状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    /// 未开始：当前时刻早于 start_date
    Upcoming,
    /// 进行中
    Active,
    /// 已结束：当前时刻晚于 end_date
    Finished,
}

impl Module {
    /// 按给定时刻分类模块状态
    ///
    /// 纯函数，每次调用重新计算
    pub fn status_at(&self, now: DateTime<Utc>) -> ModuleStatus {
        if now < self.start_date {
            ModuleStatus::Upcoming
        } else if now > self.end_date {
            ModuleStatus::Finished
        } else {
            ModuleStatus::Active
        }
    }

    /// 按当前时刻分类模块状态
    pub fn status(&self) -> ModuleStatus {
        self.status_at(Utc::now())
    }
}

impl Ordered for Module {
    fn ordinal(&self) -> Option<u32> {
        self.ordinal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn module() -> Module {
        Module {
            id: "m1".to_string(),
            course_id: "c1".to_string(),
            title: "模块一".to_string(),
            description: None,
            ordinal: Some(1),
            start_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn classifies_by_date_bounds() {
        let m = module();
        let before = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let during = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();

        assert_eq!(m.status_at(before), ModuleStatus::Upcoming);
        assert_eq!(m.status_at(during), ModuleStatus::Active);
        assert_eq!(m.status_at(after), ModuleStatus::Finished);
    }

    #[test]
    fn boundaries_count_as_active() {
        let m = module();
        assert_eq!(m.status_at(m.start_date), ModuleStatus::Active);
        assert_eq!(m.status_at(m.end_date), ModuleStatus::Active);
    }
}
