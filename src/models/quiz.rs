//! Quiz 实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 模块内的小测验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub module_id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    /// 答题时间限制（分钟），None 表示不限时
    pub time_limit_minutes: Option<u64>,
    /// 常规尝试次数上限
    pub max_attempts: Option<u32>,
    /// 及格分数线
    pub passing_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
