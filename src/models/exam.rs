//! 期末考试实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 课程期末考试
///
/// 与 quiz 的区别：创建答题记录前必须通过前置条件检查
/// （课程内所有 quiz 已通过，即进度快照的 pending_quizzes 为 0）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
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
