//! 课程进度快照实体

use serde::{Deserialize, Serialize};

/// 课程进度快照
///
/// pending_quizzes 是期末考试前置条件检查的输入：
/// 为 0 表示课程内所有 quiz 均已通过
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseProgress {
    pub course_id: String,
    /// 完成百分比 (0-100)
    pub percentage: f64,
    pub lessons_completed: u32,
    pub total_lessons: u32,
    /// 尚未通过的 quiz 数量
    pub pending_quizzes: u32,
    pub current_grade: Option<f64>,
    pub is_passed: Option<bool>,
}

impl CourseProgress {
    /// 期末考试前置条件是否满足
    pub fn prerequisites_met(&self) -> bool {
        self.pending_quizzes == 0
    }
}
