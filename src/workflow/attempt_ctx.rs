//! 答题上下文
//!
//! 封装"我正在哪门课程里答哪个 quiz / 考试"这一信息

use crate::models::AttemptTarget;
use std::fmt::Display;

/// 答题上下文
///
/// 包含一次答题流程所需的所有定位信息
#[derive(Debug, Clone)]
pub struct AttemptCtx {
    /// 课程 ID（进度快照与失效列表需要）
    pub course_id: String,

    /// 选课记录 ID
    pub enrollment_id: String,

    /// 答题目标：quiz 或期末考试，构造即保证互斥
    pub target: AttemptTarget,
}

impl AttemptCtx {
    /// 创建新的答题上下文
    pub fn new(
        course_id: impl Into<String>,
        enrollment_id: impl Into<String>,
        target: AttemptTarget,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            enrollment_id: enrollment_id.into(),
            target,
        }
    }
}

impl Display for AttemptCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[课程#{} 选课#{} 目标 {}]",
            self.course_id, self.enrollment_id, self.target
        )
    }
}
