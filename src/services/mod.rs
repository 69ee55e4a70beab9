//! 业务能力层
//!
//! 每个实体一个服务：声明自己的缓存键、读取走缓存、写操作成功后
//! 按声明的失效列表使相关缓存失效。服务只描述"我能做什么"，
//! 不关心答题流程的先后顺序。

pub mod attempt_service;
pub mod course_service;
pub mod enrollment_service;
pub mod exam_service;
pub mod notification_service;
pub mod quiz_service;

pub use attempt_service::{AttemptFilter, AttemptService};
pub use course_service::CourseService;
pub use enrollment_service::EnrollmentService;
pub use exam_service::ExamService;
pub use notification_service::NotificationService;
pub use quiz_service::QuizService;

use crate::infrastructure::{CacheKey, QueryCache};
use crate::models::AttemptTarget;

/// 提交作答成功后的失效列表
///
/// 提交可能改变通过/未通过状态并解锁后续内容，因此除答题记录本身外，
/// 选课、课程进度与证书的缓存读取也一并失效。
/// 列表内容固定，每个键恰好出现一次
pub fn submit_invalidations(
    target: &AttemptTarget,
    attempt_id: &str,
    course_id: &str,
) -> Vec<CacheKey> {
    let kind = match target {
        AttemptTarget::Quiz(_) => "quiz",
        AttemptTarget::Exam(_) => "exam",
    };
    vec![
        CacheKey::root(kind).seg(target.id()),
        CacheKey::root(kind).seg(target.id()).seg("attempts"),
        CacheKey::root(kind).seg(target.id()).seg("results"),
        CacheKey::root("attempt").seg(attempt_id),
        CacheKey::root("attempts"),
        CacheKey::root("enrollments"),
        CacheKey::root("course").seg(course_id).seg("progress"),
        CacheKey::root("certificates"),
    ]
}

/// 按前缀逐个应用失效列表
pub fn apply_invalidations(cache: &QueryCache, keys: &[CacheKey]) {
    for key in keys {
        cache.invalidate_prefix(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn submit_invalidations_cover_required_keys_exactly_once() {
        let target = AttemptTarget::Quiz("q1".to_string());
        let keys = submit_invalidations(&target, "a1", "c1");

        // 必须包含：答题记录本身、目标的记录列表、课程进度
        assert!(keys.contains(&CacheKey::root("attempt").seg("a1")));
        assert!(keys.contains(&CacheKey::root("quiz").seg("q1").seg("attempts")));
        assert!(keys.contains(&CacheKey::root("course").seg("c1").seg("progress")));
        // 以及选课与证书
        assert!(keys.contains(&CacheKey::root("enrollments")));
        assert!(keys.contains(&CacheKey::root("certificates")));

        // 每个键恰好出现一次
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn exam_target_invalidates_exam_keys() {
        let target = AttemptTarget::Exam("x1".to_string());
        let keys = submit_invalidations(&target, "a2", "c2");

        assert!(keys.contains(&CacheKey::root("exam").seg("x1").seg("attempts")));
        assert!(!keys
            .iter()
            .any(|k| k.starts_with(&CacheKey::root("quiz"))));
    }
}
