//! 期末考试服务 - 业务能力层
//!
//! 封装期末考试相关的读写操作。前置条件检查（所有 quiz 已通过）
//! 不在这里：那是流程层的职责，本服务只提供能力。

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{CacheKey, HttpExecutor, QueryCache};
use crate::models::{AnswerRecord, Attempt, AttemptResult, AttemptTarget, Exam, QuestionDetail};
use crate::services::{apply_invalidations, submit_invalidations};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 期末考试服务
#[derive(Clone)]
pub struct ExamService {
    executor: Arc<HttpExecutor>,
    cache: Arc<QueryCache>,
    catalog_ttl: Duration,
    volatile_ttl: Duration,
}

impl ExamService {
    /// 创建新的期末考试服务
    pub fn new(executor: Arc<HttpExecutor>, cache: Arc<QueryCache>, config: &Config) -> Self {
        Self {
            executor,
            cache,
            catalog_ttl: Duration::from_secs(config.catalog_cache_ttl_secs),
            volatile_ttl: Duration::from_secs(config.volatile_cache_ttl_secs),
        }
    }

    // ========== 缓存键 ==========

    pub fn exam_key(exam_id: &str) -> CacheKey {
        CacheKey::root("exam").seg(exam_id)
    }

    pub fn questions_key(exam_id: &str) -> CacheKey {
        Self::exam_key(exam_id).seg("questions")
    }

    pub fn attempts_key(exam_id: &str) -> CacheKey {
        Self::exam_key(exam_id).seg("attempts")
    }

    // ========== 读取 ==========

    /// 获取期末考试定义
    pub async fn get(&self, exam_id: &str) -> AppResult<Exam> {
        let path = format!("/api/exams/{}", exam_id);
        self.cache
            .get_or_fetch(&Self::exam_key(exam_id), self.catalog_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    /// 获取期末考试的完整题目列表
    pub async fn questions(&self, exam_id: &str) -> AppResult<Vec<QuestionDetail>> {
        let path = format!("/api/exams/{}/questions", exam_id);
        self.cache
            .get_or_fetch(&Self::questions_key(exam_id), self.catalog_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    /// 获取期末考试的答题记录列表
    pub async fn attempts(&self, exam_id: &str) -> AppResult<Vec<Attempt>> {
        let path = format!("/api/exams/{}/attempts", exam_id);
        self.cache
            .get_or_fetch(&Self::attempts_key(exam_id), self.volatile_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    /// 获取期末考试的评分结果列表
    pub async fn results(&self, exam_id: &str) -> AppResult<Vec<AttemptResult>> {
        let path = format!("/api/exams/{}/results", exam_id);
        let key = Self::exam_key(exam_id).seg("results");
        self.cache
            .get_or_fetch(&key, self.volatile_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    // ========== 写操作 ==========

    /// 创建新的答题记录
    ///
    /// 调用方（流程层）必须先确认前置条件已满足
    pub async fn create_attempt(&self, exam_id: &str) -> AppResult<Attempt> {
        let path = format!("/api/exams/{}/attempts", exam_id);
        let attempt: Attempt = self.executor.post_as(&path, &json!({})).await?;

        self.cache.invalidate_prefix(&Self::attempts_key(exam_id));
        self.cache.invalidate_prefix(&CacheKey::root("attempts"));

        info!("✓ 已创建答题记录: exam#{} 第 {} 次", exam_id, attempt.attempt_number);
        Ok(attempt)
    }

    /// 批量提交作答
    pub async fn submit_attempt(
        &self,
        exam_id: &str,
        attempt_id: &str,
        course_id: &str,
        answers: &[AnswerRecord],
    ) -> AppResult<()> {
        let path = format!("/api/exams/{}/attempts/{}/answers", exam_id, attempt_id);
        self.executor
            .post(&path, &json!({ "answers": answers }))
            .await?;

        let target = AttemptTarget::Exam(exam_id.to_string());
        apply_invalidations(
            &self.cache,
            &submit_invalidations(&target, attempt_id, course_id),
        );

        info!("✓ exam#{} 作答已提交 ({} 条)", exam_id, answers.len());
        Ok(())
    }
}
