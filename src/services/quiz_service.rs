//! Quiz 服务 - 业务能力层
//!
//! 封装 quiz 相关的读写操作：定义、题目列表、答题记录、创建与提交。
//! 读取声明缓存键；写操作成功后按失效列表使相关缓存失效。

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{CacheKey, HttpExecutor, QueryCache};
use crate::models::{AnswerRecord, Attempt, AttemptResult, AttemptTarget, QuestionDetail, Quiz};
use crate::services::{apply_invalidations, submit_invalidations};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Quiz 服务
#[derive(Clone)]
pub struct QuizService {
    executor: Arc<HttpExecutor>,
    cache: Arc<QueryCache>,
    catalog_ttl: Duration,
    volatile_ttl: Duration,
}

impl QuizService {
    /// 创建新的 quiz 服务
    pub fn new(executor: Arc<HttpExecutor>, cache: Arc<QueryCache>, config: &Config) -> Self {
        Self {
            executor,
            cache,
            catalog_ttl: Duration::from_secs(config.catalog_cache_ttl_secs),
            volatile_ttl: Duration::from_secs(config.volatile_cache_ttl_secs),
        }
    }

    // ========== 缓存键 ==========

    pub fn quiz_key(quiz_id: &str) -> CacheKey {
        CacheKey::root("quiz").seg(quiz_id)
    }

    pub fn questions_key(quiz_id: &str) -> CacheKey {
        Self::quiz_key(quiz_id).seg("questions")
    }

    pub fn attempts_key(quiz_id: &str) -> CacheKey {
        Self::quiz_key(quiz_id).seg("attempts")
    }

    pub fn results_key(quiz_id: &str) -> CacheKey {
        Self::quiz_key(quiz_id).seg("results")
    }

    // ========== 读取 ==========

    /// 获取 quiz 定义
    pub async fn get(&self, quiz_id: &str) -> AppResult<Quiz> {
        let path = format!("/api/quizzes/{}", quiz_id);
        self.cache
            .get_or_fetch(&Self::quiz_key(quiz_id), self.catalog_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    /// 获取 quiz 的完整题目列表（题干 + 类型配置 + 选项）
    pub async fn questions(&self, quiz_id: &str) -> AppResult<Vec<QuestionDetail>> {
        let path = format!("/api/quizzes/{}/questions", quiz_id);
        self.cache
            .get_or_fetch(&Self::questions_key(quiz_id), self.catalog_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    /// 获取 quiz 的答题记录列表
    pub async fn attempts(&self, quiz_id: &str) -> AppResult<Vec<Attempt>> {
        let path = format!("/api/quizzes/{}/attempts", quiz_id);
        self.cache
            .get_or_fetch(&Self::attempts_key(quiz_id), self.volatile_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    /// 获取 quiz 的评分结果列表
    pub async fn results(&self, quiz_id: &str) -> AppResult<Vec<AttemptResult>> {
        let path = format!("/api/quizzes/{}/results", quiz_id);
        self.cache
            .get_or_fetch(&Self::results_key(quiz_id), self.volatile_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    // ========== 写操作 ==========

    /// 创建新的答题记录
    pub async fn create_attempt(&self, quiz_id: &str) -> AppResult<Attempt> {
        let path = format!("/api/quizzes/{}/attempts", quiz_id);
        let attempt: Attempt = self.executor.post_as(&path, &json!({})).await?;

        // 新记录出现，记录列表缓存失效
        self.cache.invalidate_prefix(&Self::attempts_key(quiz_id));
        self.cache.invalidate_prefix(&CacheKey::root("attempts"));

        info!("✓ 已创建答题记录: quiz#{} 第 {} 次", quiz_id, attempt.attempt_number);
        Ok(attempt)
    }

    /// 批量提交作答
    ///
    /// 成功后按固定失效列表清理相关缓存
    pub async fn submit_attempt(
        &self,
        quiz_id: &str,
        attempt_id: &str,
        course_id: &str,
        answers: &[AnswerRecord],
    ) -> AppResult<()> {
        let path = format!("/api/quizzes/{}/attempts/{}/answers", quiz_id, attempt_id);
        self.executor
            .post(&path, &json!({ "answers": answers }))
            .await?;

        let target = AttemptTarget::Quiz(quiz_id.to_string());
        apply_invalidations(
            &self.cache,
            &submit_invalidations(&target, attempt_id, course_id),
        );

        info!("✓ quiz#{} 作答已提交 ({} 条)", quiz_id, answers.len());
        Ok(())
    }
}
