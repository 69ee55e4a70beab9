//! 答题记录服务 - 业务能力层
//!
//! 跨 quiz / 期末考试的答题记录读取，以及管理员放行额外尝试的写操作

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{CacheKey, HttpExecutor, QueryCache};
use crate::models::{Attempt, AttemptResult};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 答题记录列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct AttemptFilter {
    pub quiz_id: Option<String>,
    pub exam_id: Option<String>,
    pub user_id: Option<String>,
}

impl AttemptFilter {
    /// 过滤条件的键值对（缓存键与查询串共用）
    fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(quiz_id) = &self.quiz_id {
            pairs.push(("quiz_id".to_string(), quiz_id.clone()));
        }
        if let Some(exam_id) = &self.exam_id {
            pairs.push(("exam_id".to_string(), exam_id.clone()));
        }
        if let Some(user_id) = &self.user_id {
            pairs.push(("user_id".to_string(), user_id.clone()));
        }
        pairs
    }

    fn query_string(&self) -> String {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return String::new();
        }
        let joined: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("?{}", joined.join("&"))
    }
}

/// 答题记录服务
#[derive(Clone)]
pub struct AttemptService {
    executor: Arc<HttpExecutor>,
    cache: Arc<QueryCache>,
    volatile_ttl: Duration,
}

impl AttemptService {
    /// 创建新的答题记录服务
    pub fn new(executor: Arc<HttpExecutor>, cache: Arc<QueryCache>, config: &Config) -> Self {
        Self {
            executor,
            cache,
            volatile_ttl: Duration::from_secs(config.volatile_cache_ttl_secs),
        }
    }

    // ========== 缓存键 ==========

    pub fn attempt_key(attempt_id: &str) -> CacheKey {
        CacheKey::root("attempt").seg(attempt_id)
    }

    pub fn list_key(filter: &AttemptFilter) -> CacheKey {
        CacheKey::root("attempts").filter(filter.pairs())
    }

    // ========== 读取 ==========

    /// 按 id 获取答题记录
    pub async fn get(&self, attempt_id: &str) -> AppResult<Attempt> {
        let path = format!("/api/attempts/{}", attempt_id);
        self.cache
            .get_or_fetch(&Self::attempt_key(attempt_id), self.volatile_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    /// 按过滤条件列出答题记录
    pub async fn list(&self, filter: &AttemptFilter) -> AppResult<Vec<Attempt>> {
        let path = format!("/api/attempts{}", filter.query_string());
        self.cache
            .get_or_fetch(&Self::list_key(filter), self.volatile_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    /// 获取带详细作答内容的评分结果
    pub async fn result(&self, attempt_id: &str) -> AppResult<AttemptResult> {
        let path = format!("/api/attempts/{}/result", attempt_id);
        let key = Self::attempt_key(attempt_id).seg("result");
        self.cache
            .get_or_fetch(&key, self.volatile_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    // ========== 写操作 ==========

    /// 放行额外尝试（管理员操作）
    ///
    /// 用户达到次数上限后允许再答一次
    pub async fn allow_new_attempt(&self, attempt_id: &str) -> AppResult<Attempt> {
        let path = format!("/api/attempts/{}/allow-new-attempt", attempt_id);
        let attempt: Attempt = self.executor.put_as(&path, &json!({})).await?;

        self.cache.invalidate_prefix(&Self::attempt_key(attempt_id));
        self.cache.invalidate_prefix(&CacheKey::root("attempts"));

        info!("✓ 已放行额外尝试: attempt#{}", attempt_id);
        Ok(attempt)
    }
}
