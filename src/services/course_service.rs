//! 课程服务 - 业务能力层
//!
//! 课程进度快照（期末考试前置条件检查的输入）与模块列表

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{CacheKey, HttpExecutor, QueryCache};
use crate::models::{sort_by_ordinal, CourseProgress, Module};
use std::sync::Arc;
use std::time::Duration;

/// 课程服务
#[derive(Clone)]
pub struct CourseService {
    executor: Arc<HttpExecutor>,
    cache: Arc<QueryCache>,
    catalog_ttl: Duration,
    volatile_ttl: Duration,
}

impl CourseService {
    /// 创建新的课程服务
    pub fn new(executor: Arc<HttpExecutor>, cache: Arc<QueryCache>, config: &Config) -> Self {
        Self {
            executor,
            cache,
            catalog_ttl: Duration::from_secs(config.catalog_cache_ttl_secs),
            volatile_ttl: Duration::from_secs(config.volatile_cache_ttl_secs),
        }
    }

    // ========== 缓存键 ==========

    pub fn progress_key(course_id: &str) -> CacheKey {
        CacheKey::root("course").seg(course_id).seg("progress")
    }

    pub fn modules_key(course_id: &str) -> CacheKey {
        CacheKey::root("course").seg(course_id).seg("modules")
    }

    // ========== 读取 ==========

    /// 获取课程进度快照
    ///
    /// 进度变化频繁，使用较短的缓存有效期
    pub async fn progress(&self, course_id: &str) -> AppResult<CourseProgress> {
        let path = format!("/api/courses/{}/progress", course_id);
        self.cache
            .get_or_fetch(&Self::progress_key(course_id), self.volatile_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    /// 获取课程模块列表，按展示顺序返回
    pub async fn modules(&self, course_id: &str) -> AppResult<Vec<Module>> {
        let path = format!("/api/courses/{}/modules", course_id);
        let mut modules: Vec<Module> = self
            .cache
            .get_or_fetch(&Self::modules_key(course_id), self.catalog_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await?;
        sort_by_ordinal(&mut modules);
        Ok(modules)
    }
}
