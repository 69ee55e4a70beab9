//! 选课服务 - 业务能力层

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{CacheKey, HttpExecutor, QueryCache};
use crate::models::{Certificate, Enrollment};
use std::sync::Arc;
use std::time::Duration;

/// 选课与证书服务
#[derive(Clone)]
pub struct EnrollmentService {
    executor: Arc<HttpExecutor>,
    cache: Arc<QueryCache>,
    volatile_ttl: Duration,
}

impl EnrollmentService {
    /// 创建新的选课服务
    pub fn new(executor: Arc<HttpExecutor>, cache: Arc<QueryCache>, config: &Config) -> Self {
        Self {
            executor,
            cache,
            volatile_ttl: Duration::from_secs(config.volatile_cache_ttl_secs),
        }
    }

    // ========== 缓存键 ==========

    pub fn enrollments_key(user_id: &str) -> CacheKey {
        CacheKey::root("enrollments").filter([("user_id", user_id)])
    }

    pub fn certificates_key(user_id: &str) -> CacheKey {
        CacheKey::root("certificates").filter([("user_id", user_id)])
    }

    // ========== 读取 ==========

    /// 列出用户的选课记录
    ///
    /// 提交作答可能完成课程，因此该读取在提交后会被失效
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<Enrollment>> {
        let path = format!("/api/enrollments?user_id={}", user_id);
        self.cache
            .get_or_fetch(&Self::enrollments_key(user_id), self.volatile_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }

    /// 列出用户的结课证书
    pub async fn certificates(&self, user_id: &str) -> AppResult<Vec<Certificate>> {
        let path = format!("/api/certificates?user_id={}", user_id);
        self.cache
            .get_or_fetch(&Self::certificates_key(user_id), self.volatile_ttl, || async move {
                self.executor.get_as(&path).await
            })
            .await
    }
}
