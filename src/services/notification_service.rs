//! 通知服务 - 业务能力层
//!
//! 通知投递由外部系统负责，这里只暴露三个操作：
//! 读取未读数量、标记单条已读、全部标记已读

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{CacheKey, HttpExecutor, QueryCache};
use crate::models::{Notification, UnreadCount};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 通知服务
#[derive(Clone)]
pub struct NotificationService {
    executor: Arc<HttpExecutor>,
    cache: Arc<QueryCache>,
    volatile_ttl: Duration,
}

impl NotificationService {
    /// 创建新的通知服务
    pub fn new(executor: Arc<HttpExecutor>, cache: Arc<QueryCache>, config: &Config) -> Self {
        Self {
            executor,
            cache,
            volatile_ttl: Duration::from_secs(config.volatile_cache_ttl_secs),
        }
    }

    // ========== 缓存键 ==========

    pub fn notifications_key() -> CacheKey {
        CacheKey::root("notifications")
    }

    pub fn unread_count_key() -> CacheKey {
        Self::notifications_key().seg("unread-count")
    }

    // ========== 读取 ==========

    /// 获取未读数量
    pub async fn unread_count(&self) -> AppResult<UnreadCount> {
        self.cache
            .get_or_fetch(&Self::unread_count_key(), self.volatile_ttl, || async {
                self.executor.get_as("/api/notifications/unread-count").await
            })
            .await
    }

    /// 列出通知
    pub async fn list(&self) -> AppResult<Vec<Notification>> {
        let key = Self::notifications_key().seg("list");
        self.cache
            .get_or_fetch(&key, self.volatile_ttl, || async {
                self.executor.get_as("/api/notifications").await
            })
            .await
    }

    // ========== 写操作 ==========

    /// 标记单条通知已读
    pub async fn mark_read(&self, notification_id: &str) -> AppResult<()> {
        let path = format!("/api/notifications/{}/read", notification_id);
        self.executor.post(&path, &json!({})).await?;
        self.cache.invalidate_prefix(&Self::notifications_key());
        Ok(())
    }

    /// 全部标记已读
    pub async fn mark_all_read(&self) -> AppResult<()> {
        self.executor
            .post("/api/notifications/read-all", &json!({}))
            .await?;
        self.cache.invalidate_prefix(&Self::notifications_key());
        info!("✓ 所有通知已标记为已读");
        Ok(())
    }
}
