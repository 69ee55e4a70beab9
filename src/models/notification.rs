//! 通知实体
//!
//! 通知的投递由外部系统负责，客户端只读取未读数量、标记已读

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// 未读数量
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnreadCount {
    pub count: u32,
}
