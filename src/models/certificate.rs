//! 证书实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 结课证书
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub course_title: String,
    pub issued_at: DateTime<Utc>,
    /// 证书文件下载地址
    pub url: Option<String>,
}
