//! HTTP 执行器 - 基础设施层
//!
//! 持有唯一的 reqwest::Client 资源，只暴露"发请求"的能力

use crate::config::Config;
use crate::error::{AppError, AppResult, HttpError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

/// HTTP 执行器
///
/// 职责：
/// - 持有唯一的 Client 资源（启用 cookie store，认证 cookie 随请求携带）
/// - 暴露 get / post / put / delete 能力
/// - 不认识 Quiz / Attempt
/// - 不处理业务流程
pub struct HttpExecutor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpExecutor {
    /// 创建新的 HTTP 执行器
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 拼接完整请求地址
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 发起 GET 请求并返回 JSON 结果
    pub async fn get(&self, path: &str) -> AppResult<JsonValue> {
        debug!("GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        self.handle(path, response).await
    }

    /// 发起 GET 请求并反序列化为指定类型
    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let json_value = self.get(path).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 发起 POST 请求并返回 JSON 结果
    pub async fn post(&self, path: &str, body: &impl Serialize) -> AppResult<JsonValue> {
        debug!("POST {}", path);
        let response = self.client.post(self.url(path)).json(body).send().await?;
        self.handle(path, response).await
    }

    /// 发起 POST 请求并反序列化为指定类型
    pub async fn post_as<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> AppResult<T> {
        let json_value = self.post(path, body).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 发起 PUT 请求并返回 JSON 结果
    pub async fn put(&self, path: &str, body: &impl Serialize) -> AppResult<JsonValue> {
        debug!("PUT {}", path);
        let response = self.client.put(self.url(path)).json(body).send().await?;
        self.handle(path, response).await
    }

    /// 发起 PUT 请求并反序列化为指定类型
    pub async fn put_as<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> AppResult<T> {
        let json_value = self.put(path, body).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 发起 DELETE 请求
    pub async fn delete(&self, path: &str) -> AppResult<JsonValue> {
        debug!("DELETE {}", path);
        let response = self.client.delete(self.url(path)).send().await?;
        self.handle(path, response).await
    }

    /// 统一处理响应
    ///
    /// 2xx 返回解析后的 JSON（空响应体按 null 处理），
    /// 非 2xx 提取服务端的 message 字段组成错误
    async fn handle(&self, path: &str, response: reqwest::Response) -> AppResult<JsonValue> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<JsonValue>(&text)
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .and_then(|m| m.as_str())
                        .map(|m| m.to_string())
                });
            return Err(AppError::bad_status(path, status.as_u16(), message));
        }

        if text.is_empty() {
            return Ok(JsonValue::Null);
        }

        let json_value = serde_json::from_str(&text)?;
        Ok(json_value)
    }
}

// ========== 响应检查辅助 ==========

impl HttpExecutor {
    /// 检查响应是否非空
    pub fn require_non_empty(path: &str, value: JsonValue) -> AppResult<JsonValue> {
        if value.is_null() {
            Err(AppError::Http(HttpError::EmptyResponse {
                endpoint: path.to_string(),
            }))
        } else {
            Ok(value)
        }
    }
}
