//! 请求缓存 - 基础设施层
//!
//! ## 职责
//!
//! 本模块实现按结构化键值缓存读请求结果的缓存管理器。
//!
//! ## 核心功能
//!
//! 1. **结构化键**：键是字符串段与过滤条件段组成的有序元组
//! 2. **TTL 读取**：`get_or_fetch` 在有效期内直接返回缓存值
//! 3. **并发去重**：同一个键的并发读取只触发一次网络请求
//! 4. **失效**：`invalidate` 精确失效，`invalidate_prefix` 按前缀失效
//!
//! ## 设计特点
//!
//! - **显式注入**：缓存实例通过 Arc 传给各服务，不存在全局状态
//! - **接受竞态**：写操作的失效与在途读取之间不保证顺序，
//!   迟到的读响应会把（可能过期的）数据重新写入缓存，等待下一次失效

use crate::error::AppResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

/// 缓存键的组成段
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    /// 字符串段，如 "quiz" 或某个实体 id
    Str(String),
    /// 过滤条件段，键值对按字典序排列保证规范化
    Filter(BTreeMap<String, String>),
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Str(s) => write!(f, "{}", s),
            KeyPart::Filter(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// 缓存键
///
/// 有序元组，如 `["quiz", <id>, "attempts"]` 或 `["attempts", {quiz_id=..}]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CacheKey(Vec<KeyPart>);

impl CacheKey {
    /// 以一个字符串段开头创建键
    pub fn root(seg: impl Into<String>) -> Self {
        Self(vec![KeyPart::Str(seg.into())])
    }

    /// 追加一个字符串段
    pub fn seg(mut self, seg: impl Into<String>) -> Self {
        self.0.push(KeyPart::Str(seg.into()));
        self
    }

    /// 追加一个过滤条件段
    pub fn filter<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.0.push(KeyPart::Filter(map));
        self
    }

    /// 判断本键是否以给定前缀开头
    pub fn starts_with(&self, prefix: &CacheKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", part)?;
        }
        write!(f, "]")
    }
}

/// 缓存条目
struct CacheEntry {
    value: JsonValue,
    fetched_at: Instant,
}

/// 请求缓存管理器
pub struct QueryCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    /// 每个键一把在途锁，保证并发读取只有一个发起网络请求
    in_flight: tokio::sync::Mutex<HashMap<CacheKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl QueryCache {
    /// 创建新的缓存管理器
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            in_flight: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// 读取缓存，过期或不存在时调用 `fetch` 并写回
    ///
    /// # 参数
    /// - `key`: 缓存键
    /// - `ttl`: 本次读取接受的缓存有效期
    /// - `fetch`: 缓存未命中时的取数闭包
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &CacheKey, ttl: Duration, fetch: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        // 快路径：缓存命中
        if let Some(value) = self.lookup(key, ttl) {
            debug!("缓存命中: {}", key);
            return Ok(serde_json::from_value(value)?);
        }

        // 获取本键的在途锁（去重并发读取）
        let gate = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        let _gate = gate.lock().await;

        // 等锁期间可能已有其他读取填充了缓存
        if let Some(value) = self.lookup(key, ttl) {
            debug!("缓存命中 (去重): {}", key);
            return Ok(serde_json::from_value(value)?);
        }

        debug!("缓存未命中, 发起取数: {}", key);
        let fetched = fetch().await?;
        let value = serde_json::to_value(&fetched)?;
        self.lock_entries().insert(
            key.clone(),
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );

        Ok(fetched)
    }

    /// 精确失效一个键
    ///
    /// # 返回
    /// 返回该键此前是否存在
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let removed = self.lock_entries().remove(key).is_some();
        if removed {
            debug!("缓存失效: {}", key);
        }
        removed
    }

    /// 按前缀失效
    ///
    /// # 返回
    /// 返回失效的条目数量
    pub fn invalidate_prefix(&self, prefix: &CacheKey) -> usize {
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        if removed > 0 {
            debug!("缓存前缀失效: {} ({} 条)", prefix, removed);
        }
        removed
    }

    /// 当前缓存条目数量
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &CacheKey, ttl: Duration) -> Option<JsonValue> {
        let entries = self.lock_entries();
        let entry = entries.get(key)?;
        if entry.fetched_at.elapsed() <= ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ttl() -> Duration {
        Duration::from_secs(60)
    }

    #[tokio::test]
    async fn get_or_fetch_caches_by_key() {
        let cache = QueryCache::new();
        let fetches = AtomicUsize::new(0);
        let key = CacheKey::root("quiz").seg("q1");

        for _ in 0..3 {
            let value: u32 = cache
                .get_or_fetch(&key, ttl(), || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(42u32)
                })
                .await
                .unwrap();
            assert_eq!(value, 42);
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cache = QueryCache::new();
        let fetches = AtomicUsize::new(0);
        let key = CacheKey::root("attempt").seg("a1");

        let fetch = || async {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok("ok".to_string())
        };

        let _: String = cache.get_or_fetch(&key, ttl(), fetch).await.unwrap();
        assert!(cache.invalidate(&key));
        let _: String = cache.get_or_fetch(&key, ttl(), fetch).await.unwrap();

        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        // 再次失效同一个键应返回 false
        cache.invalidate(&key);
        assert!(!cache.invalidate(&key));
    }

    #[tokio::test]
    async fn invalidate_prefix_matches_structured_keys() {
        let cache = QueryCache::new();
        let quiz_key = CacheKey::root("quiz").seg("q1");
        let attempts_key = CacheKey::root("quiz").seg("q1").seg("attempts");
        let filter_key =
            CacheKey::root("attempts").filter([("quiz_id", "q1"), ("user_id", "u1")]);

        for key in [&quiz_key, &attempts_key, &filter_key] {
            let _: u32 = cache.get_or_fetch(key, ttl(), || async { Ok(1u32) }).await.unwrap();
        }
        assert_eq!(cache.len(), 3);

        // 前缀 ["quiz", "q1"] 命中 quiz 本体与其 attempts 子键
        let removed = cache.invalidate_prefix(&CacheKey::root("quiz").seg("q1"));
        assert_eq!(removed, 2);
        assert_eq!(cache.len(), 1);

        // 前缀 ["attempts"] 命中过滤条件键
        let removed = cache.invalidate_prefix(&CacheKey::root("attempts"));
        assert_eq!(removed, 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn filter_part_is_order_insensitive() {
        let a = CacheKey::root("attempts").filter([("user_id", "u1"), ("quiz_id", "q1")]);
        let b = CacheKey::root("attempts").filter([("quiz_id", "q1"), ("user_id", "u1")]);
        assert_eq!(a, b);
        assert_eq!(format!("{}", a), "[attempts, {quiz_id=q1,user_id=u1}]");
    }

    #[tokio::test]
    async fn concurrent_reads_deduplicate() {
        let cache = Arc::new(QueryCache::new());
        let fetches = Arc::new(AtomicUsize::new(0));
        let key = CacheKey::root("course").seg("c1").seg("progress");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let fetches = fetches.clone();
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                let value: u32 = cache
                    .get_or_fetch(&key, Duration::from_secs(60), || async move {
                        fetches.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(7u32)
                    })
                    .await
                    .unwrap();
                value
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 7);
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }
}
