//! 基础设施层
//!
//! 持有稀缺资源（HTTP 客户端、请求缓存），只暴露能力，不认识业务

pub mod http_executor;
pub mod query_cache;

pub use http_executor::HttpExecutor;
pub use query_cache::{CacheKey, KeyPart, QueryCache};
