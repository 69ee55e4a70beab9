/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// LMS 后端 API 基础地址
    pub api_base_url: String,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 答题卡 TOML 文件存放目录
    pub sheet_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 目录类读取的缓存有效期（秒），如 quiz / 题目列表
    pub catalog_cache_ttl_secs: u64,
    /// 高频变化读取的缓存有效期（秒），如答题记录 / 进度
    pub volatile_cache_ttl_secs: u64,
    // --- OAuth 配置 ---
    pub oauth_client_id: String,
    pub oauth_authorize_url: String,
    pub oauth_redirect_uri: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://lms-api.example.edu".to_string(),
            request_timeout_secs: 30,
            sheet_folder: "answer_sheets".to_string(),
            verbose_logging: false,
            catalog_cache_ttl_secs: 5 * 60,
            volatile_cache_ttl_secs: 2 * 60,
            oauth_client_id: "lms-client".to_string(),
            oauth_authorize_url: "https://auth.example.edu/oauth2/authorize".to_string(),
            oauth_redirect_uri: "http://localhost:8080/callback".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("LMS_API_BASE_URL").unwrap_or(default.api_base_url),
            request_timeout_secs: std::env::var("LMS_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            sheet_folder: std::env::var("LMS_SHEET_FOLDER").unwrap_or(default.sheet_folder),
            verbose_logging: std::env::var("LMS_VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            catalog_cache_ttl_secs: std::env::var("LMS_CATALOG_CACHE_TTL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.catalog_cache_ttl_secs),
            volatile_cache_ttl_secs: std::env::var("LMS_VOLATILE_CACHE_TTL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.volatile_cache_ttl_secs),
            oauth_client_id: std::env::var("LMS_OAUTH_CLIENT_ID").unwrap_or(default.oauth_client_id),
            oauth_authorize_url: std::env::var("LMS_OAUTH_AUTHORIZE_URL").unwrap_or(default.oauth_authorize_url),
            oauth_redirect_uri: std::env::var("LMS_OAUTH_REDIRECT_URI").unwrap_or(default.oauth_redirect_uri),
        }
    }
}
