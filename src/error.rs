use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// HTTP 请求错误
    Http(HttpError),
    /// 客户端校验错误（提交前拦截，不发起网络请求）
    Validation(ValidationError),
    /// 业务规则错误
    Domain(DomainError),
    /// 答题卡文件错误
    Sheet(SheetError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Http(e) => write!(f, "HTTP错误: {}", e),
            AppError::Validation(e) => write!(f, "校验错误: {}", e),
            AppError::Domain(e) => write!(f, "业务错误: {}", e),
            AppError::Sheet(e) => write!(f, "答题卡错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Http(e) => Some(e),
            AppError::Validation(e) => Some(e),
            AppError::Domain(e) => Some(e),
            AppError::Sheet(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// HTTP 请求错误
#[derive(Debug)]
pub enum HttpError {
    /// 网络请求失败
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务端返回非 2xx 状态
    BadStatus {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// 服务端返回空结果
    EmptyResponse {
        endpoint: String,
    },
    /// JSON 解析失败
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::RequestFailed { endpoint, source } => {
                write!(f, "请求失败 ({}): {}", endpoint, source)
            }
            HttpError::BadStatus {
                endpoint,
                status,
                message,
            } => match message {
                Some(msg) => write!(f, "服务端返回错误 ({}): [{}] {}", endpoint, status, msg),
                None => write!(f, "服务端返回错误 ({}): [{}]", endpoint, status),
            },
            HttpError::EmptyResponse { endpoint } => {
                write!(f, "服务端返回空结果: {}", endpoint)
            }
            HttpError::JsonParseFailed { source } => {
                write!(f, "JSON解析失败: {}", source)
            }
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::RequestFailed { source, .. } | HttpError::JsonParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 客户端校验错误
///
/// 校验失败时网络请求不会发出，本地状态保持不变，用户修正后可以重试
#[derive(Debug)]
pub enum ValidationError {
    /// 提交时存在未作答的题目（按排序后的顺序报告第一个）
    MissingAnswer {
        statement: String,
    },
    /// 作答内容与题目类型不匹配
    AnswerShapeMismatch {
        question_id: String,
        expected: &'static str,
        got: &'static str,
    },
    /// 答题卡中一道题填写了多种作答形式
    AmbiguousAnswer {
        question_id: String,
    },
    /// 答题卡中一道题没有任何作答内容
    EmptyAnswer {
        question_id: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingAnswer { statement } => {
                write!(f, "必须先回答问题: {}", statement)
            }
            ValidationError::AnswerShapeMismatch {
                question_id,
                expected,
                got,
            } => {
                write!(
                    f,
                    "题目 {} 的作答形式不匹配: 期望 {}, 实际 {}",
                    question_id, expected, got
                )
            }
            ValidationError::AmbiguousAnswer { question_id } => {
                write!(f, "题目 {} 填写了多种作答形式, 只能保留一种", question_id)
            }
            ValidationError::EmptyAnswer { question_id } => {
                write!(f, "题目 {} 没有任何作答内容", question_id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 业务规则错误
#[derive(Debug)]
pub enum DomainError {
    /// quiz_id 与 exam_id 同时存在
    AmbiguousTarget,
    /// quiz_id 与 exam_id 都不存在
    MissingTarget,
    /// 答题流程尚未开始（或处于前置条件未满足的阻塞态）
    AttemptNotStarted,
    /// 答题流程已提交，不允许再次操作
    AttemptAlreadySubmitted,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::AmbiguousTarget => {
                write!(f, "quiz_id 与 exam_id 不能同时存在")
            }
            DomainError::MissingTarget => {
                write!(f, "必须指定 quiz_id 或 exam_id 中的一个")
            }
            DomainError::AttemptNotStarted => {
                write!(f, "答题流程尚未开始")
            }
            DomainError::AttemptAlreadySubmitted => {
                write!(f, "答题流程已提交, 不允许重复操作")
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// 答题卡文件错误
#[derive(Debug)]
pub enum SheetError {
    /// 文件不存在
    NotFound {
        path: String,
    },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录不存在
    FolderNotFound {
        path: String,
    },
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::NotFound { path } => write!(f, "答题卡不存在: {}", path),
            SheetError::ReadFailed { path, source } => {
                write!(f, "读取答题卡失败 ({}): {}", path, source)
            }
            SheetError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
            SheetError::FolderNotFound { path } => write!(f, "目录不存在: {}", path),
        }
    }
}

impl std::error::Error for SheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SheetError::ReadFailed { source, .. } | SheetError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err.url().map(|u| u.to_string()).unwrap_or_default();
        AppError::Http(HttpError::RequestFailed {
            endpoint,
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Http(HttpError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Sheet(SheetError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Sheet(SheetError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建请求失败错误
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Http(HttpError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建服务端错误响应
    pub fn bad_status(endpoint: impl Into<String>, status: u16, message: Option<String>) -> Self {
        AppError::Http(HttpError::BadStatus {
            endpoint: endpoint.into(),
            status,
            message,
        })
    }

    /// 创建未作答校验错误
    pub fn missing_answer(statement: impl Into<String>) -> Self {
        AppError::Validation(ValidationError::MissingAnswer {
            statement: statement.into(),
        })
    }

    /// 创建答题卡读取错误
    pub fn sheet_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Sheet(SheetError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
