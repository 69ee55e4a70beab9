//! 答题记录实体
//!
//! 一次答题记录（Attempt）对应一个用户对某个 quiz 或期末考试的一次尝试。
//! 核心不变式：quiz_id 与 exam_id 恰好一个非空。
//! score 与 outcome 由服务端评分时一起原子写入，客户端只读。

use crate::error::{AppResult, DomainError, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 评分结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptOutcome {
    Passed,
    Failed,
}

/// 答题记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: String,
    pub user_id: String,
    pub quiz_id: Option<String>,
    pub exam_id: Option<String>,
    pub enrollment_id: String,
    /// 第几次尝试，从 1 开始
    pub attempt_number: u32,
    /// 评分后写入，与 outcome 同时出现
    pub score: Option<f64>,
    pub outcome: Option<AttemptOutcome>,
    pub started_at: DateTime<Utc>,
    /// 提交后写入，进行中为 None
    pub finished_at: Option<DateTime<Utc>>,
    /// 管理员允许超出次数限制再答一次
    #[serde(default)]
    pub allow_new_attempt: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attempt {
    /// 解析答题目标，同时校验互斥不变式
    pub fn target(&self) -> AppResult<AttemptTarget> {
        AttemptTarget::from_ids(self.quiz_id.as_deref(), self.exam_id.as_deref())
    }

    /// 是否已提交
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// 是否已评分
    pub fn is_graded(&self) -> bool {
        self.score.is_some() && self.outcome.is_some()
    }
}

/// 答题目标：quiz 或期末考试，二选一
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptTarget {
    Quiz(String),
    Exam(String),
}

impl AttemptTarget {
    /// 从一对可空 id 构造，恰好一个非空才合法
    pub fn from_ids(quiz_id: Option<&str>, exam_id: Option<&str>) -> AppResult<Self> {
        match (quiz_id, exam_id) {
            (Some(quiz_id), None) => Ok(AttemptTarget::Quiz(quiz_id.to_string())),
            (None, Some(exam_id)) => Ok(AttemptTarget::Exam(exam_id.to_string())),
            (Some(_), Some(_)) => Err(DomainError::AmbiguousTarget.into()),
            (None, None) => Err(DomainError::MissingTarget.into()),
        }
    }

    /// 目标实体 id
    pub fn id(&self) -> &str {
        match self {
            AttemptTarget::Quiz(id) | AttemptTarget::Exam(id) => id,
        }
    }

    /// 是否期末考试（决定是否检查前置条件）
    pub fn is_exam(&self) -> bool {
        matches!(self, AttemptTarget::Exam(_))
    }
}

impl fmt::Display for AttemptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptTarget::Quiz(id) => write!(f, "quiz#{}", id),
            AttemptTarget::Exam(id) => write!(f, "exam#{}", id),
        }
    }
}

impl From<DomainError> for crate::error::AppError {
    fn from(err: DomainError) -> Self {
        crate::error::AppError::Domain(err)
    }
}

/// 客户端本地暂存的作答内容
///
/// 三种形态与题目类型一一对应，天然保证"恰好一个字段有值"
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerDraft {
    /// 开放题：自由文本
    Text(String),
    /// 选择题：选项 id
    Choice(String),
    /// 判断题：布尔值
    Bool(bool),
}

impl AnswerDraft {
    /// 作答形式名称（用于错误信息）
    pub fn shape(&self) -> &'static str {
        match self {
            AnswerDraft::Text(_) => "文本",
            AnswerDraft::Choice(_) => "选项",
            AnswerDraft::Bool(_) => "布尔",
        }
    }
}

/// 提交到服务端的单条作答记录
///
/// answer_text / option_id / answer_bool 恰好一个有值，
/// 由 `from_draft` 构造保证
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub answer_text: Option<String>,
    pub option_id: Option<String>,
    pub answer_bool: Option<bool>,
}

impl AnswerRecord {
    /// 从本地暂存内容构造提交记录
    pub fn from_draft(question_id: impl Into<String>, draft: &AnswerDraft) -> Self {
        let question_id = question_id.into();
        match draft {
            AnswerDraft::Text(text) => Self {
                question_id,
                answer_text: Some(text.clone()),
                option_id: None,
                answer_bool: None,
            },
            AnswerDraft::Choice(option_id) => Self {
                question_id,
                answer_text: None,
                option_id: Some(option_id.clone()),
                answer_bool: None,
            },
            AnswerDraft::Bool(value) => Self {
                question_id,
                answer_text: None,
                option_id: None,
                answer_bool: Some(*value),
            },
        }
    }

    /// 有值字段的数量，合法记录恒为 1
    pub fn populated_fields(&self) -> usize {
        usize::from(self.answer_text.is_some())
            + usize::from(self.option_id.is_some())
            + usize::from(self.answer_bool.is_some())
    }

    /// 还原为本地暂存形态
    pub fn to_draft(&self) -> AppResult<AnswerDraft> {
        match (
            self.answer_text.as_ref(),
            self.option_id.as_ref(),
            self.answer_bool,
        ) {
            (Some(text), None, None) => Ok(AnswerDraft::Text(text.clone())),
            (None, Some(option_id), None) => Ok(AnswerDraft::Choice(option_id.clone())),
            (None, None, Some(value)) => Ok(AnswerDraft::Bool(value)),
            (None, None, None) => Err(crate::error::AppError::Validation(
                ValidationError::EmptyAnswer {
                    question_id: self.question_id.clone(),
                },
            )),
            _ => Err(crate::error::AppError::Validation(
                ValidationError::AmbiguousAnswer {
                    question_id: self.question_id.clone(),
                },
            )),
        }
    }
}

/// 带详细作答内容的评分结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptResult {
    pub attempt: Attempt,
    pub answers: Vec<AnswerRecord>,
}

/// 计算剩余可用次数
///
/// 达到上限后，若任一记录带有 allow_new_attempt 标记则额外放行一次
pub fn remaining_attempts(max_attempts: u32, attempts: &[Attempt]) -> u32 {
    let remaining = max_attempts.saturating_sub(attempts.len() as u32);
    if remaining == 0 && attempts.iter().any(|a| a.allow_new_attempt) {
        1
    } else {
        remaining
    }
}
