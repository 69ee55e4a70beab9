//! 题目实体
//!
//! 题目属于 quiz 或期末考试之一，按 ordinal 排序展示（null 排在最后）。
//! 每道题附带一份类型配置（开放 / 多选 / 判断），类型决定作答控件与作答形态。

use crate::models::ordering::Ordered;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub quiz_id: Option<String>,
    pub exam_id: Option<String>,
    /// 题干
    pub statement: String,
    /// 分值
    pub points: Option<f64>,
    /// 展示顺序，None 表示未排序（排在所有有序题目之后）
    pub ordinal: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 题目类型配置
///
/// 按 type 标签区分的和类型，match 时编译器强制穷尽所有类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionConfig {
    /// 开放题：自由文本作答，附服务端评分用的参考答案
    Open {
        model_answer: Option<String>,
    },
    /// 选择题
    ///
    /// multi_select 为 true 时 min/max_selections 生效。
    /// 注意：作答记录只承载一个 option_id，真正的多选无法端到端表达，
    /// 见 workflow::answer_input 的说明
    MultipleChoice {
        #[serde(default)]
        multi_select: bool,
        min_selections: Option<u32>,
        max_selections: Option<u32>,
    },
    /// 判断题
    TrueFalse {
        correct_answer: Option<bool>,
    },
}

impl QuestionConfig {
    /// 类型名称（用于日志与错误信息）
    pub fn kind(&self) -> &'static str {
        match self {
            QuestionConfig::Open { .. } => "OPEN",
            QuestionConfig::MultipleChoice { .. } => "MULTIPLE_CHOICE",
            QuestionConfig::TrueFalse { .. } => "TRUE_FALSE",
        }
    }
}

/// 选择题选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub question_id: String,
    pub text: String,
    pub is_correct: Option<bool>,
    /// 展示顺序，与题目同样的 null 排后规则
    pub ordinal: Option<u32>,
}

/// 完整题目：题干 + 类型配置 + 选项
///
/// 作答流程消费的单元
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub question: Question,
    pub config: QuestionConfig,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl Ordered for Question {
    fn ordinal(&self) -> Option<u32> {
        self.ordinal
    }
}

impl Ordered for QuestionOption {
    fn ordinal(&self) -> Option<u32> {
        self.ordinal
    }
}

impl Ordered for QuestionDetail {
    fn ordinal(&self) -> Option<u32> {
        self.question.ordinal
    }
}
