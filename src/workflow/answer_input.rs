//! 作答控件映射 - 流程层
//!
//! "题目渲染"的客户端形态：按题目类型穷尽匹配出对应的输入控件描述，
//! 并校验一条作答内容的形态与题目类型一致。
//!
//! 关于多选：数据模型里选择题配置带有 multi_select 与 min/max_selections，
//! 但作答记录只承载一个 option_id，真正的多选无法端到端表达。
//! 这里按"不支持多选"处理：控件描述保留多选配置供展示，
//! 记录第二个选项时覆盖第一个。

use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{
    sort_by_ordinal, AnswerDraft, QuestionConfig, QuestionDetail, QuestionOption,
};

/// 输入控件描述
///
/// 题目类型与控件一一对应，新增题目类型时编译器强制处理
#[derive(Debug, Clone)]
pub enum AnswerInput {
    /// 开放题：自由文本输入框
    TextField,
    /// 单选题：互斥选项组
    SingleChoice { options: Vec<QuestionOption> },
    /// 多选配置的选择题：每个选项一个开关
    ///
    /// 注意：作答仍只保留一个选项，见模块说明
    MultiChoice {
        options: Vec<QuestionOption>,
        min_selections: Option<u32>,
        max_selections: Option<u32>,
    },
    /// 判断题：真 / 假二选一
    TrueFalseToggle,
}

/// 按题目类型映射输入控件，选项按展示顺序排列
pub fn input_for(detail: &QuestionDetail) -> AnswerInput {
    match &detail.config {
        QuestionConfig::Open { .. } => AnswerInput::TextField,
        QuestionConfig::MultipleChoice {
            multi_select,
            min_selections,
            max_selections,
        } => {
            let mut options = detail.options.clone();
            sort_by_ordinal(&mut options);
            if *multi_select {
                AnswerInput::MultiChoice {
                    options,
                    min_selections: *min_selections,
                    max_selections: *max_selections,
                }
            } else {
                AnswerInput::SingleChoice { options }
            }
        }
        QuestionConfig::TrueFalse { .. } => AnswerInput::TrueFalseToggle,
    }
}

/// 校验作答内容的形态与题目类型一致
///
/// 控件产生的作答天然满足；答题卡等外部来源的作答在记录前过这道检查
pub fn check_draft(
    question_id: &str,
    config: &QuestionConfig,
    draft: &AnswerDraft,
) -> AppResult<()> {
    let expected = match config {
        QuestionConfig::Open { .. } => "文本",
        QuestionConfig::MultipleChoice { .. } => "选项",
        QuestionConfig::TrueFalse { .. } => "布尔",
    };

    let matches = matches!(
        (config, draft),
        (QuestionConfig::Open { .. }, AnswerDraft::Text(_))
            | (QuestionConfig::MultipleChoice { .. }, AnswerDraft::Choice(_))
            | (QuestionConfig::TrueFalse { .. }, AnswerDraft::Bool(_))
    );

    if matches {
        Ok(())
    } else {
        Err(AppError::Validation(ValidationError::AnswerShapeMismatch {
            question_id: question_id.to_string(),
            expected,
            got: draft.shape(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;
    use chrono::{TimeZone, Utc};

    fn question(id: &str) -> Question {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        Question {
            id: id.to_string(),
            quiz_id: Some("q1".to_string()),
            exam_id: None,
            statement: format!("题目 {}", id),
            points: Some(10.0),
            ordinal: Some(1),
            created_at: now,
            updated_at: now,
        }
    }

    fn option(id: &str, ordinal: Option<u32>) -> QuestionOption {
        QuestionOption {
            id: id.to_string(),
            question_id: "p1".to_string(),
            text: format!("选项 {}", id),
            is_correct: None,
            ordinal,
        }
    }

    #[test]
    fn maps_each_question_type_to_its_input() {
        let open = QuestionDetail {
            question: question("p1"),
            config: QuestionConfig::Open { model_answer: None },
            options: vec![],
        };
        assert!(matches!(input_for(&open), AnswerInput::TextField));

        let tf = QuestionDetail {
            question: question("p2"),
            config: QuestionConfig::TrueFalse {
                correct_answer: Some(true),
            },
            options: vec![],
        };
        assert!(matches!(input_for(&tf), AnswerInput::TrueFalseToggle));
    }

    #[test]
    fn choice_options_sorted_with_nulls_last() {
        let detail = QuestionDetail {
            question: question("p3"),
            config: QuestionConfig::MultipleChoice {
                multi_select: false,
                min_selections: None,
                max_selections: None,
            },
            options: vec![
                option("o-none", None),
                option("o-2", Some(2)),
                option("o-1", Some(1)),
            ],
        };
        match input_for(&detail) {
            AnswerInput::SingleChoice { options } => {
                let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
                assert_eq!(ids, ["o-1", "o-2", "o-none"]);
            }
            other => panic!("期望单选控件, 实际 {:?}", other),
        }
    }

    #[test]
    fn shape_check_accepts_matching_and_rejects_mismatched() {
        let config = QuestionConfig::TrueFalse {
            correct_answer: None,
        };
        assert!(check_draft("p1", &config, &AnswerDraft::Bool(true)).is_ok());
        assert!(check_draft("p1", &config, &AnswerDraft::Text("对".to_string())).is_err());
        assert!(check_draft("p1", &config, &AnswerDraft::Choice("o1".to_string())).is_err());
    }

    /// 多选配置与单选作答形态之间的已知不一致：
    /// 配置允许 min/max 多个选项，但作答只承载一个 option_id。
    /// 此测试固化当前行为（多选配置下单选作答通过校验），
    /// 如未来扩展作答实体支持选项集合，此处应同步调整
    #[test]
    fn multi_select_config_still_takes_single_choice_answer() {
        let config = QuestionConfig::MultipleChoice {
            multi_select: true,
            min_selections: Some(2),
            max_selections: Some(3),
        };
        assert!(check_draft("p1", &config, &AnswerDraft::Choice("o1".to_string())).is_ok());

        let detail = QuestionDetail {
            question: question("p4"),
            config,
            options: vec![option("o-1", Some(1)), option("o-2", Some(2))],
        };
        assert!(matches!(input_for(&detail), AnswerInput::MultiChoice { .. }));
    }
}
