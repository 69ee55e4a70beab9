//! 答题卡加载
//!
//! 答题卡是一份 TOML 文件，描述一次完整作答：
//! 目标（quiz_id 与 exam_id 二选一）、课程与选课信息、逐题作答内容。
//! 二进制入口扫描目录批量加载后逐份驱动答题流程。

use crate::error::{AppError, AppResult, SheetError, ValidationError};
use crate::models::attempt::{AnswerDraft, AttemptTarget};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// 答题卡
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerSheet {
    /// quiz 目标，与 exam_id 互斥
    pub quiz_id: Option<String>,
    /// 期末考试目标，与 quiz_id 互斥
    pub exam_id: Option<String>,
    pub course_id: String,
    pub enrollment_id: String,
    /// 限时作答（分钟），None 表示不限时
    pub time_limit_minutes: Option<u64>,
    #[serde(default)]
    pub answers: Vec<SheetAnswer>,
    /// 来源文件路径，加载时填入
    #[serde(skip)]
    pub file_path: Option<String>,
}

/// 答题卡中的单条作答
#[derive(Debug, Clone, Deserialize)]
pub struct SheetAnswer {
    pub question_id: String,
    pub text: Option<String>,
    pub option_id: Option<String>,
    pub answer_bool: Option<bool>,
}

impl SheetAnswer {
    /// 转换为本地暂存形态，要求恰好一个字段有值
    pub fn draft(&self) -> AppResult<AnswerDraft> {
        match (self.text.as_ref(), self.option_id.as_ref(), self.answer_bool) {
            (Some(text), None, None) => Ok(AnswerDraft::Text(text.clone())),
            (None, Some(option_id), None) => Ok(AnswerDraft::Choice(option_id.clone())),
            (None, None, Some(value)) => Ok(AnswerDraft::Bool(value)),
            (None, None, None) => Err(AppError::Validation(ValidationError::EmptyAnswer {
                question_id: self.question_id.clone(),
            })),
            _ => Err(AppError::Validation(ValidationError::AmbiguousAnswer {
                question_id: self.question_id.clone(),
            })),
        }
    }
}

impl AnswerSheet {
    /// 解析答题目标，校验互斥不变式
    pub fn target(&self) -> AppResult<AttemptTarget> {
        AttemptTarget::from_ids(self.quiz_id.as_deref(), self.exam_id.as_deref())
    }
}

/// 加载单份答题卡
pub async fn load_sheet(path: &Path) -> AppResult<AnswerSheet> {
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(AppError::Sheet(SheetError::NotFound { path: path_str }));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::sheet_read_failed(&path_str, e))?;

    let sheet: AnswerSheet = toml::from_str(&content).map_err(|e| {
        AppError::Sheet(SheetError::TomlParseFailed {
            path: path_str.clone(),
            source: Box::new(e),
        })
    })?;

    debug!("已加载答题卡: {} ({} 条作答)", path_str, sheet.answers.len());

    Ok(AnswerSheet {
        file_path: Some(path_str),
        ..sheet
    })
}

/// 扫描目录加载所有答题卡
///
/// 只认 .toml 后缀，按文件名排序保证处理顺序稳定
pub async fn load_all_sheets(folder: &str) -> AppResult<Vec<AnswerSheet>> {
    let folder_path = Path::new(folder);
    if !folder_path.is_dir() {
        return Err(AppError::Sheet(SheetError::FolderNotFound {
            path: folder.to_string(),
        }));
    }

    let mut paths = Vec::new();
    let mut dir = tokio::fs::read_dir(folder_path).await?;
    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut sheets = Vec::with_capacity(paths.len());
    for path in &paths {
        sheets.push(load_sheet(path).await?);
    }

    info!("✓ 找到 {} 份待处理的答题卡", sheets.len());
    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sheet_and_resolves_target() {
        let content = r#"
            quiz_id = "q1"
            course_id = "c1"
            enrollment_id = "e1"
            time_limit_minutes = 10

            [[answers]]
            question_id = "p1"
            text = "光合作用"

            [[answers]]
            question_id = "p2"
            option_id = "opt-3"

            [[answers]]
            question_id = "p3"
            answer_bool = false
        "#;
        let sheet: AnswerSheet = toml::from_str(content).unwrap();
        assert_eq!(sheet.target().unwrap(), AttemptTarget::Quiz("q1".to_string()));
        assert_eq!(sheet.answers.len(), 3);
        assert_eq!(
            sheet.answers[0].draft().unwrap(),
            AnswerDraft::Text("光合作用".to_string())
        );
        assert_eq!(
            sheet.answers[2].draft().unwrap(),
            AnswerDraft::Bool(false)
        );
    }

    #[test]
    fn rejects_answer_with_multiple_shapes() {
        let answer = SheetAnswer {
            question_id: "p1".to_string(),
            text: Some("文本".to_string()),
            option_id: Some("opt-1".to_string()),
            answer_bool: None,
        };
        assert!(answer.draft().is_err());
    }

    #[test]
    fn rejects_sheet_with_both_targets() {
        let content = r#"
            quiz_id = "q1"
            exam_id = "x1"
            course_id = "c1"
            enrollment_id = "e1"
        "#;
        let sheet: AnswerSheet = toml::from_str(content).unwrap();
        assert!(sheet.target().is_err());
    }
}
