//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 本模块是二进制入口的主体，负责批量答题卡的处理与资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建 HttpExecutor 与 QueryCache，组装各服务与后端
//! 2. **批量加载**：扫描并加载所有待处理的答题卡（`Vec<AnswerSheet>`）
//! 3. **逐份处理**：单用户单流程假设，按文件名顺序逐份驱动答题流程
//! 4. **全局统计**：汇总提交成功 / 前置条件阻塞 / 失败的数量
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单道题目的细节，向下委托答题流程
//! - **资源所有者**：唯一持有 HttpExecutor 与 QueryCache 的模块

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{HttpExecutor, QueryCache};
use crate::models::{
    load_all_sheets, remaining_attempts, AnswerSheet, AttemptTarget, QuestionConfig,
};
use crate::services::{
    CourseService, ExamService, NotificationService, QuizService,
};
use crate::utils::logging::{log_sheets_loaded, log_startup, print_final_stats, truncate_text};
use crate::workflow::{check_draft, ApiAttemptBackend, AttemptCtx, AttemptFlow, FlowState};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 单份答题卡的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SheetOutcome {
    /// 提交成功
    Submitted,
    /// 期末考试前置条件未满足，未发起任何请求
    Blocked,
}

/// 应用主结构
pub struct App {
    config: Config,
    backend: ApiAttemptBackend,
    quiz: QuizService,
    exam: ExamService,
    notifications: NotificationService,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        let executor = Arc::new(HttpExecutor::new(&config)?);
        let cache = Arc::new(QueryCache::new());

        let quiz = QuizService::new(executor.clone(), cache.clone(), &config);
        let exam = ExamService::new(executor.clone(), cache.clone(), &config);
        let course = CourseService::new(executor.clone(), cache.clone(), &config);
        let notifications = NotificationService::new(executor.clone(), cache.clone(), &config);

        let backend = ApiAttemptBackend::new(quiz.clone(), exam.clone(), course);

        Ok(Self {
            config,
            backend,
            quiz,
            exam,
            notifications,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let sheets = load_all_sheets(&self.config.sheet_folder).await?;

        if sheets.is_empty() {
            warn!("⚠️ 没有找到待处理的答题卡, 程序结束");
            return Ok(());
        }

        log_sheets_loaded(sheets.len());

        let mut success = 0;
        let mut blocked = 0;
        let mut failed = 0;

        for (index, sheet) in sheets.iter().enumerate() {
            let label = sheet
                .file_path
                .clone()
                .unwrap_or_else(|| format!("第 {} 份", index + 1));

            match self.process_sheet(sheet).await {
                Ok(SheetOutcome::Submitted) => success += 1,
                Ok(SheetOutcome::Blocked) => blocked += 1,
                Err(e) => {
                    error!("❌ 处理答题卡失败 ({}): {}", label, e);
                    failed += 1;
                }
            }
        }

        print_final_stats(success, blocked, failed, sheets.len());

        // 顺带汇报未读通知，失败不影响主流程
        if let Ok(unread) = self.notifications.unread_count().await {
            info!("📬 未读通知: {}", unread.count);
        }

        Ok(())
    }

    /// 处理单份答题卡：开始流程 → 逐题记录 → 提交
    async fn process_sheet(&self, sheet: &AnswerSheet) -> AppResult<SheetOutcome> {
        let target = sheet.target()?;
        let ctx = AttemptCtx::new(&sheet.course_id, &sheet.enrollment_id, target.clone());

        info!("{} 📄 开始处理答题卡", ctx);

        // 目标定义里的限时与次数上限
        let (configured_limit, max_attempts) = match &target {
            AttemptTarget::Quiz(quiz_id) => {
                let quiz = self.quiz.get(quiz_id).await?;
                (quiz.time_limit_minutes, quiz.max_attempts)
            }
            AttemptTarget::Exam(exam_id) => {
                let exam = self.exam.get(exam_id).await?;
                (exam.time_limit_minutes, exam.max_attempts)
            }
        };

        if let Some(max) = max_attempts {
            let prior = match &target {
                AttemptTarget::Quiz(quiz_id) => self.quiz.attempts(quiz_id).await?,
                AttemptTarget::Exam(exam_id) => self.exam.attempts(exam_id).await?,
            };
            info!("{} 剩余可用次数: {}", ctx, remaining_attempts(max, &prior));
        }

        let mut flow = AttemptFlow::new(self.backend.clone(), ctx);
        if let Some(minutes) = sheet.time_limit_minutes.or(configured_limit) {
            flow = flow.with_time_limit(minutes);
        }

        let state = flow.start().await?;
        if let FlowState::Blocked { pending_quizzes } = state {
            info!(
                "{} 🔒 前置条件未满足 ({} 个 quiz 未通过), 跳过",
                flow.ctx(),
                pending_quizzes
            );
            return Ok(SheetOutcome::Blocked);
        }

        // 作答前先过形态检查（答题卡是外部来源，不经过控件）
        let mut drafts = Vec::with_capacity(sheet.answers.len());
        {
            let configs: HashMap<&str, &QuestionConfig> = flow
                .questions()
                .iter()
                .map(|detail| (detail.question.id.as_str(), &detail.config))
                .collect();

            for answer in &sheet.answers {
                let draft = answer.draft()?;
                if let Some(config) = configs.get(answer.question_id.as_str()) {
                    check_draft(&answer.question_id, config, &draft)?;
                }
                drafts.push((answer.question_id.clone(), draft));
            }
        }

        for (question_id, draft) in drafts {
            flow.record_answer(question_id, draft)?;
        }

        let submitted = flow.submit().await;
        let receipt = match submitted {
            Ok(receipt) => receipt,
            Err(e) => {
                // 题干太长时截断显示，错误本身原样向上传递
                warn!("{} ⚠️ {}", flow.ctx(), truncate_text(&e.to_string(), 120));
                return Err(e);
            }
        };

        info!(
            "{} ✓ 答题记录 #{} 已提交 {} 条作答",
            flow.ctx(),
            receipt.attempt_id,
            receipt.answers_submitted
        );

        Ok(SheetOutcome::Submitted)
    }
}
