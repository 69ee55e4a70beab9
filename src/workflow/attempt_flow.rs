//! 答题流程 - 流程层
//!
//! 核心职责：驱动一次 quiz / 期末考试答题从创建到提交的完整流程
//!
//! 状态机（单向，不可回退）：
//!
//! ```text
//! NotStarted ──start──▶ InProgress ──submit──▶ Submitted
//!     │
//!     └──start(考试且前置条件未满足)──▶ Blocked（不发起任何网络请求）
//! ```
//!
//! 流程顺序：
//! 1. start → （考试先查进度）创建答题记录 + 拉取题目并排序
//! 2. record_answer → 按题目 id 覆盖写入本地作答
//! 3. submit → 先校验每题已作答（失败则不发网络请求），再批量提交
//! 4. tick → 限时作答归零时走同一条提交路径，恰好一次

use crate::error::{AppError, AppResult, DomainError};
use crate::models::{sort_by_ordinal, AnswerDraft, AnswerRecord, Attempt, QuestionDetail};
use crate::workflow::attempt_ctx::AttemptCtx;
use crate::workflow::backend::AttemptBackend;
use crate::workflow::countdown::{CountdownTimer, TimerTick};
use futures::future::try_join;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// 流程状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// 尚未开始
    NotStarted,
    /// 期末考试前置条件未满足，永久阻塞（条件在别处满足后需重新进入流程）
    Blocked {
        pending_quizzes: u32,
    },
    /// 答题中
    InProgress,
    /// 已提交
    Submitted,
}

/// 提交回执
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    pub attempt_id: String,
    pub answers_submitted: usize,
    /// 是否由倒计时归零强制触发
    pub forced: bool,
}

/// 答题流程
///
/// - 编排一次答题的完整生命周期
/// - 独占持有本次答题的本地作答状态（单用户单流程，无并发写者）
/// - 只依赖 AttemptBackend 描述的能力
pub struct AttemptFlow<B: AttemptBackend> {
    backend: B,
    ctx: AttemptCtx,
    state: FlowState,
    attempt: Option<Attempt>,
    /// 排序后的题目列表（ordinal 为空的排在最后）
    questions: Vec<QuestionDetail>,
    /// 按题目 id 暂存的本地作答，提交成功或离开流程时丢弃
    answers: HashMap<String, AnswerDraft>,
    timer: Option<CountdownTimer>,
}

impl<B: AttemptBackend> AttemptFlow<B> {
    /// 创建新的答题流程
    pub fn new(backend: B, ctx: AttemptCtx) -> Self {
        Self {
            backend,
            ctx,
            state: FlowState::NotStarted,
            attempt: None,
            questions: Vec::new(),
            answers: HashMap::new(),
            timer: None,
        }
    }

    /// 配置限时作答（分钟）
    pub fn with_time_limit(mut self, minutes: u64) -> Self {
        self.timer = Some(CountdownTimer::from_minutes(minutes));
        self
    }

    // ========== 只读访问 ==========

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn ctx(&self) -> &AttemptCtx {
        &self.ctx
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    /// 排序后的题目列表
    pub fn questions(&self) -> &[QuestionDetail] {
        &self.questions
    }

    /// 某道题当前暂存的作答
    pub fn recorded(&self, question_id: &str) -> Option<&AnswerDraft> {
        self.answers.get(question_id)
    }

    /// 已作答数量
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// 剩余秒数（不限时为 None）
    pub fn remaining_secs(&self) -> Option<u64> {
        self.timer.as_ref().map(|t| t.remaining_secs())
    }

    // ========== 流程操作 ==========

    /// 开始答题
    ///
    /// 期末考试先检查前置条件：进度快照的 pending_quizzes 必须为 0，
    /// 否则进入 Blocked 态且不发起创建请求。
    /// 已开始的流程重复调用直接返回当前状态。
    pub async fn start(&mut self) -> AppResult<FlowState> {
        if !matches!(self.state, FlowState::NotStarted) {
            return Ok(self.state);
        }

        if self.ctx.target.is_exam() {
            let progress = self.backend.course_progress(&self.ctx.course_id).await?;
            if !progress.prerequisites_met() {
                warn!(
                    "{} 🔒 前置条件未满足: 还有 {} 个 quiz 未通过",
                    self.ctx, progress.pending_quizzes
                );
                self.state = FlowState::Blocked {
                    pending_quizzes: progress.pending_quizzes,
                };
                return Ok(self.state);
            }
        }

        info!("{} 🚀 开始答题", self.ctx);

        let (attempt, mut questions) = try_join(
            self.backend.create_attempt(&self.ctx.target),
            self.backend.questions(&self.ctx.target),
        )
        .await?;

        sort_by_ordinal(&mut questions);

        info!(
            "{} ✓ 已创建答题记录 #{} (第 {} 次), 共 {} 题",
            self.ctx,
            attempt.id,
            attempt.attempt_number,
            questions.len()
        );

        self.attempt = Some(attempt);
        self.questions = questions;
        self.state = FlowState::InProgress;
        Ok(self.state)
    }

    /// 记录一条作答
    ///
    /// 按题目 id 覆盖写入，此处不做校验——该题之前的作答直接被替换
    pub fn record_answer(
        &mut self,
        question_id: impl Into<String>,
        draft: AnswerDraft,
    ) -> AppResult<()> {
        self.require_in_progress()?;

        let question_id = question_id.into();
        debug!("{} 记录作答: 题目 {} ({})", self.ctx, question_id, draft.shape());
        self.answers.insert(question_id, draft);
        Ok(())
    }

    /// 提交作答
    ///
    /// 按排序后的题目顺序校验每题已作答；任何一题缺失则在发起网络
    /// 请求之前失败，错误信息指明按顺序遇到的第一道未作答题目的题干。
    /// 提交失败时本地作答保持不变，可直接重试。
    pub async fn submit(&mut self) -> AppResult<SubmitReceipt> {
        self.submit_inner(false).await
    }

    /// 倒计时递减一秒
    ///
    /// 归零时走与手动提交完全相同的路径，且恰好触发一次；
    /// 作答不完整的强制提交同样在校验处失败并返回错误，而不是被静默丢弃
    pub async fn tick(&mut self) -> Option<AppResult<SubmitReceipt>> {
        if !matches!(self.state, FlowState::InProgress) {
            return None;
        }

        let tick = match self.timer.as_mut() {
            Some(timer) => timer.tick(),
            None => return None,
        };

        match tick {
            TimerTick::Running(remaining) => {
                if remaining == 5 * 60 {
                    warn!("{} ⏳ 剩余时间不足 5 分钟", self.ctx);
                }
                None
            }
            TimerTick::Done => None,
            TimerTick::Expired => {
                warn!("{} ⏰ 时间到, 强制提交", self.ctx);
                Some(self.submit_inner(true).await)
            }
        }
    }

    // ========== 内部实现 ==========

    async fn submit_inner(&mut self, forced: bool) -> AppResult<SubmitReceipt> {
        self.require_in_progress()?;

        let attempt_id = match &self.attempt {
            Some(attempt) => attempt.id.clone(),
            None => return Err(DomainError::AttemptNotStarted.into()),
        };

        // 校验在任何网络请求之前
        let records = self.collect_answers()?;

        if let Err(e) = self
            .backend
            .submit_answers(&self.ctx, &attempt_id, &records)
            .await
        {
            // 本地状态保持不变，用户可以不重新作答直接重试
            warn!("{} ⚠️ 提交失败: {}", self.ctx, e);
            return Err(e);
        }

        // 本地作答状态随提交丢弃
        self.answers.clear();
        self.state = FlowState::Submitted;

        info!(
            "{} ✅ 提交成功 ({} 条作答{})",
            self.ctx,
            records.len(),
            if forced { ", 强制提交" } else { "" }
        );

        Ok(SubmitReceipt {
            attempt_id,
            answers_submitted: records.len(),
            forced,
        })
    }

    /// 按排序后的顺序收集作答记录
    fn collect_answers(&self) -> AppResult<Vec<AnswerRecord>> {
        let mut records = Vec::with_capacity(self.questions.len());
        for detail in &self.questions {
            let question = &detail.question;
            match self.answers.get(&question.id) {
                Some(draft) => {
                    records.push(AnswerRecord::from_draft(question.id.as_str(), draft))
                }
                None => return Err(AppError::missing_answer(question.statement.as_str())),
            }
        }
        Ok(records)
    }

    fn require_in_progress(&self) -> AppResult<()> {
        match self.state {
            FlowState::InProgress => Ok(()),
            FlowState::Submitted => Err(DomainError::AttemptAlreadySubmitted.into()),
            FlowState::NotStarted | FlowState::Blocked { .. } => {
                Err(DomainError::AttemptNotStarted.into())
            }
        }
    }
}
