//! 答题流程的后端依赖 - 流程层
//!
//! 流程只依赖这个 trait 描述的四个能力，不直接认识具体服务。
//! 生产实现组合各实体服务并套用它们声明的缓存失效列表；
//! 测试用打桩实现替换。

use crate::error::AppResult;
use crate::models::{AnswerRecord, Attempt, AttemptTarget, CourseProgress, QuestionDetail};
use crate::services::{CourseService, ExamService, QuizService};
use crate::workflow::attempt_ctx::AttemptCtx;
use async_trait::async_trait;

/// 答题流程需要的后端能力
#[async_trait]
pub trait AttemptBackend: Send + Sync {
    /// 课程进度快照（期末考试前置条件检查的输入）
    async fn course_progress(&self, course_id: &str) -> AppResult<CourseProgress>;

    /// 为目标创建新的答题记录
    async fn create_attempt(&self, target: &AttemptTarget) -> AppResult<Attempt>;

    /// 获取目标的完整题目列表
    async fn questions(&self, target: &AttemptTarget) -> AppResult<Vec<QuestionDetail>>;

    /// 批量提交作答
    async fn submit_answers(
        &self,
        ctx: &AttemptCtx,
        attempt_id: &str,
        answers: &[AnswerRecord],
    ) -> AppResult<()>;
}

#[async_trait]
impl<T: AttemptBackend + ?Sized> AttemptBackend for std::sync::Arc<T> {
    async fn course_progress(&self, course_id: &str) -> AppResult<CourseProgress> {
        (**self).course_progress(course_id).await
    }

    async fn create_attempt(&self, target: &AttemptTarget) -> AppResult<Attempt> {
        (**self).create_attempt(target).await
    }

    async fn questions(&self, target: &AttemptTarget) -> AppResult<Vec<QuestionDetail>> {
        (**self).questions(target).await
    }

    async fn submit_answers(
        &self,
        ctx: &AttemptCtx,
        attempt_id: &str,
        answers: &[AnswerRecord],
    ) -> AppResult<()> {
        (**self).submit_answers(ctx, attempt_id, answers).await
    }
}

/// 生产后端：按目标分发到 quiz / 期末考试服务
#[derive(Clone)]
pub struct ApiAttemptBackend {
    quiz: QuizService,
    exam: ExamService,
    course: CourseService,
}

impl ApiAttemptBackend {
    /// 组合各实体服务创建后端
    pub fn new(quiz: QuizService, exam: ExamService, course: CourseService) -> Self {
        Self { quiz, exam, course }
    }
}

#[async_trait]
impl AttemptBackend for ApiAttemptBackend {
    async fn course_progress(&self, course_id: &str) -> AppResult<CourseProgress> {
        self.course.progress(course_id).await
    }

    async fn create_attempt(&self, target: &AttemptTarget) -> AppResult<Attempt> {
        match target {
            AttemptTarget::Quiz(quiz_id) => self.quiz.create_attempt(quiz_id).await,
            AttemptTarget::Exam(exam_id) => self.exam.create_attempt(exam_id).await,
        }
    }

    async fn questions(&self, target: &AttemptTarget) -> AppResult<Vec<QuestionDetail>> {
        match target {
            AttemptTarget::Quiz(quiz_id) => self.quiz.questions(quiz_id).await,
            AttemptTarget::Exam(exam_id) => self.exam.questions(exam_id).await,
        }
    }

    async fn submit_answers(
        &self,
        ctx: &AttemptCtx,
        attempt_id: &str,
        answers: &[AnswerRecord],
    ) -> AppResult<()> {
        match &ctx.target {
            AttemptTarget::Quiz(quiz_id) => {
                self.quiz
                    .submit_attempt(quiz_id, attempt_id, &ctx.course_id, answers)
                    .await
            }
            AttemptTarget::Exam(exam_id) => {
                self.exam
                    .submit_attempt(exam_id, attempt_id, &ctx.course_id, answers)
                    .await
            }
        }
    }
}
