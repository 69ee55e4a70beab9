//! # LMS Client
//!
//! 一个面向在线课程平台的答题数据层与批量提交客户端
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 会话、缓存表），只暴露能力
//! - `HttpExecutor` - 唯一的会话 owner，提供类型化请求能力
//! - `QueryCache` - 结构化缓存键 + TTL + 并发去重 + 前缀失效
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个实体一个服务
//! - `QuizService` / `ExamService` - 定义、题目、答题记录、创建与提交
//! - `CourseService` - 进度快照与模块列表
//! - `AttemptService` / `EnrollmentService` / `NotificationService`
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次答题"的完整流程
//! - `AttemptCtx` - 上下文封装（课程 + 选课 + 答题目标）
//! - `AttemptFlow` - 流程编排（前置检查 → 创建 → 作答 → 校验 → 提交）
//! - `CountdownTimer` - 限时作答倒计时
//!
//! ### ④ 编排层（Orchestration）
//! - `app` - 批量答题卡处理器，管理资源与全局统计
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{CacheKey, HttpExecutor, QueryCache};
pub use models::{
    AnswerDraft, AnswerRecord, Attempt, AttemptTarget, CourseProgress, QuestionDetail,
};
pub use services::{submit_invalidations, CourseService, ExamService, QuizService};
pub use workflow::{
    ApiAttemptBackend, AttemptBackend, AttemptCtx, AttemptFlow, CountdownTimer, FlowState,
    SubmitReceipt,
};
