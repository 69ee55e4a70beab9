//! 流程层
//!
//! 定义"一次答题"的完整流程：前置条件检查 → 创建 → 作答 → 校验 → 提交。
//! 流程只依赖 AttemptBackend 描述的业务能力，不持有任何基础设施资源。

pub mod answer_input;
pub mod attempt_ctx;
pub mod attempt_flow;
pub mod backend;
pub mod countdown;

pub use answer_input::{check_draft, input_for, AnswerInput};
pub use attempt_ctx::AttemptCtx;
pub use attempt_flow::{AttemptFlow, FlowState, SubmitReceipt};
pub use backend::{ApiAttemptBackend, AttemptBackend};
pub use countdown::{CountdownTimer, TimerTick};
