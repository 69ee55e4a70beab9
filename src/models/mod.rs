//! 实体模型
//!
//! LMS 各实体的数据结构与纯领域规则（排序、状态分类、互斥不变式）

pub mod answer_sheet;
pub mod attempt;
pub mod certificate;
pub mod enrollment;
pub mod exam;
pub mod module;
pub mod notification;
pub mod ordering;
pub mod progress;
pub mod question;
pub mod quiz;

pub use answer_sheet::{load_all_sheets, load_sheet, AnswerSheet, SheetAnswer};
pub use attempt::{
    remaining_attempts, AnswerDraft, AnswerRecord, Attempt, AttemptOutcome, AttemptResult,
    AttemptTarget,
};
pub use certificate::Certificate;
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use exam::Exam;
pub use module::{Module, ModuleStatus};
pub use notification::{Notification, UnreadCount};
pub use ordering::{sort_by_ordinal, Ordered, UNORDERED_SENTINEL};
pub use progress::CourseProgress;
pub use question::{Question, QuestionConfig, QuestionDetail, QuestionOption};
pub use quiz::Quiz;
