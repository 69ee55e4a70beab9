//! 真实服务端集成测试
//!
//! 默认忽略，需要手动运行：cargo test -- --ignored
//! 运行前设置 LMS_API_BASE_URL 等环境变量指向测试环境

use lms_client::infrastructure::{HttpExecutor, QueryCache};
use lms_client::models::load_sheet;
use lms_client::services::{
    AttemptFilter, AttemptService, EnrollmentService, NotificationService, QuizService,
};
use lms_client::utils::logging;
use lms_client::workflow::{AttemptCtx, AttemptFlow, FlowState};
use lms_client::{ApiAttemptBackend, AttemptTarget, Config, CourseService, ExamService};
use std::path::Path;
use std::sync::Arc;

fn build_services(config: &Config) -> (Arc<HttpExecutor>, Arc<QueryCache>) {
    let executor = Arc::new(HttpExecutor::new(config).expect("创建 HTTP 执行器失败"));
    let cache = Arc::new(QueryCache::new());
    (executor, cache)
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_fetch_enrollments_and_notifications() {
    // 初始化日志
    let config = Config::from_env();
    logging::init(&config);

    let (executor, cache) = build_services(&config);
    let enrollments = EnrollmentService::new(executor.clone(), cache.clone(), &config);
    let notifications = NotificationService::new(executor, cache, &config);

    // 注意：请根据测试环境修改用户 ID
    let list = enrollments.list("user-1").await.expect("获取选课列表失败");
    println!("选课数量: {}", list.len());

    let unread = notifications.unread_count().await.expect("获取未读数失败");
    println!("未读通知: {}", unread.count);
}

#[tokio::test]
#[ignore]
async fn test_quiz_catalog_reads_are_cached() {
    let config = Config::from_env();
    logging::init(&config);

    let (executor, cache) = build_services(&config);
    let quiz = QuizService::new(executor, cache, &config);

    // 注意：请根据测试环境修改 quiz ID
    let first = quiz.questions("quiz-1").await.expect("获取题目列表失败");
    let second = quiz.questions("quiz-1").await.expect("缓存读取失败");
    assert_eq!(first.len(), second.len());
}

#[tokio::test]
#[ignore]
async fn test_list_attempts_by_filter() {
    let config = Config::from_env();
    logging::init(&config);

    let (executor, cache) = build_services(&config);
    let attempts = AttemptService::new(executor, cache, &config);

    // 注意：请根据测试环境修改 quiz ID
    let filter = AttemptFilter {
        quiz_id: Some("quiz-1".to_string()),
        ..AttemptFilter::default()
    };
    let list = attempts.list(&filter).await.expect("获取答题记录失败");
    for attempt in &list {
        println!("第 {} 次: 状态 {:?}", attempt.attempt_number, attempt.outcome);
    }
}

#[tokio::test]
#[ignore]
async fn test_process_single_sheet_end_to_end() {
    let config = Config::from_env();
    logging::init(&config);

    let (executor, cache) = build_services(&config);
    let quiz = QuizService::new(executor.clone(), cache.clone(), &config);
    let exam = ExamService::new(executor.clone(), cache.clone(), &config);
    let course = CourseService::new(executor, cache, &config);
    let backend = ApiAttemptBackend::new(quiz, exam, course);

    // 注意：请根据实际情况修改文件路径
    let sheet = load_sheet(Path::new("sheets/sample.toml"))
        .await
        .expect("加载答题卡失败");
    let target = sheet.target().expect("答题卡目标不合法");
    assert!(matches!(target, AttemptTarget::Quiz(_)));

    let ctx = AttemptCtx::new(&sheet.course_id, &sheet.enrollment_id, target);
    let mut flow = AttemptFlow::new(backend, ctx);

    let state = flow.start().await.expect("开始答题失败");
    assert_eq!(state, FlowState::InProgress);

    for answer in &sheet.answers {
        let draft = answer.draft().expect("作答内容不合法");
        flow.record_answer(answer.question_id.as_str(), draft)
            .expect("记录作答失败");
    }

    let receipt = flow.submit().await.expect("提交失败");
    assert_eq!(receipt.answers_submitted, sheet.answers.len());
}
