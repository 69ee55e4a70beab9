//! 日志工具模块
//!
//! 提供日志初始化与格式化输出的辅助函数

use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志订阅器
///
/// 优先读取 RUST_LOG 环境变量，否则按配置的 verbose 开关决定级别
pub fn init(config: &Config) {
    let default_level = if config.verbose_logging { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 答题卡批量提交模式");
    info!("🌐 API 地址: {}", config.api_base_url);
    info!("📁 答题卡目录: {}", config.sheet_folder);
    info!("{}", "=".repeat(60));
}

/// 记录答题卡加载信息
pub fn log_sheets_loaded(total: usize) {
    info!("📋 共 {} 份答题卡待处理, 按文件名顺序逐份提交\n", total);
}

/// 打印最终统计信息
pub fn print_final_stats(success: usize, blocked: usize, failed: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("🔒 前置条件未满足: {}", blocked);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_text_by_chars() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("一二三四五", 3), "一二三...");
    }
}
