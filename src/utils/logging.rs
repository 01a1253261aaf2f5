//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use crate::error::{AppError, AppResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::{info, warn};

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\n评论抓取日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header).map_err(|e| AppError::file_write_failed(log_file_path, e))
}

/// 向日志文件追加若干行
pub fn append_log_lines(log_file_path: &str, lines: &[String]) -> AppResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| AppError::file_write_failed(log_file_path, e))?;

    for line in lines {
        writeln!(file, "{}", line).map_err(|e| AppError::file_write_failed(log_file_path, e))?;
    }
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(batch_file: &str, headless: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 评论批量抓取");
    info!("📄 URL 列表: {}", batch_file);
    info!("🖥️ 无头模式: {}", headless);
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
///
/// # 参数
/// - `total`: URL 总数
pub fn log_batch_start(total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始抓取，共 {} 个页面（顺序处理）", total);
    info!("{}", "=".repeat(60));
}

/// 记录单个页面完成信息
pub fn log_page_done(prefix: &str, records: usize) {
    info!("{} ✓ 页面完成，提取 {} 条评论", prefix, records);
}

/// 记录单个页面失败信息
pub fn log_page_failed(prefix: &str, reason: &str) {
    warn!("{} ❌ 页面抓取失败，已跳过: {}", prefix, reason);
}

/// 打印最终统计信息
///
/// # 参数
/// - `succeeded`: 成功页面数
/// - `failed`: 失败页面数
/// - `records`: 评论总数
pub fn print_final_stats(succeeded: usize, failed: usize, records: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功页面: {}/{}", succeeded, succeeded + failed);
    info!("❌ 失败页面: {}", failed);
    info!("📝 评论总数: {}", records);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
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
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("短标题", 10), "短标题");
        assert_eq!(truncate_text("不锈钢电热水壶", 3), "不锈钢...");
    }

    #[test]
    fn test_log_file_header_and_append() {
        let path = std::env::temp_dir().join(format!("review_scraper_log_{}.txt", std::process::id()));
        let path = path.to_string_lossy().to_string();

        init_log_file(&path).unwrap();
        append_log_lines(&path, &["第一行".to_string(), "第二行".to_string()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("评论抓取日志"));
        assert!(content.ends_with("第一行\n第二行\n"));

        let _ = std::fs::remove_file(&path);
    }
}
