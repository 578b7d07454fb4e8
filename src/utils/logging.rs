/// 日志工具模块
///
/// 提供日志初始化、日志文件和统计输出的辅助函数
use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；否则默认 info，`verbose` 时为 debug。
/// 重复调用是安全的（测试中会多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `title`: 寻宝活动标题
pub fn init_log_file(log_file_path: &str, title: &str) -> Result<()> {
    let log_header = format!(
        "{}\n寻宝日志 - {} - {}\n{}\n\n",
        "=".repeat(60),
        title,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向日志文件追加一行
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        line
    )?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config_path: &str, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 寻宝答题");
    info!("📄 配置文件: {}", config_path);
    info!("📊 图片解析并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录题目加载信息
///
/// # 参数
/// - `total`: 题目总数
/// - `tolerance_radius`: 判定半径
pub fn log_records_loaded(total: usize, tolerance_radius: f64) {
    info!("✓ 已加载 {} 道题目", total);
    info!("🎯 判定半径: {}", tolerance_radius);
    if tolerance_radius == 0.0 {
        warn!("⚠️ 所有题目位于同一点，必须精确点中才算答对");
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `solved`: 已答对数量
/// - `hints`: 使用提示的数量
/// - `total`: 题目总数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(solved: usize, hints: usize, total: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 答题统计");
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 答对: {}/{}", solved, total);
    info!("💡 使用提示: {}", hints);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
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
