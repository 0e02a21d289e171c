/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::services::archive_writer::ArchiveStats;
use crate::workflow::sync_engine::SyncStats;
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `data_source`: 数据库连接串
/// - `answer_dir`: 代码输出目录
pub fn log_startup(data_source: &str, answer_dir: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 力扣提交归档");
    info!("🗄️ 数据库: {}", data_source);
    info!("📁 输出目录: {}", answer_dir);
    info!("{}", "=".repeat(60));
}

/// 记录同步阶段统计
pub fn log_sync_stats(stats: &SyncStats) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 同步完成: 普通题目 {} 道, 特殊题目 {} 道",
        stats.numeric_problems, stats.special_problems
    );
    info!(
        "📥 新增提交 {} 条, 已存在跳过 {} 条, 未找到提交 {} 条",
        stats.backfilled, stats.already_stored, stats.missing
    );
    info!("{}", "─".repeat(60));
}

/// 记录归档阶段统计
pub fn log_archive_stats(stats: &ArchiveStats, answer_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 归档完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 写入文件: {}", stats.written);
    info!("{}", "=".repeat(60));
    info!("\n代码已保存至: {}", answer_dir);
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
