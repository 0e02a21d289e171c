//! 日志初始化
//!
//! 默认 `info` 级别，可通过 `RUST_LOG` 覆盖

use tracing_subscriber::EnvFilter;

/// 默认日志过滤规则
const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

/// 初始化全局日志订阅器
///
/// 重复调用是安全的（测试中会多次调用），后续调用直接忽略
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
