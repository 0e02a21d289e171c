use crate::error::ConfigError;
use std::fmt;
use tracing::warn;

/// 程序配置文件
#[derive(Clone)]
pub struct Config {
    /// 登录后的会话 Cookie
    pub cookie: String,
    /// 数据库连接串（sqlx SQLite URL）
    pub data_source: String,
    /// GraphQL 接口地址
    pub graphql_endpoint: String,
    /// 请求头中固定的 Host
    pub host: String,
    /// 请求头中固定的 User-Agent
    pub user_agent: String,
    /// 已通过题目列表的单页大小
    pub page_size: u32,
    /// 每道题拉取的最近提交数量
    pub submission_list_limit: u32,
    /// 两次补录之间的固定间隔（毫秒）
    pub backfill_delay_ms: u64,
    /// 代码输出目录
    pub answer_dir: String,
    /// 文件头中的作者
    pub author: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookie: String::new(),
            data_source: "sqlite:leetcode.db".to_string(),
            graphql_endpoint: "https://leetcode.cn/graphql/".to_string(),
            host: "leetcode.cn".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/104.0.0.0 Safari/537.36".to_string(),
            page_size: 10000,
            submission_list_limit: 10,
            backfill_delay_ms: 100,
            answer_dir: "answer".to_string(),
            author: "ZrjaK".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从 `.env` 与环境变量加载配置
    ///
    /// `.env` 不存在时直接使用进程环境变量，缺失的键回落到默认值
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意键值查找函数构造配置，便于测试
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            cookie: lookup("Cookie").unwrap_or(default.cookie),
            data_source: lookup("DataSource").unwrap_or(default.data_source),
            graphql_endpoint: lookup("GRAPHQL_ENDPOINT").unwrap_or(default.graphql_endpoint),
            host: lookup("LEETCODE_HOST").unwrap_or(default.host),
            user_agent: lookup("USER_AGENT").unwrap_or(default.user_agent),
            page_size: lookup("PAGE_SIZE").and_then(|v| v.parse().ok()).unwrap_or(default.page_size),
            submission_list_limit: lookup("SUBMISSION_LIST_LIMIT").and_then(|v| v.parse().ok()).unwrap_or(default.submission_list_limit),
            backfill_delay_ms: lookup("BACKFILL_DELAY_MS").and_then(|v| v.parse().ok()).unwrap_or(default.backfill_delay_ms),
            answer_dir: lookup("ANSWER_DIR").unwrap_or(default.answer_dir),
            author: lookup("AUTHOR").unwrap_or(default.author),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 检查启动必需的配置
    ///
    /// Cookie 为空只给出警告：请求照常发出，远端返回空数据
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_source.trim().is_empty() {
            return Err(ConfigError::Missing { key: "DataSource" });
        }
        if self.cookie.trim().is_empty() {
            warn!("⚠️ 未设置 Cookie，远端接口将返回空数据");
        }
        Ok(())
    }
}

// Cookie 不能出现在日志里
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("cookie", &if self.cookie.is_empty() { "<unset>" } else { "<redacted>" })
            .field("data_source", &self.data_source)
            .field("graphql_endpoint", &self.graphql_endpoint)
            .field("host", &self.host)
            .field("page_size", &self.page_size)
            .field("submission_list_limit", &self.submission_list_limit)
            .field("backfill_delay_ms", &self.backfill_delay_ms)
            .field("answer_dir", &self.answer_dir)
            .field("author", &self.author)
            .field("verbose_logging", &self.verbose_logging)
            .finish()
    }
}
