use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据库错误
    #[error("数据库错误: {0}")]
    Store(#[from] StoreError),
    /// 归档写文件错误
    #[error("归档错误: {0}")]
    Archive(#[from] ArchiveError),
}

/// API 调用错误
///
/// 客户端遇到这些错误时只记录日志并返回空响应，不会向上传播
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({operation}): {source}")]
    RequestFailed {
        operation: String,
        #[source]
        source: reqwest::Error,
    },
    /// 非 2xx 响应
    #[error("API返回错误响应 ({operation}): HTTP {status}")]
    BadStatus { operation: String, status: u16 },
    /// JSON 解析失败
    #[error("JSON解析失败 ({operation}): {source}")]
    JsonParseFailed {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 数据库错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 连接数据库失败
    #[error("无法连接数据库 {data_source}: {source}")]
    ConnectFailed {
        data_source: String,
        #[source]
        source: sqlx::Error,
    },
    /// 执行语句失败
    #[error("{action} 失败: {source}")]
    QueryFailed {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// 归档错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// 提交记录找不到对应题目
    #[error("查询题目出错: 题目 {question_id} 不在 question / special_question 表中 (提交 {detail_id})")]
    ProblemNotFound { question_id: String, detail_id: i64 },
    /// 创建输出目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必需的配置项为空
    #[error("配置项 {key} 为空")]
    Missing { key: &'static str },
}

impl StoreError {
    /// 包装 sqlx 错误，附带正在执行的动作
    pub fn query(action: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
        move |source| StoreError::QueryFailed { action, source }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
