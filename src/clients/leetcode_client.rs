/// 力扣 GraphQL 客户端
///
/// 封装所有与 leetcode.cn 相关的调用逻辑
use crate::api::graphql::{self, MY_SUBMISSION_DETAIL, PROGRESS_SUBMISSIONS, USER_PROFILE_QUESTIONS};
use crate::clients::LeetCodeApi;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{AcceptedProblemsResponse, SubmissionDetailResponse, SubmissionListResponse};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE, HOST, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// 力扣客户端
pub struct LeetCodeClient {
    http: reqwest::Client,
    endpoint: String,
    page_size: u32,
    submission_list_limit: u32,
}

impl LeetCodeClient {
    /// 创建新的力扣客户端
    ///
    /// Cookie、User-Agent、Host 作为默认请求头附加到每个请求。
    /// Cookie 不是合法的请求头时不带 Cookie，之后的请求按未登录处理
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&config.cookie) {
            Ok(cookie) => {
                headers.insert(COOKIE, cookie);
            }
            Err(_) => warn!("⚠️ Cookie 含有非法字符，已忽略（请检查 .env）"),
        }
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("User-Agent 含有非法字符")?,
        );
        headers.insert(
            HOST,
            HeaderValue::from_str(&config.host).context("Host 含有非法字符")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("无法创建 HTTP 客户端")?;

        Ok(Self {
            http,
            endpoint: config.graphql_endpoint.clone(),
            page_size: config.page_size,
            submission_list_limit: config.submission_list_limit,
        })
    }

    /// 发送 GraphQL 请求
    ///
    /// 任何失败都记录日志并返回空响应
    async fn post<T>(&self, operation: &str, body: &Value) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.try_post(operation, body).await {
            Ok(text) => decode_response(operation, &text),
            Err(e) => {
                warn!("⚠️ {}", e);
                T::default()
            }
        }
    }

    async fn try_post(&self, operation: &str, body: &Value) -> Result<String, ApiError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::RequestFailed {
                operation: operation.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                operation: operation.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| ApiError::RequestFailed {
            operation: operation.to_string(),
            source,
        })
    }
}

impl LeetCodeApi for LeetCodeClient {
    async fn fetch_accepted_problems(&self) -> AcceptedProblemsResponse {
        let body = graphql::accepted_problems_body(self.page_size);
        self.post(USER_PROFILE_QUESTIONS, &body).await
    }

    async fn fetch_submission_list(&self, question_slug: &str) -> SubmissionListResponse {
        let body = graphql::submission_list_body(question_slug, self.submission_list_limit);
        self.post(PROGRESS_SUBMISSIONS, &body).await
    }

    async fn fetch_submission_detail(&self, submission_id: &str) -> SubmissionDetailResponse {
        let body = graphql::submission_detail_body(submission_id);
        self.post(MY_SUBMISSION_DETAIL, &body).await
    }
}

/// 解析响应体，失败时返回零值
pub fn decode_response<T>(operation: &str, text: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(source) => {
            let err = ApiError::JsonParseFailed {
                operation: operation.to_string(),
                source,
            };
            warn!("⚠️ {}", err);
            debug!("原始响应: {}", crate::utils::logging::truncate_text(text, 200));
            T::default()
        }
    }
}
