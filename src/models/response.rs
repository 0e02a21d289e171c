//! GraphQL 响应结构
//!
//! 所有字段都带默认值：缺字段、`null`、空响应体都会解码成零值，
//! 调用方把零值当作"没有数据"处理

use serde::{Deserialize, Deserializer};

/// 提交列表里表示"未运行"（编译错误等）的运行时间
pub const RUNTIME_NOT_AVAILABLE: &str = "N/A";

// ========== userProfileQuestions ==========

/// 已通过题目列表响应
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AcceptedProblemsResponse {
    pub data: Option<AcceptedProblemsData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcceptedProblemsData {
    pub user_profile_questions: Option<UserProfileQuestions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfileQuestions {
    #[serde(deserialize_with = "null_as_default")]
    pub questions: Vec<AcceptedQuestion>,
}

/// 单道已通过题目
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcceptedQuestion {
    #[serde(deserialize_with = "deserialize_id")]
    pub frontend_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub translated_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title_slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(deserialize_with = "null_as_default")]
    pub num_submitted: i64,
    /// Unix 秒
    #[serde(deserialize_with = "null_as_default")]
    pub last_submitted_at: i64,
}

impl AcceptedProblemsResponse {
    /// 题目列表，响应不完整时为空
    pub fn questions(&self) -> &[AcceptedQuestion] {
        self.data
            .as_ref()
            .and_then(|d| d.user_profile_questions.as_ref())
            .map(|q| q.questions.as_slice())
            .unwrap_or(&[])
    }
}

// ========== submissionList ==========

/// 某道题的提交列表响应
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionListResponse {
    pub data: Option<SubmissionListData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionListData {
    pub submission_list: Option<SubmissionList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionList {
    #[serde(deserialize_with = "null_as_default")]
    pub submissions: Vec<SubmissionSummary>,
}

/// 提交列表中的一条
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub runtime: String,
}

impl SubmissionSummary {
    /// 是否真正运行过
    pub fn has_run(&self) -> bool {
        self.runtime != RUNTIME_NOT_AVAILABLE
    }
}

impl SubmissionListResponse {
    pub fn submissions(&self) -> &[SubmissionSummary] {
        self.data
            .as_ref()
            .and_then(|d| d.submission_list.as_ref())
            .map(|l| l.submissions.as_slice())
            .unwrap_or(&[])
    }

    /// 列表中第一条运行时间不是 `N/A` 的提交
    pub fn first_ran(&self) -> Option<&SubmissionSummary> {
        self.submissions().iter().find(|s| s.has_run())
    }
}

// ========== submissionDetail ==========

/// 单次提交详情响应
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionDetailResponse {
    pub data: Option<SubmissionDetailData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionDetailData {
    pub submission_detail: Option<SubmissionDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lang: String,
}

impl SubmissionDetailResponse {
    pub fn detail(&self) -> Option<&SubmissionDetail> {
        self.data.as_ref().and_then(|d| d.submission_detail.as_ref())
    }
}

// ========== 反序列化辅助 ==========

/// `null` 按默认值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// GraphQL 的 ID 可能是字符串也可能是数字，统一转成字符串
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or an integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<String, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<String, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
