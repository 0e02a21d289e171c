use chrono::{DateTime, Local, Utc};
use sqlx::FromRow;

/// 题号为纯数字的已通过题目（`question` 表）
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Problem {
    pub question_id: i64,
    pub title: String,
    pub translated_title: String,
    pub title_slug: String,
    pub difficulty: String,
    pub num_submitted: i64,
    pub last_submitted_at: DateTime<Utc>,
}

/// 题号不是整数的已通过题目（`special_question` 表），例如 LeetBook / LCP 专题
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SpecialProblem {
    pub question_id: String,
    pub title: String,
    pub translated_title: String,
    pub title_slug: String,
    pub difficulty: String,
    pub num_submitted: i64,
    pub last_submitted_at: DateTime<Utc>,
}

/// 两种题目的统一视图，归档时使用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemView {
    pub question_id: String,
    pub translated_title: String,
    pub title_slug: String,
    pub difficulty: String,
    pub last_submitted_at: DateTime<Utc>,
}

impl ProblemView {
    /// 本地时区的最后提交时间，用于文件头
    pub fn last_submitted_local(&self) -> String {
        self.last_submitted_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %z")
            .to_string()
    }
}

impl From<Problem> for ProblemView {
    fn from(p: Problem) -> Self {
        Self {
            question_id: p.question_id.to_string(),
            translated_title: p.translated_title,
            title_slug: p.title_slug,
            difficulty: p.difficulty,
            last_submitted_at: p.last_submitted_at,
        }
    }
}

impl From<SpecialProblem> for ProblemView {
    fn from(p: SpecialProblem) -> Self {
        Self {
            question_id: p.question_id,
            translated_title: p.translated_title,
            title_slug: p.title_slug,
            difficulty: p.difficulty,
            last_submitted_at: p.last_submitted_at,
        }
    }
}

/// Unix 秒转 UTC 时间，超出范围时回落到纪元
pub fn timestamp_from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}
