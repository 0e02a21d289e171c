pub mod leetcode_client;

pub use leetcode_client::LeetCodeClient;

use crate::models::{
    AcceptedProblemsResponse, FetchedSubmission, SubmissionDetailResponse, SubmissionListResponse,
};
use tracing::{debug, warn};

/// 力扣远端查询能力
///
/// 三个方法都不返回错误：网络或解析失败时记录日志并返回空响应，
/// 调用方把空响应当作"没有数据"
#[allow(async_fn_in_trait)]
pub trait LeetCodeApi {
    /// 拉取全部已通过题目
    async fn fetch_accepted_problems(&self) -> AcceptedProblemsResponse;

    /// 拉取某道题最近的提交列表
    async fn fetch_submission_list(&self, question_slug: &str) -> SubmissionListResponse;

    /// 拉取单次提交的代码与语言
    async fn fetch_submission_detail(&self, submission_id: &str) -> SubmissionDetailResponse;

    /// 取某道题最近一次真正运行过的提交
    ///
    /// 在提交列表中选第一条运行时间不是 `N/A` 的记录，再拉它的详情。
    /// 没有可选的提交时返回 `None`；详情为空时返回代码为空的提交
    async fn fetch_last_submission(&self, question_slug: &str) -> Option<FetchedSubmission> {
        let list = self.fetch_submission_list(question_slug).await;
        let chosen = list.first_ran()?;

        let detail_id = match chosen.id.parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                warn!("提交 ID 不是整数: {:?} (题目 {})", chosen.id, question_slug);
                return None;
            }
        };

        debug!("题目 {} 选中提交 {}", question_slug, detail_id);

        let detail = self.fetch_submission_detail(&chosen.id).await;
        let fetched = match detail.detail() {
            Some(d) => FetchedSubmission {
                detail_id,
                language: d.lang.clone(),
                code: d.code.clone(),
            },
            None => FetchedSubmission {
                detail_id,
                ..Default::default()
            },
        };

        Some(fetched)
    }
}
