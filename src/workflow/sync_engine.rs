//! 增量同步流程 - 流程层
//!
//! 流程顺序：
//! 1. 拉取已通过题目 → 分类
//! 2. 整表替换 question / special_question
//! 3. 逐题补录缺失的最后提交（数字题号）
//! 4. 逐题补录缺失的最后提交（特殊题号）

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::clients::LeetCodeApi;
use crate::config::Config;
use crate::error::AppResult;
use crate::services::classifier::classify;
use crate::services::store::Store;
use crate::utils::logging::truncate_text;

/// 同步统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncStats {
    /// 数字题号题目数
    pub numeric_problems: usize,
    /// 特殊题号题目数
    pub special_problems: usize,
    /// 已有提交、直接跳过
    pub already_stored: usize,
    /// 本次新增的提交
    pub backfilled: usize,
    /// 没拿到提交（下次运行重试）
    pub missing: usize,
}

/// 单道题的补录结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackfillOutcome {
    /// 数据库中已有提交
    AlreadyStored,
    /// 新保存了一条提交
    Stored { detail_id: i64 },
    /// 远端没有可用的提交
    Missing,
}

/// 补录时对空代码的处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmptyCode {
    Skip,
    Store,
}

/// 同步流程
///
/// - 不持有网络资源，只借用实现了 `LeetCodeApi` 的客户端
/// - 每次运行都从头执行，已有提交的题目直接跳过
pub struct SyncEngine<'a, A: LeetCodeApi> {
    api: &'a A,
    store: Store,
    backfill_delay: Duration,
    verbose_logging: bool,
}

impl<'a, A: LeetCodeApi> SyncEngine<'a, A> {
    pub fn new(api: &'a A, store: Store, config: &Config) -> Self {
        Self {
            api,
            store,
            backfill_delay: Duration::from_millis(config.backfill_delay_ms),
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(&self) -> AppResult<SyncStats> {
        info!("🔍 正在拉取已通过题目列表...");
        let response = self.api.fetch_accepted_problems().await;
        let classified = classify(&response);

        if classified.is_empty() {
            warn!("⚠️ 已通过题目列表为空（Cookie 失效或网络异常？）");
        }
        info!(
            "✓ 共 {} 道题: 数字题号 {} 道, 特殊题号 {} 道",
            classified.len(),
            classified.numeric.len(),
            classified.special.len()
        );

        self.store
            .replace_problems(&classified.numeric, &classified.special)
            .await?;

        let mut stats = SyncStats {
            numeric_problems: classified.numeric.len(),
            special_problems: classified.special.len(),
            ..Default::default()
        };

        for (index, problem) in classified.numeric.iter().enumerate() {
            let question_id = problem.question_id.to_string();
            let outcome = self
                .backfill(index, &question_id, &problem.title_slug, EmptyCode::Skip)
                .await?;
            stats.record(&outcome);
        }

        for (index, problem) in classified.special.iter().enumerate() {
            let outcome = self
                .backfill(
                    index,
                    &problem.question_id,
                    &problem.title_slug,
                    EmptyCode::Store,
                )
                .await?;
            stats.record(&outcome);
        }

        Ok(stats)
    }

    /// 补录一道题的最后提交
    async fn backfill(
        &self,
        index: usize,
        question_id: &str,
        title_slug: &str,
        empty_code: EmptyCode,
    ) -> AppResult<BackfillOutcome> {
        if self.store.count_submissions(question_id).await? > 0 {
            return Ok(BackfillOutcome::AlreadyStored);
        }

        let fetched = match self.api.fetch_last_submission(title_slug).await {
            Some(f) => f,
            None => {
                warn!("[{}] 题目 {} 没有可用的提交，跳过", index, question_id);
                return Ok(BackfillOutcome::Missing);
            }
        };

        if empty_code == EmptyCode::Skip && !fetched.has_code() {
            warn!(
                "[{}] 题目 {} 提交 {} 代码为空，跳过",
                index, question_id, fetched.detail_id
            );
            return Ok(BackfillOutcome::Missing);
        }

        if self.verbose_logging {
            debug!(
                "[{}] 题目 {} 代码: {}",
                index,
                question_id,
                truncate_text(&fetched.code, 80)
            );
        }

        let record = fetched.into_record(question_id);
        self.store.insert_submission(&record).await?;

        sleep(self.backfill_delay).await;

        info!(
            "[{}] ✓ 题目 {} 提交 {} ({})",
            index, question_id, record.detail_id, record.language
        );

        Ok(BackfillOutcome::Stored {
            detail_id: record.detail_id,
        })
    }
}

impl SyncStats {
    fn record(&mut self, outcome: &BackfillOutcome) {
        match outcome {
            BackfillOutcome::AlreadyStored => self.already_stored += 1,
            BackfillOutcome::Stored { .. } => self.backfilled += 1,
            BackfillOutcome::Missing => self.missing += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AcceptedProblemsResponse, SubmissionDetailResponse, SubmissionListResponse};
    use serde_json::{json, Value};
    use std::cell::Cell;
    use std::collections::HashMap;

    /// 按 slug 返回固定数据的假客户端
    #[derive(Default)]
    struct FakeApi {
        accepted: Value,
        lists: HashMap<String, Value>,
        details: HashMap<String, Value>,
        detail_calls: Cell<usize>,
    }

    impl FakeApi {
        fn with_problem(mut self, frontend_id: &str, slug: &str, detail_id: &str, code: &str) -> Self {
            let mut questions = self.accepted["data"]["userProfileQuestions"]["questions"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            questions.push(json!({
                "frontendId": frontend_id,
                "titleSlug": slug,
                "title": slug,
                "translatedTitle": format!("题目{}", frontend_id),
                "difficulty": "EASY",
                "lastSubmittedAt": 1660000000,
                "numSubmitted": 1
            }));
            self.accepted = json!({ "data": { "userProfileQuestions": { "questions": questions } } });
            self.lists.insert(
                slug.to_string(),
                json!({ "data": { "submissionList": { "submissions": [
                    { "id": detail_id, "runtime": "12 ms", "lang": "python3" }
                ] } } }),
            );
            self.details.insert(
                detail_id.to_string(),
                json!({ "data": { "submissionDetail": { "id": detail_id, "code": code, "lang": "python3" } } }),
            );
            self
        }
    }

    impl LeetCodeApi for FakeApi {
        async fn fetch_accepted_problems(&self) -> AcceptedProblemsResponse {
            serde_json::from_value(self.accepted.clone()).unwrap_or_default()
        }

        async fn fetch_submission_list(&self, question_slug: &str) -> SubmissionListResponse {
            self.lists
                .get(question_slug)
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default()
        }

        async fn fetch_submission_detail(&self, submission_id: &str) -> SubmissionDetailResponse {
            self.detail_calls.set(self.detail_calls.get() + 1);
            self.details
                .get(submission_id)
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default()
        }
    }

    async fn memory_store() -> Store {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        store.init_schema().await.unwrap();
        store
    }

    fn config() -> Config {
        Config {
            backfill_delay_ms: 0,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn second_run_fetches_nothing_new() {
        let api = FakeApi::default()
            .with_problem("1", "two-sum", "100", "print(1)")
            .with_problem("LCP 01", "guess-numbers", "200", "print(2)");
        let store = memory_store().await;
        let engine = SyncEngine::new(&api, store.clone(), &config());

        let first = engine.run().await.unwrap();
        assert_eq!(first.backfilled, 2);
        assert_eq!(store.total_submissions().await.unwrap(), 2);
        assert_eq!(api.detail_calls.get(), 2);

        let second = engine.run().await.unwrap();
        assert_eq!(second.backfilled, 0);
        assert_eq!(second.already_stored, 2);
        assert_eq!(store.total_submissions().await.unwrap(), 2);
        assert_eq!(api.detail_calls.get(), 2);
    }

    #[tokio::test]
    async fn renumbered_problem_keeps_syncing() {
        let slug = "shu-zu-zhong-zhong-fu-de-shu-zi-lcof";
        let store = memory_store().await;

        let api = FakeApi::default().with_problem("剑指 Offer 03", slug, "500", "int a;");
        SyncEngine::new(&api, store.clone(), &config()).run().await.unwrap();

        // 题号改了，远端返回的还是同一个提交
        let api = FakeApi::default().with_problem("LCR 120", slug, "500", "int a;");
        let engine = SyncEngine::new(&api, store.clone(), &config());

        let second = engine.run().await.unwrap();
        assert_eq!(second.backfilled, 1);

        let third = engine.run().await.unwrap();
        assert_eq!(third.already_stored, 1);
        assert_eq!(third.backfilled, 0);

        assert_eq!(store.total_submissions().await.unwrap(), 1);
        assert_eq!(store.count_submissions("LCR 120").await.unwrap(), 1);
        assert_eq!(store.count_submissions("剑指 Offer 03").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delay_follows_each_stored_submission_only() {
        let delay = Duration::from_millis(150);
        let config = Config {
            backfill_delay_ms: delay.as_millis() as u64,
            ..Config::default()
        };
        let mut api = FakeApi::default()
            .with_problem("1", "two-sum", "100", "print(1)")
            .with_problem("2", "add-two-numbers", "101", "")
            .with_problem("3", "longest-substring", "102", "print(3)")
            .with_problem("4", "median", "103", "print(4)");
        api.lists.remove("median");
        let store = memory_store().await;
        let engine = SyncEngine::new(&api, store.clone(), &config);

        // 两条新提交各等一次，空代码和没有提交的题不等
        let started = std::time::Instant::now();
        let first = engine.run().await.unwrap();
        let elapsed = started.elapsed();
        assert_eq!(first.backfilled, 2);
        assert_eq!(first.missing, 2);
        assert!(elapsed >= delay * 2, "elapsed {:?}", elapsed);
        assert!(elapsed < delay * 3, "elapsed {:?}", elapsed);

        // 全部已保存或缺失，不再等待
        let started = std::time::Instant::now();
        let second = engine.run().await.unwrap();
        let elapsed = started.elapsed();
        assert_eq!(second.already_stored, 2);
        assert_eq!(second.missing, 2);
        assert!(elapsed < delay, "elapsed {:?}", elapsed);
    }

    #[tokio::test]
    async fn empty_code_is_skipped_for_numeric_problems_only() {
        let api = FakeApi::default()
            .with_problem("1", "two-sum", "100", "")
            .with_problem("LCP 01", "guess-numbers", "200", "");
        let store = memory_store().await;

        let stats = SyncEngine::new(&api, store.clone(), &config())
            .run()
            .await
            .unwrap();

        assert_eq!(stats.missing, 1);
        assert_eq!(stats.backfilled, 1);
        assert_eq!(store.count_submissions("1").await.unwrap(), 0);
        assert_eq!(store.count_submissions("LCP 01").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn problem_without_submissions_is_retried_next_run() {
        let mut api = FakeApi::default().with_problem("1", "two-sum", "100", "print(1)");
        api.lists.clear();
        let store = memory_store().await;

        let stats = SyncEngine::new(&api, store.clone(), &config())
            .run()
            .await
            .unwrap();
        assert_eq!(stats.missing, 1);
        assert_eq!(api.detail_calls.get(), 0);

        let api = FakeApi::default().with_problem("1", "two-sum", "100", "print(1)");
        let stats = SyncEngine::new(&api, store.clone(), &config())
            .run()
            .await
            .unwrap();
        assert_eq!(stats.backfilled, 1);
    }

    #[tokio::test]
    async fn empty_remote_response_is_not_an_error() {
        let api = FakeApi::default();
        let store = memory_store().await;

        let stats = SyncEngine::new(&api, store.clone(), &config())
            .run()
            .await
            .unwrap();

        assert_eq!(stats, SyncStats::default());
        assert_eq!(store.problem_counts().await.unwrap(), (0, 0));
    }

    #[tokio::test]
    async fn problem_tables_are_replaced_each_run() {
        let store = memory_store().await;
        let api = FakeApi::default()
            .with_problem("1", "two-sum", "100", "print(1)")
            .with_problem("2", "add-two-numbers", "101", "print(2)");
        SyncEngine::new(&api, store.clone(), &config()).run().await.unwrap();

        let api = FakeApi::default().with_problem("3", "longest-substring", "102", "print(3)");
        SyncEngine::new(&api, store.clone(), &config()).run().await.unwrap();

        assert_eq!(store.problem_counts().await.unwrap(), (1, 0));
        // 旧题目的提交保留，成为悬空引用
        assert_eq!(store.total_submissions().await.unwrap(), 3);
    }
}
