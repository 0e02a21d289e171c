//! 数据库服务
//!
//! 三张表：`question`、`special_question`、`last_submission`

use crate::error::StoreError;
use crate::models::{LastSubmission, Problem, ProblemView, SpecialProblem};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::debug;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS question (
        question_id       INTEGER PRIMARY KEY,
        title             TEXT NOT NULL,
        translated_title  TEXT NOT NULL,
        title_slug        TEXT NOT NULL,
        difficulty        TEXT NOT NULL,
        num_submitted     INTEGER NOT NULL,
        last_submitted_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS special_question (
        question_id       TEXT PRIMARY KEY,
        title             TEXT NOT NULL,
        translated_title  TEXT NOT NULL,
        title_slug        TEXT NOT NULL,
        difficulty        TEXT NOT NULL,
        num_submitted     INTEGER NOT NULL,
        last_submitted_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS last_submission (
        detail_id   INTEGER PRIMARY KEY,
        question_id TEXT NOT NULL,
        language    TEXT NOT NULL,
        code        TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_last_submission_question ON last_submission (question_id)",
];

/// 数据库句柄
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// 连接数据库，文件不存在时自动创建
    ///
    /// 整个程序串行执行，只用一个连接（`sqlite::memory:` 也因此在各查询间共享）
    pub async fn connect(data_source: &str) -> Result<Self, StoreError> {
        let connect_failed = |source| StoreError::ConnectFailed {
            data_source: data_source.to_string(),
            source,
        };

        let options = SqliteConnectOptions::from_str(data_source)
            .map_err(connect_failed)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(connect_failed)?;

        Ok(Self { pool })
    }

    /// 建表（已存在则跳过）
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        for ddl in SCHEMA {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(StoreError::query("建表"))?;
        }
        Ok(())
    }

    /// 整表替换两张题目表
    ///
    /// 先清空再批量插入，在同一事务内完成
    pub async fn replace_problems(
        &self,
        problems: &[Problem],
        special_problems: &[SpecialProblem],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::query("开启事务"))?;

        sqlx::query("DELETE FROM question")
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query("清空 question"))?;

        for p in problems {
            sqlx::query(
                r#"
                INSERT INTO question (question_id, title, translated_title, title_slug, difficulty, num_submitted, last_submitted_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(p.question_id)
            .bind(&p.title)
            .bind(&p.translated_title)
            .bind(&p.title_slug)
            .bind(&p.difficulty)
            .bind(p.num_submitted)
            .bind(p.last_submitted_at)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query("插入 question"))?;
        }

        sqlx::query("DELETE FROM special_question")
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query("清空 special_question"))?;

        for p in special_problems {
            sqlx::query(
                r#"
                INSERT INTO special_question (question_id, title, translated_title, title_slug, difficulty, num_submitted, last_submitted_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&p.question_id)
            .bind(&p.title)
            .bind(&p.translated_title)
            .bind(&p.title_slug)
            .bind(&p.difficulty)
            .bind(p.num_submitted)
            .bind(p.last_submitted_at)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query("插入 special_question"))?;
        }

        tx.commit().await.map_err(StoreError::query("提交事务"))?;

        debug!(
            "题目表已替换: question {} 行, special_question {} 行",
            problems.len(),
            special_problems.len()
        );
        Ok(())
    }

    /// 某道题已保存的提交数量
    pub async fn count_submissions(&self, question_id: &str) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM last_submission WHERE question_id = ?")
            .bind(question_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::query("统计提交记录"))
    }

    /// 保存一条提交
    ///
    /// 同一提交 ID 已存在时（题目改号后远端返回同一提交）改写为新题号
    pub async fn insert_submission(&self, submission: &LastSubmission) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO last_submission (detail_id, question_id, language, code)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(detail_id) DO UPDATE SET
                question_id = excluded.question_id,
                language    = excluded.language,
                code        = excluded.code
            "#,
        )
        .bind(submission.detail_id)
        .bind(&submission.question_id)
        .bind(&submission.language)
        .bind(&submission.code)
        .execute(&self.pool)
        .await
        .map_err(StoreError::query("插入提交记录"))?;
        Ok(())
    }

    /// 全部提交，按提交 ID 排序
    pub async fn all_submissions(&self) -> Result<Vec<LastSubmission>, StoreError> {
        sqlx::query_as::<_, LastSubmission>(
            "SELECT detail_id, question_id, language, code FROM last_submission ORDER BY detail_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::query("读取提交记录"))
    }

    pub async fn total_submissions(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM last_submission")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::query("统计提交记录"))
    }

    pub async fn find_problem(&self, question_id: i64) -> Result<Option<Problem>, StoreError> {
        sqlx::query_as::<_, Problem>(
            r#"
            SELECT question_id, title, translated_title, title_slug, difficulty, num_submitted, last_submitted_at
            FROM question WHERE question_id = ?
            "#,
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::query("查询 question"))
    }

    pub async fn find_special_problem(
        &self,
        question_id: &str,
    ) -> Result<Option<SpecialProblem>, StoreError> {
        sqlx::query_as::<_, SpecialProblem>(
            r#"
            SELECT question_id, title, translated_title, title_slug, difficulty, num_submitted, last_submitted_at
            FROM special_question WHERE question_id = ?
            "#,
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::query("查询 special_question"))
    }

    /// 按题号查题目：先查 `question`，查不到再查 `special_question`
    pub async fn find_problem_view(
        &self,
        question_id: &str,
    ) -> Result<Option<ProblemView>, StoreError> {
        if let Ok(id) = question_id.parse::<i64>() {
            if let Some(p) = self.find_problem(id).await? {
                return Ok(Some(p.into()));
            }
        }
        Ok(self
            .find_special_problem(question_id)
            .await?
            .map(ProblemView::from))
    }

    /// 两张题目表的行数
    pub async fn problem_counts(&self) -> Result<(i64, i64), StoreError> {
        let numeric = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM question")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::query("统计 question"))?;
        let special = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM special_question")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::query("统计 special_question"))?;
        Ok((numeric, special))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timestamp_from_unix;

    async fn memory_store() -> Store {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        store.init_schema().await.unwrap();
        store
    }

    fn problem(id: i64, title: &str) -> Problem {
        Problem {
            question_id: id,
            title: title.to_string(),
            translated_title: format!("{}-译", title),
            title_slug: title.to_lowercase(),
            difficulty: "EASY".to_string(),
            num_submitted: 1,
            last_submitted_at: timestamp_from_unix(1660000000),
        }
    }

    fn special(id: &str) -> SpecialProblem {
        SpecialProblem {
            question_id: id.to_string(),
            title: id.to_string(),
            translated_title: format!("{}-译", id),
            title_slug: id.to_lowercase().replace(' ', "-"),
            difficulty: "MEDIUM".to_string(),
            num_submitted: 2,
            last_submitted_at: timestamp_from_unix(1660000500),
        }
    }

    #[tokio::test]
    async fn replace_discards_previous_rows() {
        let store = memory_store().await;
        store
            .replace_problems(&[problem(1, "A"), problem(2, "B")], &[special("LCP 01")])
            .await
            .unwrap();
        store
            .replace_problems(&[problem(3, "C")], &[])
            .await
            .unwrap();

        assert_eq!(store.problem_counts().await.unwrap(), (1, 0));
        assert!(store.find_problem(1).await.unwrap().is_none());
        assert_eq!(store.find_problem(3).await.unwrap().unwrap(), problem(3, "C"));
    }

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let store = memory_store().await;
        store.init_schema().await.unwrap();
        assert_eq!(store.total_submissions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn view_lookup_falls_back_to_special_table() {
        let store = memory_store().await;
        store
            .replace_problems(&[problem(1, "A")], &[special("LCP 01"), special("7a")])
            .await
            .unwrap();

        let numeric = store.find_problem_view("1").await.unwrap().unwrap();
        assert_eq!(numeric.translated_title, "A-译");

        let sp = store.find_problem_view("LCP 01").await.unwrap().unwrap();
        assert_eq!(sp.difficulty, "MEDIUM");
        assert_eq!(sp.last_submitted_at.timestamp(), 1660000500);

        assert!(store.find_problem_view("2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn submissions_are_counted_per_question() {
        let store = memory_store().await;
        let sub = LastSubmission {
            detail_id: 10,
            question_id: "1".to_string(),
            language: "python3".to_string(),
            code: "print(1)".to_string(),
        };
        store.insert_submission(&sub).await.unwrap();

        assert_eq!(store.count_submissions("1").await.unwrap(), 1);
        assert_eq!(store.count_submissions("2").await.unwrap(), 0);
        assert_eq!(store.all_submissions().await.unwrap(), vec![sub.clone()]);
    }

    #[tokio::test]
    async fn repeated_detail_id_moves_row_to_new_question() {
        let store = memory_store().await;
        let old = LastSubmission {
            detail_id: 500,
            question_id: "剑指 Offer 03".to_string(),
            language: "cpp".to_string(),
            code: "int a;".to_string(),
        };
        store.insert_submission(&old).await.unwrap();

        let renumbered = LastSubmission {
            question_id: "LCR 120".to_string(),
            ..old.clone()
        };
        store.insert_submission(&renumbered).await.unwrap();

        assert_eq!(store.total_submissions().await.unwrap(), 1);
        assert_eq!(store.count_submissions("剑指 Offer 03").await.unwrap(), 0);
        assert_eq!(store.count_submissions("LCR 120").await.unwrap(), 1);
    }
}
