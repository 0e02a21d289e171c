//! 归档写入服务 - 业务能力层
//!
//! 把数据库中的每条提交写成 `<题号>.<中文标题><扩展名>` 文件

use crate::config::Config;
use crate::error::{AppError, ArchiveError};
use crate::models::{Language, LastSubmission, ProblemView};
use crate::services::store::Store;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// 归档统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArchiveStats {
    pub written: usize,
}

/// 归档写入服务
///
/// 遇到找不到题目的提交立即停止，后续提交不再处理
pub struct ArchiveWriter {
    store: Store,
    answer_dir: PathBuf,
    author: String,
}

impl ArchiveWriter {
    pub fn new(store: Store, config: &Config) -> Self {
        Self {
            store,
            answer_dir: PathBuf::from(&config.answer_dir),
            author: config.author.clone(),
        }
    }

    pub fn answer_dir(&self) -> &Path {
        &self.answer_dir
    }

    /// 写出全部提交
    pub async fn write_all(&self) -> Result<ArchiveStats, AppError> {
        let submissions = self.store.all_submissions().await?;
        info!("📝 共 {} 条提交待写出", submissions.len());

        let mut stats = ArchiveStats::default();
        for sub in &submissions {
            self.write_one(sub).await?;
            stats.written += 1;
        }

        Ok(stats)
    }

    async fn write_one(&self, sub: &LastSubmission) -> Result<(), AppError> {
        let problem = match self.store.find_problem_view(&sub.question_id).await? {
            Some(p) if !p.translated_title.is_empty() => p,
            _ => {
                error!(
                    "❌ 提交 {} 找不到题目 {}，停止归档",
                    sub.detail_id, sub.question_id
                );
                return Err(ArchiveError::ProblemNotFound {
                    question_id: sub.question_id.clone(),
                    detail_id: sub.detail_id,
                }
                .into());
            }
        };

        self.ensure_answer_dir().await?;

        let language = Language::from_lang(&sub.language);
        let path = self.answer_dir.join(file_name(&problem, language));
        let text = render(&problem, sub, &self.author);

        tokio::fs::write(&path, text)
            .await
            .map_err(|source| ArchiveError::WriteFailed {
                path: path.display().to_string(),
                source,
            })?;

        debug!("写出 {}", path.display());
        Ok(())
    }

    async fn ensure_answer_dir(&self) -> Result<(), ArchiveError> {
        tokio::fs::create_dir_all(&self.answer_dir)
            .await
            .map_err(|source| ArchiveError::CreateDirFailed {
                path: self.answer_dir.display().to_string(),
                source,
            })
    }
}

/// 渲染文件内容：五行注释头、空行、代码
pub fn render(problem: &ProblemView, sub: &LastSubmission, author: &str) -> String {
    let c = Language::from_lang(&sub.language).comment_marker();
    let mut text = String::with_capacity(sub.code.len() + 256);
    text.push_str(&format!(
        "{} 题目：{}.{}\n",
        c, problem.question_id, problem.translated_title
    ));
    text.push_str(&format!("{} 难度：{}\n", c, problem.difficulty));
    text.push_str(&format!("{} 最后提交：{}\n", c, problem.last_submitted_local()));
    text.push_str(&format!("{} 语言：{}\n", c, sub.language));
    text.push_str(&format!("{} 作者：{}\n\n", c, author));
    text.push_str(&sub.code);
    text
}

/// 输出文件名：`<题号>.<中文标题><扩展名>`
///
/// 标题中的路径分隔符替换为 `_`，文件始终落在输出目录内
pub fn file_name(problem: &ProblemView, language: Language) -> String {
    let title = problem.translated_title.replace(['/', '\\'], "_");
    format!("{}.{}{}", problem.question_id, title, language.extension())
}
