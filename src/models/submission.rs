use sqlx::FromRow;

/// 每道题保存的最后一次提交（`last_submission` 表）
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct LastSubmission {
    /// 远端提交 ID
    pub detail_id: i64,
    /// 所属题号，数字题号也以字符串保存
    pub question_id: String,
    pub language: String,
    pub code: String,
}

/// 从远端拿到的提交，尚未关联题号
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedSubmission {
    pub detail_id: i64,
    pub language: String,
    pub code: String,
}

impl FetchedSubmission {
    /// 关联题号，得到可入库的记录
    pub fn into_record(self, question_id: impl Into<String>) -> LastSubmission {
        LastSubmission {
            detail_id: self.detail_id,
            question_id: question_id.into(),
            language: self.language,
            code: self.code,
        }
    }

    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }
}
