//! 已通过题目分类
//!
//! 题号能按十进制整数解析的进 `question` 表，其余进 `special_question` 表

use crate::models::{timestamp_from_unix, AcceptedProblemsResponse, AcceptedQuestion, Problem, SpecialProblem};

/// 分类结果，各自保持原始顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedProblems {
    pub numeric: Vec<Problem>,
    pub special: Vec<SpecialProblem>,
}

impl ClassifiedProblems {
    pub fn len(&self) -> usize {
        self.numeric.len() + self.special.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 把已通过题目列表拆成数字题号与特殊题号两组
pub fn classify(response: &AcceptedProblemsResponse) -> ClassifiedProblems {
    let mut classified = ClassifiedProblems::default();

    for q in response.questions() {
        match q.frontend_id.parse::<i64>() {
            Ok(id) => classified.numeric.push(numeric_problem(id, q)),
            Err(_) => classified.special.push(special_problem(q)),
        }
    }

    classified
}

fn numeric_problem(question_id: i64, q: &AcceptedQuestion) -> Problem {
    Problem {
        question_id,
        title: q.title.clone(),
        translated_title: q.translated_title.clone(),
        title_slug: q.title_slug.clone(),
        difficulty: q.difficulty.clone(),
        num_submitted: q.num_submitted,
        last_submitted_at: timestamp_from_unix(q.last_submitted_at),
    }
}

fn special_problem(q: &AcceptedQuestion) -> SpecialProblem {
    SpecialProblem {
        question_id: q.frontend_id.clone(),
        title: q.title.clone(),
        translated_title: q.translated_title.clone(),
        title_slug: q.title_slug.clone(),
        difficulty: q.difficulty.clone(),
        num_submitted: q.num_submitted,
        last_submitted_at: timestamp_from_unix(q.last_submitted_at),
    }
}
