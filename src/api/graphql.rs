//! GraphQL 请求模板
//!
//! 三个固定的查询：已通过题目列表、某题的提交列表、单次提交详情

use serde_json::{json, Value};

pub const USER_PROFILE_QUESTIONS: &str = "userProfileQuestions";
pub const PROGRESS_SUBMISSIONS: &str = "progressSubmissions";
pub const MY_SUBMISSION_DETAIL: &str = "mySubmissionDetail";

const USER_PROFILE_QUESTIONS_QUERY: &str = r#"query userProfileQuestions($status: StatusFilterEnum!, $skip: Int!, $first: Int!, $sortField: SortFieldEnum!, $sortOrder: SortingOrderEnum!, $keyword: String, $difficulty: [DifficultyEnum!]) {
  userProfileQuestions(status: $status, skip: $skip, first: $first, sortField: $sortField, sortOrder: $sortOrder, keyword: $keyword, difficulty: $difficulty) {
    totalNum
    questions {
      translatedTitle
      frontendId
      titleSlug
      title
      difficulty
      lastSubmittedAt
      numSubmitted
      lastSubmissionSrc {
        sourceType
        ... on SubmissionSrcLeetbookNode {
          slug
          title
          pageId
          __typename
        }
        __typename
      }
      __typename
    }
    __typename
  }
}
"#;

const PROGRESS_SUBMISSIONS_QUERY: &str = r#"query progressSubmissions($offset: Int, $limit: Int, $lastKey: String, $questionSlug: String) {
  submissionList(offset: $offset, limit: $limit, lastKey: $lastKey, questionSlug: $questionSlug) {
    lastKey
    hasNext
    submissions {
      id
      timestamp
      url
      lang
      runtime
      __typename
    }
    __typename
  }
}
"#;

const MY_SUBMISSION_DETAIL_QUERY: &str = r#"query mySubmissionDetail($id: ID!) {
  submissionDetail(submissionId: $id) {
    id
    code
    runtime
    memory
    rawMemory
    statusDisplay
    timestamp
    lang
    isMine
    passedTestCaseCnt
    totalTestCaseCnt
    sourceUrl
    question {
      titleSlug
      title
      translatedTitle
      questionId
      __typename
    }
    __typename
  }
}
"#;

/// 构建已通过题目列表请求体
///
/// 按最后提交时间倒序，一页取完
pub fn accepted_problems_body(page_size: u32) -> Value {
    json!({
        "operationName": USER_PROFILE_QUESTIONS,
        "variables": {
            "status": "ACCEPTED",
            "skip": 0,
            "first": page_size,
            "sortField": "LAST_SUBMITTED_AT",
            "sortOrder": "DESCENDING",
            "difficulty": []
        },
        "query": USER_PROFILE_QUESTIONS_QUERY
    })
}

/// 构建提交列表请求体
pub fn submission_list_body(question_slug: &str, limit: u32) -> Value {
    json!({
        "operationName": PROGRESS_SUBMISSIONS,
        "variables": {
            "offset": 0,
            "limit": limit,
            "questionSlug": question_slug
        },
        "query": PROGRESS_SUBMISSIONS_QUERY
    })
}

/// 构建提交详情请求体
pub fn submission_detail_body(submission_id: &str) -> Value {
    json!({
        "operationName": MY_SUBMISSION_DETAIL,
        "variables": {
            "id": submission_id
        },
        "query": MY_SUBMISSION_DETAIL_QUERY
    })
}
