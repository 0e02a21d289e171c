//! API 模块
//!
//! 负责与力扣 GraphQL 接口交互的请求模板

pub mod graphql;

// 重新导出常用函数
pub use graphql::{accepted_problems_body, submission_detail_body, submission_list_body};
