//! # LeetCode Archive
//!
//! 把力扣（leetcode.cn）上已通过题目的最后一次提交保存到数据库，并按题目写成代码文件
//!
//! ## 架构设计
//!
//! ### ① 接口层（API / Clients）
//! - `api/` - 三个固定的 GraphQL 请求模板
//! - `clients/` - `LeetCodeApi` 能力与 `LeetCodeClient` 实现，失败时返回空响应
//!
//! ### ② 业务能力层（Services）
//! - `classifier` - 数字题号 / 特殊题号分类
//! - `Store` - 三张表的读写
//! - `ArchiveWriter` - 数据库 → 代码文件
//!
//! ### ③ 流程层（Workflow）
//! - `SyncEngine` - 拉列表 → 替换题目表 → 逐题补录缺失提交
//!
//! ### ④ 编排层（App）
//! - `App` - 创建数据库与客户端，先同步后归档
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{LeetCodeApi, LeetCodeClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::{ArchiveWriter, Store};
pub use workflow::{SyncEngine, SyncStats};
