//! # Review Scraper
//!
//! 用无头浏览器批量抓取商品页面上的评论
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 渲染与 DOM 查询能力（`Renderer` / `Scope`）
//! - `browser/` - 基于 chromiumoxide 的实现，唯一接触浏览器进程的模块
//!
//! ### ② 业务能力层（Services）
//! - `SelectorResolver` - 按优先级执行选择器链
//! - `RecordExtractor` - 从一个评论容器提取一条记录
//! - `ExportWriter` - 写出 JSON / CSV / 纯文本
//!
//! ### ③ 流程层（Workflow）
//! - `PageFlow` - 一个 URL 的完整处理流程（渲染 → 标题 → 容器 → 评论）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 校验输入、持有会话、顺序处理所有 URL

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use browser::ChromeLauncher;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::ReviewRecord;
pub use orchestrator::{BatchOrchestrator, BatchReport};
pub use workflow::{PageCtx, PageFlow};
