//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<URL>，持有浏览器会话)
//!     ↓
//! workflow::PageFlow (处理单个 URL)
//!     ↓
//! services (能力层：selector resolver / record extractor)
//!     ↓
//! infrastructure (基础设施：Renderer / Scope)
//! ```
//!
//! 只有编排层持有并关闭会话，下层只借用 `&Renderer`。

pub mod batch_processor;

pub use batch_processor::{validate_urls, BatchOrchestrator, BatchReport, PageOutcome};
