//! DOM 能力抽象 - 基础设施层
//!
//! 上层（resolver / extractor / page flow）只认识这些 trait，
//! 不直接接触 chromiumoxide 的 Page / Element。

use crate::error::{AppResult, DomError, RenderError};
use async_trait::async_trait;

/// 可以在其中执行选择器查询的范围（整个文档或某个元素）
#[async_trait]
pub trait Scope: Send + Sync {
    /// 元素类型
    type Element: Scope;

    /// 查询范围内匹配选择器的所有元素，按文档顺序返回
    ///
    /// 没有匹配时返回空列表，只有查询本身失败才返回错误
    async fn select_all(&self, selector: &str) -> Result<Vec<Self::Element>, DomError>;

    /// 第一个匹配元素的文本
    ///
    /// - `Ok(None)`：没有匹配元素，或元素没有可读文本
    /// - `Ok(Some(text))`：原始文本（未 trim）
    async fn first_text(&self, selector: &str) -> Result<Option<String>, DomError>;
}

/// 渲染能力：把 URL 变成可查询的文档
#[async_trait]
pub trait Renderer: Send + Sync {
    type Document: Scope;

    /// 导航并等待就绪标记出现
    async fn render(&self, url: &str) -> Result<Self::Document, RenderError>;
}

/// 一次批量任务持有的浏览器会话
///
/// 只有批量处理器持有会话本身，下层只拿到 `&Renderer`，无法关闭会话
#[async_trait]
pub trait Session: Renderer + Sized {
    /// 释放浏览器资源
    async fn close(self) -> AppResult<()>;
}

/// 会话工厂
#[async_trait]
pub trait Launcher: Send + Sync {
    type Session: Session;

    async fn launch(&self) -> AppResult<Self::Session>;
}
