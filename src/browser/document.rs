//! 浏览器中的文档与元素
//!
//! 把 chromiumoxide 的 `Page` / `Element` 包装成 `Scope`，查询失败转换为 `DomError`。
//! 文本读取 `textContent`，和 `HtmlDocument` 的结果一致。

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use serde_json::Value;

use crate::error::DomError;
use crate::infrastructure::Scope;

/// 已渲染完成的页面
#[derive(Clone)]
pub struct ChromeDocument {
    page: Page,
}

impl ChromeDocument {
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

/// 页面中的一个元素
pub struct ChromeElement {
    element: Element,
}

fn query_failed(selector: &str, e: CdpError) -> DomError {
    DomError::QueryFailed {
        selector: selector.to_string(),
        message: e.to_string(),
    }
}

fn wrap(elements: Vec<Element>) -> Vec<ChromeElement> {
    elements
        .into_iter()
        .map(|element| ChromeElement { element })
        .collect()
}

/// 读取的文本属性，与静态 HTML 的 `text()` 一致（包含隐藏节点的文本）
const TEXT_PROPERTY: &str = "textContent";

async fn text_of_first(elements: Vec<Element>, selector: &str) -> Result<Option<String>, DomError> {
    match elements.into_iter().next() {
        Some(element) => element
            .property(TEXT_PROPERTY)
            .await
            .map(property_text)
            .map_err(|e| query_failed(selector, e)),
        None => Ok(None),
    }
}

/// `textContent` 只会是字符串或 null
fn property_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

#[async_trait]
impl Scope for ChromeDocument {
    type Element = ChromeElement;

    async fn select_all(&self, selector: &str) -> Result<Vec<ChromeElement>, DomError> {
        self.page
            .find_elements(selector)
            .await
            .map(wrap)
            .map_err(|e| query_failed(selector, e))
    }

    async fn first_text(&self, selector: &str) -> Result<Option<String>, DomError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| query_failed(selector, e))?;
        text_of_first(elements, selector).await
    }
}

#[async_trait]
impl Scope for ChromeElement {
    type Element = ChromeElement;

    async fn select_all(&self, selector: &str) -> Result<Vec<ChromeElement>, DomError> {
        self.element
            .find_elements(selector)
            .await
            .map(wrap)
            .map_err(|e| query_failed(selector, e))
    }

    async fn first_text(&self, selector: &str) -> Result<Option<String>, DomError> {
        let elements = self
            .element
            .find_elements(selector)
            .await
            .map_err(|e| query_failed(selector, e))?;
        text_of_first(elements, selector).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_text_content_property() {
        assert_eq!(TEXT_PROPERTY, "textContent");
        assert_eq!(
            property_text(Some(json!("  Steel Kettle\n"))).as_deref(),
            Some("  Steel Kettle\n")
        );
        assert_eq!(property_text(Some(Value::Null)), None);
        assert_eq!(property_text(None), None);
    }
}
