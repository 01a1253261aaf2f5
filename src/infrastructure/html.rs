//! 静态 HTML 文档
//!
//! 用 `scraper` 解析一段已经拿到的 HTML，实现与浏览器文档相同的 `Scope` 能力。
//! `scraper::Html` 不是 `Send`，所以这里只保存原始文本，每次查询时重新解析，
//! 元素用"从根开始的选择路径"来定位。

use crate::error::DomError;
use crate::infrastructure::dom::Scope;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;

/// 静态 HTML 文档
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    source: Arc<str>,
}

impl HtmlDocument {
    pub fn new(html: impl AsRef<str>) -> Self {
        Self {
            source: Arc::from(html.as_ref()),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// 静态文档中的一个元素
#[derive(Debug, Clone)]
pub struct HtmlElement {
    source: Arc<str>,
    /// 每一步：(选择器, 在上一步元素内的匹配序号)
    path: Vec<(String, usize)>,
}

fn parse_selector(selector: &str) -> Result<Selector, DomError> {
    Selector::parse(selector).map_err(|e| DomError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// `scope` 内匹配的后代元素，不包括 `scope` 自身
fn descendants<'a>(scope: ElementRef<'a>, selector: &Selector) -> Vec<ElementRef<'a>> {
    scope
        .select(selector)
        .filter(|element| element.id() != scope.id())
        .collect()
}

/// 沿路径找到元素；节点已不存在时返回 `QueryFailed`
fn locate<'a>(html: &'a Html, path: &[(String, usize)]) -> Result<ElementRef<'a>, DomError> {
    let mut current = html.root_element();
    for (selector, index) in path {
        let parsed = parse_selector(selector)?;
        current = descendants(current, &parsed)
            .into_iter()
            .nth(*index)
            .ok_or_else(|| DomError::QueryFailed {
                selector: selector.clone(),
                message: format!("第 {} 个匹配元素已不存在", index),
            })?;
    }
    Ok(current)
}

fn count_matches(source: &str, path: &[(String, usize)], selector: &str) -> Result<usize, DomError> {
    let html = Html::parse_document(source);
    let scope = locate(&html, path)?;
    let parsed = parse_selector(selector)?;
    Ok(descendants(scope, &parsed).len())
}

fn first_text_at(
    source: &str,
    path: &[(String, usize)],
    selector: &str,
) -> Result<Option<String>, DomError> {
    let html = Html::parse_document(source);
    let scope = locate(&html, path)?;
    let parsed = parse_selector(selector)?;
    Ok(descendants(scope, &parsed)
        .into_iter()
        .next()
        .map(|element| element.text().collect::<String>()))
}

fn children_of(source: &Arc<str>, path: &[(String, usize)], selector: &str) -> Result<Vec<HtmlElement>, DomError> {
    let count = count_matches(source, path, selector)?;
    Ok((0..count)
        .map(|index| {
            let mut child_path = path.to_vec();
            child_path.push((selector.to_string(), index));
            HtmlElement {
                source: Arc::clone(source),
                path: child_path,
            }
        })
        .collect())
}

#[async_trait]
impl Scope for HtmlDocument {
    type Element = HtmlElement;

    async fn select_all(&self, selector: &str) -> Result<Vec<HtmlElement>, DomError> {
        children_of(&self.source, &[], selector)
    }

    async fn first_text(&self, selector: &str) -> Result<Option<String>, DomError> {
        first_text_at(&self.source, &[], selector)
    }
}

#[async_trait]
impl Scope for HtmlElement {
    type Element = HtmlElement;

    async fn select_all(&self, selector: &str) -> Result<Vec<HtmlElement>, DomError> {
        children_of(&self.source, &self.path, selector)
    }

    async fn first_text(&self, selector: &str) -> Result<Option<String>, DomError> {
        first_text_at(&self.source, &self.path, selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <span id="productTitle">  Steel Kettle  </span>
          <div class="review" id="r1"><span class="name">Ann</span><div class="review">nested</div></div>
          <div class="review" id="r2"><span class="name">Bob</span></div>
        </body></html>
    "#;

    #[tokio::test]
    async fn test_document_queries() {
        let doc = HtmlDocument::new(PAGE);

        assert_eq!(
            doc.first_text("#productTitle").await.unwrap().as_deref(),
            Some("  Steel Kettle  ")
        );
        assert_eq!(doc.first_text("#missing").await.unwrap(), None);
        assert_eq!(doc.select_all("div.review").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_element_scope_excludes_self() {
        let doc = HtmlDocument::new(PAGE);
        let reviews = doc.select_all("#r1, #r2").await.unwrap();
        assert_eq!(reviews.len(), 2);

        assert_eq!(reviews[0].first_text(".name").await.unwrap().as_deref(), Some("Ann"));
        assert_eq!(reviews[1].first_text(".name").await.unwrap().as_deref(), Some("Bob"));
        assert_eq!(reviews[0].select_all(".review").await.unwrap().len(), 1);
        assert_eq!(reviews[1].select_all(".review").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_text_includes_hidden_descendants() {
        let doc = HtmlDocument::new(
            r#"<span id="body">Works<span style="display:none"> well</span></span>"#,
        );
        assert_eq!(
            doc.first_text("#body").await.unwrap().as_deref(),
            Some("Works well")
        );
    }

    #[tokio::test]
    async fn test_invalid_selector_is_error() {
        let doc = HtmlDocument::new(PAGE);
        let err = doc.first_text("div[").await.unwrap_err();
        assert!(matches!(err, DomError::InvalidSelector { .. }));
    }
}
