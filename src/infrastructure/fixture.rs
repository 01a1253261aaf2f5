//! 内存中的会话实现
//!
//! 按 URL 返回预先准备好的 HTML 或失败结果，不启动浏览器。
//! 用于离线测试整条抓取流程，同时记录会话的启动、关闭和访问顺序。

use crate::error::{AppResult, RenderError};
use crate::infrastructure::dom::{Launcher, Renderer, Session};
use crate::infrastructure::html::HtmlDocument;
use crate::models::FieldSelectors;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// 某个 URL 的预设结果
#[derive(Debug, Clone)]
pub enum FixturePage {
    /// 正常返回的 HTML
    Html(String),
    /// 网络层失败
    Unreachable(String),
}

/// 会话使用情况
#[derive(Debug, Default)]
pub struct FixtureStats {
    launched: AtomicUsize,
    closed: AtomicUsize,
    visited: Mutex<Vec<String>>,
}

impl FixtureStats {
    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub async fn visited(&self) -> Vec<String> {
        self.visited.lock().await.clone()
    }
}

/// 内存会话工厂
#[derive(Debug, Clone)]
pub struct FixtureLauncher {
    pages: Arc<HashMap<String, FixturePage>>,
    marker: String,
    readiness_timeout: Duration,
    stats: Arc<FixtureStats>,
}

impl FixtureLauncher {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(HashMap::new()),
            marker: FieldSelectors::default().readiness_marker().to_string(),
            readiness_timeout: Duration::from_secs(10),
            stats: Arc::new(FixtureStats::default()),
        }
    }

    /// 注册一个页面
    pub fn with_page(mut self, url: impl Into<String>, page: FixturePage) -> Self {
        Arc::make_mut(&mut self.pages).insert(url.into(), page);
        self
    }

    pub fn with_html(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.with_page(url, FixturePage::Html(html.into()))
    }

    pub fn stats(&self) -> Arc<FixtureStats> {
        Arc::clone(&self.stats)
    }
}

impl Default for FixtureLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Launcher for FixtureLauncher {
    type Session = FixtureSession;

    async fn launch(&self) -> AppResult<FixtureSession> {
        self.stats.launched.fetch_add(1, Ordering::SeqCst);
        Ok(FixtureSession {
            launcher: self.clone(),
        })
    }
}

/// 内存会话
#[derive(Debug)]
pub struct FixtureSession {
    launcher: FixtureLauncher,
}

#[async_trait]
impl Renderer for FixtureSession {
    type Document = HtmlDocument;

    async fn render(&self, url: &str) -> Result<HtmlDocument, RenderError> {
        self.launcher.stats.visited.lock().await.push(url.to_string());

        let page = self.launcher.pages.get(url).ok_or_else(|| RenderError::Navigation {
            url: url.to_string(),
            message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
        })?;

        match page {
            FixturePage::Unreachable(message) => Err(RenderError::Navigation {
                url: url.to_string(),
                message: message.clone(),
            }),
            FixturePage::Html(html) => {
                let document = HtmlDocument::new(html);
                if has_marker(&document, &self.launcher.marker) {
                    Ok(document)
                } else {
                    Err(RenderError::ReadinessTimeout {
                        url: url.to_string(),
                        marker: self.launcher.marker.clone(),
                        timeout: self.launcher.readiness_timeout,
                    })
                }
            }
        }
    }
}

fn has_marker(document: &HtmlDocument, marker: &str) -> bool {
    match scraper::Selector::parse(marker) {
        Ok(selector) => scraper::Html::parse_document(document.source())
            .select(&selector)
            .next()
            .is_some(),
        Err(_) => false,
    }
}

#[async_trait]
impl Session for FixtureSession {
    async fn close(self) -> AppResult<()> {
        self.launcher.stats.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[tokio::test]
    async fn test_render_outcomes() {
        let launcher = FixtureLauncher::new()
            .with_html("https://example.com/ok", r#"<span id="productTitle">Kettle</span>"#)
            .with_html("https://example.com/blank", "<p>captcha</p>")
            .with_page(
                "https://example.com/down",
                FixturePage::Unreachable("net::ERR_TIMED_OUT".to_string()),
            );
        let session = launcher.launch().await.unwrap();

        assert!(session.render("https://example.com/ok").await.is_ok());
        assert!(matches!(
            session.render("https://example.com/blank").await,
            Err(RenderError::ReadinessTimeout { .. })
        ));
        assert!(matches!(
            session.render("https://example.com/down").await,
            Err(RenderError::Navigation { .. })
        ));
        assert!(matches!(
            session.render("https://example.com/unknown").await,
            Err(RenderError::Navigation { .. })
        ));

        session.close().await.unwrap();
        let stats = launcher.stats();
        assert_eq!(stats.launched(), 1);
        assert_eq!(stats.closed(), 1);
        assert_eq!(stats.visited().await.len(), 4);
    }
}
