use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::browser::document::ChromeDocument;
use crate::config::Config;
use crate::error::{AppResult, BrowserError, RenderError};
use crate::infrastructure::{Launcher, Renderer, Session};
use crate::models::FieldSelectors;

/// 就绪标记的轮询间隔
const READINESS_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 无头浏览器启动参数
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    navigation_timeout: Duration,
    readiness_timeout: Duration,
    user_agent: String,
    chrome_executable: Option<String>,
    headless: bool,
    readiness_marker: String,
}

impl ChromeLauncher {
    pub fn new(config: &Config) -> Self {
        Self {
            navigation_timeout: config.navigation_timeout(),
            readiness_timeout: config.readiness_timeout(),
            user_agent: config.user_agent.clone(),
            chrome_executable: config.chrome_executable.clone(),
            headless: config.headless,
            readiness_marker: FieldSelectors::default().readiness_marker().to_string(),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, BrowserError> {
        let mut builder = BrowserConfig::builder();
        builder = if self.headless {
            builder.new_headless_mode()
        } else {
            builder.with_head()
        };
        if let Some(executable) = &self.chrome_executable {
            builder = builder.chrome_executable(Path::new(executable));
        }

        builder
            .request_timeout(self.navigation_timeout)
            .args(vec![
                "--disable-gpu".to_string(),
                "--no-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string(),
                format!("--user-agent={}", self.user_agent),
            ])
            .build()
            .map_err(|e| {
                error!("配置无头浏览器失败: {}", e);
                BrowserError::ConfigurationFailed(e)
            })
    }
}

#[async_trait]
impl Launcher for ChromeLauncher {
    type Session = ChromeSession;

    /// 启动无头浏览器并创建唯一的工作页面
    async fn launch(&self) -> AppResult<ChromeSession> {
        info!("🚀 启动无头浏览器...");
        let config = self.browser_config()?;

        let (mut browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            error!("启动无头浏览器失败: {}", e);
            BrowserError::LaunchFailed { source: e }
        })?;
        debug!("无头浏览器启动成功");

        // 在后台处理浏览器事件
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("浏览器事件处理出错: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                error!("创建页面失败: {}", e);
                // 页面都建不出来时浏览器进程也要回收
                let _ = browser.close().await;
                handler_task.abort();
                return Err(BrowserError::PageCreationFailed { source: e }.into());
            }
        };
        info!("✅ 无头浏览器已就绪");

        Ok(ChromeSession {
            browser,
            page,
            handler_task,
            navigation_timeout: self.navigation_timeout,
            readiness_timeout: self.readiness_timeout,
            readiness_marker: self.readiness_marker.clone(),
        })
    }
}

/// 一次批量任务使用的浏览器会话
///
/// 持有浏览器进程和唯一的页面，所有 URL 复用同一个页面。
/// 正常路径通过 `Session::close` 关闭；提前 drop 时至少会停止事件任务，
/// 浏览器进程由 chromiumoxide 的 `Browser` 在 drop 时回收。
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    navigation_timeout: Duration,
    readiness_timeout: Duration,
    readiness_marker: String,
}

impl ChromeSession {
    async fn navigate(&self, url: &str) -> Result<(), RenderError> {
        match timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(RenderError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(RenderError::Navigation {
                url: url.to_string(),
                message: format!("超过 {:?} 未完成加载", self.navigation_timeout),
            }),
        }
    }

    async fn wait_until_ready(&self, url: &str) -> Result<(), RenderError> {
        let poll = async {
            while !self.has_marker().await {
                sleep(READINESS_POLL_INTERVAL).await;
            }
        };

        timeout(self.readiness_timeout, poll)
            .await
            .map_err(|_| RenderError::ReadinessTimeout {
                url: url.to_string(),
                marker: self.readiness_marker.clone(),
                timeout: self.readiness_timeout,
            })
    }

    async fn has_marker(&self) -> bool {
        match self.page.find_elements(self.readiness_marker.as_str()).await {
            Ok(found) => !found.is_empty(),
            Err(e) => {
                debug!("查询就绪标记出错: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl Renderer for ChromeSession {
    type Document = ChromeDocument;

    async fn render(&self, url: &str) -> Result<ChromeDocument, RenderError> {
        debug!("导航到: {}", url);
        self.navigate(url).await?;
        debug!("页面已加载: {}", url);

        self.wait_until_ready(url).await?;
        debug!("就绪标记已出现: {}", self.readiness_marker);

        Ok(ChromeDocument::new(self.page.clone()))
    }
}

#[async_trait]
impl Session for ChromeSession {
    async fn close(mut self) -> AppResult<()> {
        info!("关闭无头浏览器");
        let result = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!("等待浏览器进程退出失败: {}", e);
        }
        self.handler_task.abort();

        result
            .map(|_| ())
            .map_err(|e| BrowserError::CloseFailed { source: e }.into())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
