//! 批量页面处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **输入校验**：空列表或全是空白时直接拒绝，此时不会启动浏览器
//! 2. **资源管理**：唯一持有浏览器会话，任何路径结束时都关闭会话
//! 3. **顺序处理**：按输入顺序逐个 URL 委托给 `PageFlow`，不并发
//! 4. **失败隔离**：单个页面失败只记录日志，不影响后续页面
//! 5. **结果汇总**：按 (URL 顺序, 容器顺序) 拼接所有评论

use crate::error::{AppResult, InvalidInputError};
use crate::infrastructure::{Launcher, Renderer, Session};
use crate::models::{FieldSelectors, ReviewRecord};
use crate::utils::logging::{log_batch_start, log_page_done, log_page_failed};
use crate::workflow::{PageCtx, PageFlow};
use tracing::{info, warn};

/// 单个页面的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    pub url: String,
    /// 成功时为提取到的评论数，失败时为原因
    pub result: Result<usize, String>,
}

impl PageOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// 用于写入日志文件的一行
    pub fn log_line(&self) -> String {
        match &self.result {
            Ok(count) => format!("✓ {} | {} 条评论", self.url, count),
            Err(reason) => format!("✗ {} | {}", self.url, reason),
        }
    }
}

/// 批量处理结果
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// 所有评论，按 (URL 顺序, 容器顺序)
    pub records: Vec<ReviewRecord>,
    /// 每个 URL 的处理结果，按输入顺序
    pub pages: Vec<PageOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.pages.iter().filter(|page| page.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.pages.len() - self.succeeded()
    }
}

/// 校验批量请求
///
/// 空白条目会被忽略，没有剩余条目时整批拒绝。
/// 单个地址是否合法由页面流程判断，非法地址只让该页面失败
pub fn validate_urls<S: AsRef<str>>(urls: &[S]) -> Result<Vec<String>, InvalidInputError> {
    let valid: Vec<String> = urls
        .iter()
        .map(|raw| raw.as_ref().trim())
        .filter(|candidate| !candidate.is_empty())
        .map(str::to_string)
        .collect();

    if valid.is_empty() {
        return Err(InvalidInputError::NoUrls);
    }
    Ok(valid)
}

/// 批量处理器
///
/// 泛型参数 `L` 决定会话来源：生产环境是 `ChromeLauncher`，测试中是 `FixtureLauncher`
pub struct BatchOrchestrator<L: Launcher> {
    launcher: L,
    flow: PageFlow,
}

impl<L: Launcher> BatchOrchestrator<L> {
    pub fn new(launcher: L) -> Self {
        Self::with_selectors(launcher, FieldSelectors::default())
    }

    pub fn with_selectors(launcher: L, selectors: FieldSelectors) -> Self {
        Self {
            launcher,
            flow: PageFlow::new(selectors),
        }
    }

    /// 抓取一批 URL，返回所有评论
    ///
    /// 只有列表为空或浏览器无法启动时返回错误；全部页面失败时返回空列表
    pub async fn scrape_batch<S: AsRef<str>>(&self, urls: &[S]) -> AppResult<Vec<ReviewRecord>> {
        Ok(self.scrape_batch_with_report(urls).await?.records)
    }

    /// 抓取一批 URL，同时返回每个页面的处理结果
    pub async fn scrape_batch_with_report<S: AsRef<str>>(&self, urls: &[S]) -> AppResult<BatchReport> {
        let urls = validate_urls(urls)?;

        let session = self.launcher.launch().await?;
        let report = self.process_all(&session, &urls).await;

        // 结果已经拿到，关闭失败只记录
        if let Err(e) = session.close().await {
            warn!("⚠️ 关闭浏览器会话失败: {}", e);
        }

        info!(
            "批量抓取完成: 成功 {}/{} 个页面，共 {} 条评论",
            report.succeeded(),
            report.pages.len(),
            report.records.len()
        );
        Ok(report)
    }

    /// 顺序处理所有页面，单页失败不会中断
    async fn process_all<R: Renderer>(&self, renderer: &R, urls: &[String]) -> BatchReport {
        log_batch_start(urls.len());
        let mut report = BatchReport::default();

        for (index, url) in urls.iter().enumerate() {
            let ctx = PageCtx::new(url.clone(), index + 1, urls.len());
            info!("{} 🔍 正在处理: {}", ctx, url);

            match self.flow.run(renderer, &ctx).await {
                Ok(records) => {
                    log_page_done(&ctx.to_string(), records.len());
                    report.pages.push(PageOutcome {
                        url: url.clone(),
                        result: Ok(records.len()),
                    });
                    report.records.extend(records);
                }
                Err(e) => {
                    log_page_failed(&ctx.to_string(), &e.to_string());
                    report.pages.push(PageOutcome {
                        url: url.clone(),
                        result: Err(e.cause.to_string()),
                    });
                }
            }
        }

        report
    }
}
