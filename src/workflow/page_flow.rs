//! 单页面抓取流程 - 流程层
//!
//! 核心职责：定义"一个 URL"的完整处理流程
//!
//! 流程顺序：
//! 0. 检查地址是否为 http(s) 绝对地址，否则不导航直接失败
//! 1. 渲染页面（导航 + 等待就绪标记）
//! 2. 读取商品标题（失败则整页失败）
//! 3. 按容器选择器链定位所有评论容器
//! 4. 逐个容器提取评论，单个容器失败只跳过该容器

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{PageFailure, PageScrapeError};
use crate::infrastructure::{Renderer, Scope};
use crate::models::{FieldSelectors, ReviewRecord};
use crate::services::{FieldOutcome, RecordExtractor, SelectorResolver};
use crate::utils::logging::truncate_text;
use crate::workflow::page_ctx::PageCtx;

/// 单页面抓取流程
///
/// - 只借用渲染器，不持有也不关闭浏览器会话
/// - 只依赖业务能力（services）
pub struct PageFlow {
    resolver: SelectorResolver,
    extractor: RecordExtractor,
    selectors: FieldSelectors,
}

impl PageFlow {
    pub fn new(selectors: FieldSelectors) -> Self {
        Self {
            resolver: SelectorResolver::new(),
            extractor: RecordExtractor::new(selectors.clone()),
            selectors,
        }
    }

    /// 抓取一个页面上的所有评论
    ///
    /// 渲染失败或读不到商品标题时返回 `PageScrapeError`，页面不贡献任何记录
    pub async fn run<R: Renderer>(
        &self,
        renderer: &R,
        ctx: &PageCtx,
    ) -> Result<Vec<ReviewRecord>, PageScrapeError> {
        if !is_web_url(&ctx.url) {
            return Err(PageScrapeError::new(&ctx.url, PageFailure::MalformedUrl));
        }

        let document = renderer
            .render(&ctx.url)
            .await
            .map_err(|e| PageScrapeError::new(&ctx.url, e))?;
        info!("{} 页面已加载", ctx);

        let product_title = self.product_title(&document, ctx).await?;
        info!("{} 商品标题: {}", ctx, truncate_text(&product_title, 60));

        let containers = match self
            .resolver
            .locate_all(&document, &self.selectors.container)
            .await
        {
            Ok(containers) => containers,
            Err(e) => {
                warn!("{} ⚠️ 评论容器查询失败，本页无评论: {}", ctx, e);
                Vec::new()
            }
        };
        info!("{} 找到 {} 个评论容器", ctx, containers.len());

        let mut records = Vec::with_capacity(containers.len());
        for (index, container) in containers.iter().enumerate() {
            let fields = self.extractor.extract_fields(container).await;
            if fields.is_structural_failure() {
                warn!("{} ⚠️ 第 {} 个评论容器不可用，已跳过", ctx, index + 1);
                continue;
            }

            let record = self.extractor.assemble(fields, &product_title);
            debug!("{} 已提取评论: {}", ctx, record.reviewer);
            records.push(record);
        }

        Ok(records)
    }

    async fn product_title<S: Scope>(
        &self,
        document: &S,
        ctx: &PageCtx,
    ) -> Result<String, PageScrapeError> {
        let chain = &self.selectors.product_title;
        match self.resolver.resolve_outcome(document, chain).await {
            FieldOutcome::Found(title) => Ok(title),
            FieldOutcome::Missing => Err(PageScrapeError::new(
                &ctx.url,
                PageFailure::MissingProductTitle {
                    selector: chain.primary().to_string(),
                },
            )),
            FieldOutcome::Failed(e) => Err(PageScrapeError::new(
                &ctx.url,
                PageFailure::ProductTitleQuery(e),
            )),
        }
    }
}

fn is_web_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

impl Default for PageFlow {
    fn default() -> Self {
        Self::new(FieldSelectors::default())
    }
}
