//! 页面处理上下文
//!
//! 封装"我正在处理批次中的第几个 URL"这一信息

use std::fmt::Display;

/// 页面处理上下文
#[derive(Debug, Clone)]
pub struct PageCtx {
    /// 页面地址
    pub url: String,

    /// 页面在批次中的索引（从1开始，仅用于日志显示）
    pub page_index: usize,

    /// 批次中的页面总数
    pub total_pages: usize,
}

impl PageCtx {
    pub fn new(url: impl Into<String>, page_index: usize, total_pages: usize) -> Self {
        Self {
            url: url.into(),
            page_index,
            total_pages,
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[页面 {}/{}]", self.page_index, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefix() {
        let ctx = PageCtx::new("https://example.com/p", 2, 5);
        assert_eq!(ctx.to_string(), "[页面 2/5]");
    }
}
