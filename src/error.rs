use std::time::Duration;

use thiserror::Error;

/// 对外展示的通用失败信息（真实原因只写入日志）
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred during the scraping process. Please try again.";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 批量请求不合法（没有任何 URL）
    #[error("输入错误: {0}")]
    InvalidInput(#[from] InvalidInputError),
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// JSON 序列化失败
    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
    /// CSV 写入失败
    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// 是否属于调用方的输入问题（对应客户端错误）
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::InvalidInput(_))
    }

    /// 可以返回给调用方的信息
    ///
    /// 输入错误原样返回，其余错误只返回通用信息
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(e) => e.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// 批量请求校验失败
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    /// 没有提供任何 URL
    #[error("No URLs provided")]
    NoUrls,
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 浏览器配置失败
    #[error("浏览器配置失败: {0}")]
    ConfigurationFailed(String),
    /// 启动浏览器失败
    #[error("启动无头浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 关闭浏览器失败
    #[error("关闭浏览器失败: {source}")]
    CloseFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
}

/// DOM 查询错误（与"未找到"不同，"未找到"不是错误）
#[derive(Debug, Error)]
pub enum DomError {
    /// 选择器无法解析
    #[error("无效的选择器 `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
    /// 查询执行失败（节点失效、连接断开等）
    #[error("查询 `{selector}` 失败: {message}")]
    QueryFailed { selector: String, message: String },
}

/// 页面渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 网络请求失败或超过导航等待时间
    #[error("导航到 {url} 失败: {message}")]
    Navigation { url: String, message: String },
    /// 就绪标记没有在限定时间内出现
    #[error("页面 {url} 在 {timeout:?} 内未出现就绪标记 `{marker}`")]
    ReadinessTimeout {
        url: String,
        marker: String,
        timeout: Duration,
    },
}

/// 单个页面失败的原因
#[derive(Debug, Error)]
pub enum PageFailure {
    /// 不是合法的 http(s) 绝对地址，不会发起导航
    #[error("不是合法的 http(s) 地址")]
    MalformedUrl,
    #[error(transparent)]
    Render(#[from] RenderError),
    /// 就绪之后仍然无法读取商品标题
    #[error("无法读取商品标题 `{selector}`")]
    MissingProductTitle { selector: String },
    #[error("商品标题查询失败: {0}")]
    ProductTitleQuery(#[source] DomError),
}

/// 单个页面抓取失败，携带出错的 URL
#[derive(Debug, Error)]
#[error("抓取 {url} 失败: {cause}")]
pub struct PageScrapeError {
    pub url: String,
    #[source]
    pub cause: PageFailure,
}

impl PageScrapeError {
    pub fn new(url: impl Into<String>, cause: impl Into<PageFailure>) -> Self {
        Self {
            url: url.into(),
            cause: cause.into(),
        }
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
