use crate::error::{AppError, AppResult, FileError};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 批量任务文件
///
/// ```toml
/// urls = [
///     "https://www.amazon.com/dp/B000000001",
///     "https://www.amazon.com/dp/B000000002",
/// ]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub urls: Vec<String>,
}

/// 从 TOML 文件加载待抓取的 URL 列表
///
/// 只做文件读取和解析，URL 的合法性由抓取流程校验
pub async fn load_batch_file(path: &Path) -> AppResult<Vec<String>> {
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(FileError::NotFound { path: path_str }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let batch = parse_batch_toml(&content).map_err(|source| FileError::TomlParseFailed {
        path: path_str.clone(),
        source,
    })?;

    tracing::info!("从 {} 读取到 {} 个 URL", path_str, batch.urls.len());
    Ok(batch.urls)
}

pub fn parse_batch_toml(content: &str) -> Result<BatchFile, toml::de::Error> {
    toml::from_str(content)
}
