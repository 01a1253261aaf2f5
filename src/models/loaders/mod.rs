pub mod toml_loader;

pub use toml_loader::{load_batch_file, parse_batch_toml, BatchFile};

use crate::error::{AppError, AppResult, FileError};
use std::path::Path;
use tokio::fs;

/// 加载待抓取的 URL 列表
///
/// `.toml` 文件按 `urls = [...]` 解析；其他文件当作纯文本，每行一个 URL
pub async fn load_url_list(path: &Path) -> AppResult<Vec<String>> {
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        return load_batch_file(path).await;
    }

    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(FileError::NotFound { path: path_str }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;
    let urls = parse_url_lines(&content);
    tracing::info!("从 {} 读取到 {} 个 URL", path_str, urls.len());
    Ok(urls)
}

/// 把多行文本拆成 URL 列表：按行切分、去掉首尾空白、丢弃空行
pub fn parse_url_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_lines() {
        let text = "  https://example.com/a  \n\n\r\nhttps://example.com/b\r\n   \n";
        assert_eq!(
            parse_url_lines(text),
            vec!["https://example.com/a", "https://example.com/b"]
        );
        assert!(parse_url_lines("\n \n").is_empty());
    }

    #[tokio::test]
    async fn test_load_url_list_by_extension() {
        let dir = std::env::temp_dir().join(format!("review_scraper_urls_{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let txt = dir.join("urls.txt");
        tokio::fs::write(&txt, "https://example.com/a\n\n  https://example.com/b  \n")
            .await
            .unwrap();
        let toml = dir.join("urls.toml");
        tokio::fs::write(&toml, "urls = [\"https://example.com/c\"]")
            .await
            .unwrap();

        assert_eq!(
            load_url_list(&txt).await.unwrap(),
            vec!["https://example.com/a", "https://example.com/b"]
        );
        assert_eq!(load_url_list(&toml).await.unwrap(), vec!["https://example.com/c"]);
        assert!(matches!(
            load_url_list(&dir.join("missing.txt")).await,
            Err(AppError::File(FileError::NotFound { .. }))
        ));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
