//! 导出服务 - 业务能力层
//!
//! 只负责把评论列表写成 JSON / CSV / 纯文本，格式与现有导出文件逐字节兼容

use crate::error::{AppError, AppResult};
use crate::models::ReviewRecord;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// CSV 表头
pub const CSV_HEADERS: [&str; 6] = ["Product", "Reviewer", "Rating", "Date", "Title", "Review"];

/// 纯文本导出中记录块之间的分隔行
pub const TEXT_BLOCK_DELIMITER: &str = "---\n";

/// 导出文件的基础名
const EXPORT_STEM: &str = "amazon_reviews";

/// JSON 数组，字段名与接口响应一致
pub fn to_json(records: &[ReviewRecord]) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// CSV：表头不加引号；数据行每个字段都加双引号，字段内的双引号写成两个，行之间用 `\n` 分隔
pub fn to_csv(records: &[ReviewRecord]) -> AppResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        writer.write_record([
            &record.product_title,
            &record.reviewer,
            &record.rating,
            &record.review_date,
            &record.review_title,
            &record.review_body,
        ])?;
    }

    let rows = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let rows = String::from_utf8_lossy(&rows);

    let mut csv = CSV_HEADERS.join(",");
    if let Some(rows) = rows.strip_suffix('\n') {
        csv.push('\n');
        csv.push_str(rows);
    }
    Ok(csv)
}

/// 纯文本：每条记录一个块，块之间用 `---` 行分隔
pub fn to_text(records: &[ReviewRecord]) -> String {
    records
        .iter()
        .map(|record| {
            format!(
                "Product: {}\nReviewer: {}\nRating: {}\nDate: {}\nTitle: {}\nReview: {}\n\n",
                record.product_title,
                record.reviewer,
                record.rating,
                record.review_date,
                record.review_title,
                record.review_body
            )
        })
        .collect::<Vec<_>>()
        .join(TEXT_BLOCK_DELIMITER)
}

/// 已写出的导出文件
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub text: PathBuf,
}

/// 导出写入服务
pub struct ExportWriter {
    output_dir: PathBuf,
}

impl ExportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 写出三种格式的导出文件
    pub async fn write_all(&self, records: &[ReviewRecord]) -> AppResult<ExportPaths> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))?;

        let paths = ExportPaths {
            json: self.output_dir.join(format!("{}.json", EXPORT_STEM)),
            csv: self.output_dir.join(format!("{}.csv", EXPORT_STEM)),
            text: self.output_dir.join(format!("{}.txt", EXPORT_STEM)),
        };

        write_file(&paths.json, to_json(records)?).await?;
        write_file(&paths.csv, to_csv(records)?).await?;
        write_file(&paths.text, to_text(records)).await?;

        info!(
            "📁 已导出 {} 条评论到 {}",
            records.len(),
            self.output_dir.display()
        );
        Ok(paths)
    }
}

async fn write_file(path: &Path, content: String) -> AppResult<()> {
    debug!("写入导出文件: {} ({} 字节)", path.display(), content.len());
    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(reviewer: &str, body: &str) -> ReviewRecord {
        ReviewRecord {
            product_title: "Steel Kettle".to_string(),
            reviewer: reviewer.to_string(),
            review_title: "Boils fast".to_string(),
            rating: "4.0".to_string(),
            review_date: "March 3, 2024".to_string(),
            review_body: body.to_string(),
        }
    }

    #[test]
    fn test_csv_doubles_embedded_quotes_on_one_row() {
        let csv = to_csv(&[sample("Ann", r#"He said "great""#)]).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Product,Reviewer,Rating,Date,Title,Review");
        assert_eq!(
            lines[1],
            r#""Steel Kettle","Ann","4.0","March 3, 2024","Boils fast","He said ""great""""#
        );
    }

    #[test]
    fn test_csv_without_records_is_header_only() {
        assert_eq!(to_csv(&[]).unwrap(), "Product,Reviewer,Rating,Date,Title,Review");
    }

    #[test]
    fn test_csv_rows_joined_without_trailing_newline() {
        let csv = to_csv(&[sample("Ann", "line one\nline two"), sample("Bob", "")]).unwrap();

        assert_eq!(
            csv,
            "Product,Reviewer,Rating,Date,Title,Review\n\
\"Steel Kettle\",\"Ann\",\"4.0\",\"March 3, 2024\",\"Boils fast\",\"line one\nline two\"\n\
\"Steel Kettle\",\"Bob\",\"4.0\",\"March 3, 2024\",\"Boils fast\",\"\""
        );
    }

    #[test]
    fn test_text_blocks_and_delimiter() {
        let text = to_text(&[sample("Ann", "Quiet."), sample("Bob", "Loud.")]);
        let expected = "Product: Steel Kettle\nReviewer: Ann\nRating: 4.0\nDate: March 3, 2024\nTitle: Boils fast\nReview: Quiet.\n\n\
---\n\
Product: Steel Kettle\nReviewer: Bob\nRating: 4.0\nDate: March 3, 2024\nTitle: Boils fast\nReview: Loud.\n\n";
        assert_eq!(text, expected);
        assert_eq!(to_text(&[]), "");
    }

    #[test]
    fn test_json_array_keeps_order() {
        let json = to_json(&[sample("Ann", "a"), sample("Bob", "b")]).unwrap();
        let parsed: Vec<ReviewRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].reviewer, "Ann");
        assert_eq!(parsed[1].reviewer, "Bob");
    }

    #[tokio::test]
    async fn test_write_all_creates_files() {
        let dir = std::env::temp_dir().join(format!("review_scraper_export_{}", std::process::id()));
        let writer = ExportWriter::new(&dir);

        let paths = writer.write_all(&[sample("Ann", "Quiet.")]).await.unwrap();

        let csv = tokio::fs::read_to_string(&paths.csv).await.unwrap();
        assert!(csv.starts_with("Product,Reviewer"));
        assert!(paths.json.exists());
        assert!(paths.text.exists());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
