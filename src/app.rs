use crate::browser::ChromeLauncher;
use crate::config::Config;
use crate::models::load_url_list;
use crate::orchestrator::{BatchOrchestrator, BatchReport};
use crate::services::ExportWriter;
use crate::utils::logging::{append_log_lines, init_log_file, log_startup, print_final_stats};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info};

/// 应用主结构
pub struct App {
    config: Config,
    orchestrator: BatchOrchestrator<ChromeLauncher>,
    exporter: ExportWriter,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法初始化日志文件: {}", config.output_log_file))?;

        log_startup(&config.batch_file, config.headless);

        let orchestrator = BatchOrchestrator::new(ChromeLauncher::new(&config));
        let exporter = ExportWriter::new(&config.output_dir);

        Ok(Self {
            config,
            orchestrator,
            exporter,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchReport> {
        let urls = load_url_list(Path::new(&self.config.batch_file))
            .await
            .with_context(|| format!("无法加载 URL 列表: {}", self.config.batch_file))?;

        let report = match self.orchestrator.scrape_batch_with_report(&urls).await {
            Ok(report) => report,
            Err(e) => {
                // 真实原因只写日志，对外只给可公开的信息
                error!("❌ 批量抓取失败: {}", e);
                anyhow::bail!(e.user_message());
            }
        };

        self.exporter
            .write_all(&report.records)
            .await
            .context("导出评论失败")?;

        if self.config.verbose_logging {
            for record in &report.records {
                info!("  {}", record.render_card());
            }
        }

        let lines: Vec<String> = report.pages.iter().map(|page| page.log_line()).collect();
        append_log_lines(&self.config.output_log_file, &lines)
            .context("写入日志文件失败")?;

        print_final_stats(report.succeeded(), report.failed(), report.records.len());
        info!("\n日志已保存至: {}", self.config.output_log_file);

        Ok(report)
    }
}
