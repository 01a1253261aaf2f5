use std::time::Duration;

/// 浏览器默认的客户端标识
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 页面首次加载的最长等待秒数
    pub navigation_timeout_secs: u64,
    /// 加载完成后等待就绪标记的秒数
    pub readiness_timeout_secs: u64,
    /// 浏览器使用的 User-Agent
    pub user_agent: String,
    /// 浏览器可执行文件，未设置时由 chromiumoxide 自动查找
    pub chrome_executable: Option<String>,
    /// 是否以无头模式启动
    pub headless: bool,
    /// 待抓取 URL 列表（TOML）
    pub batch_file: String,
    /// 导出文件目录
    pub output_dir: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            navigation_timeout_secs: 60,
            readiness_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_executable: None,
            headless: true,
            batch_file: "urls.toml".to_string(),
            output_dir: "output".to_string(),
            output_log_file: "scrape_log.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            navigation_timeout_secs: lookup("NAVIGATION_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(default.navigation_timeout_secs),
            readiness_timeout_secs: lookup("READINESS_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(default.readiness_timeout_secs),
            user_agent: lookup("USER_AGENT").unwrap_or(default.user_agent),
            chrome_executable: lookup("CHROME_EXECUTABLE").or(default.chrome_executable),
            headless: lookup("HEADLESS").and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            batch_file: lookup("BATCH_FILE").unwrap_or(default.batch_file),
            output_dir: lookup("OUTPUT_DIR").unwrap_or(default.output_dir),
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_secs(self.readiness_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_page_timeouts() {
        let config = Config::default();
        assert_eq!(config.navigation_timeout(), Duration::from_secs(60));
        assert_eq!(config.readiness_timeout(), Duration::from_secs(10));
        assert!(config.user_agent.contains("Chrome/91.0.4472.124"));
        assert!(config.headless);
    }

    #[test]
    fn test_lookup_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("READINESS_TIMEOUT_SECS", "3"),
            ("NAVIGATION_TIMEOUT_SECS", "soon"),
            ("HEADLESS", "false"),
            ("CHROME_EXECUTABLE", "/usr/bin/chromium"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.readiness_timeout_secs, 3);
        assert_eq!(config.navigation_timeout_secs, 60);
        assert!(!config.headless);
        assert_eq!(config.chrome_executable.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(config.batch_file, "urls.toml");
    }
}
