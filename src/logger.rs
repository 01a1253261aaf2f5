use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；未设置时默认 `info`，`verbose` 为真时本 crate 输出 `debug`
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "info,review_scraper=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // 测试中可能被多次调用
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
