//! Shared fixture for the live-site suites.
//!
//! Each test launches its own browser session; nothing is shared across
//! tests, so suites can run in parallel without interfering.

use paseo::{Browser, Page, PaseoResult, SuiteConfig};

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Launch one isolated browser session and open a blank tab.
///
/// Target URLs and the browser binary honor the `PASEO_*` environment
/// overrides, so the suites can be aimed at local mirrors.
pub async fn session() -> PaseoResult<(Browser, Page, SuiteConfig)> {
    init_tracing();
    let config = SuiteConfig::from_env();
    let browser = Browser::launch(&config).await?;
    let page = browser.new_page().await?;
    Ok((browser, page, config))
}
