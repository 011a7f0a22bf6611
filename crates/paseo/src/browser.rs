//! Browser session management over CDP.
//!
//! One session per test. Page objects never share a session, so nothing in
//! this module is shared mutable state between tests.

use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::SuiteConfig;
use crate::page::Page;
use crate::result::{PaseoError, PaseoResult};

/// A running chromium instance
#[derive(Debug)]
pub struct Browser {
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
    default_timeout_ms: u64,
}

/// Translate suite configuration into a chromiumoxide launch configuration
pub(crate) fn cdp_config(config: &SuiteConfig) -> PaseoResult<CdpConfig> {
    let mut builder = CdpConfig::builder()
        .window_size(config.viewport_width, config.viewport_height)
        .no_sandbox();
    if !config.headless {
        builder = builder.with_head();
    }
    if let Some(ref path) = config.chromium_path {
        builder = builder.chrome_executable(path);
    }
    builder.build().map_err(|e| PaseoError::BrowserLaunch {
        message: e.to_string(),
    })
}

impl Browser {
    /// Launch a browser session
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::BrowserLaunch`] when no chromium can be
    /// started.
    pub async fn launch(config: &SuiteConfig) -> PaseoResult<Self> {
        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config(config)?)
                .await
                .map_err(|e| PaseoError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        // The handler stream must be drained for the connection to make
        // progress.
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!(headless = config.headless, "browser session started");
        Ok(Self {
            inner: Arc::new(Mutex::new(browser)),
            handle,
            default_timeout_ms: config.default_timeout_ms,
        })
    }

    /// Open a new blank tab
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::Navigation`] when the tab cannot be created.
    pub async fn new_page(&self) -> PaseoResult<Page> {
        let browser = self.inner.lock().await;
        let cdp_page =
            browser
                .new_page("about:blank")
                .await
                .map_err(|e| PaseoError::Navigation {
                    url: String::from("about:blank"),
                    message: e.to_string(),
                })?;
        Ok(Page::new(cdp_page, self.default_timeout_ms))
    }

    /// Close the session and the underlying process
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::BrowserLaunch`] when shutdown fails.
    pub async fn close(self) -> PaseoResult<()> {
        let mut browser = self.inner.lock().await;
        browser
            .close()
            .await
            .map_err(|e| PaseoError::BrowserLaunch {
                message: e.to_string(),
            })?;
        Ok(())
    }
}
