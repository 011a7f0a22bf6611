//! Suite configuration.
//!
//! The defaults point at the public demo deployments the suites were
//! written against. Every URL can be overridden through the environment so
//! a suite can be aimed at a local mirror instead of the live site.

use crate::wait::DEFAULT_TIMEOUT_MS;

/// Entry URL of the AG Grid finance demo
pub const FINANCE_URL: &str = "https://www.ag-grid.com/example-finance/";

/// Entry URL of the DemoQA practice form
pub const FORM_URL: &str = "https://demoqa.com/automation-practice-form";

/// Entry URL of the TodoMVC demo
pub const TODO_URL: &str = "https://demo.playwright.dev/todomvc/";

/// Configuration shared by all three suites
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Finance grid entry URL
    pub finance_url: String,
    /// Practice form entry URL
    pub form_url: String,
    /// TodoMVC entry URL
    pub todo_url: String,
    /// Run the browser headless
    pub headless: bool,
    /// Path to a chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Default locator auto-wait timeout in milliseconds
    pub default_timeout_ms: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            finance_url: FINANCE_URL.to_string(),
            form_url: FORM_URL.to_string(),
            todo_url: TODO_URL.to_string(),
            headless: true,
            chromium_path: None,
            viewport_width: 1280,
            viewport_height: 720,
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl SuiteConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus environment overrides:
    ///
    /// - `PASEO_FINANCE_URL`, `PASEO_FORM_URL`, `PASEO_TODO_URL` retarget a
    ///   suite (e.g. at a local mirror);
    /// - `PASEO_HEADFUL=1` shows the browser window;
    /// - `PASEO_CHROMIUM` points at a specific chromium binary.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok());
        config
    }

    /// Apply overrides from a name → value lookup (split out from
    /// [`Self::from_env`] so it can be tested without touching process
    /// environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PASEO_FINANCE_URL") {
            self.finance_url = url;
        }
        if let Some(url) = lookup("PASEO_FORM_URL") {
            self.form_url = url;
        }
        if let Some(url) = lookup("PASEO_TODO_URL") {
            self.todo_url = url;
        }
        if let Some(flag) = lookup("PASEO_HEADFUL") {
            self.headless = !matches!(flag.as_str(), "1" | "true" | "yes");
        }
        if let Some(path) = lookup("PASEO_CHROMIUM") {
            self.chromium_path = Some(path);
        }
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the chromium binary path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the default locator auto-wait timeout
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout_ms: u64) -> Self {
        self.default_timeout_ms = timeout_ms;
        self
    }
}
