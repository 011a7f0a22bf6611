//! A single browser tab: navigation, root locators, and synthesized input.
//!
//! Pointer gestures are dispatched through the CDP input domain so the
//! target application sees trusted events; DOM reads and simple clicks go
//! through in-page evaluation.

use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::dom::{
    GetDocumentParams, QuerySelectorParams, SetFileInputFilesParams,
};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType, MouseButton,
};
use chromiumoxide::page::Page as CdpPage;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::locator::{Hop, Locator, Point};
use crate::result::{PaseoError, PaseoResult};
use crate::wait::{self, NavigationOptions, WaitOptions};

/// Total duration over which a drag's move steps are spread
const DRAG_DURATION_MS: u64 = 500;

/// A tab attached over CDP.
///
/// Cloning shares the underlying connection; one `Page` is exclusively
/// owned by the single test that created its session.
#[derive(Debug, Clone)]
pub struct Page {
    inner: Arc<Mutex<CdpPage>>,
    default_timeout_ms: u64,
}

impl Page {
    pub(crate) fn new(inner: CdpPage, default_timeout_ms: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
            default_timeout_ms,
        }
    }

    /// Root locator from a CSS selector
    #[must_use]
    pub fn locator(&self, css: impl Into<String>) -> Locator {
        Locator::root(
            Arc::clone(&self.inner),
            Hop::Css(css.into()),
            self.default_timeout_ms,
        )
    }

    /// Root locator matching the innermost elements containing `text`
    #[must_use]
    pub fn by_text(&self, text: impl Into<String>) -> Locator {
        Locator::root(
            Arc::clone(&self.inner),
            Hop::Text(text.into()),
            self.default_timeout_ms,
        )
    }

    /// Navigate to `url` and wait for the requested load milestone.
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::Navigation`] when the navigation fails or the
    /// milestone is not reached within the timeout.
    pub async fn goto(&self, url: &str, options: &NavigationOptions) -> PaseoResult<()> {
        {
            let page = self.inner.lock().await;
            page.goto(url).await.map_err(|e| PaseoError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        }
        self.wait_for_load_state(url, options).await?;
        info!(url, milestone = %options.wait_until, "navigated");
        Ok(())
    }

    /// Reload the current URL, waiting for the same milestone rules.
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::Navigation`] as for [`Self::goto`].
    pub async fn reload(&self, options: &NavigationOptions) -> PaseoResult<()> {
        let url = {
            let page = self.inner.lock().await;
            page.url().await.map_err(|e| PaseoError::Eval {
                message: e.to_string(),
            })?
        };
        let url = url.ok_or_else(|| PaseoError::Navigation {
            url: String::from("<current>"),
            message: String::from("page has no URL to reload"),
        })?;
        self.goto(&url, options).await
    }

    async fn wait_for_load_state(
        &self,
        url: &str,
        options: &NavigationOptions,
    ) -> PaseoResult<()> {
        let wait_options = WaitOptions::new()
            .with_timeout(options.timeout_ms)
            .with_poll_interval(100);
        let this = self;
        let result = wait::wait_until(
            move || async move { this.evaluate::<String>("document.readyState").await },
            |state| options.wait_until.is_satisfied_by(state),
            &wait_options,
            &format!("load milestone {}", options.wait_until),
        )
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(PaseoError::Timeout { ms, .. }) => Err(PaseoError::Navigation {
                url: url.to_string(),
                message: format!("load milestone {} not reached within {ms}ms", options.wait_until),
            }),
            Err(e) => Err(e),
        }
    }

    /// Evaluate a JavaScript expression and deserialize its result.
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::Eval`] when evaluation or deserialization
    /// fails.
    pub async fn evaluate<T: DeserializeOwned>(&self, js: &str) -> PaseoResult<T> {
        let page = self.inner.lock().await;
        let result = page.evaluate(js).await.map_err(|e| PaseoError::Eval {
            message: e.to_string(),
        })?;
        result.into_value().map_err(|e| PaseoError::Eval {
            message: e.to_string(),
        })
    }

    /// Press a key without focusing any element first
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::Input`] on dispatch failure.
    pub async fn press_key(&self, key: &str) -> PaseoResult<()> {
        let page = self.inner.lock().await;
        dispatch_key(&page, key).await
    }

    /// Synthesize a pointer-down / multi-step pointer-move / pointer-up
    /// sequence from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::Input`] on dispatch failure.
    pub async fn drag(&self, from: Point, to: Point, steps: u32) -> PaseoResult<()> {
        debug!(?from, ?to, steps, "drag");
        let steps = steps.max(1);
        let page = self.inner.lock().await;
        mouse_move_to(&page, from).await?;
        mouse_event(&page, DispatchMouseEventType::MousePressed, from, 1).await?;
        let step_delay = Duration::from_millis(DRAG_DURATION_MS / u64::from(steps));
        for i in 1..=steps {
            let progress = f64::from(i) / f64::from(steps);
            let point = Point::new(
                from.x + (to.x - from.x) * progress,
                from.y + (to.y - from.y) * progress,
            );
            mouse_move_to(&page, point).await?;
            tokio::time::sleep(step_delay).await;
        }
        mouse_event(&page, DispatchMouseEventType::MouseReleased, to, 1).await
    }

    /// Populate a file input with a file materialized from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the temp file cannot be written, or `Input` when
    /// the CDP call fails.
    pub async fn set_input_files(
        &self,
        css: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> PaseoResult<()> {
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, bytes)?;
        let page = self.inner.lock().await;
        let doc = page
            .execute(GetDocumentParams::default())
            .await
            .map_err(|e| PaseoError::Input {
                message: e.to_string(),
            })?;
        let root_id = doc.root.node_id.clone();
        let node = page
            .execute(
                QuerySelectorParams::builder()
                    .node_id(root_id)
                    .selector(css)
                    .build()
                    .map_err(|e| PaseoError::Input { message: e })?,
            )
            .await
            .map_err(|_| PaseoError::ElementNotFound {
                selector: format!("css={css}"),
            })?;
        let node_id = node.node_id.clone();
        let params = SetFileInputFilesParams::builder()
            .files(vec![path.to_string_lossy().to_string()])
            .node_id(node_id)
            .build()
            .map_err(|e| PaseoError::Input { message: e })?;
        page.execute(params).await.map_err(|e| PaseoError::Input {
            message: e.to_string(),
        })?;
        Ok(())
    }
}

/// Dispatch a single mouse event at `point`
async fn mouse_event(
    page: &CdpPage,
    kind: DispatchMouseEventType,
    point: Point,
    click_count: i64,
) -> PaseoResult<()> {
    let params = DispatchMouseEventParams::builder()
        .r#type(kind)
        .x(point.x)
        .y(point.y)
        .button(MouseButton::Left)
        .click_count(click_count)
        .build()
        .map_err(|e| PaseoError::Input { message: e })?;
    page.execute(params).await.map_err(|e| PaseoError::Input {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Move the pointer to `point`
pub(crate) async fn mouse_move_to(page: &CdpPage, point: Point) -> PaseoResult<()> {
    let params = DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MouseMoved)
        .x(point.x)
        .y(point.y)
        .build()
        .map_err(|e| PaseoError::Input { message: e })?;
    page.execute(params).await.map_err(|e| PaseoError::Input {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Press and release the left button at `point` with the given click count
pub(crate) async fn mouse_click_at(
    page: &CdpPage,
    point: Point,
    click_count: i64,
) -> PaseoResult<()> {
    mouse_event(page, DispatchMouseEventType::MousePressed, point, click_count).await?;
    mouse_event(page, DispatchMouseEventType::MouseReleased, point, click_count).await
}

/// Virtual key code and produced text for a key name
fn key_definition(key: &str) -> (i64, Option<String>) {
    match key {
        "Enter" => (13, Some("\r".to_string())),
        "Escape" => (27, None),
        "Tab" => (9, Some("\t".to_string())),
        "Backspace" => (8, None),
        "ArrowLeft" => (37, None),
        "ArrowUp" => (38, None),
        "ArrowRight" => (39, None),
        "ArrowDown" => (40, None),
        single if single.chars().count() == 1 => {
            let ch = single.chars().next().unwrap_or(' ');
            (i64::from(ch.to_ascii_uppercase() as u32), Some(single.to_string()))
        }
        _ => (0, None),
    }
}

/// Dispatch a key-down / key-up pair for `key`
pub(crate) async fn dispatch_key(page: &CdpPage, key: &str) -> PaseoResult<()> {
    let (code, text) = key_definition(key);

    let mut down = DispatchKeyEventParams::builder()
        .r#type(DispatchKeyEventType::KeyDown)
        .key(key)
        .windows_virtual_key_code(code)
        .native_virtual_key_code(code);
    if let Some(ref text) = text {
        down = down.text(text.clone());
    }
    let down = down.build().map_err(|e| PaseoError::Input { message: e })?;
    page.execute(down).await.map_err(|e| PaseoError::Input {
        message: e.to_string(),
    })?;

    let up = DispatchKeyEventParams::builder()
        .r#type(DispatchKeyEventType::KeyUp)
        .key(key)
        .windows_virtual_key_code(code)
        .native_virtual_key_code(code)
        .build()
        .map_err(|e| PaseoError::Input { message: e })?;
    page.execute(up).await.map_err(|e| PaseoError::Input {
        message: e.to_string(),
    })?;
    Ok(())
}
