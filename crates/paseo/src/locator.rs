//! Locator abstraction: deferred, re-evaluated element queries.
//!
//! A locator is a chain of selection hops compiled to a JavaScript
//! expression and evaluated against the live document on every use. Nothing
//! is cached between uses; the DOM a locator matches is mutable and
//! externally controlled by the target application.
//!
//! Interactions auto-wait for the element to become actionable within a
//! bounded timeout; reads resolve current state and return typed values.

use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::page::Page as CdpPage;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::page;
use crate::result::{PaseoError, PaseoResult};
use crate::wait::{self, WaitOptions};

/// A point in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen-space rectangle of a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl BoundingBox {
    /// Center point of the box
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// One hop in a locator chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hop {
    /// Descendants matching a CSS selector
    Css(String),
    /// Innermost elements whose text content contains the needle
    Text(String),
    /// Keep elements of the current set whose text contains the needle
    HasText(String),
    /// Nearest ancestor (or self) matching a CSS selector
    Closest(String),
    /// Positional narrowing to a single element
    Nth(usize),
}

/// Embed a Rust string as a JavaScript string literal
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Compile a hop chain into statements that narrow a `set` variable seeded
/// with `[document]`.
pub(crate) fn compile_hops(hops: &[Hop]) -> String {
    let mut js = String::from("  let set = [document];\n");
    for hop in hops {
        match hop {
            Hop::Css(sel) => {
                js.push_str(&format!(
                    "  set = set.flatMap((el) => Array.from(el.querySelectorAll({})));\n",
                    js_string(sel)
                ));
            }
            Hop::Text(needle) => {
                let needle = js_string(needle);
                // Innermost matches only, in document order; otherwise the
                // root element would always win.
                js.push_str(&format!(
                    "  set = set\n    .flatMap((el) => Array.from(el.querySelectorAll('*')))\n    .filter((el) => (el.textContent || '').includes({needle}))\n    .filter((el) => !Array.from(el.children).some((c) => (c.textContent || '').includes({needle})));\n",
                ));
            }
            Hop::HasText(needle) => {
                js.push_str(&format!(
                    "  set = set.filter((el) => (el.textContent || '').includes({}));\n",
                    js_string(needle)
                ));
            }
            Hop::Closest(sel) => {
                js.push_str(&format!(
                    "  set = set.map((el) => (el.closest ? el.closest({}) : null)).filter(Boolean);\n",
                    js_string(sel)
                ));
            }
            Hop::Nth(i) => {
                js.push_str(&format!("  set = set[{i}] ? [set[{i}]] : [];\n"));
            }
        }
    }
    js
}

/// Wrap a hop chain and a body into an immediately-invoked expression
fn script_for(hops: &[Hop], body: &str) -> String {
    format!("(() => {{\n{}  {body}\n}})()", compile_hops(hops))
}

/// JS helper predicate deciding element visibility
const VISIBLE_HELPER: &str = "const visible = (el) => { if (!el || !el.getClientRects || el.getClientRects().length === 0) return false; const style = window.getComputedStyle(el); return style.visibility !== 'hidden' && style.display !== 'none'; };";

/// A deferred element query bound to one page.
///
/// Cloning a locator clones the descriptor, not any element; both clones
/// re-resolve against the live DOM independently.
#[derive(Debug, Clone)]
pub struct Locator {
    page: Arc<Mutex<CdpPage>>,
    hops: Vec<Hop>,
    wait: WaitOptions,
}

impl Locator {
    pub(crate) fn root(page: Arc<Mutex<CdpPage>>, hop: Hop, default_timeout_ms: u64) -> Self {
        Self {
            page,
            hops: vec![hop],
            wait: WaitOptions::new().with_timeout(default_timeout_ms),
        }
    }

    fn child(&self, hop: Hop) -> Self {
        let mut hops = self.hops.clone();
        hops.push(hop);
        Self {
            page: Arc::clone(&self.page),
            hops,
            wait: self.wait.clone(),
        }
    }

    /// Descendants matching a CSS selector
    #[must_use]
    pub fn locator(&self, css: impl Into<String>) -> Self {
        self.child(Hop::Css(css.into()))
    }

    /// Keep only elements whose text content contains `needle`
    #[must_use]
    pub fn has_text(&self, needle: impl Into<String>) -> Self {
        self.child(Hop::HasText(needle.into()))
    }

    /// Nearest ancestor (or self) matching a CSS selector
    #[must_use]
    pub fn closest(&self, css: impl Into<String>) -> Self {
        self.child(Hop::Closest(css.into()))
    }

    /// Positional narrowing to the `i`-th match
    #[must_use]
    pub fn nth(&self, i: usize) -> Self {
        self.child(Hop::Nth(i))
    }

    /// Positional narrowing to the first match
    #[must_use]
    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// Override the auto-wait timeout for this locator
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.wait = self.wait.with_timeout(timeout.as_millis() as u64);
        self
    }

    /// Wait options used by auto-waits and retrying assertions
    #[must_use]
    pub fn wait_options(&self) -> &WaitOptions {
        &self.wait
    }

    /// Human-readable description of the hop chain, for error messages
    #[must_use]
    pub fn selector(&self) -> String {
        self.hops
            .iter()
            .map(|hop| match hop {
                Hop::Css(s) => format!("css={s}"),
                Hop::Text(t) => format!("text={t}"),
                Hop::HasText(t) => format!("has-text={t}"),
                Hop::Closest(s) => format!("closest={s}"),
                Hop::Nth(i) => format!("nth={i}"),
            })
            .collect::<Vec<_>>()
            .join(" >> ")
    }

    async fn eval<T: DeserializeOwned>(&self, body: &str) -> PaseoResult<T> {
        let script = script_for(&self.hops, body);
        let page = self.page.lock().await;
        let result = page
            .evaluate(script)
            .await
            .map_err(|e| PaseoError::Eval {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| PaseoError::Eval {
            message: e.to_string(),
        })
    }

    fn not_found(&self) -> PaseoError {
        PaseoError::ElementNotFound {
            selector: self.selector(),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Number of elements currently matching
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn count(&self) -> PaseoResult<usize> {
        self.eval("return set.length;").await
    }

    /// Text content of every matching element, in document order
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn all_text_contents(&self) -> PaseoResult<Vec<String>> {
        self.eval("return set.map((el) => el.textContent || '');")
            .await
    }

    /// Text content of the first match, or `None` when nothing matches
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn try_text_content(&self) -> PaseoResult<Option<String>> {
        self.eval("const el = set[0]; if (!el) return null; return el.textContent || '';")
            .await
    }

    /// Text content of the first match, auto-waiting for it to be attached
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when no element attaches, `ElementNotFound` when it
    /// detaches between the wait and the read.
    pub async fn text_content(&self) -> PaseoResult<String> {
        self.wait_for_attached().await?;
        self.try_text_content()
            .await?
            .ok_or_else(|| self.not_found())
    }

    /// Current `value` of the first matching input, or `None` when nothing
    /// matches
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn try_input_value(&self) -> PaseoResult<Option<String>> {
        self.eval("const el = set[0]; if (!el) return null; return el.value ?? '';")
            .await
    }

    /// Current `value` of the first matching input, auto-waiting for it
    ///
    /// # Errors
    ///
    /// Returns `Timeout` or `ElementNotFound` as for [`Self::text_content`].
    pub async fn input_value(&self) -> PaseoResult<String> {
        self.wait_for_attached().await?;
        self.try_input_value()
            .await?
            .ok_or_else(|| self.not_found())
    }

    /// Attribute value of the first match, auto-waiting for attachment.
    /// `None` means the attribute is absent.
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when no element attaches.
    pub async fn attribute(&self, name: &str) -> PaseoResult<Option<String>> {
        self.wait_for_attached().await?;
        self.eval(&format!(
            "const el = set[0]; if (!el) return null; return el.getAttribute({});",
            js_string(name)
        ))
        .await
    }

    /// Whether the first match is currently rendered visible.
    /// Zero matches count as not visible.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn is_visible(&self) -> PaseoResult<bool> {
        self.eval(&format!("{VISIBLE_HELPER} return visible(set[0]);"))
            .await
    }

    /// Checked state of the first match, or `None` when nothing matches
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn try_is_checked(&self) -> PaseoResult<Option<bool>> {
        self.eval("const el = set[0]; if (!el) return null; return !!el.checked;")
            .await
    }

    /// Checked state of the first match, auto-waiting for attachment
    ///
    /// # Errors
    ///
    /// Returns `Timeout` or `ElementNotFound` as for [`Self::text_content`].
    pub async fn is_checked(&self) -> PaseoResult<bool> {
        self.wait_for_attached().await?;
        self.try_is_checked()
            .await?
            .ok_or_else(|| self.not_found())
    }

    /// Whether the first match is the document's active element
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn try_is_focused(&self) -> PaseoResult<Option<bool>> {
        self.eval("const el = set[0]; if (!el) return null; return document.activeElement === el;")
            .await
    }

    /// Whether the first match is enabled (not `disabled`)
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn try_is_enabled(&self) -> PaseoResult<Option<bool>> {
        self.eval("const el = set[0]; if (!el) return null; return !el.disabled;")
            .await
    }

    /// `className` of the first match, or `None` when nothing matches
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn try_class_name(&self) -> PaseoResult<Option<String>> {
        self.eval("const el = set[0]; if (!el) return null; return el.className || '';")
            .await
    }

    /// Bounding box of the first match; `None` when the element is missing
    /// or not rendered
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn bounding_box(&self) -> PaseoResult<Option<BoundingBox>> {
        self.eval(
            "const el = set[0]; if (!el || !el.getClientRects || el.getClientRects().length === 0) return null; const r = el.getBoundingClientRect(); return { x: r.x, y: r.y, width: r.width, height: r.height };",
        )
        .await
    }

    // ------------------------------------------------------------------
    // Waits
    // ------------------------------------------------------------------

    /// Wait for at least one element to be attached
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when the deadline passes.
    pub async fn wait_for_attached(&self) -> PaseoResult<()> {
        let this = self;
        wait::wait_until(
            move || async move { this.count().await },
            |n| *n > 0,
            &self.wait,
            &format!("{} to be attached", self.selector()),
        )
        .await
        .map(|_| ())
    }

    /// Wait for the first match to be visible
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when the deadline passes.
    pub async fn wait_for_visible(&self) -> PaseoResult<()> {
        let this = self;
        wait::wait_until(
            move || async move { this.is_visible().await },
            |v| *v,
            &self.wait,
            &format!("{} to be visible", self.selector()),
        )
        .await
        .map(|_| ())
    }

    /// Wait for every match to be hidden or detached
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when the deadline passes.
    pub async fn wait_for_hidden(&self) -> PaseoResult<()> {
        let this = self;
        wait::wait_until(
            move || async move { this.is_visible().await },
            |v| !*v,
            &self.wait,
            &format!("{} to be hidden", self.selector()),
        )
        .await
        .map(|_| ())
    }

    // ------------------------------------------------------------------
    // Interactions
    // ------------------------------------------------------------------

    /// Click the first match once it is visible
    ///
    /// # Errors
    ///
    /// Returns `Timeout` while waiting, or `ElementNotFound` on a race.
    pub async fn click(&self) -> PaseoResult<()> {
        self.wait_for_visible().await?;
        debug!(selector = %self.selector(), "click");
        let clicked: bool = self
            .eval("const el = set[0]; if (!el) return false; el.click(); return true;")
            .await?;
        if clicked {
            Ok(())
        } else {
            Err(self.not_found())
        }
    }

    /// Double-click the first match with synthesized pointer events
    ///
    /// # Errors
    ///
    /// Returns `Timeout`, `ElementNotFound`, or `Input` on dispatch failure.
    pub async fn dblclick(&self) -> PaseoResult<()> {
        self.wait_for_visible().await?;
        let center = self
            .bounding_box()
            .await?
            .ok_or_else(|| self.not_found())?
            .center();
        debug!(selector = %self.selector(), "dblclick");
        let page = self.page.lock().await;
        page::mouse_click_at(&page, center, 1).await?;
        page::mouse_click_at(&page, center, 2).await
    }

    /// Replace the first matching input's value, firing `input` and
    /// `change` so framework listeners observe the edit
    ///
    /// # Errors
    ///
    /// Returns `Timeout` while waiting, or `ElementNotFound` on a race.
    pub async fn fill(&self, text: &str) -> PaseoResult<()> {
        self.wait_for_visible().await?;
        debug!(selector = %self.selector(), text, "fill");
        let text = js_string(text);
        let filled: bool = self
            .eval(&format!(
                "const el = set[0]; if (!el) return false; \
                 const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
                 const desc = Object.getOwnPropertyDescriptor(proto, 'value'); \
                 el.focus(); \
                 if (desc && desc.set) {{ desc.set.call(el, {text}); }} else {{ el.value = {text}; }} \
                 el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                 return true;"
            ))
            .await?;
        if filled {
            Ok(())
        } else {
            Err(self.not_found())
        }
    }

    /// Focus the first match and press a key (`Enter`, `Escape`, `Tab`, or
    /// a single character)
    ///
    /// # Errors
    ///
    /// Returns `Timeout`, `ElementNotFound`, or `Input` on dispatch failure.
    pub async fn press(&self, key: &str) -> PaseoResult<()> {
        self.wait_for_visible().await?;
        debug!(selector = %self.selector(), key, "press");
        let focused: bool = self
            .eval("const el = set[0]; if (!el) return false; el.focus(); return true;")
            .await?;
        if !focused {
            return Err(self.not_found());
        }
        let page = self.page.lock().await;
        page::dispatch_key(&page, key).await
    }

    /// Move the pointer to the center of the first match
    ///
    /// # Errors
    ///
    /// Returns `Timeout`, `ElementNotFound`, or `Input` on dispatch failure.
    pub async fn hover(&self) -> PaseoResult<()> {
        self.wait_for_visible().await?;
        let center = self
            .bounding_box()
            .await?
            .ok_or_else(|| self.not_found())?
            .center();
        debug!(selector = %self.selector(), "hover");
        let page = self.page.lock().await;
        page::mouse_move_to(&page, center).await
    }

    /// Ensure the first matching checkbox is checked
    ///
    /// # Errors
    ///
    /// Returns `Timeout` while waiting, or `ElementNotFound` on a race.
    pub async fn check(&self) -> PaseoResult<()> {
        self.wait_for_visible().await?;
        if self.try_is_checked().await?.unwrap_or(false) {
            return Ok(());
        }
        self.click().await
    }

    /// Ensure the first matching checkbox is unchecked
    ///
    /// # Errors
    ///
    /// Returns `Timeout` while waiting, or `ElementNotFound` on a race.
    pub async fn uncheck(&self) -> PaseoResult<()> {
        self.wait_for_visible().await?;
        if !self.try_is_checked().await?.unwrap_or(false) {
            return Ok(());
        }
        self.click().await
    }

    /// Focus the first match
    ///
    /// # Errors
    ///
    /// Returns `Timeout` while waiting, or `ElementNotFound` on a race.
    pub async fn focus(&self) -> PaseoResult<()> {
        self.wait_for_attached().await?;
        let ok: bool = self
            .eval("const el = set[0]; if (!el) return false; el.focus(); return true;")
            .await?;
        if ok {
            Ok(())
        } else {
            Err(self.not_found())
        }
    }

    /// Blur the first match (commits edits that save on focus loss)
    ///
    /// # Errors
    ///
    /// Returns `Timeout` while waiting, or `ElementNotFound` on a race.
    pub async fn blur(&self) -> PaseoResult<()> {
        self.wait_for_attached().await?;
        let ok: bool = self
            .eval("const el = set[0]; if (!el) return false; el.blur(); return true;")
            .await?;
        if ok {
            Ok(())
        } else {
            Err(self.not_found())
        }
    }

    /// Scroll the first match into view
    ///
    /// # Errors
    ///
    /// Returns `Timeout` while waiting, or `ElementNotFound` on a race.
    pub async fn scroll_into_view(&self) -> PaseoResult<()> {
        self.wait_for_attached().await?;
        let ok: bool = self
            .eval("const el = set[0]; if (!el) return false; el.scrollIntoView({ block: 'center', inline: 'center' }); return true;")
            .await?;
        if ok {
            Ok(())
        } else {
            Err(self.not_found())
        }
    }

    /// Select an option of the first matching `<select>` by value, firing
    /// `change`
    ///
    /// # Errors
    ///
    /// Returns `Timeout` while waiting, or `ElementNotFound` on a race.
    pub async fn select_option(&self, value: &str) -> PaseoResult<()> {
        self.wait_for_visible().await?;
        debug!(selector = %self.selector(), value, "select option");
        let value = js_string(value);
        let ok: bool = self
            .eval(&format!(
                "const el = set[0]; if (!el) return false; \
                 const desc = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value'); \
                 if (desc && desc.set) {{ desc.set.call(el, {value}); }} else {{ el.value = {value}; }} \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                 return true;"
            ))
            .await?;
        if ok {
            Ok(())
        } else {
            Err(self.not_found())
        }
    }
}
