//! Page object for the AG Grid finance demo.
//!
//! The grid virtualizes rows and live-updates numeric cells, so every read
//! here re-resolves its locators against the current DOM and numeric reads
//! poll for the text to stabilize before parsing.

use std::time::Duration;

use tracing::debug;

use crate::config::SuiteConfig;
use crate::locator::{Locator, Point};
use crate::page::Page;
use crate::result::{PaseoError, PaseoResult};
use crate::text::{extract_numeric, is_parseable_numeric, resolve_column_index};
use crate::wait::{poll_until, NavigationOptions, WaitOptions};

/// Bounded window for a live cell to stabilize into a parseable number
const NUMERIC_STABILIZE_MS: u64 = 8_000;

/// Headers render late relative to the grid shell
const HEADER_TIMEOUT_MS: u64 = 15_000;

/// Façade over the finance grid surface
#[derive(Debug)]
pub struct FinancePage {
    page: Page,
    url: String,
    grid_root: Locator,
    grid_rows: Locator,
    header_cells: Locator,
}

impl FinancePage {
    /// Bind the page object's locators to a page
    #[must_use]
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            grid_root: page.locator("div.ag-root"),
            grid_rows: page.locator("div.ag-center-cols-container div[role=\"row\"]"),
            header_cells: page
                .locator("div.ag-header-cell, div[role=\"columnheader\"], div.ag-header-cell-text"),
            url: config.finance_url.clone(),
            page,
        }
    }

    /// Load the demo and wait for the document to be parsed
    ///
    /// # Errors
    ///
    /// Propagates navigation failures and timeouts.
    pub async fn goto(&self) -> PaseoResult<()> {
        self.page
            .goto(&self.url, &NavigationOptions::dom_content_loaded())
            .await
    }

    /// Underlying page, for raw scripts the grid needs (virtualized
    /// scrolling)
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Number of rendered data rows
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when the grid never shows a row.
    pub async fn row_count(&self) -> PaseoResult<usize> {
        self.grid_root.wait_for_visible().await?;
        self.grid_rows.first().wait_for_visible().await?;
        self.grid_rows.count().await
    }

    /// Header captions in document order, trimmed, empties dropped
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when no header becomes visible.
    pub async fn column_headers(&self) -> PaseoResult<Vec<String>> {
        self.header_cells
            .first()
            .with_timeout(Duration::from_millis(HEADER_TIMEOUT_MS))
            .wait_for_visible()
            .await?;
        let texts = self.header_cells.all_text_contents().await?;
        Ok(texts
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect())
    }

    /// Resolve a column caption to its positional index.
    ///
    /// Resolved from the live header row on every call; never cached, so a
    /// column reorder between calls cannot serve a stale index.
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::ColumnNotFound`] when no header matches.
    pub async fn column_index(&self, column_name: &str) -> PaseoResult<usize> {
        let headers = self.column_headers().await?;
        resolve_column_index(&headers, column_name)
    }

    /// Locator for one data cell addressed by row index and column caption.
    ///
    /// The index is applied positionally against the row's cell collection,
    /// which assumes header order matches cell order.
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::ColumnNotFound`] when no header matches.
    pub async fn cell(&self, row_index: usize, column_name: &str) -> PaseoResult<Locator> {
        let col = self.column_index(column_name).await?;
        Ok(self
            .grid_rows
            .nth(row_index)
            .locator("div[role=\"gridcell\"]")
            .nth(col))
    }

    /// Read a numeric cell, polling up to eight seconds for live text to
    /// stabilize into a parseable form; `0.0` when nothing numeric remains
    ///
    /// # Errors
    ///
    /// Propagates lookup and evaluation failures.
    pub async fn numeric_cell_value(
        &self,
        row_index: usize,
        column_name: &str,
    ) -> PaseoResult<f64> {
        let cell = self.cell(row_index, column_name).await?;
        cell.wait_for_visible().await?;
        let options = WaitOptions::new().with_timeout(NUMERIC_STABILIZE_MS);
        let cell_ref = &cell;
        let polled = poll_until(
            move || async move { Ok(cell_ref.try_text_content().await?.unwrap_or_default()) },
            |text: &String| is_parseable_numeric(text),
            &options,
        )
        .await?;
        if !polled.satisfied {
            debug!(
                row = row_index,
                column = column_name,
                text = %polled.value,
                "cell text never stabilized, parsing last observed value"
            );
        }
        Ok(extract_numeric(&polled.value))
    }

    /// Click a column's header caption; once for ascending, twice for
    /// descending
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when the caption never becomes visible.
    pub async fn sort_column(&self, column_name: &str, ascending: bool) -> PaseoResult<()> {
        let header = self
            .page
            .by_text(column_name)
            .first()
            .with_timeout(Duration::from_millis(HEADER_TIMEOUT_MS));
        header.wait_for_visible().await?;
        header.click().await?;
        if !ascending {
            header.click().await?;
        }
        Ok(())
    }

    /// Fill a column's floating filter and commit with Enter.
    ///
    /// Columns without a floating filter are left untouched; the grid only
    /// renders the filter row for filterable columns.
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn filter_column(&self, column_name: &str, filter_value: &str) -> PaseoResult<()> {
        let header_cell = self
            .page
            .by_text(column_name)
            .first()
            .closest("div.ag-header-cell");
        let floating = header_cell
            .locator(".ag-floating-filter input")
            .with_timeout(Duration::from_millis(HEADER_TIMEOUT_MS));
        if floating.count().await? == 0 {
            debug!(column = column_name, "column has no floating filter");
            return Ok(());
        }
        floating.wait_for_visible().await?;
        floating.fill(filter_value).await?;
        floating.press("Enter").await
    }

    /// Click the first cell of a row, returning the row locator for
    /// follow-up queries
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when the row never becomes visible.
    pub async fn select_row(&self, index: usize) -> PaseoResult<Locator> {
        let row = self
            .grid_rows
            .nth(index)
            .with_timeout(Duration::from_millis(10_000));
        row.wait_for_visible().await?;
        row.locator("div[role=\"gridcell\"]").first().click().await?;
        Ok(row)
    }

    /// `aria-selected` state of a row; `None` when the grid does not expose
    /// the attribute
    ///
    /// # Errors
    ///
    /// Propagates lookup failures.
    pub async fn is_row_selected(&self, index: usize) -> PaseoResult<Option<bool>> {
        let attr = self.grid_rows.nth(index).attribute("aria-selected").await?;
        Ok(attr.map(|v| v == "true"))
    }

    /// Number of sparkline canvases rendered in a row
    ///
    /// # Errors
    ///
    /// Propagates evaluation failures.
    pub async fn sparkline_count(&self, index: usize) -> PaseoResult<usize> {
        self.grid_rows.nth(index).locator("canvas").count().await
    }

    /// Drag a column's resize handle horizontally by `width_delta` pixels
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::PreconditionUnmet`] when the handle or its
    /// bounding box is unavailable.
    pub async fn resize_column(&self, column_name: &str, width_delta: f64) -> PaseoResult<()> {
        let header_cell = self
            .page
            .by_text(column_name)
            .first()
            .closest("div.ag-header-cell")
            .with_timeout(Duration::from_millis(HEADER_TIMEOUT_MS));
        header_cell.wait_for_visible().await?;
        header_cell.scroll_into_view().await?;
        header_cell.hover().await?;
        let handle = header_cell
            .locator(".ag-header-cell-resize")
            .with_timeout(Duration::from_millis(5_000));
        if handle.count().await? == 0 {
            return Err(PaseoError::PreconditionUnmet {
                operation: String::from("resize column"),
                message: format!("no resize handle on column {column_name:?}"),
            });
        }
        handle.wait_for_visible().await?;
        let start = handle
            .bounding_box()
            .await?
            .ok_or_else(|| PaseoError::PreconditionUnmet {
                operation: String::from("resize column"),
                message: format!("resize handle on {column_name:?} has no bounding box"),
            })?
            .center();
        self.page
            .drag(start, Point::new(start.x + width_delta, start.y), 10)
            .await
    }

    /// Drag one column's header caption onto another's to reorder them
    ///
    /// # Errors
    ///
    /// Returns [`PaseoError::PreconditionUnmet`] when either bounding box
    /// is unavailable; callers that treat reordering as best-effort match
    /// on that variant.
    pub async fn reorder_column(&self, from: &str, to: &str) -> PaseoResult<()> {
        let source = self.page.by_text(from).first();
        let target = self.page.by_text(to).first();
        let (Some(from_box), Some(to_box)) =
            (source.bounding_box().await?, target.bounding_box().await?)
        else {
            return Err(PaseoError::PreconditionUnmet {
                operation: String::from("reorder column"),
                message: format!("missing bounding box for {from:?} or {to:?}"),
            });
        };
        self.page
            .drag(from_box.center(), to_box.center(), 10)
            .await
    }
}
