//! Result and error types for Paseo.

use thiserror::Error;

/// Result type for Paseo operations
pub type PaseoResult<T> = Result<T, PaseoError>;

/// Errors that can occur while driving a target application
#[derive(Debug, Error)]
pub enum PaseoError {
    /// Browser process could not be started
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation failed or the load milestone was not reached in time
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// JavaScript evaluation against the page failed
    #[error("Evaluation failed: {message}")]
    Eval {
        /// Error message
        message: String,
    },

    /// A synthesized input event could not be dispatched
    #[error("Input dispatch failed: {message}")]
    Input {
        /// Error message
        message: String,
    },

    /// A locator resolved to zero elements when one was required
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Locator description
        selector: String,
    },

    /// Requested column is absent from the header row
    #[error("Column not found: {column}")]
    ColumnNotFound {
        /// Requested column caption
        column: String,
    },

    /// A drag-based operation could not establish its preconditions.
    ///
    /// Both column reorder and column resize surface this variant; the
    /// caller decides whether it is fatal.
    #[error("Precondition unmet for {operation}: {message}")]
    PreconditionUnmet {
        /// Operation that was skipped
        operation: String,
        /// What was missing
        message: String,
    },

    /// A bounded wait expired
    #[error("Timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// What was being waited for
        waiting_for: String,
    },

    /// Observed DOM state did not match the expectation
    #[error("Assertion failed: {message}")]
    Assertion {
        /// Expected/actual diff
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
