//! Paseo: page-object end-to-end suites for three public demo web apps.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      PASEO Architecture                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌──────────────┐    ┌────────────┐           │
//! │   │ Test Spec  │    │ Page Object  │    │ Headless   │           │
//! │   │ (tests/)   │───►│ (pages::*)   │───►│ Browser    │           │
//! │   │            │    │              │    │ (CDP)      │           │
//! │   └────────────┘    └──────────────┘    └────────────┘           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two thin layers over the Chrome DevTools Protocol: a narrow
//! interactable-DOM capability layer ([`Browser`], [`Page`], [`Locator`],
//! bounded waits, retrying assertions) and one page object per target
//! application ([`pages`]). Test specifications live under `tests/` and
//! compose page-object operations; they hold no locator logic of their own.
//!
//! The capability layer is deliberately small so the automation engine can
//! be swapped without touching the page objects or the specs: everything a
//! page object uses reduces to "locate by selector/text", "wait for a
//! state", "perform an input", and "read text/attribute/box".

#![warn(missing_docs)]

mod assertion;
mod browser;
mod config;
mod locator;
mod page;
mod result;
mod text;
mod wait;

pub mod pages;

pub use assertion::{expect, Expect};
pub use browser::Browser;
pub use config::{SuiteConfig, FINANCE_URL, FORM_URL, TODO_URL};
pub use locator::{BoundingBox, Hop, Locator, Point};
pub use page::Page;
pub use result::{PaseoError, PaseoResult};
pub use text::{
    extract_numeric, is_parseable_numeric, normalize_header, normalize_text,
    resolve_column_index, strip_non_numeric,
};
pub use wait::{
    pause, poll_until, wait_until, LoadState, NavigationOptions, Polled, WaitOptions,
    DEFAULT_NAVIGATION_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
};
