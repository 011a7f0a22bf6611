//! Bounded-wait primitives.
//!
//! Every eventually-consistent read goes through [`poll_until`]: sample,
//! check, sleep, repeat until the deadline. On timeout the last observed
//! value is handed back alongside a `satisfied` flag rather than being
//! passed off as valid, and [`wait_until`] turns an unsatisfied poll into a
//! typed timeout error.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::result::{PaseoError, PaseoResult};

/// Default timeout for locator auto-waiting (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default timeout for navigation (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Page load milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The `load` event fired (`document.readyState === "complete"`)
    #[default]
    Load,
    /// `DOMContentLoaded` fired (`readyState` is interactive or better)
    DomContentLoaded,
}

impl LoadState {
    /// Whether a `document.readyState` value satisfies this milestone
    #[must_use]
    pub fn is_satisfied_by(&self, ready_state: &str) -> bool {
        match self {
            Self::Load => ready_state == "complete",
            Self::DomContentLoaded => ready_state == "interactive" || ready_state == "complete",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::DomContentLoaded => write!(f, "domcontentloaded"),
        }
    }
}

/// Options for bounded waits
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get the timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get the polling interval as a [`Duration`]
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Options for navigation waits
#[derive(Debug, Clone)]
pub struct NavigationOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Load milestone to wait for
    pub wait_until: LoadState,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            wait_until: LoadState::Load,
        }
    }
}

impl NavigationOptions {
    /// Create new navigation options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that wait only for `DOMContentLoaded`
    #[must_use]
    pub fn dom_content_loaded() -> Self {
        Self {
            wait_until: LoadState::DomContentLoaded,
            ..Self::default()
        }
    }

    /// Set the timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the load milestone
    #[must_use]
    pub const fn with_wait_until(mut self, state: LoadState) -> Self {
        self.wait_until = state;
        self
    }
}

/// Outcome of a [`poll_until`] call
#[derive(Debug, Clone)]
pub struct Polled<T> {
    /// Last value observed before returning
    pub value: T,
    /// Whether the predicate accepted the value
    pub satisfied: bool,
    /// Time spent polling
    pub elapsed: Duration,
}

/// Poll `sample` until `accept` holds or the timeout elapses.
///
/// Returns the last observed value either way; `satisfied` records whether
/// the predicate was met. Sampling errors are propagated immediately.
///
/// # Errors
///
/// Returns the first error produced by `sample`.
pub async fn poll_until<T, F, Fut, P>(
    mut sample: F,
    accept: P,
    options: &WaitOptions,
) -> PaseoResult<Polled<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PaseoResult<T>>,
    P: Fn(&T) -> bool,
{
    let start = Instant::now();
    loop {
        let value = sample().await?;
        if accept(&value) {
            return Ok(Polled {
                value,
                satisfied: true,
                elapsed: start.elapsed(),
            });
        }
        if start.elapsed() >= options.timeout() {
            return Ok(Polled {
                value,
                satisfied: false,
                elapsed: start.elapsed(),
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Poll until `accept` holds, converting an unsatisfied poll into
/// [`PaseoError::Timeout`].
///
/// # Errors
///
/// Returns `Timeout` when the deadline passes, or the first sampling error.
pub async fn wait_until<T, F, Fut, P>(
    sample: F,
    accept: P,
    options: &WaitOptions,
    waiting_for: &str,
) -> PaseoResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PaseoResult<T>>,
    P: Fn(&T) -> bool,
{
    let polled = poll_until(sample, accept, options).await?;
    if polled.satisfied {
        Ok(polled.value)
    } else {
        Err(PaseoError::Timeout {
            ms: options.timeout_ms,
            waiting_for: waiting_for.to_string(),
        })
    }
}

/// Suspend for a fixed duration.
///
/// Discouraged outside of specs that observe wall-clock behavior (live
/// ticker updates); prefer a wait condition.
pub async fn pause(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod load_state_tests {
        use super::*;

        #[test]
        fn test_load_satisfied_only_by_complete() {
            assert!(LoadState::Load.is_satisfied_by("complete"));
            assert!(!LoadState::Load.is_satisfied_by("interactive"));
            assert!(!LoadState::Load.is_satisfied_by("loading"));
        }

        #[test]
        fn test_dom_content_loaded_satisfied_by_interactive_or_complete() {
            assert!(LoadState::DomContentLoaded.is_satisfied_by("interactive"));
            assert!(LoadState::DomContentLoaded.is_satisfied_by("complete"));
            assert!(!LoadState::DomContentLoaded.is_satisfied_by("loading"));
        }

        #[test]
        fn test_display() {
            assert_eq!(format!("{}", LoadState::Load), "load");
            assert_eq!(format!("{}", LoadState::DomContentLoaded), "domcontentloaded");
        }
    }

    mod options_tests {
        use super::*;

        #[test]
        fn test_wait_options_defaults() {
            let opts = WaitOptions::new();
            assert_eq!(opts.timeout_ms, DEFAULT_TIMEOUT_MS);
            assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        }

        #[test]
        fn test_wait_options_chained() {
            let opts = WaitOptions::new().with_timeout(8_000).with_poll_interval(10);
            assert_eq!(opts.timeout(), Duration::from_millis(8_000));
            assert_eq!(opts.poll_interval(), Duration::from_millis(10));
        }

        #[test]
        fn test_navigation_options_defaults() {
            let opts = NavigationOptions::new();
            assert_eq!(opts.timeout_ms, DEFAULT_NAVIGATION_TIMEOUT_MS);
            assert_eq!(opts.wait_until, LoadState::Load);
        }

        #[test]
        fn test_navigation_options_dom_content_loaded() {
            let opts = NavigationOptions::dom_content_loaded();
            assert_eq!(opts.wait_until, LoadState::DomContentLoaded);
            assert_eq!(opts.timeout_ms, DEFAULT_NAVIGATION_TIMEOUT_MS);
        }
    }

    mod poll_tests {
        use super::*;
        use std::sync::atomic::{AtomicUsize, Ordering};

        #[tokio::test]
        async fn test_poll_until_immediate_success() {
            let opts = WaitOptions::new().with_timeout(100);
            let polled = poll_until(|| async { Ok(7usize) }, |n| *n == 7, &opts)
                .await
                .unwrap();
            assert!(polled.satisfied);
            assert_eq!(polled.value, 7);
        }

        #[tokio::test]
        async fn test_poll_until_returns_last_observed_on_timeout() {
            let counter = AtomicUsize::new(0);
            let counter_ref = &counter;
            let opts = WaitOptions::new().with_timeout(100).with_poll_interval(10);
            let polled = poll_until(
                move || async move { Ok(counter_ref.fetch_add(1, Ordering::SeqCst)) },
                |n| *n == usize::MAX,
                &opts,
            )
            .await
            .unwrap();
            assert!(!polled.satisfied);
            // The last sample is handed back, not a default.
            assert!(polled.value > 0);
        }

        #[tokio::test]
        async fn test_poll_until_eventually_satisfied() {
            let counter = AtomicUsize::new(0);
            let counter_ref = &counter;
            let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(5);
            let polled = poll_until(
                move || async move { Ok(counter_ref.fetch_add(1, Ordering::SeqCst)) },
                |n| *n >= 3,
                &opts,
            )
            .await
            .unwrap();
            assert!(polled.satisfied);
            assert_eq!(polled.value, 3);
        }

        #[tokio::test]
        async fn test_poll_until_propagates_sample_error() {
            let opts = WaitOptions::new().with_timeout(100);
            let result: PaseoResult<Polled<usize>> = poll_until(
                || async {
                    Err(PaseoError::Eval {
                        message: "boom".to_string(),
                    })
                },
                |_| true,
                &opts,
            )
            .await;
            assert!(matches!(result, Err(PaseoError::Eval { .. })));
        }

        #[tokio::test]
        async fn test_wait_until_timeout_is_typed() {
            let opts = WaitOptions::new().with_timeout(50).with_poll_interval(10);
            let result = wait_until(|| async { Ok(false) }, |v| *v, &opts, "a miracle").await;
            match result {
                Err(PaseoError::Timeout { ms, waiting_for }) => {
                    assert_eq!(ms, 50);
                    assert_eq!(waiting_for, "a miracle");
                }
                other => panic!("expected timeout, got {other:?}"),
            }
        }
    }
}
