//! Retrying assertions over locators.
//!
//! Every expectation polls the live DOM until the condition holds or the
//! locator's timeout elapses, then fails with an expected/actual message.
//! This is the only mechanism by which a spec reports a behavioral
//! regression in a target application.

use regex::Regex;

use crate::locator::Locator;
use crate::result::{PaseoError, PaseoResult};
use crate::text::normalize_text;
use crate::wait::poll_until;

/// Start an expectation over a locator
#[must_use]
pub fn expect(locator: &Locator) -> Expect<'_> {
    Expect { locator }
}

/// Assertion builder; every method retries until it passes or the
/// locator's timeout elapses
#[derive(Debug, Clone, Copy)]
pub struct Expect<'a> {
    locator: &'a Locator,
}

impl Expect<'_> {
    fn fail(&self, message: String) -> PaseoError {
        PaseoError::Assertion { message }
    }

    /// The element's text equals `expected` (whitespace-normalized)
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the condition never holds.
    pub async fn to_have_text(&self, expected: &str) -> PaseoResult<()> {
        let want = normalize_text(expected);
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.try_text_content().await },
            |actual: &Option<String>| actual.as_deref().is_some_and(|a| normalize_text(a) == want),
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!(
                "expected {} to have text {expected:?}, last saw {:?}",
                locator.selector(),
                polled.value
            )))
        }
    }

    /// The element's text contains `needle` (whitespace-normalized)
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the condition never holds.
    pub async fn to_contain_text(&self, needle: &str) -> PaseoResult<()> {
        let want = normalize_text(needle);
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.try_text_content().await },
            |actual: &Option<String>| {
                actual
                    .as_deref()
                    .is_some_and(|a| normalize_text(a).contains(&want))
            },
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!(
                "expected {} to contain text {needle:?}, last saw {:?}",
                locator.selector(),
                polled.value
            )))
        }
    }

    /// Exactly `expected` elements match
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the condition never holds.
    pub async fn to_have_count(&self, expected: usize) -> PaseoResult<()> {
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.count().await },
            |actual| *actual == expected,
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!(
                "expected {} to match {expected} elements, last saw {}",
                locator.selector(),
                polled.value
            )))
        }
    }

    /// The element is rendered visible
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the condition never holds.
    pub async fn to_be_visible(&self) -> PaseoResult<()> {
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.is_visible().await },
            |v| *v,
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!("expected {} to be visible", locator.selector())))
        }
    }

    /// The element is hidden or detached
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the condition never holds.
    pub async fn to_be_hidden(&self) -> PaseoResult<()> {
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.is_visible().await },
            |v| !*v,
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!("expected {} to be hidden", locator.selector())))
        }
    }

    /// The input's value equals `expected`
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the condition never holds.
    pub async fn to_have_value(&self, expected: &str) -> PaseoResult<()> {
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.try_input_value().await },
            |actual: &Option<String>| actual.as_deref() == Some(expected),
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!(
                "expected {} to have value {expected:?}, last saw {:?}",
                locator.selector(),
                polled.value
            )))
        }
    }

    /// The element is the document's active element
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the condition never holds.
    pub async fn to_be_focused(&self) -> PaseoResult<()> {
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.try_is_focused().await },
            |actual: &Option<bool>| *actual == Some(true),
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!("expected {} to be focused", locator.selector())))
        }
    }

    /// The checkbox is checked
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the condition never holds.
    pub async fn to_be_checked(&self) -> PaseoResult<()> {
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.try_is_checked().await },
            |actual: &Option<bool>| *actual == Some(true),
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!("expected {} to be checked", locator.selector())))
        }
    }

    /// The checkbox is present and unchecked
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the condition never holds.
    pub async fn to_not_be_checked(&self) -> PaseoResult<()> {
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.try_is_checked().await },
            |actual: &Option<bool>| *actual == Some(false),
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!("expected {} to be unchecked", locator.selector())))
        }
    }

    /// The element is enabled (not `disabled`)
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the condition never holds.
    pub async fn to_be_enabled(&self) -> PaseoResult<()> {
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.try_is_enabled().await },
            |actual: &Option<bool>| *actual == Some(true),
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!("expected {} to be enabled", locator.selector())))
        }
    }

    /// The element's `className` matches `pattern`
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the pattern is invalid or the condition
    /// never holds.
    pub async fn to_have_class(&self, pattern: &str) -> PaseoResult<()> {
        let re = Regex::new(pattern).map_err(|e| {
            self.fail(format!("invalid class pattern {pattern:?}: {e}"))
        })?;
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.try_class_name().await },
            |actual: &Option<String>| actual.as_deref().is_some_and(|c| re.is_match(c)),
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!(
                "expected {} to have class matching {pattern:?}, last saw {:?}",
                locator.selector(),
                polled.value
            )))
        }
    }

    /// The element exists and its `className` does not match `pattern`
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the pattern is invalid or the condition
    /// never holds.
    pub async fn to_not_have_class(&self, pattern: &str) -> PaseoResult<()> {
        let re = Regex::new(pattern).map_err(|e| {
            self.fail(format!("invalid class pattern {pattern:?}: {e}"))
        })?;
        let locator = self.locator;
        let polled = poll_until(
            move || async move { locator.try_class_name().await },
            |actual: &Option<String>| actual.as_deref().is_some_and(|c| !re.is_match(c)),
            locator.wait_options(),
        )
        .await?;
        if polled.satisfied {
            Ok(())
        } else {
            Err(self.fail(format!(
                "expected {} to have class not matching {pattern:?}, last saw {:?}",
                locator.selector(),
                polled.value
            )))
        }
    }
}
