//! Bounded readiness polling. Every wait in the crate goes through here;
//! there are no fixed post-action sleeps.

use crate::driver::PageDriver;
use healthie_core::{config::Timeouts, Error, Result};
use tokio::time::Instant;

/// Which of two alternative markers appeared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FirstReady {
    Primary,
    Secondary,
}

/// Poll until `selector` is interactable, bounded by the field-readiness
/// timeout.
pub(crate) async fn for_selector(
    page: &dyn PageDriver,
    selector: &str,
    timeouts: &Timeouts,
) -> Result<()> {
    let deadline = Instant::now() + timeouts.field_ready;

    loop {
        if page.probe(selector).await? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(Error::Timeout {
                what: format!("element {selector}"),
                waited: timeouts.field_ready,
            });
        }
        tokio::time::sleep(timeouts.poll_interval).await;
    }
}

/// Wait for `selector` to become interactable, then fill it.
pub(crate) async fn fill_when_ready(
    page: &dyn PageDriver,
    selector: &str,
    value: &str,
    timeouts: &Timeouts,
) -> Result<()> {
    for_selector(page, selector, timeouts).await?;
    page.fill(selector, value).await
}

/// Poll until one of two markers appears, bounded by the post-submit
/// deadline. Used where a submit resolves to either a success or a failure
/// element.
pub(crate) async fn for_either(
    page: &dyn PageDriver,
    primary: &str,
    secondary: &str,
    what: &str,
    timeouts: &Timeouts,
) -> Result<FirstReady> {
    let deadline = Instant::now() + timeouts.post_submit;

    loop {
        if page.probe(primary).await? {
            return Ok(FirstReady::Primary);
        }
        if page.probe(secondary).await? {
            return Ok(FirstReady::Secondary);
        }
        if Instant::now() >= deadline {
            return Err(Error::Timeout {
                what: what.to_string(),
                waited: timeouts.post_submit,
            });
        }
        tokio::time::sleep(timeouts.poll_interval).await;
    }
}

/// Poll the page URL until `done` accepts it, bounded by the post-submit
/// deadline. Returns the accepted URL.
pub(crate) async fn for_url<F>(
    page: &dyn PageDriver,
    what: &str,
    timeouts: &Timeouts,
    mut done: F,
) -> Result<String>
where
    F: FnMut(&str) -> bool,
{
    let deadline = Instant::now() + timeouts.post_submit;

    loop {
        let url = page.current_url().await?;
        if done(&url) {
            return Ok(url);
        }
        if Instant::now() >= deadline {
            return Err(Error::Timeout {
                what: what.to_string(),
                waited: timeouts.post_submit,
            });
        }
        tokio::time::sleep(timeouts.poll_interval).await;
    }
}
