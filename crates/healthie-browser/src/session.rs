use crate::driver::{BrowserDriver, BrowserHandle, PageDriver};
use crate::wait;
use healthie_core::{Credentials, Error, HealthieConfig, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// One authenticated connection to Healthie: a running browser plus the
/// page that holds the login state. Cheap to clone; clones share the same
/// underlying browser.
#[derive(Clone)]
pub struct Session {
    browser: Arc<dyn BrowserHandle>,
    page: Arc<dyn PageDriver>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn page(&self) -> &dyn PageDriver {
        self.page.as_ref()
    }

    async fn close(&self) -> Result<()> {
        self.browser.close().await
    }
}

/// Acquires and caches one authenticated session per manager, created
/// lazily on first use and reused thereafter.
///
/// Construct one at the top of the program and pass it to whatever needs
/// Healthie access; there is no process-global state.
pub struct SessionManager {
    driver: Arc<dyn BrowserDriver>,
    config: HealthieConfig,
    slot: Mutex<Option<Session>>,
}

impl SessionManager {
    pub fn new(driver: Arc<dyn BrowserDriver>, config: HealthieConfig) -> Self {
        Self {
            driver,
            config,
            slot: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &HealthieConfig {
        &self.config
    }

    /// Return the cached session, logging in first if there is none.
    ///
    /// The slot lock is held across the whole login, so concurrent first
    /// callers produce exactly one login flow: one caller performs it, the
    /// rest block on the lock and then find the cached session. A failed
    /// login leaves the slot empty and the next call retries from scratch.
    pub async fn acquire(&self) -> Result<Session> {
        let mut slot = self.slot.lock().await;

        if let Some(session) = slot.as_ref() {
            tracing::info!("Reusing existing Healthie session");
            return Ok(session.clone());
        }

        // Resolve credentials before touching the browser; there is nothing
        // useful to attempt without them.
        let credentials = self.config.credentials.resolve()?;

        let session = self.login(&credentials).await?;
        *slot = Some(session.clone());
        Ok(session)
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        tracing::info!("Logging into Healthie...");
        let (browser, page) = self.driver.open().await?;

        match self.run_login_steps(page.as_ref(), credentials).await {
            Ok(()) => {
                tracing::info!("Successfully logged into Healthie");
                Ok(Session { browser, page })
            }
            Err(err) => {
                // Don't leak the browser on a failed attempt.
                if let Err(close_err) = browser.close().await {
                    tracing::warn!("Failed to close browser after login error: {close_err}");
                }
                Err(err)
            }
        }
    }

    async fn run_login_steps(&self, page: &dyn PageDriver, credentials: &Credentials) -> Result<()> {
        let selectors = &self.config.selectors;
        let timeouts = &self.config.timeouts;
        let endpoints = &self.config.endpoints;

        page.goto(&endpoints.sign_in_url).await?;

        wait::fill_when_ready(page, &selectors.email_input, &credentials.email, timeouts).await?;
        wait::fill_when_ready(page, &selectors.password_input, &credentials.password, timeouts)
            .await?;

        wait::for_selector(page, &selectors.login_submit, timeouts).await?;
        page.click(&selectors.login_submit).await?;

        // Success signal: the URL leaves the sign-in route. Healthie gives
        // no explicit marker, so this heuristic is the best available.
        let marker = endpoints.sign_in_marker.as_str();
        match wait::for_url(page, "post-login navigation", timeouts, |url| {
            !url.contains(marker)
        })
        .await
        {
            Ok(url) => {
                tracing::debug!(%url, "Left the sign-in page");
                Ok(())
            }
            Err(Error::Timeout { .. }) => {
                let url = page.current_url().await?;
                Err(Error::AuthenticationFailed { url })
            }
            Err(err) => Err(err),
        }
    }

    /// Close the browser and return to the no-session state. Idempotent;
    /// the next `acquire` performs a fresh login.
    pub async fn close(&self) -> Result<()> {
        let mut slot = self.slot.lock().await;
        if let Some(session) = slot.take() {
            session.close().await?;
        }
        Ok(())
    }

    /// Drop the cached session without surfacing shutdown errors. For
    /// callers that observed a login redirect and want the next `acquire`
    /// to re-authenticate.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        if let Some(session) = slot.take() {
            if let Err(err) = session.close().await {
                tracing::warn!("Failed to close invalidated session: {err}");
            }
        }
    }
}

/// Fail with `SessionExpired` when an established session has bounced back
/// to the sign-in route.
pub(crate) async fn ensure_signed_in(
    page: &dyn PageDriver,
    sign_in_marker: &str,
) -> Result<()> {
    let url = page.current_url().await?;
    if url.contains(sign_in_marker) {
        tracing::warn!(%url, "Session redirected to sign-in; needs re-authentication");
        return Err(Error::SessionExpired);
    }
    Ok(())
}
