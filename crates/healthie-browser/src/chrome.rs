use crate::driver::{BrowserDriver, BrowserHandle, PageDriver};
use crate::profile::SessionProfile;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use healthie_core::{Error, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

fn cdp(err: CdpError) -> Error {
    Error::Browser(err.to_string())
}

/// Runs against a found element to decide whether it can actually be
/// interacted with: enabled, not hidden by CSS, and laid out with a
/// non-empty box.
const IS_INTERACTABLE_JS: &str = r#"
function() {
    if (this.disabled) return false;
    const style = window.getComputedStyle(this);
    if (style.display === 'none' || style.visibility === 'hidden') return false;
    const rect = this.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
}"#;

/// Interpret the remote evaluation result; anything but an explicit `true`
/// (exception, missing value, non-boolean) counts as not ready.
fn interactable_from(value: Option<&serde_json::Value>) -> bool {
    value.and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Chrome-backed browser driver. Each `open` launches a fresh headless
/// Chrome against this driver's profile directory, so one driver backs one
/// running browser at a time.
pub struct ChromeBrowser {
    headless: bool,
    profile: SessionProfile,
}

impl ChromeBrowser {
    /// Driver with a throwaway profile, wiped when the driver is dropped.
    pub fn new(headless: bool) -> Result<Self> {
        Ok(Self {
            headless,
            profile: SessionProfile::temporary()?,
        })
    }

    /// Driver over an existing profile directory.
    pub fn with_profile(headless: bool, profile: SessionProfile) -> Self {
        Self { headless, profile }
    }
}

#[async_trait]
impl BrowserDriver for ChromeBrowser {
    async fn open(&self) -> Result<(Arc<dyn BrowserHandle>, Arc<dyn PageDriver>)> {
        let mut builder = BrowserConfig::builder().user_data_dir(self.profile.path());
        if !self.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(Error::Browser)?;

        if self.profile.has_saved_state() {
            tracing::debug!("Profile has saved login state; Chrome may already be authenticated");
        }
        tracing::debug!("Launching Chrome");
        let (browser, mut handler) = Browser::launch(config).await.map_err(cdp)?;

        // The handler task must drain CDP protocol messages for any browser
        // command to make progress.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    tracing::debug!("CDP handler event error (continuing): {err}");
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(cdp)?;
        tracing::debug!("Chrome ready");

        Ok((
            Arc::new(ChromeHandle {
                browser: Mutex::new(browser),
            }),
            Arc::new(ChromePage { page }),
        ))
    }
}

struct ChromeHandle {
    browser: Mutex<Browser>,
}

#[async_trait]
impl BrowserHandle for ChromeHandle {
    async fn close(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        browser.close().await.map_err(cdp)?;
        let _ = browser.wait().await;
        tracing::debug!("Chrome closed");
        Ok(())
    }
}

struct ChromePage {
    page: Page,
}

#[async_trait]
impl PageDriver for ChromePage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await.map_err(cdp)?;
        Ok(())
    }

    async fn probe(&self, selector: &str) -> Result<bool> {
        // find_element fails while the element is not yet in the DOM;
        // absence is the "not ready" signal, not an error.
        let element = match self.page.find_element(selector).await {
            Ok(element) => element,
            Err(_) => return Ok(false),
        };

        // Present is not enough: a rendered-but-hidden or disabled input
        // must keep the wait going rather than get filled.
        let evaluated = element
            .call_js_fn(IS_INTERACTABLE_JS, false)
            .await
            .map_err(cdp)?;
        Ok(interactable_from(evaluated.result.value.as_ref()))
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let element = self.page.find_element(selector).await.map_err(cdp)?;
        element.click().await.map_err(cdp)?;
        element.type_str(value).await.map_err(cdp)?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self.page.find_element(selector).await.map_err(cdp)?;
        element.click().await.map_err(cdp)?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let url = self.page.url().await.map_err(cdp)?;
        Ok(url.unwrap_or_default())
    }

    async fn text(&self, selector: &str) -> Result<Option<String>> {
        let element = match self.page.find_element(selector).await {
            Ok(element) => element,
            Err(_) => return Ok(None),
        };
        let text = element.inner_text().await.map_err(cdp)?;
        Ok(text.map(|t| t.trim().to_string()))
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let element = match self.page.find_element(selector).await {
            Ok(element) => element,
            Err(_) => return Ok(None),
        };
        element.attribute(name).await.map_err(cdp)
    }
}
