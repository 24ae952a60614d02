use async_trait::async_trait;
use healthie_core::Result;
use std::sync::Arc;

/// Launches browser instances. The production implementation wraps Chrome
/// via CDP; tests substitute a fake that records every call.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Launch the browser and open a blank page.
    async fn open(&self) -> Result<(Arc<dyn BrowserHandle>, Arc<dyn PageDriver>)>;
}

/// Handle to a running browser process, kept only so the session can shut
/// it down.
#[async_trait]
pub trait BrowserHandle: Send + Sync {
    async fn close(&self) -> Result<()>;
}

/// Operations the flows perform against a page. Every selector comes from
/// configuration; drivers never interpret them beyond passing them to the
/// browser.
///
/// `probe` is deliberately non-blocking: bounded waiting lives in one place
/// (the flow side) so a driver cannot reintroduce fixed sleeps.
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    /// Whether the first element matching `selector` is present and
    /// interactable right now.
    async fn probe(&self, selector: &str) -> Result<bool>;

    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    /// Text content of the first match, `None` when the element is absent.
    async fn text(&self, selector: &str) -> Result<Option<String>>;

    /// Attribute value of the first match, `None` when the element or the
    /// attribute is absent.
    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>>;
}
