use anyhow::Result;
use healthie_browser::{ChromeBrowser, SessionManager, SessionProfile};
use healthie_core::HealthieConfig;
use std::path::PathBuf;
use std::sync::Arc;

pub mod appointment;
pub mod login;
pub mod patient;

/// Build a session manager over a real Chrome driver.
pub(crate) fn build_manager(headful: bool, profile: Option<PathBuf>) -> Result<SessionManager> {
    let config = HealthieConfig::default();
    config.validate()?;

    let headless = !headful;
    let browser = match profile {
        Some(path) => {
            println!("📁 Using profile: {}", path.display());
            ChromeBrowser::with_profile(headless, SessionProfile::persistent(path)?)
        }
        None => ChromeBrowser::new(headless)?,
    };

    Ok(SessionManager::new(Arc::new(browser), config))
}

/// Single-threaded commands still need a runtime for the browser driver.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
