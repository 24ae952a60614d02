#![allow(dead_code)]

use async_trait::async_trait;
use healthie_browser::{BrowserDriver, BrowserHandle, PageDriver};
use healthie_core::{config::Timeouts, CredentialSource, Credentials, HealthieConfig, Result};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared state behind the fake driver: a scripted page plus a log of every
/// call the code under test makes.
#[derive(Default)]
pub struct FakeState {
    url: Mutex<String>,
    calls: Mutex<Vec<String>>,
    launches: AtomicUsize,
    closes: AtomicUsize,
    post_login_url: Mutex<String>,
    login_submit: Mutex<String>,
    not_ready_for: Mutex<HashMap<String, usize>>,
    never_ready: Mutex<HashSet<String>>,
    redirects: Mutex<HashMap<String, String>>,
    attributes: Mutex<HashMap<(String, String), String>>,
    texts: Mutex<HashMap<String, String>>,
}

impl FakeState {
    fn log(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }
}

/// Scriptable in-memory stand-in for a real browser. Clicking the login
/// submit control moves the page to the configured post-login URL, which is
/// how tests steer authentication success or failure.
pub struct FakeBrowser {
    state: Arc<FakeState>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        let state = FakeState::default();
        *state.post_login_url.lock().unwrap() =
            "https://secure.gethealthie.com/providers/home".to_string();
        *state.login_submit.lock().unwrap() = r#"button[type="submit"]"#.to_string();

        Self {
            state: Arc::new(state),
        }
    }

    /// URL the page lands on after the login submit is clicked.
    pub fn logs_in_to(&self, url: &str) {
        *self.state.post_login_url.lock().unwrap() = url.to_string();
    }

    /// Make `selector` report not-ready for the first `polls` probes.
    pub fn delay_ready(&self, selector: &str, polls: usize) {
        self.state
            .not_ready_for
            .lock()
            .unwrap()
            .insert(selector.to_string(), polls);
    }

    /// Make `selector` never become ready.
    pub fn never_ready(&self, selector: &str) {
        self.state
            .never_ready
            .lock()
            .unwrap()
            .insert(selector.to_string());
    }

    /// Redirect navigations to `from` onto `to` (login-bounce simulation).
    pub fn redirect(&self, from: &str, to: &str) {
        self.state
            .redirects
            .lock()
            .unwrap()
            .insert(from.to_string(), to.to_string());
    }

    pub fn set_attribute(&self, selector: &str, name: &str, value: &str) {
        self.state
            .attributes
            .lock()
            .unwrap()
            .insert((selector.to_string(), name.to_string()), value.to_string());
    }

    pub fn set_text(&self, selector: &str, value: &str) {
        self.state
            .texts
            .lock()
            .unwrap()
            .insert(selector.to_string(), value.to_string());
    }

    pub fn launches(&self) -> usize {
        self.state.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.state.closes.load(Ordering::SeqCst)
    }

    /// Number of logged calls starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.state
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BrowserDriver for FakeBrowser {
    async fn open(&self) -> Result<(Arc<dyn BrowserHandle>, Arc<dyn PageDriver>)> {
        self.state.launches.fetch_add(1, Ordering::SeqCst);
        *self.state.url.lock().unwrap() = "about:blank".to_string();

        Ok((
            Arc::new(FakeHandle {
                state: self.state.clone(),
            }),
            Arc::new(FakePage {
                state: self.state.clone(),
            }),
        ))
    }
}

struct FakeHandle {
    state: Arc<FakeState>,
}

#[async_trait]
impl BrowserHandle for FakeHandle {
    async fn close(&self) -> Result<()> {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FakePage {
    state: Arc<FakeState>,
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.state.log(format!("goto {url}"));
        let target = self
            .state
            .redirects
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| url.to_string());
        *self.state.url.lock().unwrap() = target;
        Ok(())
    }

    async fn probe(&self, selector: &str) -> Result<bool> {
        self.state.log(format!("probe {selector}"));

        if self.state.never_ready.lock().unwrap().contains(selector) {
            return Ok(false);
        }
        if let Some(remaining) = self
            .state
            .not_ready_for
            .lock()
            .unwrap()
            .get_mut(selector)
        {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.state.log(format!("fill {selector}={value}"));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.state.log(format!("click {selector}"));
        if *selector == *self.state.login_submit.lock().unwrap() {
            let post_login = self.state.post_login_url.lock().unwrap().clone();
            *self.state.url.lock().unwrap() = post_login;
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.state.url.lock().unwrap().clone())
    }

    async fn text(&self, selector: &str) -> Result<Option<String>> {
        Ok(self.state.texts.lock().unwrap().get(selector).cloned())
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        Ok(self
            .state
            .attributes
            .lock()
            .unwrap()
            .get(&(selector.to_string(), name.to_string()))
            .cloned())
    }
}

/// Config with injected credentials and timeouts short enough for tests.
pub fn test_config() -> HealthieConfig {
    HealthieConfig {
        credentials: CredentialSource::Static(
            Credentials::new("user@example.com", "secret").unwrap(),
        ),
        timeouts: Timeouts {
            field_ready: Duration::from_millis(200),
            post_submit: Duration::from_millis(100),
            poll_interval: Duration::from_millis(5),
        },
        ..HealthieConfig::default()
    }
}

/// Config whose credential source resolves to nothing.
pub fn config_without_credentials() -> HealthieConfig {
    HealthieConfig {
        credentials: CredentialSource::Static(Credentials {
            email: String::new(),
            password: String::new(),
        }),
        ..test_config()
    }
}
