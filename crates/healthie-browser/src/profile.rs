use healthie_core::{Error, Result};
use std::path::{Path, PathBuf};

/// State file Chrome writes at the root of every user-data directory.
const CHROME_STATE_FILE: &str = "Local State";

/// Cookie store inside the default profile; its presence means a previous
/// run left login state behind.
const COOKIE_STORE: [&str; 2] = ["Default", "Cookies"];

/// Chrome user-data directory backing a session. Temporary profiles are
/// wiped on drop; persistent ones keep cookies between runs so a Healthie
/// login can survive a restart.
pub struct SessionProfile {
    path: PathBuf,
    is_temporary: bool,
}

impl SessionProfile {
    /// Create a throwaway profile, deleted when the profile is dropped.
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("healthie-session-")
            .tempdir()
            .map_err(|e| Error::Browser(e.to_string()))?;

        Ok(Self {
            path: dir.keep(),
            is_temporary: true,
        })
    }

    /// Create or reuse a persistent profile at the given path.
    ///
    /// A missing path is created empty for Chrome to initialize. An existing
    /// non-empty directory must already be a Chrome user-data directory;
    /// refusing anything else keeps a mistyped path from being handed to
    /// Chrome and filled with profile files.
    pub fn persistent(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(|e| Error::Browser(e.to_string()))?;
            return Ok(Self {
                path,
                is_temporary: false,
            });
        }

        if !path.is_dir() {
            return Err(Error::InvalidConfig(format!(
                "profile path is not a directory: {}",
                path.display()
            )));
        }

        let is_empty = std::fs::read_dir(&path)
            .map(|mut entries| entries.next().is_none())
            .map_err(|e| Error::Browser(e.to_string()))?;
        if !is_empty && !path.join(CHROME_STATE_FILE).exists() {
            return Err(Error::InvalidConfig(format!(
                "not a Chrome user-data directory: {}",
                path.display()
            )));
        }

        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }

    /// Whether a previous run left cookies behind. Chrome may then come up
    /// already authenticated and the login flow will see a post-login URL
    /// immediately.
    pub fn has_saved_state(&self) -> bool {
        COOKIE_STORE
            .iter()
            .fold(self.path.clone(), |p, part| p.join(part))
            .exists()
    }
}

impl Drop for SessionProfile {
    fn drop(&mut self) {
        if self.is_temporary && self.path.exists() {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}
