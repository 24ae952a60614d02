use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HEALTHIE_EMAIL and HEALTHIE_PASSWORD must be set and non-empty")]
    MissingCredentials,

    #[error("Login did not leave the sign-in page (still at {url})")]
    AuthenticationFailed { url: String },

    #[error("Timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },

    #[error("Session expired: redirected back to the sign-in page")]
    SessionExpired,

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
