use crate::{Error, Result};
use std::time::Duration;
use url::Url;

/// Environment variable holding the Healthie account email.
pub const ENV_EMAIL: &str = "HEALTHIE_EMAIL";
/// Environment variable holding the Healthie account password.
pub const ENV_PASSWORD: &str = "HEALTHIE_PASSWORD";

/// Placeholder expanded into the patient id in URL templates.
const PATIENT_ID_PLACEHOLDER: &str = "{patient_id}";

/// Healthie account credentials. Held only for the duration of a login
/// attempt, never stored on the session.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials, rejecting empty values up front.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let email = email.into();
        let password = password.into();

        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(Error::MissingCredentials);
        }

        Ok(Self { email, password })
    }

    /// Read credentials from `HEALTHIE_EMAIL` / `HEALTHIE_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        let email = std::env::var(ENV_EMAIL).map_err(|_| Error::MissingCredentials)?;
        let password = std::env::var(ENV_PASSWORD).map_err(|_| Error::MissingCredentials)?;
        Self::new(email, password)
    }
}

// Keep the password out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where credentials come from at login time. `Env` re-reads the process
/// environment on every fresh login attempt; `Static` lets callers (and
/// tests) inject credentials directly.
#[derive(Debug, Clone, Default)]
pub enum CredentialSource {
    #[default]
    Env,
    Static(Credentials),
}

impl CredentialSource {
    pub fn resolve(&self) -> Result<Credentials> {
        match self {
            CredentialSource::Env => Credentials::from_env(),
            CredentialSource::Static(credentials) => {
                Credentials::new(credentials.email.clone(), credentials.password.clone())
            }
        }
    }
}

/// URLs of the Healthie pages the flows drive.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Sign-in page opened for a fresh login.
    pub sign_in_url: String,
    /// Substring that identifies the sign-in route in a page URL. Seeing it
    /// after submit means authentication failed; seeing it after navigating
    /// an established session means the session expired.
    pub sign_in_marker: String,
    /// Patient search page.
    pub patient_search_url: String,
    /// Appointment form URL template containing `{patient_id}`.
    pub appointment_form_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sign_in_url: "https://secure.gethealthie.com/users/sign_in".to_string(),
            sign_in_marker: "sign_in".to_string(),
            patient_search_url: "https://secure.gethealthie.com/patients".to_string(),
            appointment_form_url:
                "https://secure.gethealthie.com/patients/{patient_id}/appointments/new".to_string(),
        }
    }
}

impl Endpoints {
    /// Expand the appointment form template for a patient.
    pub fn appointment_form_for(&self, patient_id: &str) -> String {
        self.appointment_form_url
            .replace(PATIENT_ID_PLACEHOLDER, patient_id)
    }

    /// Validate that every endpoint parses as a URL and the appointment
    /// template carries the patient id placeholder.
    pub fn validate(&self) -> Result<()> {
        for raw in [&self.sign_in_url, &self.patient_search_url] {
            Url::parse(raw).map_err(|e| Error::InvalidConfig(format!("{raw}: {e}")))?;
        }

        if !self.appointment_form_url.contains(PATIENT_ID_PLACEHOLDER) {
            return Err(Error::InvalidConfig(format!(
                "appointment form URL must contain {PATIENT_ID_PLACEHOLDER}: {}",
                self.appointment_form_url
            )));
        }

        Ok(())
    }
}

/// CSS selectors for every element the flows touch. The sign-in defaults
/// match Healthie's current markup; everything is overridable so a UI change
/// is a configuration fix, not a code change.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub email_input: String,
    pub password_input: String,
    pub login_submit: String,

    pub patient_search_input: String,
    pub patient_search_submit: String,
    pub patient_result_row: String,
    pub patient_empty_marker: String,
    /// Attribute on the result row carrying the patient id.
    pub patient_id_attr: String,
    pub patient_name_cell: String,
    pub patient_dob_cell: String,

    pub appointment_date_input: String,
    pub appointment_time_input: String,
    pub appointment_submit: String,
    pub appointment_confirmation: String,
    pub appointment_rejection: String,
    /// Attribute on the confirmation element carrying the appointment id.
    pub appointment_id_attr: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            email_input: r#"input[name="email"]"#.to_string(),
            password_input: r#"input[name="password"]"#.to_string(),
            login_submit: r#"button[type="submit"]"#.to_string(),

            patient_search_input: r#"input[name="patient_search"]"#.to_string(),
            patient_search_submit: r#"button[type="submit"]"#.to_string(),
            patient_result_row: ".patient-search-result".to_string(),
            patient_empty_marker: ".patient-search-empty".to_string(),
            patient_id_attr: "data-patient-id".to_string(),
            patient_name_cell: ".patient-search-result .patient-name".to_string(),
            patient_dob_cell: ".patient-search-result .patient-dob".to_string(),

            appointment_date_input: r#"input[name="date"]"#.to_string(),
            appointment_time_input: r#"input[name="time"]"#.to_string(),
            appointment_submit: r#"button[type="submit"]"#.to_string(),
            appointment_confirmation: ".appointment-confirmation".to_string(),
            appointment_rejection: ".appointment-error".to_string(),
            appointment_id_attr: "data-appointment-id".to_string(),
        }
    }
}

/// Bounds for every wait the flows perform. There are no fixed sleeps:
/// readiness is always a poll loop capped by one of these.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// How long to wait for an input to become interactive before filling it.
    pub field_ready: Duration,
    /// How long to wait after a submit for the page to reach a recognizable
    /// state (URL change, confirmation marker, ...).
    pub post_submit: Duration,
    /// Interval between readiness checks.
    pub poll_interval: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            field_ready: Duration::from_secs(30),
            post_submit: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// Complete configuration for a Healthie automation session.
#[derive(Debug, Clone, Default)]
pub struct HealthieConfig {
    pub credentials: CredentialSource,
    pub endpoints: Endpoints,
    pub selectors: Selectors,
    pub timeouts: Timeouts,
}

impl HealthieConfig {
    pub fn validate(&self) -> Result<()> {
        self.endpoints.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(Error::MissingCredentials)
        ));
        assert!(matches!(
            Credentials::new("user@example.com", ""),
            Err(Error::MissingCredentials)
        ));
        assert!(matches!(
            Credentials::new("   ", "secret"),
            Err(Error::MissingCredentials)
        ));
    }

    #[test]
    fn test_static_source_resolves() {
        let source = CredentialSource::Static(
            Credentials::new("user@example.com", "secret").unwrap(),
        );

        let credentials = source.resolve().unwrap();
        assert_eq!(credentials.email, "user@example.com");
        assert_eq!(credentials.password, "secret");
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials::new("user@example.com", "hunter2").unwrap();
        let printed = format!("{credentials:?}");

        assert!(printed.contains("user@example.com"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_appointment_form_template_expands() {
        let endpoints = Endpoints::default();
        let url = endpoints.appointment_form_for("12345");

        assert_eq!(
            url,
            "https://secure.gethealthie.com/patients/12345/appointments/new"
        );
    }

    #[test]
    fn test_validate_rejects_template_without_placeholder() {
        let endpoints = Endpoints {
            appointment_form_url: "https://example.com/appointments/new".to_string(),
            ..Endpoints::default()
        };

        assert!(matches!(
            endpoints.validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_malformed_url() {
        let endpoints = Endpoints {
            sign_in_url: "not a url".to_string(),
            ..Endpoints::default()
        };

        assert!(endpoints.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(HealthieConfig::default().validate().is_ok());
    }
}
