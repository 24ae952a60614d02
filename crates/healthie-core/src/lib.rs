pub mod config;
pub mod error;
pub mod records;

pub use config::{Credentials, CredentialSource, Endpoints, HealthieConfig, Selectors, Timeouts};
pub use error::{Error, Result};
pub use records::{AppointmentRecord, BookingOutcome, PatientRecord};
